//! HTTP request handlers

pub mod admin;
pub mod checkin;
pub mod events;
pub mod favorites;
pub mod registrations;
