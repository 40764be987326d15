//! Database repositories

pub mod event;
pub mod favorite;
pub mod registration;

pub use event::EventRepository;
pub use favorite::FavoriteRepository;
pub use registration::RegistrationRepository;
