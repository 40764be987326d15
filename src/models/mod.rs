//! Data models for the UniVibe event service

pub mod event;
pub mod favorite;
pub mod registration;
pub mod user;

pub use event::{
    CreateEventRequest, Event, EventCategory, EventFilter, EventStatus, EventSummary,
    EventVisibility, UpdateEventRequest,
};
pub use favorite::{EventFavorite, FavoriteToggle};
pub use registration::{
    JoinConfirmation, LeaveConfirmation, Registration, RegistrationStatus, UserEventStatus,
};
pub use user::{UserContext, UserEvent, UserRole};
