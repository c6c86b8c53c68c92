pub mod admin;
pub mod event;
pub mod mapper;

pub use admin::{Admin, AdminSummary, LoginRequest, LoginResponse};
pub use event::{CreateEvent, Event, EventChanges, EventStatus, UpdateDates};
pub use mapper::{from_storage, to_storage, EventRecord};
