pub mod event;

pub use event::{CalendarEvent, EventType, TaskStatus};
