pub mod api;
pub mod calendar;
pub mod render;
pub mod storage;
pub mod ui;

pub use calendar::{CalendarEvent, EventType, TaskStatus};
pub use ui::{CalendarView, ViewState};
