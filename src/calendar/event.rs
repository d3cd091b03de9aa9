use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A calendar entry as delivered by the backend. Tasks and meetings are
/// flattened into one shape; the grid builder never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub all_day: bool,
    pub event_type: EventType,
    pub status: Option<TaskStatus>,
    pub color: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Task,
    Meeting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Open,
    InProgress,
    Completed,
}

impl CalendarEvent {
    /// Calendar date of the event's start in the local timezone. Day
    /// bucketing compares these, never full timestamps.
    pub fn start_date_local(&self) -> NaiveDate {
        self.start_time.with_timezone(&Local).date_naive()
    }

    pub fn starts_on(&self, date: NaiveDate) -> bool {
        self.start_date_local() == date
    }
}
