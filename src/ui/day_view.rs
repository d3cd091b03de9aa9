use chrono::NaiveDate;

use crate::calendar::CalendarEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub is_today: bool,
    pub events: Vec<CalendarEvent>,
}

/// Day mode: events whose local start date equals the target date, in
/// input order. Unlike the month grid there is no cap.
pub fn build_day_schedule(
    date: NaiveDate,
    events: &[CalendarEvent],
    today: NaiveDate,
) -> DaySchedule {
    DaySchedule {
        date,
        is_today: date == today,
        events: events
            .iter()
            .filter(|e| e.starts_on(date))
            .cloned()
            .collect(),
    }
}
