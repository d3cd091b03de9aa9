use chrono::{Datelike, Days, NaiveDate};

use crate::calendar::CalendarEvent;

/// Cap on events stored per day cell; anything beyond it is summarized
/// by the overflow badge.
pub const MAX_VISIBLE_EVENTS: usize = 3;

/// A Monday-first month grid never needs more than 6 weeks.
pub const MAX_WEEKS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

/// One calendar square. Derived per render and thrown away; holds at
/// most [`MAX_VISIBLE_EVENTS`] events plus the full match count.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub events: Vec<CalendarEvent>,
    pub total_events: usize,
}

impl DayCell {
    /// Count shown on the `+N` badge; zero when everything fits.
    pub fn hidden_events(&self) -> usize {
        self.total_events.saturating_sub(self.events.len())
    }
}

/// Builds the month grid: complete Monday-first weeks from the Monday on
/// or before the 1st until the week that reaches the last day of the
/// month. Events are bucketed by their local start date, in input order.
pub fn build_month_grid(
    year: i32,
    month: u32,
    events: &[CalendarEvent],
    today: NaiveDate,
) -> MonthGrid {
    let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return MonthGrid { year, month, weeks: Vec::new() };
    };
    let last_day = last_day_of_month(year, month);

    let days_before = first_day.weekday().num_days_from_monday() as u64;
    let mut cursor = first_day
        .checked_sub_days(Days::new(days_before))
        .unwrap_or(first_day);

    let mut weeks = Vec::new();
    for _ in 0..MAX_WEEKS {
        let mut week = Week { days: Vec::with_capacity(7) };
        for _ in 0..7 {
            week.days.push(build_day_cell(cursor, month, events, today));
            let Some(next) = cursor.succ_opt() else { break };
            cursor = next;
        }
        weeks.push(week);

        // The cursor now sits one day past the emitted week; once it has
        // passed the last of the month the grid is complete.
        if cursor > last_day {
            break;
        }
    }

    MonthGrid { year, month, weeks }
}

fn build_day_cell(
    date: NaiveDate,
    month: u32,
    events: &[CalendarEvent],
    today: NaiveDate,
) -> DayCell {
    let matched: Vec<&CalendarEvent> = events.iter().filter(|e| e.starts_on(date)).collect();
    let total_events = matched.len();

    DayCell {
        date,
        is_current_month: date.month() == month,
        is_today: date == today,
        events: matched
            .into_iter()
            .take(MAX_VISIBLE_EVENTS)
            .cloned()
            .collect(),
        total_events,
    }
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_month_first
        .and_then(|d| d.pred_opt())
        .unwrap_or_default()
}
