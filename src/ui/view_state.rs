use chrono::{Datelike, Local, NaiveDate};

use crate::ui::month_view::last_day_of_month;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarView {
    Month,
    Day,
}

impl CalendarView {
    pub fn as_query_param(&self) -> &'static str {
        match self {
            CalendarView::Month => "month",
            CalendarView::Day => "day",
        }
    }

    /// Config spelling of a view ("month"/"day"); unknown names are None.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "month" => Some(CalendarView::Month),
            "day" => Some(CalendarView::Day),
            _ => None,
        }
    }
}

/// The visible period. Replaces the page-global view/year/month/day
/// variables of the original UI: navigation returns a new value, nothing
/// is mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub view: CalendarView,
    pub date: NaiveDate,
}

impl ViewState {
    pub fn new(view: CalendarView, date: NaiveDate) -> Self {
        Self { view, date }
    }

    pub fn today(view: CalendarView) -> Self {
        Self::new(view, Local::now().date_naive())
    }

    pub fn with_view(self, view: CalendarView) -> Self {
        Self { view, ..self }
    }

    pub fn with_date(self, date: NaiveDate) -> Self {
        Self { date, ..self }
    }

    pub fn next_period(self) -> Self {
        match self.view {
            CalendarView::Month => self.with_date(shift_month(self.date, 1)),
            CalendarView::Day => self.with_date(self.date.succ_opt().unwrap_or(self.date)),
        }
    }

    pub fn prev_period(self) -> Self {
        match self.view {
            CalendarView::Month => self.with_date(shift_month(self.date, -1)),
            CalendarView::Day => self.with_date(self.date.pred_opt().unwrap_or(self.date)),
        }
    }

    /// The date span to request from the backend, matching what the
    /// original page sent: the whole month in month view, the single day
    /// plus its successor in day view.
    pub fn query_range(&self) -> (NaiveDate, NaiveDate) {
        match self.view {
            CalendarView::Month => {
                let first = self.date.with_day(1).unwrap_or(self.date);
                (first, last_day_of_month(self.date.year(), self.date.month()))
            }
            CalendarView::Day => (self.date, self.date.succ_opt().unwrap_or(self.date)),
        }
    }
}

fn shift_month(date: NaiveDate, offset: i32) -> NaiveDate {
    let zero_based = date.year() * 12 + date.month() as i32 - 1 + offset;
    let year = zero_based.div_euclid(12);
    let month = (zero_based.rem_euclid(12) + 1) as u32;
    let day = date.day().min(last_day_of_month(year, month).day());
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}
