pub mod day_view;
pub mod month_view;
pub mod view_state;

pub use day_view::{DaySchedule, build_day_schedule};
pub use month_view::{DayCell, MonthGrid, Week, build_month_grid};
pub use view_state::{CalendarView, ViewState};
