use chrono::{Datelike, Local};

use crate::calendar::{CalendarEvent, EventType, TaskStatus};
use crate::render::node::{Element, Node};
use crate::ui::day_view::DaySchedule;
use crate::ui::month_view::{DayCell, MonthGrid};

/// Month-cell titles longer than this are cut and ellipsized; the full
/// title stays available through the tooltip attribute.
pub const TITLE_LIMIT: usize = 15;

/// Clock format used when the config does not override it.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

pub const ERROR_MESSAGE: &str = "Ошибка загрузки календаря";
pub const NO_EVENTS_MESSAGE: &str = "На этот день событий нет";
pub const ALL_DAY_LABEL: &str = "Весь день";

const WEEKDAY_HEADERS: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];

const MONTH_NAMES: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("")
}

pub fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Open => "Открыта",
        TaskStatus::InProgress => "В процессе",
        TaskStatus::Completed => "Завершена",
    }
}

fn status_class(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Open => "open",
        TaskStatus::InProgress => "in_progress",
        TaskStatus::Completed => "completed",
    }
}

fn type_label(event_type: EventType) -> &'static str {
    match event_type {
        EventType::Task => "Задача",
        EventType::Meeting => "Встреча",
    }
}

fn type_class(event_type: EventType) -> &'static str {
    match event_type {
        EventType::Task => "task",
        EventType::Meeting => "meeting",
    }
}

pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_LIMIT {
        let mut short: String = title.chars().take(TITLE_LIMIT).collect();
        short.push('…');
        short
    } else {
        title.to_string()
    }
}

fn start_time_label(event: &CalendarEvent, time_format: &str) -> String {
    if event.all_day {
        ALL_DAY_LABEL.to_string()
    } else {
        event
            .start_time
            .with_timezone(&Local)
            .format(time_format)
            .to_string()
    }
}

fn time_range_label(event: &CalendarEvent, time_format: &str) -> String {
    if event.all_day {
        ALL_DAY_LABEL.to_string()
    } else {
        format!(
            "{} - {}",
            event.start_time.with_timezone(&Local).format(time_format),
            event.end_time.with_timezone(&Local).format(time_format)
        )
    }
}

/// The month grid as a table: a weekday header row, then one row per
/// week with up to three event entries per cell and the overflow badge.
pub fn month_view(grid: &MonthGrid, time_format: &str) -> Node {
    let header_row = Element::new("tr").children(
        WEEKDAY_HEADERS
            .iter()
            .map(|day| Element::new("th").text(day).into()),
    );

    let body = Element::new("tbody").children(grid.weeks.iter().map(|week| {
        Element::new("tr")
            .children(week.days.iter().map(|cell| day_cell(cell, time_format)))
            .into()
    }));

    Element::new("div")
        .class("month-view")
        .child(
            Element::new("table")
                .class("calendar-table")
                .child(Element::new("thead").child(header_row))
                .child(body),
        )
        .into()
}

fn day_cell(cell: &DayCell, time_format: &str) -> Node {
    let mut td = Element::new("td").class("calendar-day");
    if !cell.is_current_month {
        td = td.class("other-month");
    }
    if cell.is_today {
        td = td.class("today");
    }

    let mut header = Element::new("div").class("day-header").child(
        Element::new("span")
            .class("day-number")
            .text(&cell.date.day().to_string()),
    );
    if cell.hidden_events() > 0 {
        header = header.child(
            Element::new("span")
                .class("events-badge")
                .text(&format!("+{}", cell.hidden_events())),
        );
    }

    let events = Element::new("div")
        .class("day-events")
        .children(
            cell.events
                .iter()
                .map(|event| month_event_entry(event, time_format)),
        );

    td.child(header).child(events).into()
}

fn month_event_entry(event: &CalendarEvent, time_format: &str) -> Node {
    Element::new("div")
        .class("calendar-event")
        .class(type_class(event.event_type))
        .attr("style", &format!("border-left: 3px solid {}", event.color))
        .child(Element::new("small").text(&format!("{} ", start_time_label(event, time_format))))
        .child(
            Element::new("div").class("event-title").child(
                Element::new("a")
                    .attr("title", &event.title)
                    .text(&truncate_title(&event.title)),
            ),
        )
        .into()
}

/// The single-day schedule: full event list with type badge, time range,
/// link, description and task status. No truncation, no cap.
pub fn day_view(schedule: &DaySchedule, time_format: &str) -> Node {
    let heading = format!(
        "{} {} {}",
        schedule.date.day(),
        month_name(schedule.date.month()),
        schedule.date.year()
    );

    let mut list = Element::new("div").class("day-events-list");
    if schedule.events.is_empty() {
        list = list.child(
            Element::new("div")
                .class("no-events")
                .child(Element::new("p").text(NO_EVENTS_MESSAGE)),
        );
    } else {
        list = list.children(
            schedule
                .events
                .iter()
                .map(|event| day_event_entry(event, time_format)),
        );
    }

    Element::new("div")
        .class("day-view")
        .child(
            Element::new("div")
                .class("day-header-large")
                .child(Element::new("h2").text(&heading)),
        )
        .child(list)
        .into()
}

fn day_event_entry(event: &CalendarEvent, time_format: &str) -> Node {
    let header = Element::new("div")
        .class("event-header")
        .child(
            Element::new("span")
                .class("event-type-badge")
                .class(type_class(event.event_type))
                .text(type_label(event.event_type)),
        )
        .child(
            Element::new("h4")
                .class("event-title")
                .child(Element::new("a").attr("href", &event.url).text(&event.title)),
        );

    let mut details = Element::new("div").class("event-details").child(header);
    if let Some(description) = &event.description {
        details = details.child(
            Element::new("p")
                .class("event-description")
                .text(description),
        );
    }

    let mut meta = Element::new("div").class("event-meta");
    if event.event_type == EventType::Task
        && let Some(status) = event.status
    {
        meta = meta.child(
            Element::new("span")
                .class("task-status")
                .class(&format!("status-{}", status_class(status)))
                .text(status_label(status)),
        );
    }
    details = details.child(meta);

    Element::new("div")
        .class("day-event-item")
        .class(type_class(event.event_type))
        .child(
            Element::new("div")
                .class("event-time")
                .child(Element::new("strong").text(&time_range_label(event, time_format))),
        )
        .child(details)
        .into()
}

/// Static substitute shown whenever event data could not be obtained.
pub fn error_view() -> Node {
    Element::new("p").text(ERROR_MESSAGE).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{HtmlRenderer, Renderer, TextRenderer};
    use crate::ui::{build_day_schedule, build_month_grid};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn event_on(id: &str, title: &str, event_date: NaiveDate, hour: u32) -> CalendarEvent {
        let start = Local
            .from_local_datetime(&event_date.and_hms_opt(hour, 30, 0).unwrap())
            .unwrap()
            .with_timezone(&Utc);
        CalendarEvent {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            all_day: false,
            event_type: EventType::Task,
            status: Some(TaskStatus::InProgress),
            color: "#ffc107".to_string(),
            url: format!("/tasks/{}", id),
        }
    }

    #[test]
    fn long_title_is_truncated_in_month_view_only() {
        let title = "Implement quarterly report review process";
        let target = date(2025, 1, 10);
        let events = vec![event_on("task_1", title, target, 9)];

        let month_html =
            HtmlRenderer.render(&month_view(&build_month_grid(2025, 1, &events, target), DEFAULT_TIME_FORMAT));
        assert!(month_html.contains(">Implement quart…</a>"));
        assert!(month_html.contains(&format!("title=\"{}\"", title)));

        let day_html =
            HtmlRenderer.render(&day_view(&build_day_schedule(target, &events, target), DEFAULT_TIME_FORMAT));
        assert!(day_html.contains(&format!(">{}</a>", title)));
        assert!(!day_html.contains('…'));
    }

    #[test]
    fn short_title_is_left_alone() {
        assert_eq!(truncate_title("Standup"), "Standup");
        assert_eq!(truncate_title("Ровно 15 симв.!"), "Ровно 15 симв.!");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let title = "Очень длинное название задачи";
        let truncated = truncate_title(title);
        assert_eq!(truncated.chars().count(), TITLE_LIMIT + 1);
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn overflow_badge_shows_hidden_count() {
        let target = date(2025, 1, 10);
        let events: Vec<_> = (1..=5)
            .map(|i| event_on(&format!("e{}", i), "Event", target, 8 + i))
            .collect();

        let html = HtmlRenderer.render(&month_view(&build_month_grid(2025, 1, &events, target), DEFAULT_TIME_FORMAT));
        assert!(html.contains("<span class=\"events-badge\">+2</span>"));
    }

    #[test]
    fn no_badge_when_three_or_fewer_events() {
        let target = date(2025, 1, 10);
        let events: Vec<_> = (1..=3)
            .map(|i| event_on(&format!("e{}", i), "Event", target, 8 + i))
            .collect();

        let html = HtmlRenderer.render(&month_view(&build_month_grid(2025, 1, &events, target), DEFAULT_TIME_FORMAT));
        assert!(!html.contains("events-badge"));
    }

    #[test]
    fn all_day_event_shows_label_instead_of_time() {
        let target = date(2025, 1, 10);
        let mut event = event_on("task_1", "Deadline", target, 0);
        event.all_day = true;

        let html =
            HtmlRenderer.render(&month_view(&build_month_grid(2025, 1, &[event], target), DEFAULT_TIME_FORMAT));
        assert!(html.contains(ALL_DAY_LABEL));
    }

    #[test]
    fn timed_event_shows_local_start_time() {
        let target = date(2025, 1, 10);
        let event = event_on("task_1", "Review", target, 9);

        let html =
            HtmlRenderer.render(&month_view(&build_month_grid(2025, 1, &[event], target), DEFAULT_TIME_FORMAT));
        assert!(html.contains("09:30"));
    }

    #[test]
    fn configured_time_format_reaches_month_entries() {
        let target = date(2025, 1, 10);
        let event = event_on("task_1", "Review", target, 9);

        let html = HtmlRenderer
            .render(&month_view(&build_month_grid(2025, 1, &[event], target), "%H.%M"));
        assert!(html.contains("09.30"));
        assert!(!html.contains("09:30"));
    }

    #[test]
    fn configured_time_format_reaches_day_ranges() {
        let target = date(2025, 1, 10);
        let events = vec![event_on("task_1", "Review", target, 9)];

        let html = HtmlRenderer
            .render(&day_view(&build_day_schedule(target, &events, target), "%H.%M"));
        assert!(html.contains("09.30 - 10.30"));
    }

    #[test]
    fn today_and_other_month_cells_are_classed() {
        let today = date(2024, 2, 14);
        let html = HtmlRenderer.render(&month_view(&build_month_grid(2024, 2, &[], today), DEFAULT_TIME_FORMAT));
        assert!(html.contains("calendar-day today"));
        assert!(html.contains("calendar-day other-month"));
    }

    #[test]
    fn event_color_lands_in_border_style() {
        let target = date(2025, 1, 10);
        let event = event_on("task_1", "Review", target, 9);

        let html =
            HtmlRenderer.render(&month_view(&build_month_grid(2025, 1, &[event], target), DEFAULT_TIME_FORMAT));
        assert!(html.contains("border-left: 3px solid #ffc107"));
    }

    #[test]
    fn day_view_includes_type_badge_and_status() {
        let target = date(2025, 1, 10);
        let events = vec![event_on("task_1", "Review", target, 9)];

        let html = HtmlRenderer.render(&day_view(&build_day_schedule(target, &events, target), DEFAULT_TIME_FORMAT));
        assert!(html.contains("Задача"));
        assert!(html.contains("status-in_progress"));
        assert!(html.contains("В процессе"));
        assert!(html.contains("href=\"/tasks/task_1\""));
    }

    #[test]
    fn meeting_entry_has_no_status_badge() {
        let target = date(2025, 1, 10);
        let mut event = event_on("meeting_1", "Планёрка", target, 11);
        event.event_type = EventType::Meeting;
        event.status = None;

        let html = HtmlRenderer.render(&day_view(&build_day_schedule(target, &[event], target), DEFAULT_TIME_FORMAT));
        assert!(html.contains("Встреча"));
        assert!(!html.contains("task-status"));
    }

    #[test]
    fn empty_day_shows_no_events_notice() {
        let target = date(2025, 1, 10);
        let html = HtmlRenderer.render(&day_view(&build_day_schedule(target, &[], target), DEFAULT_TIME_FORMAT));
        assert!(html.contains(NO_EVENTS_MESSAGE));
    }

    #[test]
    fn day_heading_uses_russian_month_name() {
        let target = date(2025, 4, 10);
        let html = HtmlRenderer.render(&day_view(&build_day_schedule(target, &[], target), DEFAULT_TIME_FORMAT));
        assert!(html.contains("10 Апрель 2025"));
    }

    #[test]
    fn month_name_is_empty_for_invalid_input() {
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
        assert_eq!(month_name(2), "Февраль");
    }

    #[test]
    fn error_view_renders_static_message() {
        assert_eq!(
            HtmlRenderer.render(&error_view()),
            format!("<p>{}</p>", ERROR_MESSAGE)
        );
        assert_eq!(
            TextRenderer.render(&error_view()),
            format!("{}\n", ERROR_MESSAGE)
        );
    }

    #[test]
    fn text_renderer_produces_one_line_per_day_entry() {
        let target = date(2025, 1, 10);
        let events = vec![
            event_on("e1", "Standup", target, 9),
            event_on("e2", "Review", target, 15),
        ];

        let text = TextRenderer.render(&day_view(&build_day_schedule(target, &events, target), DEFAULT_TIME_FORMAT));
        assert!(text.contains("Standup"));
        assert!(text.contains("Review"));
        assert!(text.lines().count() >= 3);
    }
}
