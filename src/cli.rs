use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
};

use chrono::{Datelike, Local, NaiveDate};

use teamcal::{
    api::{BackendClient, DateRange, EventsApi},
    render::{HtmlRenderer, Renderer, TextRenderer, views},
    storage::config::Config,
    ui::{CalendarView, ViewState, build_day_schedule, build_month_grid},
};

pub const USAGE: &str = "Usage: teamcal [--month [YYYY/MM]] [--day [YYYY/MM/DD]] [--html]";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CliOptions {
    /// View requested on the command line; None falls back to the
    /// configured default view.
    pub view: Option<CalendarView>,
    pub date: NaiveDate,
    pub html: bool,
}

pub fn parse_cli_mode() -> Result<CliOptions, String> {
    parse_args(env::args().skip(1))
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<CliOptions, String> {
    let mut view = None;
    let mut date = Local::now().date_naive();
    let mut html = false;
    let mut args = args.peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--month" => {
                view = Some(CalendarView::Month);
                if let Some(next) = args.peek()
                    && !next.starts_with("--")
                {
                    let value = args.next().expect("peeked value must exist");
                    date = parse_month_arg(&value)?;
                }
            }
            "--day" => {
                view = Some(CalendarView::Day);
                if let Some(next) = args.peek()
                    && !next.starts_with("--")
                {
                    let value = args.next().expect("peeked value must exist");
                    date = NaiveDate::parse_from_str(&value, "%Y/%m/%d")
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", value))?;
                }
            }
            "--html" => {
                html = true;
            }
            "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(CliOptions { view, date, html })
}

/// An explicit `--month`/`--day` flag wins; otherwise the configured
/// default view applies, with month view as the last resort.
fn resolve_view(explicit: Option<CalendarView>, config: &Config) -> CalendarView {
    explicit
        .or_else(|| CalendarView::from_name(&config.ui.default_view))
        .unwrap_or(CalendarView::Month)
}

fn parse_month_arg(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}/01", value), "%Y/%m/%d")
        .map_err(|_| format!("Invalid month '{}'. Use YYYY/MM.", value))
}

pub async fn run(options: CliOptions) -> Result<(), io::Error> {
    let config = Config::load_or_create().map_err(|e| io::Error::other(e.to_string()))?;
    let client = BackendClient::new(
        config.server.base_url.clone(),
        config.server.access_token.clone(),
    );

    let state = ViewState::new(resolve_view(options.view, &config), options.date);
    let range = DateRange::for_view(&state);
    let time_format = config.ui.time_format.as_str();

    // A failed fetch substitutes the static error view; it is never
    // retried and never aborts the process.
    let tree = match client.fetch_events(range, state.view).await {
        Ok(events) => {
            let today = Local::now().date_naive();
            match state.view {
                CalendarView::Month => views::month_view(
                    &build_month_grid(state.date.year(), state.date.month(), &events, today),
                    time_format,
                ),
                CalendarView::Day => views::day_view(
                    &build_day_schedule(state.date, &events, today),
                    time_format,
                ),
            }
        }
        Err(e) => {
            tracing::error!("Failed to fetch events: {}", e);
            eprintln!("Failed to fetch events: {}", e);
            views::error_view()
        }
    };

    if options.html {
        println!("{}", HtmlRenderer.render(&tree));
        return Ok(());
    }

    let mut text = String::new();
    if state.view == CalendarView::Month {
        text.push_str(&format!(
            "{} {}\n\n",
            views::month_name(state.date.month()),
            state.date.year()
        ));
    }
    text.push_str(&TextRenderer.render(&tree));
    display_with_pager(&text)
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            print!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd).args(&args).stdin(Stdio::piped()).spawn() {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            print!("{text}");
        }
    }

    Ok(())
}
