use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::calendar::{CalendarEvent, EventType, TaskStatus};
use crate::ui::view_state::{CalendarView, ViewState};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn for_view(state: &ViewState) -> Self {
        let (start, end) = state.query_range();
        Self { start, end }
    }
}

/// Wire shape of one event as the backend emits it. Timestamps arrive as
/// strings and are parsed explicitly during conversion.
#[derive(Debug, Deserialize)]
struct WireEvent {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    all_day: Option<bool>,
    event_type: Option<String>,
    status: Option<String>,
    color: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    events: Option<Vec<WireEvent>>,
}

#[async_trait]
pub trait EventsApi {
    async fn fetch_events(
        &self,
        range: DateRange,
        view: CalendarView,
    ) -> Result<Vec<CalendarEvent>, ApiError>;
}

pub struct BackendClient {
    base_url: String,
    access_token: String,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: String, access_token: String) -> Self {
        Self {
            base_url,
            access_token,
            client: reqwest::Client::new(),
        }
    }

    fn convert_wire_event(&self, we: WireEvent) -> Result<CalendarEvent, ApiError> {
        let start_str = we
            .start_time
            .ok_or_else(|| ApiError::ParseError("Missing start_time".to_string()))?;
        let end_str = we
            .end_time
            .ok_or_else(|| ApiError::ParseError("Missing end_time".to_string()))?;

        let start_time = parse_timestamp(&start_str)
            .map_err(|e| ApiError::ParseError(format!("Invalid start_time: {}", e)))?;
        let end_time = parse_timestamp(&end_str)
            .map_err(|e| ApiError::ParseError(format!("Invalid end_time: {}", e)))?;

        let event_type = match we.event_type.as_deref() {
            Some("TASK") => EventType::Task,
            Some("MEETING") => EventType::Meeting,
            other => {
                return Err(ApiError::ParseError(format!(
                    "Unknown event_type: {:?}",
                    other
                )));
            }
        };

        let status = match we.status.as_deref() {
            Some("OPEN") => Some(TaskStatus::Open),
            Some("IN_PROGRESS") => Some(TaskStatus::InProgress),
            Some("COMPLETED") => Some(TaskStatus::Completed),
            _ => None,
        };

        Ok(CalendarEvent {
            id: we
                .id
                .ok_or_else(|| ApiError::ParseError("Missing event id".to_string()))?,
            title: we.title.unwrap_or_default(),
            description: we.description,
            start_time,
            end_time,
            all_day: we.all_day.unwrap_or(false),
            event_type,
            status,
            color: we.color.unwrap_or_else(|| "#3788d8".to_string()),
            url: we.url.unwrap_or_default(),
        })
    }
}

/// The backend serializes timestamps as RFC 3339, but naive datetimes
/// (no offset) also show up; those are taken as UTC.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            value
                .parse::<chrono::NaiveDateTime>()
                .map(|naive| naive.and_utc())
        })
}

#[async_trait]
impl EventsApi for BackendClient {
    async fn fetch_events(
        &self,
        range: DateRange,
        view: CalendarView,
    ) -> Result<Vec<CalendarEvent>, ApiError> {
        let start = range
            .start
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ApiError::ParseError("Invalid start date".to_string()))?
            .and_utc()
            .to_rfc3339();

        let end = range
            .end
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ApiError::ParseError("Invalid end date".to_string()))?
            .and_utc()
            .to_rfc3339();

        let url = format!("{}/calendar/events", self.base_url);

        tracing::info!(
            "Fetching {} events from {} to {}",
            view.as_query_param(),
            range.start,
            range.end
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("view", view.as_query_param()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::info!("Fetch events response status: {}", status);

        if status == 401 {
            tracing::error!("Authentication failed when fetching events");
            return Err(ApiError::AuthenticationFailed);
        }

        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!("Failed to fetch events. Status: {}, Body: {}", status, body);
            return Err(ApiError::RequestError(format!("Status {}: {}", status, body)));
        }

        let event_list: EventsResponse = response.json().await?;

        let events: Vec<CalendarEvent> = event_list
            .events
            .unwrap_or_default()
            .into_iter()
            .filter_map(|we| match self.convert_wire_event(we) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!("Dropping malformed event: {}", e);
                    None
                }
            })
            .collect();

        tracing::info!("Fetched {} events successfully", events.len());
        Ok(events)
    }
}
