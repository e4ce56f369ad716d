mod convert;
pub mod models;
mod time;
pub mod token;

pub use convert::to_calendar_event;
pub use models::{CalendarEventBody, EventStamp, ExistingEvent};
pub use time::{parse_events, EventTime};

use crate::config::Config;
use crate::error::{google_calendar_error, SyncResult};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use token::TokenManager;
use tokio::sync::RwLock;
use url::Url;

const CALENDAR_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Client for the Google Calendar events API
pub struct CalendarClient {
    config: Arc<RwLock<Config>>,
    token_manager: TokenManager,
    client: Client,
}

impl CalendarClient {
    /// Create a new calendar client
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            token_manager: TokenManager::new(Arc::clone(&config)),
            config,
            client: Client::new(),
        }
    }

    /// List upcoming events ordered by start time
    ///
    /// `time_min` defaults to the current UTC time. Recurring events come
    /// back expanded into single occurrences.
    pub async fn get_upcoming_events(
        &self,
        time_min: Option<String>,
        max_results: u32,
    ) -> SyncResult<Value> {
        let calendar_id = {
            let config_read = self.config.read().await;
            config_read.google_calendar_id.clone()
        };

        let access_token = self.access_token().await?;
        let time_min = time_min.unwrap_or_else(|| Utc::now().to_rfc3339());

        let url_str = format!("{}/calendars/{}/events", CALENDAR_BASE_URL, calendar_id);
        let mut url = Url::parse(&url_str)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

        let mut query_params = HashMap::new();
        query_params.insert("timeMin", time_min);
        query_params.insert("maxResults", max_results.to_string());
        query_params.insert("singleEvents", "true".to_string());
        query_params.insert("orderBy", "startTime".to_string());

        for (key, value) in query_params {
            url.query_pairs_mut().append_pair(key, &value);
        }

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to fetch events: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to fetch events: HTTP {} - {}",
                status, error_body
            )));
        }

        let response_data: Value = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse events response: {}", e)))?;

        Ok(response_data
            .get("items")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }

    /// Insert one event into the calendar, returning the provider's event id
    pub async fn insert_event(&self, event: &CalendarEventBody) -> SyncResult<String> {
        let calendar_id = {
            let config_read = self.config.read().await;
            config_read.google_calendar_id.clone()
        };

        let access_token = self.access_token().await?;
        let url = format!("{}/calendars/{}/events", CALENDAR_BASE_URL, calendar_id);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .json(event)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to insert event: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to insert event '{}': HTTP {} - {}",
                event.summary, status, error_body
            )));
        }

        let created: Value = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse insert response: {}", e)))?;

        Ok(created
            .get("id")
            .and_then(|id| id.as_str())
            .unwrap_or("")
            .to_string())
    }

    /// Insert events one at a time, letting the first failure propagate
    pub async fn insert_events(&self, events: &[CalendarEventBody]) -> SyncResult<Vec<String>> {
        let mut inserted = Vec::new();
        for event in events {
            inserted.push(self.insert_event(event).await?);
        }
        Ok(inserted)
    }

    async fn access_token(&self) -> SyncResult<String> {
        let token = self.token_manager.get_token().await?;
        token
            .get("access_token")
            .and_then(|t| t.as_str())
            .map(|t| t.to_string())
            .ok_or_else(|| google_calendar_error("No access token available"))
    }
}
