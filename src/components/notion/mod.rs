pub mod models;

pub use models::Task;

use crate::config::Config;
use crate::error::{notion_error, SyncResult};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

const NOTION_BASE_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// Client for querying the Notion task database
pub struct NotionClient {
    config: Arc<RwLock<Config>>,
    client: Client,
}

impl NotionClient {
    /// Create a new Notion client
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Build the OR-filter body for the given status values
    pub fn status_filter(statuses: &[String]) -> Value {
        let conditions: Vec<Value> = statuses
            .iter()
            .map(|status| {
                json!({
                    "property": "Status",
                    "status": {
                        "equals": status
                    }
                })
            })
            .collect();

        json!({
            "filter": {
                "or": conditions
            }
        })
    }

    /// Query the database for tasks in any of the given statuses
    pub async fn get_tasks_by_status(&self, statuses: &[String]) -> SyncResult<Value> {
        let (token, database_id) = {
            let config_read = self.config.read().await;
            (
                config_read.notion_token.clone(),
                config_read.notion_database_id.clone(),
            )
        };

        let url = format!("{}/databases/{}/query", NOTION_BASE_URL, database_id);
        let body = Self::status_filter(statuses);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| notion_error(&format!("Failed to query database: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(notion_error(&format!(
                "Failed to query database: HTTP {} - {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| notion_error(&format!("Failed to parse query response: {}", e)))
    }

    /// Flatten the raw query response into task records
    pub fn parse_response(response: &Value) -> SyncResult<Vec<Task>> {
        let results = match response.get("results").and_then(|r| r.as_array()) {
            Some(results) => results,
            None => return Ok(Vec::new()),
        };

        let mut tasks = Vec::new();
        for page in results {
            let properties = page
                .get("properties")
                .and_then(|p| p.as_object())
                .ok_or_else(|| notion_error("Task result missing 'properties'"))?;
            let url = page
                .get("url")
                .and_then(|u| u.as_str())
                .ok_or_else(|| notion_error("Task result missing 'url'"))?;

            tasks.push(Task {
                name: title_text(properties.get("Name")),
                status: status_name(properties.get("Status")),
                priority: select_name(properties.get("Priority")),
                estimated_time: rich_text(properties.get("Estimated Time")),
                due_date: date_start(properties.get("Due date")),
                activity: rollup_title(properties.get("Rollup")),
                url: url.to_string(),
            });
        }

        Ok(tasks)
    }
}

// Property extractors below flatten to an empty string when the nested
// value is absent, matching how sparsely filled database rows come back.

fn title_text(property: Option<&Value>) -> String {
    property
        .and_then(|p| p.get("title"))
        .and_then(|t| t.as_array())
        .and_then(|t| t.first())
        .and_then(|t| t.get("text"))
        .and_then(|t| t.get("content"))
        .and_then(|c| c.as_str())
        .unwrap_or("")
        .to_string()
}

fn status_name(property: Option<&Value>) -> String {
    property
        .and_then(|p| p.get("status"))
        .and_then(|s| s.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("")
        .to_string()
}

fn select_name(property: Option<&Value>) -> String {
    property
        .and_then(|p| p.get("select"))
        .and_then(|s| s.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("")
        .to_string()
}

fn rich_text(property: Option<&Value>) -> String {
    property
        .and_then(|p| p.get("rich_text"))
        .and_then(|t| t.as_array())
        .and_then(|t| t.first())
        .and_then(|t| t.get("text"))
        .and_then(|t| t.get("content"))
        .and_then(|c| c.as_str())
        .unwrap_or("")
        .to_string()
}

fn date_start(property: Option<&Value>) -> String {
    property
        .and_then(|p| p.get("date"))
        .and_then(|d| d.get("start"))
        .and_then(|s| s.as_str())
        .unwrap_or("")
        .to_string()
}

fn rollup_title(property: Option<&Value>) -> String {
    property
        .and_then(|p| p.get("rollup"))
        .and_then(|r| r.get("array"))
        .and_then(|a| a.as_array())
        .and_then(|a| a.first())
        .and_then(|e| e.get("title"))
        .and_then(|t| t.as_array())
        .and_then(|t| t.first())
        .and_then(|t| t.get("text"))
        .and_then(|t| t.get("content"))
        .and_then(|c| c.as_str())
        .unwrap_or("")
        .to_string()
}
