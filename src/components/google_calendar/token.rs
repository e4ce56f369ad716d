use crate::config::Config;
use crate::error::{google_calendar_error, SyncResult};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Manages the OAuth token stored in a local JSON file
#[derive(Clone)]
pub struct TokenManager {
    config: Arc<RwLock<Config>>,
    client: Client,
}

impl TokenManager {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Get the OAuth token, refreshing it first if it has expired
    pub async fn get_token(&self) -> SyncResult<Value> {
        let token_file = {
            let config_read = self.config.read().await;
            config_read.token_file.clone()
        };

        let token_str = fs::read_to_string(&token_file).map_err(|e| {
            google_calendar_error(&format!(
                "Failed to read token file {}: {}. Run get_calendar_token to authorize.",
                token_file, e
            ))
        })?;

        let token: Value = serde_json::from_str(&token_str)
            .map_err(|e| google_calendar_error(&format!("Failed to parse token JSON: {}", e)))?;

        // Check if token is expired
        if let Some(expiry) = token.get("expires_at").and_then(|v| v.as_i64()) {
            let now = Utc::now().timestamp();
            if expiry > now {
                return Ok(token);
            }
            // Token is expired, refresh it
            return self.refresh_token(&token).await;
        }

        Err(google_calendar_error(
            "No expiry in token data. Run get_calendar_token to authorize.",
        ))
    }

    /// Refresh an expired token
    async fn refresh_token(&self, token: &Value) -> SyncResult<Value> {
        let refresh_token = token
            .get("refresh_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| google_calendar_error("No refresh token in token data"))?;

        let (client_id, client_secret) = {
            let config_read = self.config.read().await;
            (
                config_read.google_client_id.clone(),
                config_read.google_client_secret.clone(),
            )
        };

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token.to_string()),
            ("grant_type", "refresh_token".to_string()),
        ];

        let response = self
            .client
            .post("https://oauth2.googleapis.com/token")
            .form(&params)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let new_token: Value = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse token response: {}", e)))?;

        let access_token = new_token
            .get("access_token")
            .cloned()
            .ok_or_else(|| google_calendar_error("Token response missing 'access_token' field"))?;

        // Combine new access token with existing refresh token
        let mut token_data = serde_json::Map::new();
        token_data.insert("access_token".to_string(), access_token);
        token_data.insert("refresh_token".to_string(), json!(refresh_token));

        // Calculate expiry
        let expires_in = new_token
            .get("expires_in")
            .and_then(|v| v.as_i64())
            .unwrap_or(3600);
        let expires_at = Utc::now().timestamp() + expires_in;
        token_data.insert("expires_at".to_string(), json!(expires_at));

        let token_json = json!(token_data);
        self.set_token(token_json.clone()).await?;

        Ok(token_json)
    }

    /// Write the token to the configured file
    pub async fn set_token(&self, token_json: Value) -> SyncResult<()> {
        let token_file = {
            let config_read = self.config.read().await;
            config_read.token_file.clone()
        };

        let pretty = serde_json::to_string_pretty(&token_json)
            .map_err(|e| google_calendar_error(&format!("Failed to serialize token: {}", e)))?;

        fs::write(&token_file, pretty).map_err(|e| {
            google_calendar_error(&format!("Failed to write token file {}: {}", token_file, e))
        })?;

        Ok(())
    }
}
