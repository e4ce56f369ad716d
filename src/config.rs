use crate::error::{config_error, Error, SyncResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

/// Statuses queried when no override is configured
pub const DEFAULT_STATUSES: &[&str] = &["In Progress", "Not Started"];

/// Default IANA timezone for planning and event payloads
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";

/// Default chat model for the planner backend
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Main configuration structure for the sync run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Notion integration token
    pub notion_token: String,
    /// Notion database to query for tasks
    pub notion_database_id: String,
    /// OpenAI API key for the planner backend
    pub openai_api_key: String,
    /// Chat model used by the planner backend
    pub openai_model: String,
    /// Google Calendar API client ID
    pub google_client_id: String,
    /// Google Calendar API client secret
    pub google_client_secret: String,
    /// Google Calendar ID to read from and insert into
    pub google_calendar_id: String,
    /// File holding the Google OAuth token
    pub token_file: String,
    /// IANA timezone for scheduling
    pub timezone: String,
    /// Task statuses to sync
    pub statuses: Vec<String>,
    /// Cap on upcoming events fetched as scheduling constraints
    pub max_results: u32,
}

/// Optional overrides loaded from config/sync.toml
#[derive(Debug, Default, Deserialize)]
struct SyncOverrides {
    statuses: Option<Vec<String>>,
    timezone: Option<String>,
    model: Option<String>,
    max_results: Option<u32>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> SyncResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables; one error reports every missing name
        let mut missing = Vec::new();
        let notion_token = require(&mut missing, "NOTION_TOKEN");
        let notion_database_id = require(&mut missing, "NOTION_DATABASE_ID");
        let openai_api_key = require(&mut missing, "OPENAI_API_KEY");
        let google_client_id = require(&mut missing, "GOOGLE_CLIENT_ID");
        let google_client_secret = require(&mut missing, "GOOGLE_CLIENT_SECRET");

        if !missing.is_empty() {
            return Err(Error::Environment(format!(
                "Missing environment variables: {}",
                missing.join(", ")
            )));
        }

        // Optional values with defaults
        let google_calendar_id =
            env::var("GOOGLE_CALENDAR_ID").unwrap_or_else(|_| String::from("primary"));
        let token_file = env::var("GOOGLE_TOKEN_FILE").unwrap_or_else(|_| String::from("token.json"));
        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from(DEFAULT_TIMEZONE));
        let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| String::from(DEFAULT_MODEL));

        let mut config = Config {
            notion_token,
            notion_database_id,
            openai_api_key,
            openai_model,
            google_client_id,
            google_client_secret,
            google_calendar_id,
            token_file,
            timezone,
            statuses: DEFAULT_STATUSES.iter().map(|s| s.to_string()).collect(),
            max_results: 10,
        };

        // Load sync overrides from file if it exists
        if let Ok(content) = fs::read_to_string("config/sync.toml") {
            let overrides: SyncOverrides = toml::from_str(&content)?;
            config.apply(overrides);
        }

        // Validate the configured timezone before any component parses it
        config
            .timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Invalid timezone: {}", config.timezone)))?;

        Ok(config)
    }

    /// The configured timezone, parsed
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }

    fn apply(&mut self, overrides: SyncOverrides) {
        if let Some(statuses) = overrides.statuses {
            self.statuses = statuses;
        }
        if let Some(timezone) = overrides.timezone {
            self.timezone = timezone;
        }
        if let Some(model) = overrides.model {
            self.openai_model = model;
        }
        if let Some(max_results) = overrides.max_results {
            self.max_results = max_results;
        }
    }
}

fn require(missing: &mut Vec<&'static str>, var: &'static str) -> String {
    match env::var(var) {
        Ok(value) => value,
        Err(_) => {
            missing.push(var);
            String::new()
        }
    }
}
