use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(notikka::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(notikka::config))]
    Config(String),

    #[error("Notion API error: {0}")]
    #[diagnostic(code(notikka::notion))]
    Notion(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(notikka::google_calendar))]
    GoogleCalendar(String),

    #[error("Planner error: {0}")]
    #[diagnostic(code(notikka::planner))]
    Planner(String),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(notikka::http))]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(code(notikka::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(notikka::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(notikka::other))]
    Other(String),
}

// Implement From for JSON serialization errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type SyncResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create Notion errors
pub fn notion_error(message: &str) -> Error {
    Error::Notion(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create planner errors
pub fn planner_error(message: &str) -> Error {
    Error::Planner(message.to_string())
}

/// Helper to create other errors
#[allow(dead_code)]
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
