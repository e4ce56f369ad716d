use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Local timestamp plus IANA timezone label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EventStamp {
    pub date_time: String,
    pub time_zone: String,
}

/// Normalized calendar event used as a scheduling constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExistingEvent {
    pub summary: String,
    pub description: String,
    pub location: String,
    pub start: EventStamp,
    pub end: EventStamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Value>,
}

/// Start or end of an event in the insert payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDateTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

/// One reminder override entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: u32,
}

/// Reminder settings for the insert payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminders {
    #[serde(rename = "useDefault")]
    pub use_default: bool,
    pub overrides: Vec<ReminderOverride>,
}

/// Event body submitted to the Google Calendar insert endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventBody {
    pub summary: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub reminders: Reminders,
}
