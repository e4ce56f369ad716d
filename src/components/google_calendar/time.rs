use super::models::{EventStamp, ExistingEvent};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;

/// Raw start or end value as the calendar API returns it
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    /// Bare RFC 3339 timestamp or date string
    Timestamp(String),
    /// Structured {dateTime|date, timeZone} object
    Structured {
        #[serde(rename = "dateTime")]
        date_time: Option<String>,
        date: Option<String>,
        #[serde(rename = "timeZone")]
        time_zone: Option<String>,
    },
}

impl EventTime {
    /// Resolve into a local timestamp plus timezone label
    ///
    /// When the raw value declares a zone, the timestamp is converted into
    /// that zone's local time. Without one the label defaults to UTC.
    pub fn normalize(&self) -> EventStamp {
        match self {
            EventTime::Timestamp(raw) => EventStamp {
                date_time: raw.clone(),
                time_zone: "UTC".to_string(),
            },
            EventTime::Structured {
                date_time,
                date,
                time_zone,
            } => {
                let raw = date_time
                    .clone()
                    .or_else(|| date.clone())
                    .unwrap_or_default();

                match time_zone {
                    Some(zone) => EventStamp {
                        date_time: into_zone(&raw, zone),
                        time_zone: zone.clone(),
                    },
                    None => EventStamp {
                        date_time: raw,
                        time_zone: "UTC".to_string(),
                    },
                }
            }
        }
    }
}

/// Convert an RFC 3339 timestamp into the declared zone's local time
fn into_zone(raw: &str, zone: &str) -> String {
    let tz: Tz = match zone.parse() {
        Ok(tz) => tz,
        Err(_) => return raw.to_string(),
    };

    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.with_timezone(&tz).to_rfc3339(),
        // Date-only values carry no instant to convert
        Err(_) => raw.to_string(),
    }
}

/// Parse raw list output into normalized events
///
/// Accepts either an array of events or a lone event object, which is
/// treated as a one-element collection. Events without both a start and an
/// end are dropped.
pub fn parse_events(raw: &Value) -> Vec<ExistingEvent> {
    let items: Vec<&Value> = match raw {
        Value::Array(events) => events.iter().collect(),
        other => vec![other],
    };

    let mut parsed = Vec::new();
    for event in items {
        let start = event.get("start").and_then(parse_event_time);
        let end = event.get("end").and_then(parse_event_time);

        let (Some(start), Some(end)) = (start, end) else {
            continue;
        };

        let summary = event
            .get("summary")
            .or_else(|| event.get("title"))
            .and_then(|s| s.as_str())
            .unwrap_or("Untitled Event")
            .to_string();

        parsed.push(ExistingEvent {
            summary,
            description: text_field(event, "description"),
            location: text_field(event, "location"),
            start,
            end,
            reminders: event.get("reminders").cloned(),
        });
    }

    parsed
}

fn parse_event_time(value: &Value) -> Option<EventStamp> {
    serde_json::from_value::<EventTime>(value.clone())
        .ok()
        .map(|time| time.normalize())
}

fn text_field(event: &Value, key: &str) -> String {
    event
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}
