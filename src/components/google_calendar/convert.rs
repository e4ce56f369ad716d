use super::models::{CalendarEventBody, EventDateTime, ReminderOverride, Reminders};
use crate::components::planner::EventDraft;

const LOCATION_MARKER: &str = "LOCATION:";

/// Convert a planner draft into the calendar insert payload
///
/// Title and description are carried over verbatim; start and end are
/// stamped with the configured timezone. Reminders are always the fixed
/// email-day-before / popup-ten-minutes pair.
pub fn to_calendar_event(draft: &EventDraft, timezone: &str) -> CalendarEventBody {
    CalendarEventBody {
        summary: draft.title.clone(),
        description: draft.description.clone(),
        start: EventDateTime {
            date_time: draft.start.clone(),
            time_zone: timezone.to_string(),
        },
        end: EventDateTime {
            date_time: draft.end.clone(),
            time_zone: timezone.to_string(),
        },
        location: extract_location(&draft.description),
        reminders: Reminders {
            use_default: false,
            overrides: vec![
                ReminderOverride {
                    method: "email".to_string(),
                    minutes: 24 * 60,
                },
                ReminderOverride {
                    method: "popup".to_string(),
                    minutes: 10,
                },
            ],
        },
    }
}

/// Pull a location out of the description's "LOCATION:" marker
///
/// The marker's value runs up to the next comma; without a terminating
/// comma no location is extracted.
fn extract_location(description: &str) -> Option<String> {
    let start = description.find(LOCATION_MARKER)?;
    let after = &description[start + LOCATION_MARKER.len()..];
    let end = after.find(',')?;
    Some(after[..end].trim().to_string())
}
