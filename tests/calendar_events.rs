use notikka::components::google_calendar::{parse_events, to_calendar_event};
use notikka::components::planner::{parse_planner_reply, EventDraft, PlannerReply};
use serde_json::json;

fn sample_event() -> serde_json::Value {
    json!({
        "summary": "Team standup",
        "description": "Daily sync",
        "start": {"dateTime": "2025-01-10T17:00:00Z", "timeZone": "America/Los_Angeles"},
        "end": {"dateTime": "2025-01-10T17:30:00Z", "timeZone": "America/Los_Angeles"}
    })
}

/// A bare event object normalizes exactly like a one-element collection
#[test]
fn test_parse_events_bare_object_equals_singleton() {
    let bare = parse_events(&sample_event());
    let wrapped = parse_events(&json!([sample_event()]));

    assert_eq!(bare.len(), 1);
    assert_eq!(bare, wrapped);
}

/// A declared timezone converts the UTC instant into that zone's local time
#[test]
fn test_parse_events_converts_declared_zone() {
    let events = parse_events(&json!([sample_event()]));

    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.summary, "Team standup");
    assert_eq!(event.start.time_zone, "America/Los_Angeles");
    assert_eq!(event.start.date_time, "2025-01-10T09:00:00-08:00");
    assert_eq!(event.end.date_time, "2025-01-10T09:30:00-08:00");
}

/// Start and end without a declared zone keep their timestamp and label UTC
#[test]
fn test_parse_events_defaults_to_utc() {
    let events = parse_events(&json!([{
        "summary": "Untimed",
        "start": {"dateTime": "2025-01-10T10:00:00Z"},
        "end": {"dateTime": "2025-01-10T11:00:00Z"}
    }]));

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].start.time_zone, "UTC");
    assert_eq!(events[0].end.time_zone, "UTC");
    assert_eq!(events[0].start.date_time, "2025-01-10T10:00:00Z");
}

/// Plain string timestamps are tolerated and default to UTC as well
#[test]
fn test_parse_events_string_times() {
    let events = parse_events(&json!([{
        "title": "Legacy entry",
        "start": "2025-01-10T10:00:00Z",
        "end": "2025-01-10T11:00:00Z"
    }]));

    assert_eq!(events.len(), 1);
    // Missing summary falls back to the title field
    assert_eq!(events[0].summary, "Legacy entry");
    assert_eq!(events[0].start.time_zone, "UTC");
}

/// All-day events keep their bare date string
#[test]
fn test_parse_events_all_day() {
    let events = parse_events(&json!([{
        "summary": "Conference",
        "start": {"date": "2025-01-10"},
        "end": {"date": "2025-01-11"}
    }]));

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].start.date_time, "2025-01-10");
    assert_eq!(events[0].start.time_zone, "UTC");
}

/// Events missing a start or end are dropped
#[test]
fn test_parse_events_drops_unplaceable() {
    let events = parse_events(&json!([{"summary": "No times"}]));
    assert!(events.is_empty());
}

fn sample_draft() -> EventDraft {
    EventDraft {
        title: "Write report".to_string(),
        start: "2025-01-10T09:00:00Z".to_string(),
        end: "2025-01-10T11:00:00Z".to_string(),
        description: "ACTIVITY: Work, PRIORITY: High, DUE DATE: 2025-01-10".to_string(),
    }
}

/// Reminders are always non-default: email a day before, popup ten minutes
#[test]
fn test_to_calendar_event_reminders() {
    let event = to_calendar_event(&sample_draft(), "America/Los_Angeles");

    assert!(!event.reminders.use_default);
    assert_eq!(event.reminders.overrides.len(), 2);
    assert_eq!(event.reminders.overrides[0].method, "email");
    assert_eq!(event.reminders.overrides[0].minutes, 1440);
    assert_eq!(event.reminders.overrides[1].method, "popup");
    assert_eq!(event.reminders.overrides[1].minutes, 10);
}

/// Start and end are stamped with the configured timezone
#[test]
fn test_to_calendar_event_timezone_stamp() {
    let event = to_calendar_event(&sample_draft(), "America/Los_Angeles");

    assert_eq!(event.start.date_time, "2025-01-10T09:00:00Z");
    assert_eq!(event.start.time_zone, "America/Los_Angeles");
    assert_eq!(event.end.time_zone, "America/Los_Angeles");
}

/// A LOCATION: marker in the description becomes the event location
#[test]
fn test_to_calendar_event_location() {
    let mut draft = sample_draft();
    draft.description = "LOCATION: Main Library, ACTIVITY: Work".to_string();

    let event = to_calendar_event(&draft, "UTC");
    assert_eq!(event.location, Some("Main Library".to_string()));

    // Without the marker there is no location
    let event = to_calendar_event(&sample_draft(), "UTC");
    assert_eq!(event.location, None);
}

/// Parsing a planner reply and converting it keeps title and description
#[test]
fn test_round_trip_preserves_title_and_description() {
    let raw = json!({
        "title": "Write report",
        "start": "2025-01-10T09:00:00Z",
        "end": "2025-01-10T11:00:00Z",
        "description": "ACTIVITY: Work, PRIORITY: High, DUE DATE: 2025-01-10"
    })
    .to_string();

    let draft = match parse_planner_reply(&raw).unwrap() {
        PlannerReply::Scheduled(draft) => draft,
        PlannerReply::Declined(_) => panic!("valid draft parsed as declined"),
    };

    let event = to_calendar_event(&draft, "America/Los_Angeles");
    assert_eq!(event.summary, "Write report");
    assert_eq!(
        event.description,
        "ACTIVITY: Work, PRIORITY: High, DUE DATE: 2025-01-10"
    );
}
