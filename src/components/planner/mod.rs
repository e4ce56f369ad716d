mod completion;
pub mod models;

pub use completion::{ChatMessage, CompletionBackend, CompletionRequest, OpenAiBackend};
pub use models::{EventDraft, PlannerReply, Unscheduled};

use crate::components::google_calendar::ExistingEvent;
use crate::components::notion::Task;
use crate::error::{planner_error, SyncResult};
use chrono::Utc;
use chrono_tz::Tz;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

const SYSTEM_PROMPT: &str = "You are a helpful AI assistant that creates a schedule for the user \
based on their time and availability. Respond with a JSON object for a single calendar event \
with fields: title, start, end, and description.";

/// Plans calendar events for tasks by prompting a completion backend
///
/// Each task is planned independently against the pre-existing calendar
/// events only; drafts produced earlier in the same run are not fed back as
/// constraints, so two tasks in one batch can still collide with each other.
pub struct Planner {
    backend: Arc<dyn CompletionBackend>,
    timezone: Tz,
}

impl Planner {
    pub fn new(backend: Arc<dyn CompletionBackend>, timezone: Tz) -> Self {
        Self { backend, timezone }
    }

    /// Plan one draft per task against the existing events
    ///
    /// A task whose completion call fails, whose reply cannot be parsed, or
    /// whose reply declines to schedule is logged and skipped; the rest of
    /// the batch continues.
    pub async fn plan(&self, tasks: &[Task], existing_events: &[ExistingEvent]) -> Vec<EventDraft> {
        let context = self.build_context(existing_events);
        let mut drafts = Vec::new();

        for task in tasks {
            let request = CompletionRequest {
                system: SYSTEM_PROMPT.to_string(),
                context: Some(context.clone()),
                user: self.build_task_prompt(task),
            };

            let reply = match self.backend.complete(&request).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!("Skipping task '{}': {}", task.name, e);
                    continue;
                }
            };

            match parse_planner_reply(&reply) {
                Ok(PlannerReply::Scheduled(draft)) => drafts.push(draft),
                Ok(PlannerReply::Declined(unscheduled)) => {
                    info!(
                        "Task '{}' not scheduled (attempted {}): {}",
                        task.name, unscheduled.planned_time, unscheduled.reason
                    );
                }
                Err(e) => {
                    warn!("Skipping task '{}': {}", task.name, e);
                }
            }
        }

        drafts
    }

    /// Build the shared context describing existing commitments
    pub fn build_context(&self, events: &[ExistingEvent]) -> String {
        let mut context = format!("Current date and time: {}\n\n", self.current_datetime());
        context.push_str("Here are the upcoming events that you cannot schedule over:\n\n");

        for event in events {
            context.push_str(&format!(
                "- {} from {} ({}) to {} ({})\n",
                event.summary,
                event.start.date_time,
                event.start.time_zone,
                event.end.date_time,
                event.end.time_zone,
            ));
        }

        context
    }

    /// Build the per-task scheduling prompt
    pub fn build_task_prompt(&self, task: &Task) -> String {
        format!(
            "Convert the following task into a calendar event JSON format:\n\
             \n\
             Task:\n\
             Title: {name}\n\
             Priority: {priority}\n\
             Status: {status}\n\
             Estimated Time: {estimated_time}\n\
             Due Date: {due_date}\n\
             Activity: {activity}\n\
             URL: {url}\n\
             \n\
             Scheduling rules:\n\
             - Prefer the 09:00-23:59 window in the user's local time.\n\
             - Leave at least a 15 minute gap between events.\n\
             - Do not schedule over any of the existing events.\n\
             - Schedule after the current date and time, unless the task is already overdue.\n\
             - Prefer scheduling higher priority tasks earlier.\n\
             - A task with ASAP or High priority may override the rules above.\n\
             \n\
             Return a JSON object with keys: title, start, end, and description.\n\
             If the task cannot be scheduled, return a JSON object with keys: error, \
             planned-time, and reason instead.\n\
             \n\
             Formatting for time: YYYY-MM-DDTHH:MM:SSZ\n\
             Formatting for description: ACTIVITY: {activity}, PRIORITY: {priority}, \
             DUE DATE: {due_date}, ESTIMATED TIME: {estimated_time}, MORE INFO: {url}\n",
            name = task.name,
            priority = task.priority,
            status = task.status,
            estimated_time = task.estimated_time,
            due_date = task.due_date,
            activity = task.activity,
            url = task.url,
        )
    }

    /// Current date and time in the planner's timezone
    fn current_datetime(&self) -> String {
        Utc::now()
            .with_timezone(&self.timezone)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}

/// Parse the completion reply into a scheduled draft or a declined result
pub fn parse_planner_reply(reply: &str) -> SyncResult<PlannerReply> {
    let value = extract_json_object(reply)?;

    if value.get("error").is_some() {
        let unscheduled: Unscheduled = serde_json::from_value(value)
            .map_err(|e| planner_error(&format!("Malformed infeasibility reply: {}", e)))?;
        return Ok(PlannerReply::Declined(unscheduled));
    }

    let draft: EventDraft = serde_json::from_value(value)
        .map_err(|e| planner_error(&format!("Malformed event draft: {}", e)))?;
    Ok(PlannerReply::Scheduled(draft))
}

/// Extract the outermost JSON object from the reply text
fn extract_json_object(reply: &str) -> SyncResult<Value> {
    if let Ok(value) = serde_json::from_str(reply.trim()) {
        return Ok(value);
    }

    // The model sometimes wraps the object in code fences or prose
    if let (Some(start), Some(end)) = (reply.find('{'), reply.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str(&reply[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(planner_error(&format!(
        "Could not extract valid JSON from reply: {}",
        reply
    )))
}
