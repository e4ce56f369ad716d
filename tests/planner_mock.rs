use async_trait::async_trait;
use notikka::components::google_calendar::{EventStamp, ExistingEvent};
use notikka::components::notion::Task;
use notikka::components::planner::{CompletionBackend, CompletionRequest, Planner};
use notikka::error::{planner_error, SyncResult};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock completion backend that replays canned replies in order
struct MockBackend {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockBackend {
    fn new(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(&self, request: &CompletionRequest) -> SyncResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| planner_error("Mock backend has no reply queued"))
    }
}

fn test_planner(backend: Arc<MockBackend>) -> Planner {
    Planner::new(backend, "America/Los_Angeles".parse().unwrap())
}

fn write_report_task() -> Task {
    Task {
        name: "Write report".to_string(),
        status: "In Progress".to_string(),
        priority: "High".to_string(),
        estimated_time: "2h".to_string(),
        due_date: "2025-01-10".to_string(),
        activity: "Work".to_string(),
        url: "http://x".to_string(),
    }
}

fn valid_reply(title: &str) -> String {
    json!({
        "title": title,
        "start": "2025-01-10T09:00:00Z",
        "end": "2025-01-10T11:00:00Z",
        "description": "ACTIVITY: Work, PRIORITY: High, DUE DATE: 2025-01-10, MORE INFO: http://x"
    })
    .to_string()
}

/// A single task with no existing events produces exactly one draft whose
/// description carries the priority and due date
#[tokio::test]
async fn test_plan_write_report_scenario() {
    let backend = Arc::new(MockBackend::new(vec![valid_reply("Write report")]));
    let planner = test_planner(Arc::clone(&backend));

    let drafts = planner.plan(&[write_report_task()], &[]).await;

    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].title, "Write report");
    assert!(drafts[0].description.contains("High"));
    assert!(drafts[0].description.contains("2025-01-10"));

    // The prompt itself embeds the task's fields
    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].user.contains("High"));
    assert!(requests[0].user.contains("2025-01-10"));
    assert!(requests[0].user.contains("Write report"));
}

/// A reply with an error key never becomes a draft and the batch continues
#[tokio::test]
async fn test_plan_error_reply_dropped() {
    let error_reply = json!({
        "error": "no slot",
        "planned-time": "2025-01-10T09:00:00Z",
        "reason": "fully booked"
    })
    .to_string();

    let backend = Arc::new(MockBackend::new(vec![error_reply, valid_reply("Second task")]));
    let planner = test_planner(Arc::clone(&backend));

    let mut second = write_report_task();
    second.name = "Second task".to_string();

    let drafts = planner.plan(&[write_report_task(), second], &[]).await;

    // Both tasks were attempted, only the second produced a draft
    assert_eq!(backend.requests().len(), 2);
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].title, "Second task");
}

/// A malformed reply skips that task without aborting the rest
#[tokio::test]
async fn test_plan_malformed_reply_skipped() {
    let backend = Arc::new(MockBackend::new(vec![
        "this is not json".to_string(),
        valid_reply("Second task"),
    ]));
    let planner = test_planner(Arc::clone(&backend));

    let drafts = planner.plan(&[write_report_task(), write_report_task()], &[]).await;

    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].title, "Second task");
}

/// A failing backend call skips the task rather than erroring the batch
#[tokio::test]
async fn test_plan_backend_failure_skipped() {
    let backend = Arc::new(MockBackend::new(Vec::new()));
    let planner = test_planner(Arc::clone(&backend));

    let drafts = planner.plan(&[write_report_task()], &[]).await;

    assert!(drafts.is_empty());
}

/// A reply wrapped in code fences still parses
#[tokio::test]
async fn test_plan_fenced_reply_parses() {
    let fenced = format!("```json\n{}\n```", valid_reply("Write report"));
    let backend = Arc::new(MockBackend::new(vec![fenced]));
    let planner = test_planner(Arc::clone(&backend));

    let drafts = planner.plan(&[write_report_task()], &[]).await;

    assert_eq!(drafts.len(), 1);
}

/// The shared context lists each existing event as a constraint
#[tokio::test]
async fn test_context_lists_existing_events() {
    let backend = Arc::new(MockBackend::new(vec![valid_reply("Write report")]));
    let planner = test_planner(Arc::clone(&backend));

    let existing = vec![ExistingEvent {
        summary: "Team standup".to_string(),
        start: EventStamp {
            date_time: "2025-01-10T09:00:00-08:00".to_string(),
            time_zone: "America/Los_Angeles".to_string(),
        },
        end: EventStamp {
            date_time: "2025-01-10T09:30:00-08:00".to_string(),
            time_zone: "America/Los_Angeles".to_string(),
        },
        ..Default::default()
    }];

    let context = planner.build_context(&existing);
    assert!(context.contains("Current date and time:"));
    assert!(context.contains("- Team standup from 2025-01-10T09:00:00-08:00"));

    // The same context rides along as the request's assistant message
    planner.plan(&[write_report_task()], &existing).await;
    let requests = backend.requests();
    assert!(requests[0]
        .context
        .as_deref()
        .unwrap()
        .contains("Team standup"));
}
