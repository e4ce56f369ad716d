use serde::{Deserialize, Serialize};

/// Event proposal returned by the completion service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub start: String,
    pub end: String,
    pub description: String,
}

/// Infeasibility reply from the completion service
///
/// The service spells the attempted slot as `planned-time`; older replies
/// used `plannedTime` or `attemptedTime`, so those are tolerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unscheduled {
    #[serde(default)]
    pub error: String,
    #[serde(
        rename = "planned-time",
        alias = "plannedTime",
        alias = "attemptedTime",
        default
    )]
    pub planned_time: String,
    #[serde(default)]
    pub reason: String,
}

/// Parsed planner reply, scheduled or declined
#[derive(Debug, Clone)]
pub enum PlannerReply {
    Scheduled(EventDraft),
    Declined(Unscheduled),
}
