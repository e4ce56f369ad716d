/// Flattened task record from the Notion database
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, Default)]
pub struct Task {
    pub name: String,
    pub status: String,
    pub priority: String,
    pub estimated_time: String,
    pub due_date: String,
    pub activity: String,
    pub url: String,
}
