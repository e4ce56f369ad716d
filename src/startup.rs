use crate::components::google_calendar::{parse_events, to_calendar_event, CalendarClient};
use crate::components::notion::NotionClient;
use crate::components::planner::{OpenAiBackend, Planner};
use crate::config::Config;
use crate::error::Error;
use crate::utils::persist::save_json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// File that receives the raw Notion query results each run
pub const NOTION_RESULTS_FILE: &str = "notion_results.json";

/// File that receives the final planned events each run
pub const CALENDAR_EVENTS_FILE: &str = "calendar_events.json";

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and validate the application config
pub fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Run one full sync: fetch tasks, plan them around existing events, insert
pub async fn run_sync(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let (statuses, timezone, timezone_name, max_results) = {
        let config_read = config.read().await;
        (
            config_read.statuses.clone(),
            config_read.tz(),
            config_read.timezone.clone(),
            config_read.max_results,
        )
    };

    let notion = NotionClient::new(Arc::clone(&config));
    let calendar = CalendarClient::new(Arc::clone(&config));
    let backend = Arc::new(OpenAiBackend::new(Arc::clone(&config)));
    let planner = Planner::new(backend, timezone);

    // Query and flatten Notion tasks; nothing to plan without them
    let results = notion.get_tasks_by_status(&statuses).await?;
    info!(
        "Notion query results:\n{}",
        serde_json::to_string_pretty(&results).unwrap_or_default()
    );
    save_json(NOTION_RESULTS_FILE, &results)?;

    let tasks = NotionClient::parse_response(&results)?;
    info!("Parsed {} tasks", tasks.len());

    // Existing events degrade to an empty list on failure
    let existing_events = match calendar.get_upcoming_events(None, max_results).await {
        Ok(raw) => {
            info!(
                "Upcoming events (raw):\n{}",
                serde_json::to_string_pretty(&raw).unwrap_or_default()
            );
            let parsed = parse_events(&raw);
            for event in &parsed {
                info!("{} {}", event.start.date_time, event.summary);
            }
            parsed
        }
        Err(e) => {
            warn!("Error processing upcoming events: {}", e);
            Vec::new()
        }
    };

    // Plan drafts; per-task failures are logged and skipped inside
    let drafts = planner.plan(&tasks, &existing_events).await;
    info!(
        "Planned events:\n{}",
        serde_json::to_string_pretty(&drafts).unwrap_or_default()
    );

    // Convert drafts into insert payloads and persist them for inspection
    let events: Vec<_> = drafts
        .iter()
        .map(|draft| to_calendar_event(draft, &timezone_name))
        .collect();
    save_json(CALENDAR_EVENTS_FILE, &events)?;

    let inserted = calendar.insert_events(&events).await?;
    info!("Inserted {} events", inserted.len());

    Ok(())
}
