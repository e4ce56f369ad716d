// Export components
pub mod google_calendar;
pub mod notion;
pub mod planner;

// Re-export the clients used by the sync run
pub use google_calendar::CalendarClient;
pub use notion::NotionClient;
pub use planner::Planner;
