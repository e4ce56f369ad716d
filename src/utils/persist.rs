use crate::error::SyncResult;
use serde::Serialize;
use std::fs;

/// Write a value to a file as pretty-printed JSON, replacing any previous run
pub fn save_json<T: Serialize>(path: &str, value: &T) -> SyncResult<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    fs::write(path, pretty)?;
    Ok(())
}
