use crate::core::error::{Error, Result};
use crate::data::migrate::parse_backup;
use crate::data::model::AppData;
use crate::storage::dashboard::DashboardStore;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// `marklog-backup-YYYY-MM-DD.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("marklog-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Pretty-printed JSON of the full dashboard.
pub fn export_to_string(data: &AppData) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| Error::Serialization(format!("Failed to serialize backup: {}", e)))
}

/// Write the current dashboard into `dir`, named after today's local date.
pub fn export(store: &DashboardStore, dir: &Path) -> Result<PathBuf> {
    let data = store.load()?;
    fs::create_dir_all(dir)?;
    let path = dir.join(backup_file_name(Local::now().date_naive()));
    fs::write(&path, export_to_string(&data)?)?;
    info!("exported backup to {}", path.display());
    Ok(path)
}

/// Replace the stored dashboard with a backup. Nothing is written unless the
/// backup parses completely.
pub fn import_from_str(store: &DashboardStore, raw: &str) -> Result<AppData> {
    let data = parse_backup(raw)?;
    store.save(&data)?;
    info!(
        favorites = data.favorites.len(),
        folders = data.folders.len(),
        "imported backup"
    );
    Ok(data)
}

pub fn import(store: &DashboardStore, path: &Path) -> Result<AppData> {
    let raw = fs::read_to_string(path)?;
    import_from_str(store, &raw)
}
