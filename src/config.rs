use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the keyed storage files (one JSON file per key).
    pub storage_dir: PathBuf,
    /// Base URL of the GoStock backend REST API.
    pub api_base_url: String,
    /// Reminder poll cadence in seconds.
    /// Set via GOSTOCK_REMINDER_INTERVAL_SECS. Default: 900 (15 minutes).
    pub reminder_interval_secs: u64,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    Ok(Config {
        storage_dir: std::env::var("GOSTOCK_STORAGE_DIR")
            .unwrap_or_else(|_| "./data".into())
            .into(),
        api_base_url: std::env::var("GOSTOCK_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api".into()),
        reminder_interval_secs: std::env::var("GOSTOCK_REMINDER_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(900),
    })
}
