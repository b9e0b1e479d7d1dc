use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for StartupNest
/// If profile is Dev, uses "startupnest-dev" instead of "startupnest"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "startupnest-dev",
        Profile::Prod => "startupnest",
    };
    // Use "com" as qualifier for better cross-platform compatibility
    ProjectDirs::from("com", "startupnest", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for StartupNest
/// If profile is Dev, uses "startupnest-dev" instead of "startupnest"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "startupnest-dev",
        Profile::Prod => "startupnest",
    };
    ProjectDirs::from("com", "startupnest", app_name)
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<chrono::NaiveDate, chrono::ParseError> {
    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// Get the current date as an ISO 8601 string (YYYY-MM-DD)
pub fn get_current_date_string() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Get the current instant as a full ISO 8601 timestamp (UTC, millisecond precision)
pub fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Generate a fresh opaque record id.
///
/// Ids are millisecond timestamps rendered as decimal strings. Two records
/// created within the same millisecond would collide, so the last issued
/// value is tracked and bumped by one when needed.
pub fn next_id() -> String {
    let now = chrono::Utc::now().timestamp_millis();
    let mut prev = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(prev + 1);
        match LAST_ID.compare_exchange(prev, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate.to_string(),
            Err(actual) => prev = actual,
        }
    }
}
