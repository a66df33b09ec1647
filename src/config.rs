//! Configuration management for spotmeta.
//!
//! Values are read from environment variables, which may be populated from a
//! `.env` file in the local data directory. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Returns the directory spotmeta keeps its files in.
///
/// - Linux: `~/.local/share/spotmeta`
/// - macOS: `~/Library/Application Support/spotmeta`
/// - Windows: `%LOCALAPPDATA%/spotmeta`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotmeta");
    path
}

/// Loads environment variables from `<data_dir>/.env`.
///
/// The directory is created if needed. A missing `.env` file is not an error;
/// a malformed one is.
///
/// # Example
///
/// ```
/// use spotmeta::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Base URL of the Web API, from `SPOTIFY_API_URL`.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Access token from `SPOTIFY_ACCESS_TOKEN`, if set and non-empty.
pub fn spotify_access_token() -> Option<String> {
    env::var("SPOTIFY_ACCESS_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty())
}

/// Token scheme from `SPOTIFY_TOKEN_TYPE`.
pub fn spotify_token_type() -> String {
    env::var("SPOTIFY_TOKEN_TYPE").unwrap_or_else(|_| DEFAULT_TOKEN_TYPE.to_string())
}

/// ISO 3166-1 alpha-2 market applied to catalog lookups, from `SPOTIFY_MARKET`.
pub fn spotify_market() -> Option<String> {
    env::var("SPOTIFY_MARKET")
        .ok()
        .filter(|m| !m.trim().is_empty())
}

/// Request timeout from `SPOTIFY_HTTP_TIMEOUT_SECS`.
pub fn http_timeout() -> Duration {
    let secs = env::var("SPOTIFY_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    Duration::from_secs(secs)
}
