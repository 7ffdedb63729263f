use std::env;

pub(crate) const API_PREFIX: &str = "/api";

pub(crate) const DEFAULT_PLACES_API_URL: &str = "https://places.googleapis.com";
pub(crate) const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com";

pub(crate) struct Config {
    pub host: String,
    pub port: u16,
    pub places_api_key: Option<String>,
    pub places_api_url: String,
    pub places_timeout_secs: u64,
    pub search_timeout_secs: u64,
    pub sheet_id: Option<String>,
    pub sheets_access_token: Option<String>,
    pub sheets_api_url: String,
    pub sheets_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            places_api_key: non_empty_var("GOOGLE_MAPS_API_KEY"),
            places_api_url: non_empty_var("PLACES_API_URL")
                .unwrap_or_else(|| DEFAULT_PLACES_API_URL.into()),
            places_timeout_secs: positive_var("PLACES_TIMEOUT_SECS").unwrap_or(10),
            search_timeout_secs: positive_var("SEARCH_TIMEOUT_SECS").unwrap_or(25),
            sheet_id: non_empty_var("GOOGLE_SHEET_ID"),
            sheets_access_token: non_empty_var("GOOGLE_SHEETS_ACCESS_TOKEN"),
            sheets_api_url: non_empty_var("SHEETS_API_URL")
                .unwrap_or_else(|| DEFAULT_SHEETS_API_URL.into()),
            sheets_timeout_secs: positive_var("SHEETS_TIMEOUT_SECS").unwrap_or(10),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    non_empty(env::var(key).ok())
}

fn positive_var(key: &str) -> Option<u64> {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|&s| s > 0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
