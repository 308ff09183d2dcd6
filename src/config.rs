use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub api_url: String,
    pub geocoder_url: String,
    /// `None` keeps fetched page data for the whole session.
    pub cache_max_age: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        let cache_max_age = env::var("CACHE_MAX_AGE_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs);

        Self {
            port,
            data_path: resolve_data_path(),
            api_url: with_trailing_slash(
                env::var("MOOD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            ),
            geocoder_url: with_trailing_slash(
                env::var("GEOCODER_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string()),
            ),
            cache_max_age,
        }
    }
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/profile.json")
}

// Url::join drops the last path segment unless the base ends with '/'.
fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
