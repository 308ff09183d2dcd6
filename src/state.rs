use crate::api::MoodApi;
use crate::cache::SharedState;
use crate::config::Config;
use crate::errors::ApiError;
use crate::location::LocationProvider;
use crate::storage::ProfileStore;
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;

const GEOCODER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct AppState {
    pub api: MoodApi,
    pub locator: LocationProvider,
    pub shared: Arc<Mutex<SharedState>>,
    pub profile: Arc<Mutex<ProfileStore>>,
}

impl AppState {
    pub fn new(config: &Config, profile: ProfileStore) -> Result<Self, ApiError> {
        let geocoder_client = reqwest::Client::builder()
            .timeout(GEOCODER_TIMEOUT)
            .user_agent(concat!("moodup/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ApiError::Request {
                url: config.geocoder_url.clone(),
                source,
            })?;

        Ok(Self {
            api: MoodApi::new(reqwest::Client::new(), &config.api_url)?,
            locator: LocationProvider::new(geocoder_client, &config.geocoder_url)?,
            shared: Arc::new(Mutex::new(SharedState::new(config.cache_max_age))),
            profile: Arc::new(Mutex::new(profile)),
        })
    }
}
