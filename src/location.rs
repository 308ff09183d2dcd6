use crate::errors::ApiError;
use crate::models::{Location, LocationReport, LocationState};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{info, warn};

const FALLBACK_NAME: &str = "Current Location";

#[derive(Debug, Deserialize)]
struct ReverseGeocode {
    display_name: Option<String>,
}

/// Turns a position reported by the browser into a named [`Location`].
#[derive(Clone)]
pub struct LocationProvider {
    client: Client,
    reverse_url: Url,
}

impl LocationProvider {
    pub fn new(client: Client, geocoder_url: &str) -> Result<Self, ApiError> {
        let reverse_url = Url::parse(geocoder_url)
            .and_then(|base| base.join("reverse"))
            .map_err(|err| ApiError::Url(format!("{geocoder_url}: {err}")))?;
        Ok(Self {
            client,
            reverse_url,
        })
    }

    pub async fn resolve(&self, report: LocationReport) -> LocationState {
        match report {
            LocationReport::Position {
                latitude,
                longitude,
            } => {
                let name = match self.reverse_geocode(latitude, longitude).await {
                    Ok(name) => Some(name),
                    Err(err) => {
                        warn!("reverse geocoding failed, keeping coordinates only: {err}");
                        None
                    }
                };
                info!(latitude, longitude, name = ?name, "location captured");
                LocationState {
                    location: Some(Location {
                        latitude,
                        longitude,
                        name,
                    }),
                    loading: false,
                    error: None,
                }
            }
            LocationReport::Failed { error } => {
                warn!("geolocation unavailable: {error}");
                LocationState {
                    location: None,
                    loading: false,
                    error: Some(format!("Unable to retrieve your location: {error}")),
                }
            }
        }
    }

    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<String, ApiError> {
        let url = self.reverse_url.to_string();
        let request_error = |source| ApiError::Request {
            url: url.clone(),
            source,
        };
        let response = self
            .client
            .get(self.reverse_url.clone())
            .query(&[
                ("format", "json".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("zoom", "10".to_string()),
            ])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let payload: ReverseGeocode = response.json().await.map_err(request_error)?;
        Ok(place_name(payload.display_name.as_deref()))
    }
}

fn place_name(display_name: Option<&str>) -> String {
    display_name
        .and_then(|name| name.split(',').next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_NAME)
        .to_string()
}
