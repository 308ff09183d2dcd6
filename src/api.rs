use crate::errors::ApiError;
use crate::models::{
    Location, MoodEntry, MoodRecommendations, MoodStatistics, NewMoodEntry, WeeklyMoodTrend,
};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Typed wrapper around the mood backend's REST endpoints.
#[derive(Clone)]
pub struct MoodApi {
    client: Client,
    base: Url,
}

impl MoodApi {
    pub fn new(client: Client, base_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|err| ApiError::Url(format!("{base_url}: {err}")))?;
        Ok(Self { client, base })
    }

    pub async fn list_moods(&self, cancel: &CancellationToken) -> Result<Vec<MoodEntry>, ApiError> {
        self.json(Method::GET, "moods/", cancel, |req| req).await
    }

    pub async fn create_mood(
        &self,
        entry: &NewMoodEntry,
        cancel: &CancellationToken,
    ) -> Result<MoodEntry, ApiError> {
        self.json(Method::POST, "moods/", cancel, |req| req.json(entry)).await
    }

    pub async fn get_mood(&self, id: i64, cancel: &CancellationToken) -> Result<MoodEntry, ApiError> {
        self.json(Method::GET, &format!("moods/{id}/"), cancel, |req| req).await
    }

    pub async fn update_mood(
        &self,
        id: i64,
        entry: &NewMoodEntry,
        cancel: &CancellationToken,
    ) -> Result<MoodEntry, ApiError> {
        self.json(Method::PUT, &format!("moods/{id}/"), cancel, |req| req.json(entry)).await
    }

    pub async fn delete_mood(&self, id: i64, cancel: &CancellationToken) -> Result<(), ApiError> {
        self.send(Method::DELETE, &format!("moods/{id}/"), cancel, |req| req)
            .await
            .map(|_| ())
    }

    /// Statistics, optionally tailored to the user's location.
    pub async fn statistics(
        &self,
        location: Option<&Location>,
        cancel: &CancellationToken,
    ) -> Result<MoodStatistics, ApiError> {
        self.json(Method::GET, "statistics/", cancel, |req| match location {
            Some(location) => req.query(&statistics_query(location)),
            None => req,
        })
        .await
    }

    pub async fn weekly_trend(&self, cancel: &CancellationToken) -> Result<WeeklyMoodTrend, ApiError> {
        self.json(Method::GET, "trends/weekly/", cancel, |req| req).await
    }

    pub async fn recommendations(
        &self,
        cancel: &CancellationToken,
    ) -> Result<MoodRecommendations, ApiError> {
        self.json(Method::GET, "recommendations/", cancel, |req| req).await
    }

    async fn json<T, F>(
        &self,
        method: Method,
        path: &str,
        cancel: &CancellationToken,
        build: F,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path)?;
        let response = self.send(method, path, cancel, build).await?;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
            body = response.json::<T>() => body.map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            }),
        }
    }

    async fn send<F>(
        &self,
        method: Method,
        path: &str,
        cancel: &CancellationToken,
        build: F,
    ) -> Result<reqwest::Response, ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path)?;
        debug!(%method, %url, "backend request");
        let request = build(self.client.request(method, url.clone()));

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ApiError::Cancelled),
            response = request.send() => response.map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?,
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(response)
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::Url(format!("{path}: {err}")))
    }
}

fn statistics_query(location: &Location) -> Vec<(&'static str, String)> {
    vec![
        ("lat", location.latitude.to_string()),
        ("lon", location.longitude.to_string()),
        (
            "location_name",
            location.name.clone().unwrap_or_default(),
        ),
    ]
}
