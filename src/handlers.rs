use crate::cache::{HISTORY_KEY, HistoryData, SharedState, location_key};
use crate::errors::AppError;
use crate::factors::parse_factors;
use crate::history::{process_entries, score_from_average, summarize};
use crate::models::{
    DashboardResponse, HistoryResponse, Location, LocationReport, LocationState, MoodEntry,
    MoodRecommendations, NewMoodEntry, ProfileResponse, SubmitMoodRequest, UserSettingsUpdate,
    WeeklyMoodTrend,
};
use crate::ring::{layout_rings, render_svg};
use crate::state::AppState;
use crate::storage::ProfileStore;
use crate::theme::MoodTheme;
use crate::ui;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::Html,
};
use chrono::Local;
use std::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{info, warn};

const STATISTICS_ERROR: &str = "Failed to load mood statistics. Please try again later.";
const HISTORY_ERROR: &str = "Failed to load mood history. Please try again later.";

/// Token cancelled when the returned guard drops, i.e. when the request
/// handling this call is torn down.
fn request_token() -> (CancellationToken, DropGuard) {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();
    (token, guard)
}

pub async fn dashboard_page(State(state): State<AppState>) -> Html<String> {
    let view = {
        let shared = state.shared.lock().await;
        dashboard_view(&shared)
    };
    let profile = state.profile.lock().await;
    Html(ui::render_dashboard_page(&view, &avatar(&profile)))
}

pub async fn history_page(State(state): State<AppState>) -> Html<String> {
    let (cancel, _guard) = request_token();
    let (view, trend) = load_history(&state, &cancel).await;
    let profile = state.profile.lock().await;
    Html(ui::render_history_page(
        &view,
        trend.as_ref(),
        Local::now().date_naive(),
        &avatar(&profile),
    ))
}

pub async fn settings_page(State(state): State<AppState>) -> Html<String> {
    let profile = state.profile.lock().await;
    Html(ui::render_settings_page(profile.settings(), &avatar(&profile)))
}

pub async fn report_location(
    State(state): State<AppState>,
    Json(report): Json<LocationReport>,
) -> Json<LocationState> {
    {
        let shared = state.shared.lock().await;
        if shared.location.location.is_some() {
            return Json(shared.location.clone());
        }
    }

    let resolved = state.locator.resolve(report).await;
    let mut shared = state.shared.lock().await;
    shared.set_location(resolved);
    Json(shared.location.clone())
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let (cancel, _guard) = request_token();
    let pending = {
        let mut shared = state.shared.lock().await;
        let location = shared.location.location.clone();
        let key = location_key(location.as_ref());
        let max_age = shared.max_age;
        if shared.dashboard.needs_fetch(&key, max_age, Instant::now()) {
            shared.dashboard.begin();
            Some((key, location))
        } else {
            None
        }
    };

    if let Some((key, location)) = pending {
        refresh_statistics(&state, key, location, &cancel).await;
    }

    let shared = state.shared.lock().await;
    Json(dashboard_view(&shared))
}

/// Records a mood, then refetches statistics so the dashboard reflects it.
pub async fn submit_mood(
    State(state): State<AppState>,
    Json(payload): Json<SubmitMoodRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    if !(0.0..=10.0).contains(&payload.value) {
        return Err(AppError::bad_request("value must be between 0 and 10"));
    }

    let (cancel, _guard) = request_token();
    let entry = NewMoodEntry {
        value: payload.value,
        note: payload.note.unwrap_or_default(),
        date: payload.date.unwrap_or_else(|| Local::now().date_naive()),
    };
    let created = state.api.create_mood(&entry, &cancel).await?;
    info!(id = created.id, value = created.value, date = %created.date, "mood recorded");

    let location = {
        let mut shared = state.shared.lock().await;
        shared.history.invalidate();
        shared.dashboard.begin();
        shared.location.location.clone()
    };
    let key = location_key(location.as_ref());
    refresh_statistics(&state, key, location, &cancel).await;

    let shared = state.shared.lock().await;
    Ok(Json(dashboard_view(&shared)))
}

pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let (cancel, _guard) = request_token();
    let (view, _) = load_history(&state, &cancel).await;
    Json(view)
}

pub async fn list_moods(State(state): State<AppState>) -> Result<Json<Vec<MoodEntry>>, AppError> {
    let (cancel, _guard) = request_token();
    Ok(Json(state.api.list_moods(&cancel).await?))
}

pub async fn get_mood(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MoodEntry>, AppError> {
    let (cancel, _guard) = request_token();
    Ok(Json(state.api.get_mood(id, &cancel).await?))
}

pub async fn update_mood(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(entry): Json<NewMoodEntry>,
) -> Result<Json<MoodEntry>, AppError> {
    if !(0.0..=10.0).contains(&entry.value) {
        return Err(AppError::bad_request("value must be between 0 and 10"));
    }
    let (cancel, _guard) = request_token();
    let updated = state.api.update_mood(id, &entry, &cancel).await?;
    state.shared.lock().await.invalidate_all();
    info!(id, "mood updated");
    Ok(Json(updated))
}

pub async fn delete_mood(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let (cancel, _guard) = request_token();
    state.api.delete_mood(id, &cancel).await?;
    state.shared.lock().await.invalidate_all();
    info!(id, "mood deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn weekly_trend(State(state): State<AppState>) -> Result<Json<WeeklyMoodTrend>, AppError> {
    let (cancel, _guard) = request_token();
    Ok(Json(state.api.weekly_trend(&cancel).await?))
}

pub async fn recommendations(
    State(state): State<AppState>,
) -> Result<Json<MoodRecommendations>, AppError> {
    let (cancel, _guard) = request_token();
    Ok(Json(state.api.recommendations(&cancel).await?))
}

pub async fn get_profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    let profile = state.profile.lock().await;
    Json(profile_response(&profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Json(update): Json<UserSettingsUpdate>,
) -> Result<Json<ProfileResponse>, AppError> {
    let mut profile = state.profile.lock().await;
    profile.update(update).await?;
    Ok(Json(profile_response(&profile)))
}

pub async fn upload_avatar(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ProfileResponse>, AppError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::bad_request("missing content-type"))?;
    if body.is_empty() {
        return Err(AppError::bad_request("empty upload"));
    }

    let mut profile = state.profile.lock().await;
    profile.set_picture(content_type, &body).await?;
    Ok(Json(profile_response(&profile)))
}

async fn refresh_statistics(
    state: &AppState,
    key: String,
    location: Option<Location>,
    cancel: &CancellationToken,
) {
    let result = state.api.statistics(location.as_ref(), cancel).await;
    let mut shared = state.shared.lock().await;
    match result {
        Ok(statistics) => {
            info!(entries = statistics.entries_count, %key, "statistics refreshed");
            shared.dashboard.store(key, statistics, Instant::now());
        }
        Err(err) => {
            warn!("failed to fetch statistics: {err}");
            shared.dashboard.fail(STATISTICS_ERROR);
        }
    }
}

async fn load_history(
    state: &AppState,
    cancel: &CancellationToken,
) -> (HistoryResponse, Option<WeeklyMoodTrend>) {
    let pending = {
        let mut shared = state.shared.lock().await;
        let max_age = shared.max_age;
        if shared.history.needs_fetch(HISTORY_KEY, max_age, Instant::now()) {
            shared.history.begin();
            Some(shared.dashboard.data.as_ref().map(|stats| stats.average_mood))
        } else {
            None
        }
    };

    if let Some(baseline) = pending {
        let result = fetch_history(state, baseline, cancel).await;
        let mut shared = state.shared.lock().await;
        match result {
            Ok(data) => {
                info!(entries = data.entries.len(), "history refreshed");
                shared.history.store(HISTORY_KEY, data, Instant::now());
            }
            Err(message) => shared.history.fail(message),
        }
    }

    let shared = state.shared.lock().await;
    history_view(&shared)
}

async fn fetch_history(
    state: &AppState,
    baseline: Option<f64>,
    cancel: &CancellationToken,
) -> Result<HistoryData, String> {
    let entries = state.api.list_moods(cancel).await.map_err(|err| {
        warn!("failed to fetch mood entries: {err}");
        HISTORY_ERROR.to_string()
    })?;

    let baseline = match baseline {
        Some(average) => Some(average),
        None => match state.api.statistics(None, cancel).await {
            Ok(statistics) => Some(statistics.average_mood),
            Err(err) => {
                warn!("history shown without predictions: {err}");
                None
            }
        },
    };

    let entries = process_entries(&entries, baseline).map_err(|err| {
        warn!("rejecting mood history: {err}");
        format!("Mood history is inconsistent: {err}")
    })?;

    let trend = match state.api.weekly_trend(cancel).await {
        Ok(trend) => Some(trend),
        Err(err) => {
            warn!("weekly trend unavailable: {err}");
            None
        }
    };

    Ok(HistoryData { entries, trend })
}

fn dashboard_view(shared: &SharedState) -> DashboardResponse {
    let statistics = shared.dashboard.data.clone();
    let mood_score = statistics
        .as_ref()
        .map(|stats| score_from_average(stats.average_mood))
        .unwrap_or(0);
    let descriptions = statistics
        .as_ref()
        .and_then(|stats| stats.highest_mood.as_ref())
        .and_then(|best| best.factors.clone())
        .unwrap_or_default();

    let factors = parse_factors(mood_score, &descriptions);
    let ring_svg = render_svg(&layout_rings(&factors), mood_score);

    let mut view = DashboardResponse {
        mood_score,
        theme: MoodTheme::from_score(mood_score).as_str(),
        factors,
        ring_svg,
        statistics,
        location: shared.location.clone(),
        loading: shared.dashboard.loading,
        error: shared.dashboard.error.clone(),
        html: String::new(),
    };
    view.html = ui::render_dashboard_body(&view);
    view
}

fn history_view(shared: &SharedState) -> (HistoryResponse, Option<WeeklyMoodTrend>) {
    let data = shared.history.data.clone().unwrap_or_default();
    let summary = summarize(&data.entries);
    let view = HistoryResponse {
        total_entries: summary.total_entries,
        accuracy: summary.accuracy,
        average_mood: summary.average_mood,
        trend: data.trend.as_ref().map(|trend| trend.trend),
        entries: data.entries,
        loading: shared.history.loading,
        error: shared.history.error.clone(),
    };
    (view, data.trend)
}

fn profile_response(profile: &ProfileStore) -> ProfileResponse {
    ProfileResponse {
        settings: profile.settings().clone(),
        initials: profile.initials(),
    }
}

fn avatar(profile: &ProfileStore) -> ui::Avatar {
    ui::Avatar {
        initials: profile.initials(),
        picture: profile.settings().profile_picture.clone(),
    }
}
