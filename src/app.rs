use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard_page))
        .route("/history", get(handlers::history_page))
        .route("/settings", get(handlers::settings_page))
        .route("/api/location", post(handlers::report_location))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/history", get(handlers::get_history))
        .route(
            "/api/moods",
            get(handlers::list_moods).post(handlers::submit_mood),
        )
        .route(
            "/api/moods/:id",
            get(handlers::get_mood)
                .put(handlers::update_mood)
                .delete(handlers::delete_mood),
        )
        .route("/api/trends/weekly", get(handlers::weekly_trend))
        .route("/api/recommendations", get(handlers::recommendations))
        .route(
            "/api/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/api/profile/avatar", post(handlers::upload_avatar))
        .with_state(state)
}
