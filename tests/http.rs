use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct DashboardResponse {
    mood_score: u8,
    factors: Vec<Factor>,
    ring_svg: String,
    location: LocationState,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Factor {
    name: String,
    points: f64,
}

#[derive(Debug, Deserialize)]
struct LocationState {
    location: Option<Location>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Location {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryEntry {
    date: String,
    predicted_mood: u8,
    actual_mood: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    entries: Vec<HistoryEntry>,
    total_entries: usize,
    accuracy: u8,
    average_mood: u8,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MoodEntry {
    id: u64,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct WeeklyTrend {
    trend: String,
}

#[derive(Debug, Deserialize)]
struct Recommendations {
    mood_insight: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    name: String,
    profile_picture: Option<String>,
    initials: String,
}

/// In-process stand-in for the mood backend and the geocoder.
#[derive(Default)]
struct FakeBackend {
    entries: Mutex<Vec<Value>>,
    created: Mutex<Vec<Value>>,
    statistics_queries: Mutex<Vec<HashMap<String, String>>>,
    fail_statistics: AtomicBool,
    list_calls: AtomicUsize,
}

impl FakeBackend {
    fn statistics_calls(&self) -> usize {
        self.statistics_queries.lock().unwrap().len()
    }

    fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn seed(&self) {
        self.entries.lock().unwrap().extend([
            json!({ "id": 1, "value": 8, "note": "", "date": "2024-03-01", "created_at": "", "updated_at": "" }),
            json!({ "id": 2, "value": 6, "note": "", "date": "2024-03-02", "created_at": "", "updated_at": "" }),
        ]);
    }
}

async fn list_moods(State(backend): State<Arc<FakeBackend>>) -> Json<Value> {
    backend.list_calls.fetch_add(1, Ordering::SeqCst);
    Json(Value::Array(backend.entries.lock().unwrap().clone()))
}

async fn get_mood(
    State(backend): State<Arc<FakeBackend>>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let entries = backend.entries.lock().unwrap();
    entries
        .iter()
        .find(|e| e["id"].as_u64() == Some(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_mood(
    State(backend): State<Arc<FakeBackend>>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut entries = backend.entries.lock().unwrap();
    let entry = entries
        .iter_mut()
        .find(|e| e["id"].as_u64() == Some(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    entry["value"] = body["value"].clone();
    entry["note"] = body["note"].clone();
    entry["date"] = body["date"].clone();
    Ok(Json(entry.clone()))
}

async fn delete_mood(State(backend): State<Arc<FakeBackend>>, Path(id): Path<u64>) -> StatusCode {
    let mut entries = backend.entries.lock().unwrap();
    let before = entries.len();
    entries.retain(|e| e["id"].as_u64() != Some(id));
    if entries.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn create_mood(State(backend): State<Arc<FakeBackend>>, Json(body): Json<Value>) -> Json<Value> {
    backend.created.lock().unwrap().push(body.clone());
    let mut entries = backend.entries.lock().unwrap();
    let entry = json!({
        "id": entries.len() + 1,
        "value": body["value"],
        "note": body["note"],
        "date": body["date"],
        "created_at": "2024-03-01T08:00:00Z",
        "updated_at": "2024-03-01T08:00:00Z",
    });
    entries.push(entry.clone());
    Json(entry)
}

async fn statistics(
    State(backend): State<Arc<FakeBackend>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    backend.statistics_queries.lock().unwrap().push(query);
    if backend.fail_statistics.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let entries = backend.entries.lock().unwrap();
    let values: Vec<f64> = entries.iter().filter_map(|e| e["value"].as_f64()).collect();
    let average = if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    };
    Ok(Json(json!({
        "average_mood": average,
        "entries_count": values.len(),
        "highest_mood": {
            "value": 8,
            "date": "2024-03-01",
            "factors": ["Temperature had a 12 points impact", "Sleep: 8 points", "unparseable"]
        },
        "lowest_mood": null,
        "most_frequent_mood": null
    })))
}

async fn weekly_trend() -> Json<Value> {
    Json(json!({ "dates": ["2024-03-01"], "values": [8.0], "trend": "stable" }))
}

async fn recommendations() -> Json<Value> {
    Json(json!({
        "recommendations": [{ "title": "Walk", "description": "Take a short walk outside" }],
        "mood_insight": "Mornings are your best time"
    }))
}

async fn reverse_geocode() -> Json<Value> {
    Json(json!({ "display_name": "Amsterdam, North Holland, Netherlands" }))
}

async fn spawn_backend(backend: Arc<FakeBackend>) -> String {
    let app = Router::new()
        .route("/api/moods/", get(list_moods).post(create_mood))
        .route("/api/moods/:id/", get(get_mood).put(update_mood).delete(delete_mood))
        .route("/api/statistics/", get(statistics))
        .route("/api/recommendations/", get(recommendations))
        .route("/api/trends/weekly/", get(weekly_trend))
        .route("/geo/reverse", get(reverse_geocode))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("moodup_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/profile")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_app(backend: Arc<FakeBackend>) -> TestServer {
    let backend_url = spawn_backend(backend).await;
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_moodup"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", unique_data_path())
        .env("MOOD_API_URL", format!("{backend_url}/api/"))
        .env("GEOCODER_URL", format!("{backend_url}/geo/"))
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

#[tokio::test]
async fn http_submit_mood_posts_entry_then_refreshes_statistics() {
    let backend = Arc::new(FakeBackend::default());
    let server = spawn_app(Arc::clone(&backend)).await;
    let client = Client::new();

    let before: DashboardResponse = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(before.mood_score, 0);
    assert_eq!(backend.statistics_calls(), 1);

    let response = client
        .post(format!("{}/api/moods", server.base_url))
        .json(&json!({ "value": 8, "date": "2024-03-01" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let after: DashboardResponse = response.json().await.unwrap();

    let created = backend.created.lock().unwrap().clone();
    assert_eq!(created, vec![json!({ "value": 8.0, "note": "", "date": "2024-03-01" })]);
    assert_eq!(backend.statistics_calls(), 2);
    assert_eq!(after.mood_score, 80);
    assert!(after.error.is_none());

    let names: Vec<&str> = after.factors.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Temperature", "Sleep"]);
    assert_eq!(after.factors[0].points, 12.0);
    assert!(after.ring_svg.contains(r#"data-score="80""#));

    // The refreshed slot is served from cache.
    let cached: DashboardResponse = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cached.mood_score, 80);
    assert_eq!(backend.statistics_calls(), 2);
}

#[tokio::test]
async fn http_out_of_range_mood_is_rejected() {
    let backend = Arc::new(FakeBackend::default());
    let server = spawn_app(Arc::clone(&backend)).await;

    let response = Client::new()
        .post(format!("{}/api/moods", server.base_url))
        .json(&json!({ "value": 11 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(backend.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn http_location_report_feeds_statistics_query() {
    let backend = Arc::new(FakeBackend::default());
    let server = spawn_app(Arc::clone(&backend)).await;
    let client = Client::new();

    let state: LocationState = client
        .post(format!("{}/api/location", server.base_url))
        .json(&json!({ "latitude": 52.37, "longitude": 4.89 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let location = state.location.expect("location captured");
    assert_eq!(location.name.as_deref(), Some("Amsterdam"));
    assert!(state.error.is_none());

    let dashboard: DashboardResponse = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        dashboard.location.location.and_then(|l| l.name).as_deref(),
        Some("Amsterdam")
    );

    let queries = backend.statistics_queries.lock().unwrap().clone();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].get("lat").map(String::as_str), Some("52.37"));
    assert_eq!(queries[0].get("lon").map(String::as_str), Some("4.89"));
    assert_eq!(queries[0].get("location_name").map(String::as_str), Some("Amsterdam"));
}

#[tokio::test]
async fn http_geolocation_error_is_surfaced() {
    let backend = Arc::new(FakeBackend::default());
    let server = spawn_app(Arc::clone(&backend)).await;

    let state: LocationState = Client::new()
        .post(format!("{}/api/location", server.base_url))
        .json(&json!({ "error": "User denied Geolocation" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(state.location.is_none());
    assert_eq!(
        state.error.as_deref(),
        Some("Unable to retrieve your location: User denied Geolocation")
    );
}

#[tokio::test]
async fn http_history_summarizes_backend_entries() {
    let backend = Arc::new(FakeBackend::default());
    backend.seed();
    let server = spawn_app(Arc::clone(&backend)).await;

    let history: HistoryResponse = Client::new()
        .get(format!("{}/api/history", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(history.error.is_none());
    // Two logged days plus today, still awaiting input.
    assert_eq!(history.total_entries, 3);
    assert_eq!(history.entries[0].date, "2024-03-01");
    assert_eq!(history.entries[0].predicted_mood, 70);
    assert_eq!(history.entries[0].actual_mood, Some(80));
    assert_eq!(history.entries[2].actual_mood, None);
    assert_eq!(history.accuracy, 90);
    assert_eq!(history.average_mood, 70);
}

#[tokio::test]
async fn http_profile_update_is_persisted_and_rendered() {
    let backend = Arc::new(FakeBackend::default());
    let server = spawn_app(backend).await;
    let client = Client::new();

    let profile: ProfileResponse = client
        .put(format!("{}/api/profile", server.base_url))
        .json(&json!({ "name": "Ada Lovelace" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile.name, "Ada Lovelace");
    assert_eq!(profile.initials, "AL");
    assert!(profile.profile_picture.is_none());

    let avatar: ProfileResponse = client
        .post(format!("{}/api/profile/avatar", server.base_url))
        .header("content-type", "image/png")
        .body(b"abc".to_vec())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(avatar.profile_picture.as_deref(), Some("data:image/png;base64,YWJj"));
    assert_eq!(avatar.name, "Ada Lovelace");

    let page = client
        .get(format!("{}/settings", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"value="Ada Lovelace""#));
    assert!(page.contains("remove-picture"));
}

#[tokio::test]
async fn http_pages_render() {
    let backend = Arc::new(FakeBackend::default());
    let server = spawn_app(backend).await;
    let client = Client::new();

    for (path, marker) in [("/", "Today's Mood Prediction"), ("/history", "Prediction Accuracy")] {
        let response = client
            .get(format!("{}{path}", server.base_url))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        let body = response.text().await.unwrap();
        assert!(body.contains(marker), "{path} is missing {marker}");
    }
}

#[tokio::test]
async fn http_backend_failure_keeps_stale_dashboard() {
    let backend = Arc::new(FakeBackend::default());
    backend.seed();
    let server = spawn_app(Arc::clone(&backend)).await;
    let client = Client::new();

    let fresh: DashboardResponse = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fresh.mood_score, 70);
    assert!(fresh.error.is_none());

    backend.fail_statistics.store(true, Ordering::SeqCst);
    let after_submit: DashboardResponse = client
        .post(format!("{}/api/moods", server.base_url))
        .json(&json!({ "value": 9, "date": "2024-03-03" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(backend.statistics_calls(), 2);
    assert_eq!(after_submit.mood_score, 70);
    assert_eq!(
        after_submit.error.as_deref(),
        Some("Failed to load mood statistics. Please try again later.")
    );

    let cached: DashboardResponse = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cached.mood_score, 70);
    assert!(cached.error.is_some());
}

#[tokio::test]
async fn http_mood_edits_invalidate_cached_pages() {
    let backend = Arc::new(FakeBackend::default());
    backend.seed();
    let server = spawn_app(Arc::clone(&backend)).await;
    let client = Client::new();
    let history_url = format!("{}/api/history", server.base_url);
    let dashboard_url = format!("{}/api/dashboard", server.base_url);

    client.get(&dashboard_url).send().await.unwrap();
    assert_eq!(backend.statistics_calls(), 1);
    client.get(&history_url).send().await.unwrap();
    client.get(&history_url).send().await.unwrap();
    assert_eq!(backend.list_calls(), 1);

    let updated: MoodEntry = client
        .put(format!("{}/api/moods/1", server.base_url))
        .json(&json!({ "value": 5, "note": "rainy", "date": "2024-03-01" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.value, 5.0);

    let history: HistoryResponse = client
        .get(&history_url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(backend.list_calls(), 2);
    assert_eq!(history.entries[0].actual_mood, Some(50));

    client.get(&dashboard_url).send().await.unwrap();
    assert_eq!(backend.statistics_calls(), 2);

    let deleted = client
        .delete(format!("{}/api/moods/2", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let history: HistoryResponse = client
        .get(&history_url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(backend.list_calls(), 3);
    assert!(history.entries.iter().all(|e| e.date != "2024-03-02"));
}

#[tokio::test]
async fn http_pass_through_routes_reach_backend() {
    let backend = Arc::new(FakeBackend::default());
    backend.seed();
    let server = spawn_app(Arc::clone(&backend)).await;
    let client = Client::new();

    let entry: MoodEntry = client
        .get(format!("{}/api/moods/2", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(entry.id, 2);
    assert_eq!(entry.value, 6.0);

    let missing = client
        .get(format!("{}/api/moods/99", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let missing_delete = client
        .delete(format!("{}/api/moods/99", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(missing_delete.status(), StatusCode::NOT_FOUND);

    let trend: WeeklyTrend = client
        .get(format!("{}/api/trends/weekly", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(trend.trend, "stable");

    let advice: Recommendations = client
        .get(format!("{}/api/recommendations", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(advice.mood_insight, "Mornings are your best time");
}
