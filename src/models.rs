use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A mood entry as stored by the backend. `value` is on the 0–10 scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodEntry {
    pub id: i64,
    pub value: f64,
    #[serde(default)]
    pub note: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMoodEntry {
    pub value: f64,
    pub note: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct LocationState {
    pub location: Option<Location>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodExtreme {
    pub value: f64,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiMoodAnalysis {
    pub mood_description: String,
    pub emotional_state: String,
    pub mood_insight: String,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodStatistics {
    pub average_mood: f64,
    pub entries_count: u64,
    pub highest_mood: Option<MoodExtreme>,
    pub lowest_mood: Option<MoodExtreme>,
    pub most_frequent_mood: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_mood_analysis: Option<AiMoodAnalysis>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyMoodTrend {
    pub dates: Vec<String>,
    pub values: Vec<f64>,
    pub trend: Trend,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodRecommendations {
    pub recommendations: Vec<Recommendation>,
    pub mood_insight: String,
}

/// A history row on the 0–100 UI scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedMoodEntry {
    pub date: String,
    pub predicted_mood: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_mood: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub name: String,
    pub profile_picture: Option<String>,
}

/// Partial profile update. `profilePicture: null` clears the picture, an
/// absent field leaves it untouched.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub profile_picture: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodFactor {
    pub name: String,
    pub impact: u32,
    pub points: f64,
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitMoodRequest {
    pub value: f64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LocationReport {
    Position { latitude: f64, longitude: f64 },
    Failed { error: String },
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub mood_score: u8,
    pub theme: &'static str,
    pub factors: Vec<MoodFactor>,
    pub ring_svg: String,
    pub statistics: Option<MoodStatistics>,
    pub location: LocationState,
    pub loading: bool,
    pub error: Option<String>,
    /// Pre-rendered dashboard body for the page script.
    pub html: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<ProcessedMoodEntry>,
    pub total_entries: usize,
    pub accuracy: u8,
    pub average_mood: u8,
    pub trend: Option<Trend>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub settings: UserSettings,
    pub initials: String,
}
