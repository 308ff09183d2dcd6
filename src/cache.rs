//! Page-scoped data shared across requests.
//!
//! Each slot remembers which request key produced its data and when it was
//! fetched. A slot is refetched when it is empty, when the key changes, after
//! an explicit [`Slot::invalidate`], or once it exceeds the configured age.
//! Two requests that find the same slot stale both fetch; nothing
//! deduplicates them.

use crate::models::{
    Location, LocationState, MoodStatistics, ProcessedMoodEntry, WeeklyMoodTrend,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Slot<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    key: Option<String>,
    fetched_at: Option<Instant>,
    invalidated: bool,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            key: None,
            fetched_at: None,
            invalidated: false,
        }
    }
}

impl<T> Slot<T> {
    pub fn needs_fetch(&self, key: &str, max_age: Option<Duration>, now: Instant) -> bool {
        if self.data.is_none() || self.invalidated {
            return true;
        }
        if self.key.as_deref() != Some(key) {
            return true;
        }
        match (max_age, self.fetched_at) {
            (Some(max_age), Some(fetched_at)) => now.saturating_duration_since(fetched_at) >= max_age,
            _ => false,
        }
    }

    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Overwrites the slot with freshly fetched data.
    pub fn store(&mut self, key: impl Into<String>, data: T, now: Instant) {
        self.data = Some(data);
        self.key = Some(key.into());
        self.fetched_at = Some(now);
        self.loading = false;
        self.error = None;
        self.invalidated = false;
    }

    /// Records a failed fetch; whatever data was there stays visible.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.loading = false;
        self.error = Some(error.into());
    }

    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryData {
    pub entries: Vec<ProcessedMoodEntry>,
    pub trend: Option<WeeklyMoodTrend>,
}

#[derive(Debug)]
pub struct SharedState {
    pub dashboard: Slot<MoodStatistics>,
    pub history: Slot<HistoryData>,
    pub location: LocationState,
    pub max_age: Option<Duration>,
}

impl SharedState {
    pub fn new(max_age: Option<Duration>) -> Self {
        Self {
            dashboard: Slot::default(),
            history: Slot::default(),
            location: LocationState {
                location: None,
                loading: true,
                error: None,
            },
            max_age,
        }
    }

    /// Records the session location. A captured location is never replaced.
    pub fn set_location(&mut self, state: LocationState) -> bool {
        if self.location.location.is_some() {
            return false;
        }
        self.location = state;
        true
    }

    pub fn invalidate_all(&mut self) {
        self.dashboard.invalidate();
        self.history.invalidate();
    }
}

pub const HISTORY_KEY: &str = "history";

/// Cache key for statistics requested with the given location.
pub fn location_key(location: Option<&Location>) -> String {
    match location {
        Some(location) => format!("{:.4},{:.4}", location.latitude, location.longitude),
        None => "none".to_string(),
    }
}
