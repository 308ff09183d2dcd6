use crate::errors::HistoryError;
use crate::models::{MoodEntry, ProcessedMoodEntry};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

pub const RECENT_COUNT: usize = 5;

/// Backend 0–10 value to the 0–100 UI scale.
pub fn to_ui_scale(value: f64) -> u8 {
    (value.clamp(0.0, 10.0) * 10.0).round() as u8
}

/// UI score back to the backend scale, rounding to the nearest value.
pub fn to_backend_scale(score: u8) -> u8 {
    ((f64::from(score.min(100)) / 10.0).round()) as u8
}

/// A backend average (0–10) as a UI score.
pub fn score_from_average(average: f64) -> u8 {
    if !average.is_finite() {
        return 0;
    }
    (average * 10.0).round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct HistorySummary {
    pub total_entries: usize,
    pub accuracy: u8,
    pub average_mood: u8,
}

pub fn process_entries(
    entries: &[MoodEntry],
    baseline: Option<f64>,
) -> Result<Vec<ProcessedMoodEntry>, HistoryError> {
    process_entries_at(Local::now().date_naive(), entries, baseline)
}

/// Logged entries become rows with an actual mood; today is added without
/// one when nothing was logged yet. Rows come back sorted by date.
pub fn process_entries_at(
    today: NaiveDate,
    entries: &[MoodEntry],
    baseline: Option<f64>,
) -> Result<Vec<ProcessedMoodEntry>, HistoryError> {
    let predicted = baseline.map(score_from_average).unwrap_or(0);

    let mut by_date = BTreeMap::new();
    for entry in entries {
        let key = date_key(entry.date);
        if by_date.contains_key(&key) {
            return Err(HistoryError::DuplicateDate(key));
        }
        by_date.insert(key, Some(to_ui_scale(entry.value)));
    }
    by_date.entry(date_key(today)).or_insert(None);

    Ok(by_date
        .into_iter()
        .map(|(date, actual_mood)| ProcessedMoodEntry {
            date,
            predicted_mood: predicted,
            actual_mood,
        })
        .collect())
}

pub fn summarize(entries: &[ProcessedMoodEntry]) -> HistorySummary {
    HistorySummary {
        total_entries: entries.len(),
        accuracy: accuracy(entries),
        average_mood: average_mood(entries),
    }
}

pub fn accuracy(entries: &[ProcessedMoodEntry]) -> u8 {
    let closeness: Vec<f64> = entries
        .iter()
        .filter_map(|entry| {
            entry.actual_mood.map(|actual| {
                let diff = (f64::from(entry.predicted_mood) - f64::from(actual)).abs() / 100.0;
                1.0 - diff
            })
        })
        .collect();

    rounded_mean(&closeness, 100.0)
}

pub fn average_mood(entries: &[ProcessedMoodEntry]) -> u8 {
    let actuals: Vec<f64> = entries
        .iter()
        .filter_map(|entry| entry.actual_mood.map(f64::from))
        .collect();

    rounded_mean(&actuals, 1.0)
}

fn rounded_mean(values: &[f64], scale: f64) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    (mean * scale).round().clamp(0.0, 100.0) as u8
}

/// The first entry logged for `day` of the given month.
pub fn entry_for_day(
    entries: &[ProcessedMoodEntry],
    year: i32,
    month: u32,
    day: u32,
) -> Option<&ProcessedMoodEntry> {
    let key = format!("{year:04}-{month:02}-{day:02}");
    entries.iter().find(|entry| entry.date == key)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarDay {
    pub day: u32,
    pub entry: Option<ProcessedMoodEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthGrid {
    pub title: String,
    /// Sunday-first cells; leading `None`s pad the first week.
    pub cells: Vec<Option<CalendarDay>>,
}

pub fn month_grid(year: i32, month: u32, entries: &[ProcessedMoodEntry]) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let days_in_month = (next_month - first).num_days() as u32;
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<Option<CalendarDay>> = vec![None; leading];
    cells.extend((1..=days_in_month).map(|day| {
        Some(CalendarDay {
            day,
            entry: entry_for_day(entries, year, month, day).cloned(),
        })
    }));

    Some(MonthGrid {
        title: first.format("%B %Y").to_string(),
        cells,
    })
}

/// Most recent entries, newest first.
pub fn recent(entries: &[ProcessedMoodEntry], count: usize) -> Vec<&ProcessedMoodEntry> {
    entries.iter().rev().take(count).collect()
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
