//! Machine-readable form of a [`StatisticsRecord`].
//!
//! Keys are spelled out field by field and versioned through `version`.

use crate::model::{StatisticsRecord, SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrappedOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub repo_name: String,
    pub year: Option<i32>,

    pub total_commits: u64,
    pub total_files_changed: u64,
    pub total_insertions: u64,
    pub total_deletions: u64,

    pub first_commit: String,
    pub last_commit: String,
    pub active_days: u64,

    pub commits_by_hour: BTreeMap<String, u64>,
    pub commits_by_weekday: BTreeMap<String, u64>,
    pub commits_by_month: BTreeMap<String, u64>,
    pub daily_counts: BTreeMap<String, u64>,

    pub top_files: Vec<(String, u64)>,
    pub languages: Vec<(String, u64)>,
    pub authors: Vec<(String, u64)>,

    pub longest_streak: u32,
    pub current_streak: u32,
    pub busiest_day: (String, u64),

    pub longest_message: String,
    pub shortest_message: String,
    pub avg_message_length: f64,
    pub holiday_commits: Vec<String>,
    pub most_productive_month: String,

    pub personality: String,
    pub personality_emoji: String,
    pub personality_description: String,
    pub traits: Vec<(String, String)>,
}

/// Keys `offset..offset + len`, so hours and weekdays start at 0 and months at 1.
fn indexed(counts: &[u64], offset: usize) -> BTreeMap<String, u64> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| ((i + offset).to_string(), count))
        .collect()
}

impl WrappedOutput {
    pub fn new(stats: &StatisticsRecord, repository_path: &Path, generated_at: DateTime<Utc>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            generated_at,
            repository_path: repository_path.to_string_lossy().to_string(),
            repo_name: stats.repo_name.clone(),
            year: stats.year,
            total_commits: stats.total_commits,
            total_files_changed: stats.total_files_changed,
            total_insertions: stats.total_insertions,
            total_deletions: stats.total_deletions,
            first_commit: stats.first_commit.to_rfc3339(),
            last_commit: stats.last_commit.to_rfc3339(),
            active_days: stats.active_days,
            commits_by_hour: indexed(&stats.commits_by_hour, 0),
            commits_by_weekday: indexed(&stats.commits_by_weekday, 0),
            commits_by_month: indexed(&stats.commits_by_month, 1),
            daily_counts: stats
                .daily_counts
                .iter()
                .map(|(day, &count)| (day.format("%Y-%m-%d").to_string(), count))
                .collect(),
            top_files: stats.top_files.clone(),
            languages: stats.languages.clone(),
            authors: stats.authors.clone(),
            longest_streak: stats.longest_streak,
            current_streak: stats.current_streak,
            busiest_day: (
                stats.busiest_day.0.format("%Y-%m-%d").to_string(),
                stats.busiest_day.1,
            ),
            longest_message: stats.longest_message.clone(),
            shortest_message: stats.shortest_message.clone(),
            avg_message_length: stats.avg_message_length,
            holiday_commits: stats.holiday_commits.clone(),
            most_productive_month: stats.most_productive_month.clone(),
            personality: stats.personality.kind.name().to_string(),
            personality_emoji: stats.personality.kind.emoji().to_string(),
            personality_description: stats.personality.description.clone(),
            traits: stats
                .traits
                .iter()
                .map(|t| (t.kind.emoji().to_string(), t.label.clone()))
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
