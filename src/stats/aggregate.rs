use super::tally::Tally;
use crate::language::detect_language;
use crate::model::{CommitRecord, MONTH_NAMES};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};
use std::collections::BTreeMap;

pub const TOP_N: usize = 10;

/// Raw sums from one pass over the commits, before streaks and personality.
#[derive(Debug, Clone)]
pub struct Aggregates {
    pub total_commits: u64,
    pub total_files_changed: u64,
    pub total_insertions: u64,
    pub total_deletions: u64,
    pub first_commit: DateTime<FixedOffset>,
    pub last_commit: DateTime<FixedOffset>,
    pub commits_by_hour: [u64; 24],
    pub commits_by_weekday: [u64; 7],
    pub commits_by_month: [u64; 12],
    pub daily_counts: BTreeMap<NaiveDate, u64>,
    pub top_files: Vec<(String, u64)>,
    pub languages: Vec<(String, u64)>,
    pub authors: Vec<(String, u64)>,
    pub shortest_message: String,
    pub longest_message: String,
    pub avg_message_length: f64,
}

impl Aggregates {
    pub fn active_days(&self) -> u64 {
        self.daily_counts.len() as u64
    }

    /// Highest single-day count; the earliest date wins a tie.
    pub fn busiest_day(&self) -> Option<(NaiveDate, u64)> {
        let mut best: Option<(NaiveDate, u64)> = None;
        for (&day, &count) in &self.daily_counts {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((day, count));
            }
        }
        best
    }

    /// Month with the most commits across all years; the earliest month wins a tie.
    pub fn most_productive_month(&self) -> &'static str {
        let mut best = 0;
        for (i, &count) in self.commits_by_month.iter().enumerate() {
            if count > self.commits_by_month[best] {
                best = i;
            }
        }
        MONTH_NAMES[best]
    }
}

/// Walk `commits` once, in order. Returns `None` for an empty slice.
pub fn aggregate(commits: &[CommitRecord]) -> Option<Aggregates> {
    let first = commits.first()?;

    let mut commits_by_hour = [0u64; 24];
    let mut commits_by_weekday = [0u64; 7];
    let mut commits_by_month = [0u64; 12];
    let mut daily_counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    let mut files: Tally<String> = Tally::new();
    let mut languages: Tally<&'static str> = Tally::new();
    let mut authors: Tally<String> = Tally::new();

    let mut total_files_changed = 0u64;
    let mut total_insertions = 0u64;
    let mut total_deletions = 0u64;
    let mut first_commit = first.timestamp;
    let mut last_commit = first.timestamp;

    let mut shortest: (usize, &str) = (usize::MAX, "");
    let mut longest: (usize, &str) = (0, "");
    let mut longest_seen = false;
    let mut message_chars = 0usize;

    for commit in commits {
        let ts = commit.timestamp;
        commits_by_hour[ts.hour() as usize] += 1;
        commits_by_weekday[ts.weekday().num_days_from_monday() as usize] += 1;
        commits_by_month[ts.month0() as usize] += 1;
        *daily_counts.entry(commit.date()).or_default() += 1;

        first_commit = first_commit.min(ts);
        last_commit = last_commit.max(ts);

        authors.add(commit.author_name.clone(), 1);

        for change in &commit.file_changes {
            total_insertions += change.insertions;
            total_deletions += change.deletions;
            files.add(change.path.clone(), 1);
            if let Some(lang) = detect_language(&change.path) {
                languages.add(lang, change.lines_changed());
            }
        }
        total_files_changed += commit.file_changes.len() as u64;

        // strict comparisons keep the first message seen at each extreme
        let len = commit.message.chars().count();
        message_chars += len;
        if len < shortest.0 {
            shortest = (len, &commit.message);
        }
        if !longest_seen || len > longest.0 {
            longest = (len, &commit.message);
            longest_seen = true;
        }
    }

    let total_commits = commits.len() as u64;

    Some(Aggregates {
        total_commits,
        total_files_changed,
        total_insertions,
        total_deletions,
        first_commit,
        last_commit,
        commits_by_hour,
        commits_by_weekday,
        commits_by_month,
        daily_counts,
        top_files: files.top(TOP_N),
        languages: languages
            .top(TOP_N)
            .into_iter()
            .map(|(lang, weight)| (lang.to_string(), weight))
            .collect(),
        authors: authors.top(TOP_N),
        shortest_message: shortest.1.to_string(),
        longest_message: longest.1.to_string(),
        avg_message_length: message_chars as f64 / total_commits as f64,
    })
}
