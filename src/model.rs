use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Line counts for one path touched by a commit. Binary files carry zero on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub insertions: u64,
    pub deletions: u64,
    pub path: String,
}

impl FileChange {
    pub fn new(insertions: u64, deletions: u64, path: impl Into<String>) -> Self {
        Self {
            insertions,
            deletions,
            path: path.into(),
        }
    }

    pub fn lines_changed(&self) -> u64 {
        self.insertions + self.deletions
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    /// Author time, keeping the offset the author committed with.
    pub timestamp: DateTime<FixedOffset>,
    pub message: String,
    pub file_changes: Vec<FileChange>,
}

impl CommitRecord {
    /// Calendar date in the author's own timezone.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonalityKind {
    NightOwl,
    EarlyBird,
    WeekendWarrior,
    StreakMaster,
    FeatureMachine,
    CodeSurgeon,
    BalancedBuilder,
}

impl PersonalityKind {
    pub fn name(self) -> &'static str {
        match self {
            PersonalityKind::NightOwl => "Night Owl",
            PersonalityKind::EarlyBird => "Early Bird",
            PersonalityKind::WeekendWarrior => "Weekend Warrior",
            PersonalityKind::StreakMaster => "Streak Master",
            PersonalityKind::FeatureMachine => "Feature Machine",
            PersonalityKind::CodeSurgeon => "Code Surgeon",
            PersonalityKind::BalancedBuilder => "Balanced Builder",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            PersonalityKind::NightOwl => "\u{1f989}",
            PersonalityKind::EarlyBird => "\u{1f426}",
            PersonalityKind::WeekendWarrior => "\u{2694}\u{fe0f}",
            PersonalityKind::StreakMaster => "\u{1f525}",
            PersonalityKind::FeatureMachine => "\u{1f680}",
            PersonalityKind::CodeSurgeon => "\u{2702}\u{fe0f}",
            PersonalityKind::BalancedBuilder => "\u{2696}\u{fe0f}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    pub kind: PersonalityKind,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraitKind {
    BigChanger,
    SurgicalCommitter,
    Storyteller,
    TerseMessenger,
    OnFire,
    WeekendCoder,
    DocumentationHero,
    TestChampion,
}

impl TraitKind {
    pub fn emoji(self) -> &'static str {
        match self {
            TraitKind::BigChanger => "\u{1f3d7}\u{fe0f}",
            TraitKind::SurgicalCommitter => "\u{1f3af}",
            TraitKind::Storyteller => "\u{1f4dd}",
            TraitKind::TerseMessenger => "\u{26a1}",
            TraitKind::OnFire => "\u{1f525}",
            TraitKind::WeekendCoder => "\u{1f3e0}",
            TraitKind::DocumentationHero => "\u{1f4da}",
            TraitKind::TestChampion => "\u{1f9ea}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trait {
    pub kind: TraitKind,
    pub label: String,
}

/// Everything a report needs, computed in one analysis run.
///
/// Fixed-domain histograms are dense arrays: `commits_by_hour[h]` for hour
/// `h`, `commits_by_weekday[0]` is Monday, `commits_by_month[0]` is January.
/// Top-N lists are ordered by descending count, ties in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsRecord {
    pub repo_name: String,
    pub year: Option<i32>,

    pub total_commits: u64,
    pub total_files_changed: u64,
    pub total_insertions: u64,
    pub total_deletions: u64,

    pub first_commit: DateTime<FixedOffset>,
    pub last_commit: DateTime<FixedOffset>,
    pub active_days: u64,

    pub commits_by_hour: [u64; 24],
    pub commits_by_weekday: [u64; 7],
    pub commits_by_month: [u64; 12],
    pub daily_counts: BTreeMap<NaiveDate, u64>,

    pub top_files: Vec<(String, u64)>,
    pub languages: Vec<(String, u64)>,
    pub authors: Vec<(String, u64)>,

    pub longest_streak: u32,
    pub current_streak: u32,
    pub busiest_day: (NaiveDate, u64),

    pub longest_message: String,
    pub shortest_message: String,
    pub avg_message_length: f64,
    pub holiday_commits: Vec<String>,
    pub most_productive_month: String,

    pub personality: Personality,
    pub traits: Vec<Trait>,
}

impl StatisticsRecord {
    /// Commits in `month` (1-12); zero outside that range.
    pub fn commits_in_month(&self, month: u32) -> u64 {
        month
            .checked_sub(1)
            .and_then(|i| self.commits_by_month.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn net_lines(&self) -> i64 {
        self.total_insertions as i64 - self.total_deletions as i64
    }
}
