pub mod aggregate;
pub mod holiday;
pub mod personality;
pub mod streak;
pub mod tally;

pub use aggregate::{aggregate, Aggregates, TOP_N};
pub use holiday::{holiday_commits, holiday_name};
pub use personality::{classify, traits, Profile, MAX_TRAITS};
pub use streak::{current_streak, longest_streak, streaks, Streaks};
pub use tally::Tally;

use crate::error::{Result, WrappedError};
use crate::model::{CommitRecord, StatisticsRecord};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Inputs to a run that do not come from the commits themselves.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    /// Reference date for the current streak.
    pub today: NaiveDate,
    pub repo_name: String,
    pub year: Option<i32>,
}

/// Build the full statistics record from parsed commits.
pub fn compute_stats(commits: &[CommitRecord], ctx: &AnalysisContext) -> Result<StatisticsRecord> {
    let agg = aggregate(commits).ok_or(WrappedError::NoCommits)?;

    let active: BTreeSet<NaiveDate> = agg.daily_counts.keys().copied().collect();
    let Streaks { longest, current } = streaks(&active, ctx.today);
    let holidays = holiday_commits(&active);

    let profile = Profile {
        total_commits: agg.total_commits,
        total_files_changed: agg.total_files_changed,
        total_insertions: agg.total_insertions,
        total_deletions: agg.total_deletions,
        commits_by_hour: &agg.commits_by_hour,
        commits_by_weekday: &agg.commits_by_weekday,
        longest_streak: longest,
        avg_message_length: agg.avg_message_length,
        top_files: &agg.top_files,
    };
    let personality = classify(&profile);
    let traits = traits(&profile);

    let busiest_day = agg.busiest_day().ok_or(WrappedError::NoCommits)?;
    let most_productive_month = agg.most_productive_month().to_string();
    let active_days = agg.active_days();

    Ok(StatisticsRecord {
        repo_name: ctx.repo_name.clone(),
        year: ctx.year,
        total_commits: agg.total_commits,
        total_files_changed: agg.total_files_changed,
        total_insertions: agg.total_insertions,
        total_deletions: agg.total_deletions,
        first_commit: agg.first_commit,
        last_commit: agg.last_commit,
        active_days,
        commits_by_hour: agg.commits_by_hour,
        commits_by_weekday: agg.commits_by_weekday,
        commits_by_month: agg.commits_by_month,
        daily_counts: agg.daily_counts,
        top_files: agg.top_files,
        languages: agg.languages,
        authors: agg.authors,
        longest_streak: longest,
        current_streak: current,
        busiest_day,
        longest_message: agg.longest_message,
        shortest_message: agg.shortest_message,
        avg_message_length: agg.avg_message_length,
        holiday_commits: holidays,
        most_productive_month,
        personality,
        traits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileChange, PersonalityKind};
    use crate::parse::parse_log;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn ctx(today: &str) -> AnalysisContext {
        AnalysisContext {
            today: NaiveDate::parse_from_str(today, "%Y-%m-%d").unwrap(),
            repo_name: "demo".to_string(),
            year: None,
        }
    }

    fn commit(date: &str, message: &str, changes: Vec<FileChange>) -> CommitRecord {
        CommitRecord {
            id: date.to_string(),
            author_name: "Ada".to_string(),
            author_email: "ada@example.com".to_string(),
            timestamp: DateTime::parse_from_rfc3339(date).unwrap(),
            message: message.to_string(),
            file_changes: changes,
        }
    }

    #[test]
    fn empty_history_is_an_error() {
        let err = compute_stats(&[], &ctx("2024-06-01")).unwrap_err();
        assert!(matches!(err, WrappedError::NoCommits));
        assert!(err.to_string().starts_with("No commits found"));
    }

    #[test]
    fn single_christmas_commit() {
        let commits = vec![commit("2024-12-25T10:00:00-05:00", "fix", vec![])];
        let stats = compute_stats(&commits, &ctx("2025-03-01")).unwrap();
        assert_eq!(stats.holiday_commits, vec!["Christmas".to_string()]);
        assert_eq!(stats.total_commits, 1);
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.active_days, 1);
        assert_eq!(stats.most_productive_month, "December");
        assert_eq!(stats.shortest_message, "fix");
        assert_eq!(stats.longest_message, "fix");
    }

    #[test]
    fn current_streak_uses_injected_today() {
        let commits = vec![commit("2024-12-25T10:00:00-05:00", "fix", vec![])];
        let stats = compute_stats(&commits, &ctx("2024-12-26")).unwrap();
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn binary_change_counts_as_a_file_only() {
        let raw = ">>>GW:abc\0Ada\0ada@example.com\02024-06-03T12:00:00+00:00\0logo\n\n-\t-\tassets/logo.png\n";
        let commits = parse_log(raw);
        let stats = compute_stats(&commits, &ctx("2024-06-03")).unwrap();
        assert_eq!(stats.total_files_changed, 1);
        assert_eq!(stats.total_insertions, 0);
        assert_eq!(stats.total_deletions, 0);
        assert!(stats.languages.is_empty());
    }

    #[test]
    fn language_weighting_scenario() {
        let commits = vec![
            commit("2024-06-03T12:00:00Z", "one", vec![FileChange::new(10, 0, "src/lib.rs")]),
            commit("2024-06-04T12:00:00Z", "two", vec![FileChange::new(10, 0, "src/lib.rs")]),
            commit("2024-06-05T12:00:00Z", "three", vec![FileChange::new(5, 0, "notes.xyz")]),
        ];
        let stats = compute_stats(&commits, &ctx("2024-06-05")).unwrap();
        assert_eq!(stats.languages, vec![("Rust".to_string(), 20)]);
        assert_eq!(stats.total_files_changed, 3);
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.personality.kind, PersonalityKind::FeatureMachine);
    }

    #[test]
    fn active_days_never_exceed_commits() {
        let commits = vec![
            commit("2024-06-01T09:00:00Z", "a", vec![]),
            commit("2024-06-01T10:00:00Z", "b", vec![]),
            commit("2024-06-04T10:00:00Z", "c", vec![]),
        ];
        let stats = compute_stats(&commits, &ctx("2024-07-01")).unwrap();
        assert!(stats.active_days <= stats.total_commits);
        assert_eq!(stats.active_days, 2);
        assert_eq!(
            stats.busiest_day,
            (NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 2)
        );
    }
}
