use crate::cli::CommonArgs;
use crate::error::{Result, WrappedError};
use crate::export::WrappedOutput;
use crate::git::{GitRepo, LogQuery, DEFAULT_TIMEOUT};
use crate::model::StatisticsRecord;
use crate::parse::parse_log;
use crate::stats::{compute_stats, AnalysisContext};
use anyhow::Context;
use chrono::{Local, NaiveDate, Utc};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// What to analyze. Filters are handed to git; the statistics never look at them.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub repository_path: Option<PathBuf>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub timeout: Duration,
    pub progress: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            repository_path: None,
            year: None,
            author: None,
            timeout: DEFAULT_TIMEOUT,
            progress: false,
        }
    }
}

impl From<CommonArgs> for AnalysisConfig {
    fn from(common: CommonArgs) -> Self {
        Self {
            repository_path: common.path,
            year: common.year,
            author: common.author,
            timeout: common.timeout,
            progress: false,
        }
    }
}

pub struct Analysis {
    pub repository_path: PathBuf,
    pub stats: StatisticsRecord,
}

/// Capture, parse and summarize the history of one repository.
///
/// `today` anchors the current streak.
pub fn analyze(config: &AnalysisConfig, today: NaiveDate) -> Result<Analysis> {
    if let Some(year) = config.year {
        if !(1970..=9999).contains(&year) {
            return Err(WrappedError::InvalidYear(year));
        }
    }

    let repo = GitRepo::open(config.repository_path.as_ref())?;
    let query = LogQuery {
        year: config.year,
        author: config.author.clone(),
    };
    let raw = repo.capture_log(&query, config.timeout, config.progress)?;

    let commits = parse_log(&raw);
    info!(commits = commits.len(), "parsed git history");
    if commits.is_empty() {
        return Err(WrappedError::NoCommits);
    }

    let ctx = AnalysisContext {
        today,
        repo_name: repo.name(),
        year: config.year,
    };
    let stats = compute_stats(&commits, &ctx)?;

    Ok(Analysis {
        repository_path: repo.path().to_path_buf(),
        stats,
    })
}

pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let mut config = AnalysisConfig::from(common);
    config.progress = !json && console::Term::stderr().is_term();

    let analysis = analyze(&config, Local::now().date_naive())
        .context("Failed to analyze git history")?;

    if json {
        output_json(&analysis)
    } else {
        output_report(&analysis)
    }
}

fn output_json(analysis: &Analysis) -> anyhow::Result<()> {
    let output = WrappedOutput::new(&analysis.stats, &analysis.repository_path, Utc::now());
    println!("{}", output.to_json_pretty()?);
    Ok(())
}

fn output_report(analysis: &Analysis) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    crate::report::render(&analysis.stats, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_year_is_rejected_before_git_runs() {
        let config = AnalysisConfig {
            year: Some(99),
            repository_path: Some(PathBuf::from("/definitely/not/here")),
            ..AnalysisConfig::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(matches!(analyze(&config, today), Err(WrappedError::InvalidYear(99))));
    }
}
