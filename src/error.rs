use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WrappedError>;

#[derive(Error, Debug)]
pub enum WrappedError {
    #[error("git is not installed or not in your PATH. Install git and try again.")]
    GitNotInstalled,
    #[error("'{}' is not a git repository. Run git-wrapped inside a repo or use --path.", .0.display())]
    NotARepository(PathBuf),
    #[error("git command timed out after {0}; is the repository very large?")]
    GitTimeout(humantime::Duration),
    #[error("git error: {0}")]
    Git(String),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("No commits found. Check --year and --author filters, or make sure you're inside a git repository.")]
    NoCommits,
    #[error("Invalid year: {0} (expected 1970..=9999)")]
    InvalidYear(i32),
}

impl From<gix::discover::Error> for WrappedError {
    fn from(err: gix::discover::Error) -> Self {
        WrappedError::GitDiscover(Box::new(err))
    }
}
