pub mod cli;
pub mod error;
pub mod export;
pub mod git;
pub mod language;
pub mod model;
pub mod parse;
pub mod report;
pub mod stats;
pub mod util;
pub mod wrapped;

pub use error::{Result, WrappedError};
pub use model::{CommitRecord, FileChange, StatisticsRecord};
pub use parse::parse_log;
pub use stats::{compute_stats, AnalysisContext};
pub use wrapped::{analyze, AnalysisConfig};
