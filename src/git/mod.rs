pub mod repo;

pub use repo::{GitRepo, LogQuery, DEFAULT_TIMEOUT};
