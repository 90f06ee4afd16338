use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the in-memory catalog and the fixture loader.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Puzzle not found: {0}")]
    PuzzleNotFound(String),

    #[error("Challenge not found for {0}")]
    ChallengeNotFound(NaiveDate),

    /// A daily challenge fixture breaks the top score invariants.
    #[error("Invalid challenge {id}: {reason}")]
    InvalidChallenge { id: String, reason: &'static str },

    /// A fixture file could not be parsed.
    #[error("Malformed fixture {name}: {source}")]
    Fixture {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A fixture file could not be read from the override directory.
    #[error("Could not read fixture {name}: {source}")]
    FixtureIo {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::PuzzleNotFound(_) | CatalogError::ChallengeNotFound(_)
        )
    }
}

/// Errors raised while reading the server configuration from the environment.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a non-negative number, got {value:?}")]
    InvalidLatencyScale { key: &'static str, value: String },
}
