use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Upstream returned nothing usable for this coin or batch.
    #[error("No data available for {0}")]
    DataUnavailable(String),

    #[error("Insufficient history for {coin}: {points} points, need {required}")]
    InsufficientHistory {
        coin: String,
        points: usize,
        required: usize,
    },

    #[error("News item could not be classified: {0}")]
    ClassificationMiss(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Errors that mean "nothing to do for this coin this cycle" rather than a fault.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Error::DataUnavailable(_) | Error::InsufficientHistory { .. } | Error::ClassificationMiss(_)
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_errors_are_distinguished_from_faults() {
        assert!(Error::DataUnavailable("bitcoin".into()).is_skip());
        assert!(Error::InsufficientHistory { coin: "bitcoin".into(), points: 3, required: 30 }.is_skip());
        assert!(!Error::Http("timeout".into()).is_skip());
        assert!(!Error::Transport("closed".into()).is_skip());
    }
}
