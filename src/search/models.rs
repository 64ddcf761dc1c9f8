//! Aggregation outcome models

use serde::{Deserialize, Serialize};

/// Per-museum timing information for one aggregation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timing {
    /// Museum display name
    pub museum: String,
    /// Fetch time in milliseconds
    pub time_ms: u64,
    /// Number of records persisted
    pub record_count: usize,
}

/// Why a museum contributed nothing to a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MuseumError {
    Timeout,
    NetworkError,
    HttpError,
    ParseError,
    Unknown,
}

impl MuseumError {
    /// Best-effort classification of an adapter failure
    pub fn classify(error: &anyhow::Error) -> Self {
        let message = error.to_string();
        if message.contains("timeout") || message.contains("timed out") {
            Self::Timeout
        } else if message.contains("HTTP error") {
            Self::HttpError
        } else if message.contains("JSON") || message.contains("expected") {
            Self::ParseError
        } else {
            Self::NetworkError
        }
    }
}

impl std::fmt::Display for MuseumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "Request timed out"),
            Self::NetworkError => write!(f, "Network error"),
            Self::HttpError => write!(f, "Upstream HTTP error"),
            Self::ParseError => write!(f, "Failed to parse response"),
            Self::Unknown => write!(f, "Unknown error"),
        }
    }
}

/// A museum that failed to contribute to a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnresponsiveMuseum {
    pub name: String,
    pub error: MuseumError,
}

/// Result of one aggregation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The keyword the run was for
    pub keyword: String,
    /// Total records persisted across all museums
    pub total_records: usize,
    /// Per-museum timings
    pub timings: Vec<Timing>,
    /// Museums that contributed nothing
    pub unresponsive: Vec<UnresponsiveMuseum>,
}

impl SearchOutcome {
    pub fn empty(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            total_records: 0,
            timings: Vec::new(),
            unresponsive: Vec::new(),
        }
    }

    /// Whether the run produced no records at all
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_timeout() {
        let error = anyhow::anyhow!("operation timed out after 30s");
        assert_eq!(MuseumError::classify(&error), MuseumError::Timeout);
    }

    #[test]
    fn test_classify_http() {
        let error = anyhow::anyhow!("HTTP error: 503");
        assert_eq!(MuseumError::classify(&error), MuseumError::HttpError);
    }

    #[test]
    fn test_classify_parse() {
        let error = anyhow::anyhow!("invalid JSON at line 1");
        assert_eq!(MuseumError::classify(&error), MuseumError::ParseError);
    }

    #[test]
    fn test_empty_outcome() {
        let outcome = SearchOutcome::empty("vase");
        assert!(outcome.is_empty());
        assert_eq!(outcome.keyword, "vase");
    }
}
