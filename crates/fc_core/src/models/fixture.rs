use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a scheduled match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    #[default]
    Upcoming,
    Live,
    Completed,
}

impl FixtureStatus {
    pub fn name(&self) -> &'static str {
        match self {
            FixtureStatus::Upcoming => "upcoming",
            FixtureStatus::Live => "live",
            FixtureStatus::Completed => "completed",
        }
    }

    /// Whether performance data may exist for this fixture yet.
    pub fn has_started(&self) -> bool {
        matches!(self, FixtureStatus::Live | FixtureStatus::Completed)
    }
}

/// A scheduled match between two franchises.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fixture {
    pub id: i64,
    /// Franchise codes.
    pub home_team: String,
    pub away_team: String,
    pub venue: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub status: FixtureStatus,
    /// Free-text result summary once completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Display score strings, e.g. "156/4 (16.2 ov)".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(serde_json::to_string(&FixtureStatus::Live).unwrap(), "\"live\"");
        let parsed: FixtureStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, FixtureStatus::Completed);
    }

    #[test]
    fn test_upcoming_has_not_started() {
        assert!(!FixtureStatus::Upcoming.has_started());
        assert!(FixtureStatus::Live.has_started());
        assert!(FixtureStatus::Completed.has_started());
    }
}
