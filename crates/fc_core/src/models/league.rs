use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scoring league users can join by code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct League {
    pub id: i64,
    pub name: String,
    /// Unique 8-character join code (A-Z, 0-9).
    pub code: String,
    pub creator_id: i64,
    #[serde(default)]
    pub is_global: bool,
    pub created_at: DateTime<Utc>,
}

/// Membership row linking a user to a league.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeagueMember {
    pub league_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub rank: u32,
}

/// A league as shown to one of its members: membership size plus the
/// viewer's position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeagueSummary {
    #[serde(flatten)]
    pub league: League,
    pub member_count: usize,
    pub user_rank: u32,
}

/// One row of a league table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandingRow {
    pub rank: u32,
    pub user_id: i64,
    pub squad_name: String,
    pub points: i64,
}

/// A user known to the core. Authentication lives outside; this is just
/// the owner key for squads and league membership.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
