use serde::{Deserialize, Serialize};

/// Per-discipline figures recorded for one player in one fixture.
///
/// All fields default to zero so partial records (a bowler with no
/// batting figures, a keeper with no bowling figures) deserialize
/// cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PerformanceStats {
    // Batting
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub fours: u32,
    #[serde(default)]
    pub sixes: u32,
    #[serde(default)]
    pub balls: u32,
    #[serde(default)]
    pub strike_rate: f32,

    // Bowling
    #[serde(default)]
    pub overs: u32,
    #[serde(default)]
    pub maidens: u32,
    #[serde(default)]
    pub wickets: u32,
    #[serde(default)]
    pub runs_conceded: u32,
    #[serde(default)]
    pub economy: f32,

    // Fielding / keeping
    #[serde(default)]
    pub catches: u32,
    #[serde(default)]
    pub stumpings: u32,
}

/// What one player did in one fixture. The existence of a record is
/// what marks the player as having taken the field: the substitution
/// engine treats "no record" as "did not play".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerPerformance {
    pub id: i64,
    pub fixture_id: i64,
    pub player_id: i64,
    pub points: i64,
    #[serde(default)]
    pub stats: PerformanceStats,
}
