use serde::{Deserialize, Serialize};

/// Catalog entry for a cricketer available on the transfer market.
///
/// Created once at catalog load and never mutated by the core; squads
/// reference players by id only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    /// Franchise code the player belongs to (e.g. "MI", "CSK").
    pub team: String,
    #[serde(rename = "type")]
    pub role: PlayerRole,
    /// Cost in whole budget units out of the squad's total budget.
    pub price: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Career statistics blob; opaque to the rules core.
    #[serde(default)]
    pub stats: serde_json::Value,
}

/// Playing discipline of a cricketer.
///
/// Closed set: every cap table in `rules` matches exhaustively on this,
/// so an unhandled role is a compile error rather than a silently
/// skipped check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerRole {
    WicketKeeper,
    Batsman,
    Bowler,
    AllRounder,
}

impl PlayerRole {
    /// All roles in a stable iteration order.
    pub fn all() -> &'static [PlayerRole] {
        &[
            PlayerRole::WicketKeeper,
            PlayerRole::Batsman,
            PlayerRole::Bowler,
            PlayerRole::AllRounder,
        ]
    }

    /// Wire name matching the original data set ("wicket-keeper" etc).
    pub fn name(&self) -> &'static str {
        match self {
            PlayerRole::WicketKeeper => "wicket-keeper",
            PlayerRole::Batsman => "batsman",
            PlayerRole::Bowler => "bowler",
            PlayerRole::AllRounder => "all-rounder",
        }
    }

    /// Parse from the wire name (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wicket-keeper" | "wicketkeeper" => Some(PlayerRole::WicketKeeper),
            "batsman" => Some(PlayerRole::Batsman),
            "bowler" => Some(PlayerRole::Bowler),
            "all-rounder" | "allrounder" => Some(PlayerRole::AllRounder),
            _ => None,
        }
    }

    pub fn is_wicket_keeper(&self) -> bool {
        matches!(self, PlayerRole::WicketKeeper)
    }

    pub fn bats(&self) -> bool {
        matches!(
            self,
            PlayerRole::Batsman | PlayerRole::AllRounder | PlayerRole::WicketKeeper
        )
    }

    pub fn bowls(&self) -> bool {
        matches!(self, PlayerRole::Bowler | PlayerRole::AllRounder)
    }
}
