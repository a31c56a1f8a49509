use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rules::{BENCH_SLOTS, DEFAULT_BUDGET, DEFAULT_TRANSFERS};

/// Armband role a squad member can hold.
///
/// At most one captain-kind holder and one vice-captain per squad; the
/// triple-captain variant is the power-up promoted captain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SquadRole {
    Captain,
    ViceCaptain,
    TripleCaptain,
}

impl SquadRole {
    pub fn name(&self) -> &'static str {
        match self {
            SquadRole::Captain => "captain",
            SquadRole::ViceCaptain => "vice-captain",
            SquadRole::TripleCaptain => "triple-captain",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "captain" => Some(SquadRole::Captain),
            "vice-captain" => Some(SquadRole::ViceCaptain),
            "triple-captain" => Some(SquadRole::TripleCaptain),
            _ => None,
        }
    }

    /// Captain and triple-captain occupy the same armband slot.
    pub fn is_captain_kind(&self) -> bool {
        matches!(self, SquadRole::Captain | SquadRole::TripleCaptain)
    }

    /// Points multiplier applied to this member's fixture score,
    /// expressed in halves to stay in integer arithmetic (2 = x1).
    pub fn multiplier_halves(&self) -> u32 {
        match self {
            SquadRole::Captain => 4,       // x2
            SquadRole::ViceCaptain => 3,   // x1.5
            SquadRole::TripleCaptain => 6, // x3
        }
    }
}

/// One (squad, player) membership row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SquadEntry {
    pub player_id: i64,
    /// Armband role, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<SquadRole>,
    /// Starting XI membership; benched otherwise.
    pub is_starting: bool,
    /// Substitution priority 1..=4 while benched; 0 while starting.
    #[serde(default)]
    pub bench_position: u8,
}

impl SquadEntry {
    pub fn starting(player_id: i64) -> Self {
        Self { player_id, role: None, is_starting: true, bench_position: 0 }
    }

    pub fn benched(player_id: i64, bench_position: u8) -> Self {
        Self { player_id, role: None, is_starting: false, bench_position }
    }
}

/// A user's fantasy squad: the aggregate every validator decision and
/// store mutation operates on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Squad {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub points: i64,
    pub rank: u32,
    pub budget_used: u32,
    pub budget_total: u32,
    pub transfers_remaining: u32,
    pub last_week_points: i64,
    pub average_points: i64,
    /// Set once the squad first reaches its full 15; from then on every
    /// incoming player costs a transfer, even right after a sale drops
    /// the count below 15.
    #[serde(default)]
    pub initial_build_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub entries: Vec<SquadEntry>,
}

impl Squad {
    /// Fresh squad with default budget and transfer allowance.
    pub fn new(id: i64, user_id: i64, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            name: name.into(),
            points: 0,
            rank: 0,
            budget_used: 0,
            budget_total: DEFAULT_BUDGET,
            transfers_remaining: DEFAULT_TRANSFERS,
            last_week_points: 0,
            average_points: 0,
            initial_build_complete: false,
            created_at: now,
            updated_at: now,
            entries: Vec::new(),
        }
    }

    pub fn contains_player(&self, player_id: i64) -> bool {
        self.entries.iter().any(|e| e.player_id == player_id)
    }

    pub fn entry(&self, player_id: i64) -> Option<&SquadEntry> {
        self.entries.iter().find(|e| e.player_id == player_id)
    }

    pub fn entry_mut(&mut self, player_id: i64) -> Option<&mut SquadEntry> {
        self.entries.iter_mut().find(|e| e.player_id == player_id)
    }

    pub fn starting_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_starting).count()
    }

    pub fn starting_entries(&self) -> impl Iterator<Item = &SquadEntry> {
        self.entries.iter().filter(|e| e.is_starting)
    }

    /// Bench entries ordered by substitution priority.
    pub fn bench_entries_sorted(&self) -> Vec<&SquadEntry> {
        let mut bench: Vec<&SquadEntry> =
            self.entries.iter().filter(|e| !e.is_starting).collect();
        bench.sort_by_key(|e| e.bench_position);
        bench
    }

    /// Lowest bench slot in 1..=BENCH_SLOTS not currently taken.
    pub fn next_free_bench_slot(&self) -> Option<u8> {
        (1..=BENCH_SLOTS).find(|slot| {
            !self
                .entries
                .iter()
                .any(|e| !e.is_starting && e.bench_position == *slot)
        })
    }

    /// Current holder of the given armband slot, if any. Captain and
    /// triple-captain are treated as the same slot.
    pub fn armband_holder(&self, role: SquadRole) -> Option<&SquadEntry> {
        self.entries.iter().find(|e| match e.role {
            Some(held) => {
                if role.is_captain_kind() {
                    held.is_captain_kind()
                } else {
                    held == role
                }
            }
            None => false,
        })
    }

    /// Reset to the just-registered state: no entries, full budget,
    /// default transfers. Points history is left alone.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.budget_used = 0;
        self.transfers_remaining = DEFAULT_TRANSFERS;
        self.initial_build_complete = false;
        self.updated_at = Utc::now();
    }
}
