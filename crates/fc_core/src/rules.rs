//! Squad composition rule tables.
//!
//! Two deliberately separate tiers that are easy to conflate:
//! - squad-build caps: how many of each role the whole 15-player squad
//!   may carry, checked on every transfer in;
//! - starting-XI bounds: the min/max of each role among the 11 on the
//!   field, checked on every lineup move.
//!
//! A legal squad (e.g. 3 batsmen total) can therefore sit at the floor
//! of the XI requirement (3 batsmen starting) while a role capped at 5
//! in the squad is still capped at 3 in the XI (all-rounders are not).

use crate::models::PlayerRole;

/// Maximum number of players in a squad.
pub const SQUAD_SIZE: usize = 15;

/// Number of players fielded per gameweek.
pub const STARTING_XI: usize = 11;

/// Number of bench slots; bench positions run 1..=BENCH_SLOTS.
pub const BENCH_SLOTS: u8 = 4;

/// Budget units a fresh squad has to spend.
pub const DEFAULT_BUDGET: u32 = 100;

/// Free transfers per gameweek once the squad is fully built.
pub const DEFAULT_TRANSFERS: u32 = 2;

/// Squad-build tier: how many players of `role` the full squad may hold.
pub fn squad_cap(role: PlayerRole) -> u8 {
    match role {
        PlayerRole::Batsman => 3,
        PlayerRole::Bowler => 5,
        PlayerRole::AllRounder => 5,
        PlayerRole::WicketKeeper => 2,
    }
}

/// Starting-XI tier: inclusive (min, max) of `role` among the 11.
pub fn xi_bounds(role: PlayerRole) -> (u8, u8) {
    match role {
        PlayerRole::WicketKeeper => (1, 1),
        PlayerRole::Batsman => (3, 5),
        PlayerRole::Bowler => (3, 5),
        PlayerRole::AllRounder => (1, 3),
    }
}

/// Per-role tally used by the validator when sizing up a proposed
/// squad or lineup state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub wicket_keepers: u8,
    pub batsmen: u8,
    pub bowlers: u8,
    pub all_rounders: u8,
}

impl RoleCounts {
    pub fn tally(roles: impl Iterator<Item = PlayerRole>) -> Self {
        let mut counts = RoleCounts::default();
        for role in roles {
            counts.add(role);
        }
        counts
    }

    pub fn add(&mut self, role: PlayerRole) {
        match role {
            PlayerRole::WicketKeeper => self.wicket_keepers += 1,
            PlayerRole::Batsman => self.batsmen += 1,
            PlayerRole::Bowler => self.bowlers += 1,
            PlayerRole::AllRounder => self.all_rounders += 1,
        }
    }

    pub fn get(&self, role: PlayerRole) -> u8 {
        match role {
            PlayerRole::WicketKeeper => self.wicket_keepers,
            PlayerRole::Batsman => self.batsmen,
            PlayerRole::Bowler => self.bowlers,
            PlayerRole::AllRounder => self.all_rounders,
        }
    }

    pub fn total(&self) -> u8 {
        self.wicket_keepers + self.batsmen + self.bowlers + self.all_rounders
    }
}
