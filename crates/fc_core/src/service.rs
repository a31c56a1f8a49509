//! Squad service: the mutation front door.
//!
//! Every operation loads the aggregate, runs the pure validator, and
//! only then writes the fully-computed result back in a single
//! `put_squad`. A rejection therefore never leaves a half-applied
//! mutation behind.

use std::collections::HashMap;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::models::{
    Fixture, League, LeagueMember, LeagueSummary, Player, PlayerPerformance, PlayerRole,
    Squad, SquadEntry, SquadRole, StandingRow,
};
use crate::rules::{squad_cap, RoleCounts, SQUAD_SIZE};
use crate::scoring;
use crate::store::Repository;
use crate::substitution::{self, Substitution};
use crate::validator;

/// Transfer allowance granted by the wildcard / free-hit power-ups.
pub const UNLIMITED_TRANSFERS: u32 = 999;

const LEAGUE_CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const LEAGUE_CODE_LEN: usize = 8;

/// Gameweek power-ups a user can play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PowerUp {
    /// Unlimited transfers for the gameweek.
    Wildcard,
    /// Captain scores triple instead of double.
    TripleCaptain,
    /// Bench players score too.
    BenchBoost,
    /// Temporary unlimited transfers for a single gameweek.
    FreeHit,
}

/// A catalog player joined with their membership row, the shape squad
/// screens render from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SquadPlayerView {
    #[serde(flatten)]
    pub player: Player,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<SquadRole>,
    pub is_starting: bool,
    pub bench_position: u8,
}

/// Per-role occupancy against the squad-build caps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompositionReport {
    pub batsmen: u8,
    pub bowlers: u8,
    pub all_rounders: u8,
    pub wicket_keepers: u8,
    pub max_batsmen: u8,
    pub max_bowlers: u8,
    pub max_all_rounders: u8,
    pub max_wicket_keepers: u8,
    pub total_players: usize,
    pub max_total_players: usize,
}

/// All squad, league and fixture operations, generic over the storage
/// backend.
pub struct SquadService<'a, R: Repository> {
    repo: &'a mut R,
}

impl<'a, R: Repository> SquadService<'a, R> {
    pub fn new(repo: &'a mut R) -> Self {
        Self { repo }
    }

    // ========================
    // Squad lookups
    // ========================

    fn squad_for_user(&self, user_id: i64) -> Result<Squad> {
        self.repo.squad_by_user(user_id).ok_or(ValidationError::TeamNotFound)
    }

    fn role_of(&self, player_id: i64) -> Option<PlayerRole> {
        self.repo.player(player_id).map(|p| p.role)
    }

    fn squad_role_counts(&self, squad: &Squad) -> RoleCounts {
        RoleCounts::tally(squad.entries.iter().filter_map(|e| self.role_of(e.player_id)))
    }

    /// The user's squad joined against the catalog.
    pub fn squad_players(&self, user_id: i64) -> Result<Vec<SquadPlayerView>> {
        let squad = self.squad_for_user(user_id)?;
        Ok(squad
            .entries
            .iter()
            .filter_map(|entry| {
                self.repo.player(entry.player_id).map(|player| SquadPlayerView {
                    player,
                    role: entry.role,
                    is_starting: entry.is_starting,
                    bench_position: entry.bench_position,
                })
            })
            .collect())
    }

    /// Role occupancy vs the squad-build caps.
    pub fn composition(&self, user_id: i64) -> Result<CompositionReport> {
        let squad = self.squad_for_user(user_id)?;
        let counts = self.squad_role_counts(&squad);
        Ok(CompositionReport {
            batsmen: counts.batsmen,
            bowlers: counts.bowlers,
            all_rounders: counts.all_rounders,
            wicket_keepers: counts.wicket_keepers,
            max_batsmen: squad_cap(PlayerRole::Batsman),
            max_bowlers: squad_cap(PlayerRole::Bowler),
            max_all_rounders: squad_cap(PlayerRole::AllRounder),
            max_wicket_keepers: squad_cap(PlayerRole::WicketKeeper),
            total_players: squad.entries.len(),
            max_total_players: SQUAD_SIZE,
        })
    }

    /// How many squad members come from each franchise.
    pub fn team_distribution(&self, user_id: i64) -> Result<HashMap<String, usize>> {
        let squad = self.squad_for_user(user_id)?;
        let mut distribution: HashMap<String, usize> = HashMap::new();
        for entry in &squad.entries {
            if let Some(player) = self.repo.player(entry.player_id) {
                *distribution.entry(player.team).or_default() += 1;
            }
        }
        Ok(distribution)
    }

    // ========================
    // Squad mutations
    // ========================

    /// Create the user's squad if they have none yet.
    pub fn ensure_squad(&mut self, user_id: i64, name: &str) -> Squad {
        match self.repo.squad_by_user(user_id) {
            Some(squad) => squad,
            None => {
                let squad = self.repo.create_squad(user_id, name);
                log::info!("created squad {} for user {}", squad.id, user_id);
                squad
            }
        }
    }

    /// Bring a catalog player into the user's squad.
    pub fn add_player(&mut self, user_id: i64, player_id: i64) -> Result<()> {
        let mut squad = self.squad_for_user(user_id)?;
        let player =
            self.repo.player(player_id).ok_or(ValidationError::PlayerNotFound)?;
        let counts = self.squad_role_counts(&squad);

        let placement = validator::check_add_player(&squad, &player, counts)?;

        squad.entries.push(SquadEntry {
            player_id,
            role: None,
            is_starting: placement.is_starting,
            bench_position: placement.bench_position,
        });
        squad.budget_used += player.price;
        if placement.consumes_transfer {
            squad.transfers_remaining -= 1;
        }
        if squad.entries.len() >= SQUAD_SIZE {
            squad.initial_build_complete = true;
        }
        self.repo.put_squad(squad);
        log::info!("user {} signed player {}", user_id, player_id);
        Ok(())
    }

    /// Sell a squad member; their price returns to the budget and
    /// their bench slot (if any) is freed.
    pub fn remove_player(&mut self, user_id: i64, player_id: i64) -> Result<()> {
        let mut squad = self.squad_for_user(user_id)?;
        if !squad.contains_player(player_id) {
            return Err(ValidationError::PlayerNotInSquad);
        }
        let player =
            self.repo.player(player_id).ok_or(ValidationError::PlayerNotFound)?;

        squad.entries.retain(|e| e.player_id != player_id);
        squad.budget_used = squad.budget_used.saturating_sub(player.price);
        self.repo.put_squad(squad);
        log::info!("user {} released player {}", user_id, player_id);
        Ok(())
    }

    /// Assign or clear an armband role. Assigning a role held by
    /// another member moves it, never duplicates it.
    pub fn set_player_role(
        &mut self,
        user_id: i64,
        player_id: i64,
        role: Option<SquadRole>,
    ) -> Result<()> {
        let mut squad = self.squad_for_user(user_id)?;
        let change = validator::check_set_role(&squad, player_id, role)?;

        if let Some(previous) = change.demote {
            if let Some(entry) = squad.entry_mut(previous) {
                entry.role = None;
            }
        }
        if let Some(entry) = squad.entry_mut(player_id) {
            entry.role = change.role;
        }
        self.repo.put_squad(squad);
        Ok(())
    }

    /// Move a member between the starting XI and the bench.
    pub fn set_starting(
        &mut self,
        user_id: i64,
        player_id: i64,
        is_starting: bool,
        bench_position: Option<u8>,
    ) -> Result<()> {
        let mut squad = self.squad_for_user(user_id)?;
        let change = validator::check_set_starting(
            &squad,
            player_id,
            is_starting,
            bench_position,
            |id| self.role_of(id),
        )?;

        // Displaced occupant moves first so the two writes read as one
        // atomic position swap.
        if let Some((occupant, position)) = change.displaced {
            if let Some(entry) = squad.entry_mut(occupant) {
                entry.is_starting = false;
                entry.bench_position = position;
            }
        }
        if let Some(entry) = squad.entry_mut(player_id) {
            entry.is_starting = change.is_starting;
            entry.bench_position = change.bench_position;
        }
        self.repo.put_squad(squad);
        Ok(())
    }

    /// Wipe the squad back to an empty roster, full budget and default
    /// transfers.
    pub fn reset_squad(&mut self, user_id: i64) -> Result<()> {
        let mut squad = self.squad_for_user(user_id)?;
        squad.reset();
        self.repo.put_squad(squad);
        log::info!("user {} reset their squad", user_id);
        Ok(())
    }

    pub fn rename_squad(&mut self, user_id: i64, name: &str) -> Result<()> {
        let mut squad = self.squad_for_user(user_id)?;
        squad.name = name.to_string();
        self.repo.put_squad(squad);
        Ok(())
    }

    /// Play a gameweek power-up.
    pub fn apply_power_up(
        &mut self,
        user_id: i64,
        power_up: PowerUp,
        player_id: Option<i64>,
    ) -> Result<()> {
        match power_up {
            PowerUp::Wildcard | PowerUp::FreeHit => {
                let mut squad = self.squad_for_user(user_id)?;
                squad.transfers_remaining = UNLIMITED_TRANSFERS;
                self.repo.put_squad(squad);
                Ok(())
            }
            PowerUp::TripleCaptain => {
                let player_id = player_id.ok_or(ValidationError::PlayerNotInSquad)?;
                self.set_player_role(user_id, player_id, Some(SquadRole::TripleCaptain))
            }
            // Scoring-time flag; nothing to persist on the squad.
            PowerUp::BenchBoost => {
                self.squad_for_user(user_id)?;
                Ok(())
            }
        }
    }

    // ========================
    // Substitutions & scoring
    // ========================

    /// Swap absent starters for bench players who took the field in
    /// the given fixture. Returns the executed swaps.
    pub fn apply_substitutions(
        &mut self,
        user_id: i64,
        fixture_id: i64,
    ) -> Result<Vec<Substitution>> {
        let mut squad = self.squad_for_user(user_id)?;
        self.repo.fixture(fixture_id).ok_or(ValidationError::FixtureNotFound)?;

        let participating = self
            .repo
            .performances_for_fixture(fixture_id)
            .iter()
            .map(|p| p.player_id)
            .collect();

        let swaps =
            substitution::plan_substitutions(&squad, &participating, |id| self.role_of(id));
        if !swaps.is_empty() {
            substitution::apply_plan(&mut squad, &swaps);
            self.repo.put_squad(squad);
            log::info!(
                "user {}: {} automatic substitution(s) for fixture {}",
                user_id,
                swaps.len(),
                fixture_id
            );
        }
        Ok(swaps)
    }

    /// Generate demo performances for every catalog player in a
    /// fixture. Seeded so exhibitions are reproducible.
    pub fn generate_demo_performances(
        &mut self,
        fixture_id: i64,
        rng: &mut impl Rng,
    ) -> Result<Vec<PlayerPerformance>> {
        self.repo.fixture(fixture_id).ok_or(ValidationError::FixtureNotFound)?;

        let mut recorded = Vec::new();
        for player in self.repo.players() {
            let stats = scoring::generate_stats(player.role, rng);
            let points = scoring::score_performance(player.role, &stats);
            recorded.push(self.repo.create_performance(PlayerPerformance {
                id: 0,
                fixture_id,
                player_id: player.id,
                points,
                stats,
            }));
        }
        Ok(recorded)
    }

    /// The user's squad total for one fixture, armband multipliers
    /// applied.
    pub fn gameweek_points(
        &self,
        user_id: i64,
        fixture_id: i64,
        bench_boost: bool,
    ) -> Result<i64> {
        let squad = self.squad_for_user(user_id)?;
        self.repo.fixture(fixture_id).ok_or(ValidationError::FixtureNotFound)?;
        let points_by_player: HashMap<i64, i64> = self
            .repo
            .performances_for_fixture(fixture_id)
            .iter()
            .map(|p| (p.player_id, p.points))
            .collect();
        Ok(scoring::gameweek_points(&squad, &points_by_player, bench_boost))
    }

    // ========================
    // Fixture feed
    // ========================

    /// Fixtures that have not finished, soonest first.
    pub fn upcoming_fixtures(&self, limit: usize) -> Vec<Fixture> {
        let now = Utc::now();
        let mut fixtures: Vec<Fixture> = self
            .repo
            .fixtures()
            .into_iter()
            .filter(|f| f.start_time > now || f.status == crate::models::FixtureStatus::Upcoming)
            .collect();
        fixtures.sort_by_key(|f| f.start_time);
        fixtures.truncate(limit);
        fixtures
    }

    pub fn next_fixture(&self) -> Option<Fixture> {
        self.upcoming_fixtures(1).into_iter().next()
    }

    // ========================
    // Leagues
    // ========================

    /// Create a league with a fresh join code; the creator is its
    /// first member.
    pub fn create_league(
        &mut self,
        user_id: i64,
        name: &str,
        is_global: bool,
        rng: &mut impl Rng,
    ) -> Result<League> {
        let code = self.unique_league_code(rng);
        let league = self.repo.create_league(League {
            id: 0,
            name: name.to_string(),
            code,
            creator_id: user_id,
            is_global,
            created_at: Utc::now(),
        });
        self.join(league.id, user_id)?;
        log::info!("user {} created league {} ({})", user_id, league.id, league.code);
        Ok(league)
    }

    /// Join a league by its code.
    pub fn join_league(&mut self, user_id: i64, code: &str) -> Result<League> {
        let league =
            self.repo.league_by_code(code).ok_or(ValidationError::LeagueNotFound)?;
        self.join(league.id, user_id)?;
        Ok(league)
    }

    fn join(&mut self, league_id: i64, user_id: i64) -> Result<()> {
        if self.repo.is_league_member(league_id, user_id) {
            return Err(ValidationError::AlreadyInLeague);
        }
        let rank = self.repo.league_members(league_id).len() as u32 + 1;
        self.repo.add_league_member(LeagueMember { league_id, user_id, rank });
        Ok(())
    }

    /// Leagues the user belongs to, with their seat in each.
    pub fn user_leagues(&self, user_id: i64) -> Vec<LeagueSummary> {
        self.repo
            .leagues_for_user(user_id)
            .into_iter()
            .map(|league| {
                let members = self.repo.league_members(league.id);
                let user_rank = members
                    .iter()
                    .find(|m| m.user_id == user_id)
                    .map(|m| m.rank)
                    .unwrap_or(0);
                LeagueSummary { league, member_count: members.len(), user_rank }
            })
            .collect()
    }

    pub fn global_leagues(&self) -> Vec<LeagueSummary> {
        self.repo
            .global_leagues()
            .into_iter()
            .map(|league| {
                let member_count = self.repo.league_members(league.id).len();
                LeagueSummary { league, member_count, user_rank: 0 }
            })
            .collect()
    }

    /// Current table for a league: members ordered by squad points,
    /// dense ranks from 1.
    pub fn standings(&self, league_id: i64) -> Result<Vec<StandingRow>> {
        self.repo.league(league_id).ok_or(ValidationError::LeagueNotFound)?;
        let mut rows: Vec<StandingRow> = self
            .repo
            .league_members(league_id)
            .iter()
            .map(|member| {
                let squad = self.repo.squad_by_user(member.user_id);
                StandingRow {
                    rank: 0,
                    user_id: member.user_id,
                    squad_name: squad
                        .as_ref()
                        .map(|s| s.name.clone())
                        .unwrap_or_default(),
                    points: squad.map(|s| s.points).unwrap_or(0),
                }
            })
            .collect();
        rows.sort_by(|a, b| b.points.cmp(&a.points).then(a.user_id.cmp(&b.user_id)));
        for (i, row) in rows.iter_mut().enumerate() {
            row.rank = i as u32 + 1;
        }
        Ok(rows)
    }

    fn unique_league_code(&self, rng: &mut impl Rng) -> String {
        loop {
            let code: String = (0..LEAGUE_CODE_LEN)
                .map(|_| {
                    let idx = rng.gen_range(0..LEAGUE_CODE_CHARS.len());
                    LEAGUE_CODE_CHARS[idx] as char
                })
                .collect();
            if self.repo.league_by_code(&code).is_none() {
                return code;
            }
        }
    }
}
