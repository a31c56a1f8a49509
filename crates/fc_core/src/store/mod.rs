//! Storage seam.
//!
//! The core never talks to a concrete database: the validator and the
//! substitution engine see squads and catalog rows only through the
//! [`Repository`] capability, and every mutation is a whole-aggregate
//! `put`. Swapping the bundled in-memory store for a persistent
//! backend means implementing this one trait.

mod memory;

pub use memory::MemoryStore;

use crate::models::{
    Fixture, League, LeagueMember, Player, PlayerPerformance, Squad, Team, User,
};

/// Get/put/delete access to every entity the core reads or writes.
///
/// `put_*` methods upsert by id; `create_*` methods allocate the id.
/// Implementations are plain data stores: all invariant checking stays
/// in the validator/service layer above.
pub trait Repository {
    // Users
    fn user(&self, id: i64) -> Option<User>;
    fn user_by_username(&self, username: &str) -> Option<User>;
    fn create_user(&mut self, username: &str) -> User;

    // Franchises
    fn teams(&self) -> Vec<Team>;
    fn team_by_code(&self, code: &str) -> Option<Team>;
    fn create_team(&mut self, team: Team) -> Team;

    // Player catalog
    fn players(&self) -> Vec<Player>;
    fn player(&self, id: i64) -> Option<Player>;
    fn create_player(&mut self, player: Player) -> Player;

    // Squads
    fn squad(&self, id: i64) -> Option<Squad>;
    fn squad_by_user(&self, user_id: i64) -> Option<Squad>;
    fn create_squad(&mut self, user_id: i64, name: &str) -> Squad;
    fn put_squad(&mut self, squad: Squad);
    fn delete_squad(&mut self, id: i64);

    // Fixtures
    fn fixtures(&self) -> Vec<Fixture>;
    fn fixture(&self, id: i64) -> Option<Fixture>;
    fn create_fixture(&mut self, fixture: Fixture) -> Fixture;
    fn put_fixture(&mut self, fixture: Fixture);

    // Performances
    fn performances_for_fixture(&self, fixture_id: i64) -> Vec<PlayerPerformance>;
    fn create_performance(&mut self, performance: PlayerPerformance) -> PlayerPerformance;

    // Leagues
    fn league(&self, id: i64) -> Option<League>;
    fn league_by_code(&self, code: &str) -> Option<League>;
    fn create_league(&mut self, league: League) -> League;
    fn global_leagues(&self) -> Vec<League>;
    fn league_members(&self, league_id: i64) -> Vec<LeagueMember>;
    fn leagues_for_user(&self, user_id: i64) -> Vec<League>;
    fn add_league_member(&mut self, member: LeagueMember);
    fn is_league_member(&self, league_id: i64, user_id: i64) -> bool;
}
