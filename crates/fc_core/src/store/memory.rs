//! Non-persistent reference implementation of [`Repository`]: plain
//! maps plus serial id counters. Stands in for a real database in
//! tests, demos and the JSON API's default wiring.

use std::collections::HashMap;

use chrono::Utc;

use super::Repository;
use crate::models::{
    Fixture, League, LeagueMember, Player, PlayerPerformance, Squad, Team, User,
};

#[derive(Debug, Default, Clone)]
struct IdCounters {
    users: i64,
    teams: i64,
    players: i64,
    squads: i64,
    fixtures: i64,
    performances: i64,
    leagues: i64,
}

impl IdCounters {
    fn next(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

/// In-process store keyed the way the original tables are: teams by
/// code, performances grouped per fixture, league members per league.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    users: HashMap<i64, User>,
    teams: HashMap<String, Team>,
    players: HashMap<i64, Player>,
    squads: HashMap<i64, Squad>,
    fixtures: HashMap<i64, Fixture>,
    performances: HashMap<i64, Vec<PlayerPerformance>>,
    leagues: HashMap<i64, League>,
    league_members: HashMap<i64, Vec<LeagueMember>>,
    ids: IdCounters,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything, counters included.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Repository for MemoryStore {
    fn user(&self, id: i64) -> Option<User> {
        self.users.get(&id).cloned()
    }

    fn user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned()
    }

    fn create_user(&mut self, username: &str) -> User {
        let id = IdCounters::next(&mut self.ids.users);
        let user = User { id, username: username.to_string(), created_at: Utc::now() };
        self.users.insert(id, user.clone());
        user
    }

    fn teams(&self) -> Vec<Team> {
        let mut teams: Vec<Team> = self.teams.values().cloned().collect();
        teams.sort_by_key(|t| t.id);
        teams
    }

    fn team_by_code(&self, code: &str) -> Option<Team> {
        self.teams.get(code).cloned()
    }

    fn create_team(&mut self, mut team: Team) -> Team {
        team.id = IdCounters::next(&mut self.ids.teams);
        self.teams.insert(team.code.clone(), team.clone());
        team
    }

    fn players(&self) -> Vec<Player> {
        let mut players: Vec<Player> = self.players.values().cloned().collect();
        players.sort_by_key(|p| p.id);
        players
    }

    fn player(&self, id: i64) -> Option<Player> {
        self.players.get(&id).cloned()
    }

    fn create_player(&mut self, mut player: Player) -> Player {
        player.id = IdCounters::next(&mut self.ids.players);
        self.players.insert(player.id, player.clone());
        player
    }

    fn squad(&self, id: i64) -> Option<Squad> {
        self.squads.get(&id).cloned()
    }

    fn squad_by_user(&self, user_id: i64) -> Option<Squad> {
        self.squads.values().find(|s| s.user_id == user_id).cloned()
    }

    fn create_squad(&mut self, user_id: i64, name: &str) -> Squad {
        let id = IdCounters::next(&mut self.ids.squads);
        let squad = Squad::new(id, user_id, name);
        self.squads.insert(id, squad.clone());
        squad
    }

    fn put_squad(&mut self, mut squad: Squad) {
        squad.updated_at = Utc::now();
        self.squads.insert(squad.id, squad);
    }

    fn delete_squad(&mut self, id: i64) {
        self.squads.remove(&id);
    }

    fn fixtures(&self) -> Vec<Fixture> {
        let mut fixtures: Vec<Fixture> = self.fixtures.values().cloned().collect();
        fixtures.sort_by_key(|f| f.id);
        fixtures
    }

    fn fixture(&self, id: i64) -> Option<Fixture> {
        self.fixtures.get(&id).cloned()
    }

    fn create_fixture(&mut self, mut fixture: Fixture) -> Fixture {
        fixture.id = IdCounters::next(&mut self.ids.fixtures);
        self.fixtures.insert(fixture.id, fixture.clone());
        fixture
    }

    fn put_fixture(&mut self, fixture: Fixture) {
        self.fixtures.insert(fixture.id, fixture);
    }

    fn performances_for_fixture(&self, fixture_id: i64) -> Vec<PlayerPerformance> {
        self.performances.get(&fixture_id).cloned().unwrap_or_default()
    }

    fn create_performance(&mut self, mut performance: PlayerPerformance) -> PlayerPerformance {
        performance.id = IdCounters::next(&mut self.ids.performances);
        self.performances
            .entry(performance.fixture_id)
            .or_default()
            .push(performance.clone());
        performance
    }

    fn league(&self, id: i64) -> Option<League> {
        self.leagues.get(&id).cloned()
    }

    fn league_by_code(&self, code: &str) -> Option<League> {
        self.leagues.values().find(|l| l.code == code).cloned()
    }

    fn create_league(&mut self, mut league: League) -> League {
        league.id = IdCounters::next(&mut self.ids.leagues);
        self.leagues.insert(league.id, league.clone());
        self.league_members.entry(league.id).or_default();
        league
    }

    fn global_leagues(&self) -> Vec<League> {
        let mut leagues: Vec<League> =
            self.leagues.values().filter(|l| l.is_global).cloned().collect();
        leagues.sort_by_key(|l| l.id);
        leagues
    }

    fn league_members(&self, league_id: i64) -> Vec<LeagueMember> {
        self.league_members.get(&league_id).cloned().unwrap_or_default()
    }

    fn leagues_for_user(&self, user_id: i64) -> Vec<League> {
        let mut leagues: Vec<League> = self
            .league_members
            .iter()
            .filter(|(_, members)| members.iter().any(|m| m.user_id == user_id))
            .filter_map(|(league_id, _)| self.leagues.get(league_id).cloned())
            .collect();
        leagues.sort_by_key(|l| l.id);
        leagues
    }

    fn add_league_member(&mut self, member: LeagueMember) {
        self.league_members.entry(member.league_id).or_default().push(member);
    }

    fn is_league_member(&self, league_id: i64, user_id: i64) -> bool {
        self.league_members
            .get(&league_id)
            .map(|members| members.iter().any(|m| m.user_id == user_id))
            .unwrap_or(false)
    }
}
