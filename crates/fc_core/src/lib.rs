//! # fc_core - Fantasy Cricket Squad Management Core
//!
//! Rules engine and storage seam for a fantasy cricket game: squad
//! building under budget and composition caps, captain/vice-captain
//! armbands, starting-XI versus bench management with automatic
//! substitutions, leagues and gameweek scoring.
//!
//! ## Features
//! - Two-tier composition rules (squad-build caps vs starting-XI bounds)
//! - Validate-first mutations: a rejection never touches the store
//! - Deterministic two-pass automatic substitution engine
//! - JSON API with machine-readable rejection codes
//! - Pluggable storage behind the `Repository` trait

pub mod api;
pub mod data;
pub mod error;
pub mod models;
pub mod rules;
pub mod scoring;
pub mod service;
pub mod state;
pub mod store;
pub mod substitution;
pub mod validator;

#[cfg(test)]
mod invariant_tests;

// Re-export the main API surface
pub use api::{
    add_player_json, apply_substitutions_json, composition_json, create_league_json,
    fixtures_json, gameweek_points_json, generate_points_json, global_leagues_json,
    join_league_json, power_up_json, record_performances_json, register_user_json,
    remove_player_json, rename_squad_json, reset_squad_json, set_player_role_json,
    set_starting_json, squad_players_json, standings_json, team_distribution_json,
    upcoming_fixtures_json, user_leagues_json,
};
pub use error::{ApiError, Result, ValidationError};

// Re-export the domain model
pub use models::{
    Fixture, FixtureStatus, League, LeagueMember, LeagueSummary, PerformanceStats, Player,
    PlayerPerformance, PlayerRole, Squad, SquadEntry, SquadRole, StandingRow, Team, User,
};

// Re-export the rules tables and engines
pub use rules::{
    squad_cap, xi_bounds, RoleCounts, BENCH_SLOTS, DEFAULT_BUDGET, DEFAULT_TRANSFERS,
    SQUAD_SIZE, STARTING_XI,
};
pub use service::{
    CompositionReport, PowerUp, SquadPlayerView, SquadService, UNLIMITED_TRANSFERS,
};
pub use store::{MemoryStore, Repository};
pub use substitution::{apply_plan, plan_substitutions, Substitution};
pub use validator::{check_add_player, check_set_role, check_set_starting};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = api::SCHEMA_VERSION;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn call(result: std::result::Result<String, ApiError>) -> Value {
        serde_json::from_str(&result.unwrap()).unwrap()
    }

    fn seed_player(name: &str, role: PlayerRole) -> i64 {
        state::with_store_mut(|store| {
            store
                .create_player(Player {
                    id: 0,
                    name: name.to_string(),
                    team: "MI".to_string(),
                    role,
                    price: 5,
                    image: None,
                    stats: serde_json::Value::Null,
                })
                .id
        })
    }

    /// Full flow through the JSON API: register, build a legal 15,
    /// armbands, lineup move, scorecard, automatic substitutions,
    /// gameweek total.
    #[test]
    fn test_full_gameweek_flow() {
        let response = call(register_user_json(
            &json!({ "schema_version": 1, "username": "e2e-skipper" }).to_string(),
        ));
        assert_eq!(response["ok"], true);
        let user_id = response["data"]["user_id"].as_i64().unwrap();

        // A legal 15: 2 WK, 3 BAT, 5 BOW, 5 ALL.
        let mut ids = Vec::new();
        for i in 0..2 {
            ids.push(seed_player(&format!("e2e WK {}", i), PlayerRole::WicketKeeper));
        }
        for i in 0..3 {
            ids.push(seed_player(&format!("e2e BAT {}", i), PlayerRole::Batsman));
        }
        for i in 0..5 {
            ids.push(seed_player(&format!("e2e BOW {}", i), PlayerRole::Bowler));
        }
        for i in 0..5 {
            ids.push(seed_player(&format!("e2e ALL {}", i), PlayerRole::AllRounder));
        }

        for id in &ids {
            let response = call(add_player_json(
                &json!({ "schema_version": 1, "user_id": user_id, "player_id": id })
                    .to_string(),
            ));
            assert_eq!(response["ok"], true, "add failed: {}", response);
        }

        let response = call(composition_json(
            &json!({ "schema_version": 1, "user_id": user_id }).to_string(),
        ));
        assert_eq!(response["data"]["total_players"], 15);
        assert_eq!(response["data"]["batsmen"], 3);

        // Armband on the first batsman.
        let captain = ids[2];
        let response = call(set_player_role_json(
            &json!({
                "schema_version": 1,
                "user_id": user_id,
                "player_id": captain,
                "role": "captain"
            })
            .to_string(),
        ));
        assert_eq!(response["ok"], true);

        // Fixture plus a scorecard: everyone played for 10 points
        // except one starting bowler; the bench all played.
        let fixture_id = state::with_store_mut(|store| {
            store
                .create_fixture(Fixture {
                    id: 0,
                    home_team: "MI".to_string(),
                    away_team: "CSK".to_string(),
                    venue: "Wankhede Stadium, Mumbai".to_string(),
                    start_time: chrono::Utc::now(),
                    status: FixtureStatus::Completed,
                    result: None,
                    home_score: None,
                    away_score: None,
                })
                .id
        });
        let absent = ids[5]; // starting bowler
        let performances: Vec<Value> = ids
            .iter()
            .filter(|id| **id != absent)
            .map(|id| json!({ "player_id": id, "points": 10 }))
            .collect();
        let response = call(record_performances_json(
            &json!({
                "schema_version": 1,
                "fixture_id": fixture_id,
                "performances": performances
            })
            .to_string(),
        ));
        assert_eq!(response["ok"], true);

        let response = call(apply_substitutions_json(
            &json!({ "schema_version": 1, "user_id": user_id, "fixture_id": fixture_id })
                .to_string(),
        ));
        assert_eq!(response["ok"], true);
        let swaps = response["data"].as_array().unwrap();
        assert_eq!(swaps.len(), 1);
        assert_eq!(swaps[0]["out"].as_i64(), Some(absent));

        // Second run is a no-op.
        let response = call(apply_substitutions_json(
            &json!({ "schema_version": 1, "user_id": user_id, "fixture_id": fixture_id })
                .to_string(),
        ));
        assert!(response["data"].as_array().unwrap().is_empty());

        // 11 starters x 10 points, captain doubled.
        let response = call(gameweek_points_json(
            &json!({ "schema_version": 1, "user_id": user_id, "fixture_id": fixture_id })
                .to_string(),
        ));
        assert_eq!(response["data"].as_i64(), Some(120));
    }

    #[test]
    fn test_demo_seed_through_api() {
        let user_id = {
            let response = call(register_user_json(
                &json!({ "schema_version": 1, "username": "e2e-demo-user" }).to_string(),
            ));
            response["data"]["user_id"].as_i64().unwrap()
        };

        // Seed the demo catalog into this user's world and sign a
        // known player by name.
        let kohli = state::with_store_mut(|store| {
            data::seed::seed_demo_data(store);
            store
                .players()
                .into_iter()
                .find(|p| p.name == "Virat Kohli")
                .unwrap()
                .id
        });

        let response = call(add_player_json(
            &json!({ "schema_version": 1, "user_id": user_id, "player_id": kohli })
                .to_string(),
        ));
        assert_eq!(response["ok"], true);

        let response = call(team_distribution_json(
            &json!({ "schema_version": 1, "user_id": user_id }).to_string(),
        ));
        assert_eq!(response["data"]["RCB"], 1);

        let response = call(upcoming_fixtures_json(
            &json!({ "schema_version": 1, "limit": 10 }).to_string(),
        ));
        assert_eq!(response["ok"], true);
        assert!(!response["data"].as_array().unwrap().is_empty());
    }
}
