//! Fixture feed endpoints: schedule queries, performance ingestion,
//! demo point generation, automatic substitutions and gameweek
//! totals.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use super::{accept, ensure_schema, respond};
use crate::error::ApiError;
use crate::models::{PerformanceStats, PlayerPerformance};
use crate::service::SquadService;
use crate::state;
use crate::store::Repository;

#[derive(Debug, Deserialize)]
pub struct FixturesRequest {
    pub schema_version: u8,
}

pub fn fixtures_json(request_json: &str) -> Result<String, ApiError> {
    let request: FixturesRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store(|store| accept(&store.fixtures()))
}

#[derive(Debug, Deserialize)]
pub struct UpcomingFixturesRequest {
    pub schema_version: u8,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

pub fn upcoming_fixtures_json(request_json: &str) -> Result<String, ApiError> {
    let request: UpcomingFixturesRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| {
        accept(&SquadService::new(store).upcoming_fixtures(request.limit))
    })
}

#[derive(Debug, Deserialize)]
pub struct RecordPerformancesRequest {
    pub schema_version: u8,
    pub fixture_id: i64,
    pub performances: Vec<PerformanceEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PerformanceEntry {
    pub player_id: i64,
    pub points: i64,
    #[serde(default)]
    pub stats: PerformanceStats,
}

/// Ingest a scorecard: one performance row per player who took the
/// field. This is what marks participants for substitutions.
pub fn record_performances_json(request_json: &str) -> Result<String, ApiError> {
    let request: RecordPerformancesRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;

    state::with_store_mut(|store| {
        if store.fixture(request.fixture_id).is_none() {
            return super::reject(&crate::error::ValidationError::FixtureNotFound);
        }
        let mut recorded = Vec::with_capacity(request.performances.len());
        for entry in request.performances {
            recorded.push(store.create_performance(PlayerPerformance {
                id: 0,
                fixture_id: request.fixture_id,
                player_id: entry.player_id,
                points: entry.points,
                stats: entry.stats,
            }));
        }
        accept(&recorded)
    })
}

#[derive(Debug, Deserialize)]
pub struct GeneratePointsRequest {
    pub schema_version: u8,
    pub fixture_id: i64,
    /// Seed for reproducible demo scorecards.
    #[serde(default)]
    pub seed: u64,
}

/// Demo helper: random scorecards for every catalog player.
pub fn generate_points_json(request_json: &str) -> Result<String, ApiError> {
    let request: GeneratePointsRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| {
        let mut rng = StdRng::seed_from_u64(request.seed);
        respond(
            SquadService::new(store).generate_demo_performances(request.fixture_id, &mut rng),
        )
    })
}

#[derive(Debug, Deserialize)]
pub struct SubstitutionsRequest {
    pub schema_version: u8,
    pub user_id: i64,
    pub fixture_id: i64,
}

pub fn apply_substitutions_json(request_json: &str) -> Result<String, ApiError> {
    let request: SubstitutionsRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| {
        respond(
            SquadService::new(store).apply_substitutions(request.user_id, request.fixture_id),
        )
    })
}

#[derive(Debug, Deserialize)]
pub struct GameweekPointsRequest {
    pub schema_version: u8,
    pub user_id: i64,
    pub fixture_id: i64,
    #[serde(default)]
    pub bench_boost: bool,
}

pub fn gameweek_points_json(request_json: &str) -> Result<String, ApiError> {
    let request: GameweekPointsRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| {
        respond(SquadService::new(store).gameweek_points(
            request.user_id,
            request.fixture_id,
            request.bench_boost,
        ))
    })
}
