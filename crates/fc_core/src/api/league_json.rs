//! League endpoints: creation, joining by code, membership listings
//! and tables.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use super::{accept, ensure_schema, respond};
use crate::error::ApiError;
use crate::service::SquadService;
use crate::state;

#[derive(Debug, Deserialize)]
pub struct CreateLeagueRequest {
    pub schema_version: u8,
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub is_global: bool,
    /// Seed for the join-code generator; random codes when omitted.
    #[serde(default)]
    pub seed: Option<u64>,
}

pub fn create_league_json(request_json: &str) -> Result<String, ApiError> {
    let request: CreateLeagueRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| {
        let mut service = SquadService::new(store);
        let result = match request.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                service.create_league(request.user_id, &request.name, request.is_global, &mut rng)
            }
            None => {
                let mut rng = rand::thread_rng();
                service.create_league(request.user_id, &request.name, request.is_global, &mut rng)
            }
        };
        respond(result)
    })
}

#[derive(Debug, Deserialize)]
pub struct JoinLeagueRequest {
    pub schema_version: u8,
    pub user_id: i64,
    pub code: String,
}

pub fn join_league_json(request_json: &str) -> Result<String, ApiError> {
    let request: JoinLeagueRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| {
        respond(SquadService::new(store).join_league(request.user_id, &request.code))
    })
}

#[derive(Debug, Deserialize)]
pub struct UserLeaguesRequest {
    pub schema_version: u8,
    pub user_id: i64,
}

pub fn user_leagues_json(request_json: &str) -> Result<String, ApiError> {
    let request: UserLeaguesRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| accept(&SquadService::new(store).user_leagues(request.user_id)))
}

#[derive(Debug, Deserialize)]
pub struct GlobalLeaguesRequest {
    pub schema_version: u8,
}

pub fn global_leagues_json(request_json: &str) -> Result<String, ApiError> {
    let request: GlobalLeaguesRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| accept(&SquadService::new(store).global_leagues()))
}

#[derive(Debug, Deserialize)]
pub struct StandingsRequest {
    pub schema_version: u8,
    pub league_id: i64,
}

pub fn standings_json(request_json: &str) -> Result<String, ApiError> {
    let request: StandingsRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| respond(SquadService::new(store).standings(request.league_id)))
}
