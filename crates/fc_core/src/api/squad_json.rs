//! Squad management endpoints: registration, transfers, armbands,
//! lineup moves and squad views, all against the global store.

use serde::{Deserialize, Serialize};

use super::{accept, ensure_schema, respond};
use crate::error::{ApiError, ValidationError};
use crate::models::SquadRole;
use crate::service::{PowerUp, SquadService};
use crate::state;
use crate::store::Repository;

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub schema_version: u8,
    pub username: String,
    /// Squad name; defaults to "<username>'s XI".
    #[serde(default)]
    pub squad_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterUserResponse {
    pub user_id: i64,
    pub squad_id: i64,
}

/// Create a user and their (empty) squad in one step.
pub fn register_user_json(request_json: &str) -> Result<String, ApiError> {
    let request: RegisterUserRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;

    state::with_store_mut(|store| {
        let user = store.create_user(&request.username);
        let mut service = SquadService::new(store);
        let squad_name = request
            .squad_name
            .unwrap_or_else(|| format!("{}'s XI", request.username));
        let squad = service.ensure_squad(user.id, &squad_name);
        accept(&RegisterUserResponse { user_id: user.id, squad_id: squad.id })
    })
}

#[derive(Debug, Deserialize)]
pub struct SquadPlayerRequest {
    pub schema_version: u8,
    pub user_id: i64,
    pub player_id: i64,
}

pub fn add_player_json(request_json: &str) -> Result<String, ApiError> {
    let request: SquadPlayerRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| {
        respond(SquadService::new(store).add_player(request.user_id, request.player_id))
    })
}

pub fn remove_player_json(request_json: &str) -> Result<String, ApiError> {
    let request: SquadPlayerRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| {
        respond(SquadService::new(store).remove_player(request.user_id, request.player_id))
    })
}

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub schema_version: u8,
    pub user_id: i64,
    pub player_id: i64,
    /// "captain", "vice-captain" or null to clear.
    #[serde(default)]
    pub role: Option<String>,
}

pub fn set_player_role_json(request_json: &str) -> Result<String, ApiError> {
    let request: SetRoleRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;

    // Only the two user-assignable armbands come through this
    // endpoint; triple-captain is the power-up's to grant.
    let role = match request.role.as_deref() {
        None => None,
        Some("captain") => Some(SquadRole::Captain),
        Some("vice-captain") => Some(SquadRole::ViceCaptain),
        Some(other) => {
            return super::reject(&ValidationError::InvalidRole(other.to_string()))
        }
    };

    state::with_store_mut(|store| {
        respond(SquadService::new(store).set_player_role(request.user_id, request.player_id, role))
    })
}

#[derive(Debug, Deserialize)]
pub struct SetStartingRequest {
    pub schema_version: u8,
    pub user_id: i64,
    pub player_id: i64,
    pub is_starting: bool,
    #[serde(default)]
    pub bench_position: Option<u8>,
}

pub fn set_starting_json(request_json: &str) -> Result<String, ApiError> {
    let request: SetStartingRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| {
        respond(SquadService::new(store).set_starting(
            request.user_id,
            request.player_id,
            request.is_starting,
            request.bench_position,
        ))
    })
}

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub schema_version: u8,
    pub user_id: i64,
}

pub fn reset_squad_json(request_json: &str) -> Result<String, ApiError> {
    let request: UserRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| respond(SquadService::new(store).reset_squad(request.user_id)))
}

#[derive(Debug, Deserialize)]
pub struct RenameSquadRequest {
    pub schema_version: u8,
    pub user_id: i64,
    pub name: String,
}

pub fn rename_squad_json(request_json: &str) -> Result<String, ApiError> {
    let request: RenameSquadRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| {
        respond(SquadService::new(store).rename_squad(request.user_id, &request.name))
    })
}

pub fn squad_players_json(request_json: &str) -> Result<String, ApiError> {
    let request: UserRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| respond(SquadService::new(store).squad_players(request.user_id)))
}

pub fn composition_json(request_json: &str) -> Result<String, ApiError> {
    let request: UserRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| respond(SquadService::new(store).composition(request.user_id)))
}

pub fn team_distribution_json(request_json: &str) -> Result<String, ApiError> {
    let request: UserRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| {
        respond(SquadService::new(store).team_distribution(request.user_id))
    })
}

#[derive(Debug, Deserialize)]
pub struct PowerUpRequest {
    pub schema_version: u8,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub power_up: PowerUp,
    #[serde(default)]
    pub player_id: Option<i64>,
}

pub fn power_up_json(request_json: &str) -> Result<String, ApiError> {
    let request: PowerUpRequest = serde_json::from_str(request_json)?;
    ensure_schema(request.schema_version)?;
    state::with_store_mut(|store| {
        respond(SquadService::new(store).apply_power_up(
            request.user_id,
            request.power_up,
            request.player_id,
        ))
    })
}
