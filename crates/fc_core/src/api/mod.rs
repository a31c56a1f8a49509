//! JSON-string API.
//!
//! Thin boundary for host applications: every function takes a JSON
//! request (with a `schema_version` field) and returns a JSON
//! response. Malformed JSON or an unknown schema version is an
//! [`ApiError`]; a rule rejection is a normal response with
//! `{ "ok": false, "code": ..., "message": ... }` so callers can show
//! it to the user verbatim.

pub mod fixture_json;
pub mod league_json;
pub mod squad_json;

pub use fixture_json::{
    apply_substitutions_json, fixtures_json, gameweek_points_json, generate_points_json,
    record_performances_json, upcoming_fixtures_json,
};
pub use league_json::{
    create_league_json, global_leagues_json, join_league_json, standings_json,
    user_leagues_json,
};
pub use squad_json::{
    add_player_json, composition_json, power_up_json, register_user_json,
    remove_player_json, rename_squad_json, reset_squad_json, set_player_role_json,
    set_starting_json, squad_players_json, team_distribution_json,
};

use serde::Serialize;
use serde_json::json;

use crate::error::{ApiError, ValidationError};

/// Version accepted in request `schema_version` fields.
pub const SCHEMA_VERSION: u8 = 1;

pub(crate) fn ensure_schema(version: u8) -> Result<(), ApiError> {
    if version != SCHEMA_VERSION {
        return Err(ApiError::SchemaVersion(version));
    }
    Ok(())
}

/// `{ "ok": true, "data": ... }`
pub(crate) fn accept<T: Serialize>(data: &T) -> Result<String, ApiError> {
    Ok(serde_json::to_string(&json!({ "ok": true, "data": data }))?)
}

/// `{ "ok": false, "code": ..., "message": ... }`
pub(crate) fn reject(err: &ValidationError) -> Result<String, ApiError> {
    Ok(serde_json::to_string(&json!({
        "ok": false,
        "code": err.code(),
        "message": err.to_string(),
    }))?)
}

/// Collapse a service result into the response envelope.
pub(crate) fn respond<T: Serialize>(
    result: Result<T, ValidationError>,
) -> Result<String, ApiError> {
    match result {
        Ok(data) => accept(&data),
        Err(err) => reject(&err),
    }
}
