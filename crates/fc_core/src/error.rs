use thiserror::Error;

/// Rejection reasons surfaced by the composition validator and the
/// service layer. Every variant is a pre-mutation check failure: the
/// store is untouched when one of these comes back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Player already in squad")]
    DuplicatePlayer,

    #[error("Not enough budget: used {used} + price {price} exceeds {total}")]
    BudgetExceeded { used: u32, price: u32, total: u32 },

    #[error("Maximum squad size of {max} players reached")]
    SquadFull { max: usize },

    #[error("Maximum {cap} {role}s allowed in squad")]
    RoleCapReached { role: &'static str, cap: u8 },

    #[error("No transfers remaining")]
    NoTransfersRemaining,

    #[error("Already have {max} players in starting XI")]
    StartingXiFull { max: usize },

    #[error("Maximum {cap} {role}s allowed in starting XI")]
    RoleCapExceededInXi { role: &'static str, cap: u8 },

    #[error("Need at least {min} {role}s in starting XI")]
    MinimumRoleViolation { role: &'static str, min: u8 },

    #[error("Player not in squad")]
    PlayerNotInSquad,

    #[error("Bench position must be between 1 and {max}")]
    InvalidBenchPosition { max: u8 },

    #[error("Team not found")]
    TeamNotFound,

    #[error("Player not found")]
    PlayerNotFound,

    #[error("League not found")]
    LeagueNotFound,

    #[error("Already a member of this league")]
    AlreadyInLeague,

    #[error("Fixture not found")]
    FixtureNotFound,

    #[error("Invalid role: {0}")]
    InvalidRole(String),
}

impl ValidationError {
    /// Stable machine-readable reason code, independent of the display
    /// message. This is what goes over the wire.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::DuplicatePlayer => "DuplicatePlayer",
            ValidationError::BudgetExceeded { .. } => "BudgetExceeded",
            ValidationError::SquadFull { .. } => "SquadFull",
            ValidationError::RoleCapReached { .. } => "RoleCapReached",
            ValidationError::NoTransfersRemaining => "NoTransfersRemaining",
            ValidationError::StartingXiFull { .. } => "StartingXIFull",
            ValidationError::RoleCapExceededInXi { .. } => "RoleCapExceededInXI",
            ValidationError::MinimumRoleViolation { .. } => "MinimumRoleViolation",
            ValidationError::PlayerNotInSquad => "PlayerNotInSquad",
            ValidationError::InvalidBenchPosition { .. } => "InvalidBenchPosition",
            ValidationError::TeamNotFound => "TeamNotFound",
            ValidationError::PlayerNotFound => "PlayerNotFound",
            ValidationError::LeagueNotFound => "LeagueNotFound",
            ValidationError::AlreadyInLeague => "AlreadyInLeague",
            ValidationError::FixtureNotFound => "FixtureNotFound",
            ValidationError::InvalidRole(_) => "InvalidRole",
        }
    }
}

/// Errors from the JSON API boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unsupported schema version: {0}")]
    SchemaVersion(u8),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            ApiError::Deserialization(err.to_string())
        } else {
            ApiError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
