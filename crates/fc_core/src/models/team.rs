use serde::{Deserialize, Serialize};

/// A real-world franchise players belong to. Reference data only; squads
/// and fixtures refer to franchises by `code`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    /// Short unique code, e.g. "MI", "CSK".
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
}
