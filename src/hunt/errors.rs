use thiserror::Error;

/// Errors that can arise while loading catalogs, persisting progress or
/// driving the shell. The completion transition itself never produces one.
#[derive(Debug, Error)]
pub enum HuntError {
    /// Wrapper around IO errors (save file, seed file, directory creation).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around serde_json serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when looking up a mission or badge id that is not in the catalog.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Catalog data violates one of its structural rules.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Mission exists but the user's level is below its required level.
    #[error("mission {mission_id} is locked until level {required_level}")]
    MissionLocked {
        mission_id: String,
        required_level: u32,
    },

    /// Rejected display name
    #[error("invalid username: {0}")]
    InvalidUsername(String),

    /// Internal error (unexpected conditions)
    #[error("internal error: {0}")]
    Internal(String),
}
