//! Error types
//!
//! Only construction and configuration can fail; the per-tick simulation is
//! infallible.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// A host object the game cannot run without was never provided
    #[error("host object not initialized: {0}")]
    MissingHostObject(&'static str),

    /// Settings parsed but describe an impossible configuration
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting {
        field: &'static str,
        reason: &'static str,
    },

    /// Settings JSON could not be parsed
    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),
}
