use thiserror::Error;

use crate::models::Control;

/// Errors raised while turning raw control or storage input into a `FilterConfig`.
///
/// The filter engine itself never fails; these only surface at the edges where
/// the caller decides to keep the previous value or fall back to defaults.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid number for {control:?}: {raw:?}")]
    InvalidNumber { control: Control, raw: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
