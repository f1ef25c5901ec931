//! Error kinds raised while setting up a run
//!
//! Everything is checked before the integration loop starts, the loop itself
//! has no failure path.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A physical or numerical parameter is outside its valid range
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The time series buffers could not be set up
    #[error("setup failed: {0}")]
    SetupError(String),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        SimError::InvalidParameter { name, value, reason }
    }
}
