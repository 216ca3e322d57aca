use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All errors generated in `liquidity-sim`.
///
/// Every variant is a local programming error surfaced immediately. The engine performs no I/O,
/// so there is no transient (retryable) failure class.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("level index {index} out of range for ladder of {len} levels")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot inject liquidity into an empty ladder")]
    EmptyLadder,

    #[error("invalid ladder window: {0}")]
    InvalidWindow(String),
}

impl SimulationError {
    /// Determine if the error was caused by the construction parameters, rather than by a
    /// subsequent operation on an already valid engine.
    #[allow(clippy::match_like_matches_macro)]
    pub fn is_configuration(&self) -> bool {
        match self {
            SimulationError::InvalidConfiguration(_) => true,
            _ => false,
        }
    }
}
