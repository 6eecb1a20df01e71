//! Reserve study error types.

use strata_shared::ReserveItemId;
use thiserror::Error;

/// Reserve-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReserveError {
    /// Reserve item not found.
    #[error("Reserve item not found: {0}")]
    UnknownItem(ReserveItemId),
}
