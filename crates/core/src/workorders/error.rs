//! Work order error types.

use rust_decimal::Decimal;
use strata_shared::{AccountNumber, WorkOrderId};
use thiserror::Error;

use super::types::WorkOrderStatus;

/// Errors that can occur during work order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkOrderError {
    /// Work order not found.
    #[error("Work order not found: {0}")]
    UnknownWorkOrder(WorkOrderId),

    /// The charged account must be a postable expense account.
    #[error("Account {0} is not an expense detail account")]
    NotAnExpenseAccount(AccountNumber),

    /// Attempted an invalid status transition (e.g. paying a draft).
    #[error("Invalid work order transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: WorkOrderStatus,
        /// The attempted target status.
        to: WorkOrderStatus,
    },

    /// Revised invoice amount must be positive.
    #[error("Work order amount must be positive, got {0}")]
    InvalidAmount(Decimal),
}
