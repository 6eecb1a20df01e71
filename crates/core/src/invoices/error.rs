//! Invoice error types.

use strata_shared::InvoiceId;
use thiserror::Error;

use super::types::InvoiceStatus;

/// Errors that can occur during invoice operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvoiceError {
    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    UnknownInvoice(InvoiceId),

    /// Attempted an invalid status transition (e.g. paying twice).
    #[error("Invalid invoice transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: InvoiceStatus,
        /// The attempted target status.
        to: InvoiceStatus,
    },
}
