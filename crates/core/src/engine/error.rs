//! The umbrella error for engine operations.

use strata_shared::AccountNumber;
use thiserror::Error;

use crate::budget::BudgetError;
use crate::coa::{AccountType, CoaError};
use crate::invoices::InvoiceError;
use crate::ledger::PostingError;
use crate::reserve::ReserveError;
use crate::units::UnitError;
use crate::workorders::WorkOrderError;

/// Any failure an engine operation can surface.
///
/// Wraps the per-module errors so callers handle one type, plus the
/// handful of failures that belong to the engine itself (settings
/// validation, period arguments).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    // ==========================================================================
    // Wrapped module errors
    // ==========================================================================
    /// Chart of accounts error.
    #[error("Chart error: {0}")]
    Chart(#[from] CoaError),

    /// Journal posting error.
    #[error("Posting error: {0}")]
    Posting(#[from] PostingError),

    /// Unit subledger error.
    #[error("Unit error: {0}")]
    Unit(#[from] UnitError),

    /// Invoice error.
    #[error("Invoice error: {0}")]
    Invoice(#[from] InvoiceError),

    /// Work order error.
    #[error("Work order error: {0}")]
    WorkOrder(#[from] WorkOrderError),

    /// Budget error.
    #[error("Budget error: {0}")]
    Budget(#[from] BudgetError),

    /// Reserve study error.
    #[error("Reserve error: {0}")]
    Reserve(#[from] ReserveError),

    // ==========================================================================
    // Engine-level errors
    // ==========================================================================
    /// A settings posting account is missing, non-detail, inactive,
    /// or of the wrong type.
    #[error("Posting account {role} ({number}) must be an active {expected} detail account")]
    InvalidPostingAccount {
        /// Which posting role failed validation.
        role: &'static str,
        /// The configured account number.
        number: AccountNumber,
        /// The type the role requires.
        expected: AccountType,
    },

    /// Settings due day outside 1 through 28.
    #[error("Due day must be between 1 and 28, got {0}")]
    InvalidDueDay(u32),

    /// Month argument outside 1 through 12.
    #[error("Invalid billing period {year}-{month}")]
    InvalidPeriod {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },

    /// The account fills a posting role and cannot be removed.
    #[error("Account {0} is a designated posting account and cannot be removed")]
    ProtectedAccount(AccountNumber),
}
