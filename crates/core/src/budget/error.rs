//! Budget error types.

use strata_shared::{AccountNumber, BudgetCategoryId};
use thiserror::Error;

/// Budget-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Budget category not found.
    #[error("Budget category not found: {0}")]
    UnknownCategory(BudgetCategoryId),

    /// Mapped account must be an expense detail account.
    #[error("Account {0} is not an expense detail account")]
    NotAnExpenseAccount(AccountNumber),

    /// A category with this name already exists for the year.
    #[error("Budget category {name} already exists for {year}")]
    DuplicateCategory {
        /// Offending category name.
        name: String,
        /// Budget year.
        year: i32,
    },
}
