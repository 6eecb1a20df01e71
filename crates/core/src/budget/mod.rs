//! Budget tracking and variance analysis.

pub mod error;
pub mod types;
pub mod variance;

pub use error::BudgetError;
pub use types::{BudgetCategory, ExpenseRecord};
pub use variance::{Variance, VarianceStatus};
