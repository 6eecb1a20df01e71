//! Budget data types.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strata_shared::{AccountNumber, BudgetCategoryId};

/// One line of the annual operating budget.
///
/// A category may be mapped to an expense account, in which case its
/// actuals come from the ledger; unmapped categories fall back to their
/// recorded expense list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// Category id.
    pub id: BudgetCategoryId,
    /// Display name, e.g. "Landscaping".
    pub name: String,
    /// Budget year.
    pub year: i32,
    /// Budgeted amount for the year.
    pub budgeted: Decimal,
    /// Ledger expense account the category tracks, when mapped.
    pub account: Option<AccountNumber>,
    /// Expenses recorded directly against the category.
    pub expenses: Vec<ExpenseRecord>,
}

impl BudgetCategory {
    /// Sum of recorded expenses dated in the category's year.
    #[must_use]
    pub fn recorded_total(&self) -> Decimal {
        self.expenses
            .iter()
            .filter(|e| e.date.year() == self.year)
            .map(|e| e.amount)
            .sum()
    }
}

/// An expense recorded against a budget category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// What was bought.
    pub description: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Date of the expense.
    pub date: NaiveDate,
    /// Vendor, when known.
    pub vendor: Option<String>,
}
