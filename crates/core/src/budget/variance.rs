//! Budget variance calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How actual spending compares to budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceStatus {
    /// Actual is under budget.
    Favorable,
    /// Actual is over budget.
    Unfavorable,
    /// Spending exactly matches budget.
    None,
}

impl VarianceStatus {
    /// Returns the status label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Favorable => "favorable",
            Self::Unfavorable => "unfavorable",
            Self::None => "on budget",
        }
    }
}

impl std::fmt::Display for VarianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Budget vs actual for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variance {
    /// Budgeted amount.
    pub budgeted: Decimal,
    /// Actual amount spent.
    pub actual: Decimal,
    /// Remaining budget (budgeted - actual); negative when overspent.
    pub variance: Decimal,
    /// Percent of budget consumed, rounded to two places. Zero when
    /// nothing was budgeted, guarding the division.
    pub pct_used: Decimal,
    /// Favorable / unfavorable classification.
    pub status: VarianceStatus,
}

impl Variance {
    /// Calculates variance for an expense category.
    ///
    /// Under budget is favorable, over budget is unfavorable. A
    /// zero-budget category reports 0% used no matter what was spent.
    #[must_use]
    pub fn for_expense(budgeted: Decimal, actual: Decimal) -> Self {
        let variance = budgeted - actual;
        let pct_used = if budgeted.is_zero() {
            Decimal::ZERO
        } else {
            (actual / budgeted * Decimal::ONE_HUNDRED).round_dp(2)
        };

        let status = if variance.is_zero() {
            VarianceStatus::None
        } else if variance.is_sign_positive() {
            VarianceStatus::Favorable
        } else {
            VarianceStatus::Unfavorable
        };

        Self {
            budgeted,
            actual,
            variance,
            pct_used,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_under_budget_is_favorable() {
        let v = Variance::for_expense(dec!(1000), dec!(250));
        assert_eq!(v.variance, dec!(750));
        assert_eq!(v.pct_used, dec!(25.00));
        assert_eq!(v.status, VarianceStatus::Favorable);
    }

    #[test]
    fn test_over_budget_is_unfavorable() {
        let v = Variance::for_expense(dec!(1000), dec!(1300));
        assert_eq!(v.variance, dec!(-300));
        assert_eq!(v.pct_used, dec!(130.00));
        assert_eq!(v.status, VarianceStatus::Unfavorable);
    }

    #[test]
    fn test_exact_spend_has_no_variance() {
        let v = Variance::for_expense(dec!(500), dec!(500));
        assert_eq!(v.variance, Decimal::ZERO);
        assert_eq!(v.status, VarianceStatus::None);
    }

    #[test]
    fn test_zero_budget_guards_percentage() {
        let v = Variance::for_expense(Decimal::ZERO, dec!(750));
        assert_eq!(v.pct_used, Decimal::ZERO);
        assert_eq!(v.variance, dec!(-750));
        assert_eq!(v.status, VarianceStatus::Unfavorable);
    }

    #[test]
    fn test_zero_budget_zero_spend() {
        let v = Variance::for_expense(Decimal::ZERO, Decimal::ZERO);
        assert_eq!(v.pct_used, Decimal::ZERO);
        assert_eq!(v.status, VarianceStatus::None);
    }
}
