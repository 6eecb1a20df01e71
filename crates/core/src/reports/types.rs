//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strata_shared::{AccountNumber, ReserveItemId, UnitNumber};

use crate::budget::Variance;
use crate::coa::AccountType;

/// One account line in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountLine {
    /// Account number.
    pub number: AccountNumber,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Signed balance per the account's normal side.
    pub balance: Decimal,
}

/// One account's raw leg totals in the trial balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceLine {
    /// Account number.
    pub number: AccountNumber,
    /// Account name.
    pub name: String,
    /// Total debits posted to the account.
    pub debits: Decimal,
    /// Total credits posted to the account.
    pub credits: Decimal,
}

/// Trial balance totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total debits across all accounts.
    pub total_debits: Decimal,
    /// Total credits across all accounts.
    pub total_credits: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Per-account raw totals, in account number order.
    pub lines: Vec<TrialBalanceLine>,
    /// Totals.
    pub totals: TrialBalanceTotals,
}

/// Balance sheet section (assets, liabilities, equity).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetSection {
    /// Section total.
    pub total: Decimal,
    /// Detail accounts in this section.
    pub lines: Vec<AccountLine>,
}

/// Balance sheet report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// As of date (inclusive).
    pub as_of: NaiveDate,
    /// Assets section.
    pub assets: BalanceSheetSection,
    /// Liabilities section.
    pub liabilities: BalanceSheetSection,
    /// Equity accounts section (excluding the net income line below).
    pub equity: BalanceSheetSection,
    /// Income minus expense through the as-of date. There is no closing
    /// operation, so the current surplus lives here rather than in a
    /// retained-earnings account.
    pub net_income_to_date: Decimal,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Equity accounts plus net income to date.
    pub total_equity: Decimal,
    /// Liabilities plus equity.
    pub liabilities_and_equity: Decimal,
    /// Whether assets equal liabilities plus equity.
    pub is_balanced: bool,
}

/// Income statement section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementSection {
    /// Section total.
    pub total: Decimal,
    /// Detail accounts in this section.
    pub lines: Vec<AccountLine>,
}

/// Income statement report for a date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Period start date (inclusive).
    pub period_start: NaiveDate,
    /// Period end date (inclusive).
    pub period_end: NaiveDate,
    /// Income section.
    pub income: IncomeStatementSection,
    /// Expense section.
    pub expenses: IncomeStatementSection,
    /// Net income (income minus expenses) for the period.
    pub net_income: Decimal,
}

/// One budget category's variance line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetVarianceLine {
    /// Category name.
    pub category: String,
    /// Ledger account the actuals came from, when mapped.
    pub account: Option<AccountNumber>,
    /// Budget vs actual math.
    pub variance: Variance,
}

/// Budget variance report for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetVarianceReport {
    /// Budget year.
    pub year: i32,
    /// Per-category lines.
    pub lines: Vec<BudgetVarianceLine>,
    /// Whole-budget totals.
    pub totals: Variance,
}

/// Delinquency aging bucket.
///
/// Buckets are derived from the balance as a multiple of the unit's
/// monthly fee, not from invoice dates. A unit with no monthly fee and
/// a positive balance lands in the oldest bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    /// Owes at most one month's fee.
    Current,
    /// Owes more than one and up to two months.
    Days31To60,
    /// Owes more than two and up to three months.
    Days61To90,
    /// Owes more than three months.
    Over90,
}

impl AgingBucket {
    /// Buckets a positive balance by fee multiples.
    #[must_use]
    pub fn for_balance(balance: Decimal, monthly_fee: Decimal) -> Self {
        if balance <= monthly_fee {
            Self::Current
        } else if balance <= monthly_fee * Decimal::TWO {
            Self::Days31To60
        } else if balance <= monthly_fee * Decimal::from(3) {
            Self::Days61To90
        } else {
            Self::Over90
        }
    }

    /// Returns the bucket label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "0-30",
            Self::Days31To60 => "31-60",
            Self::Days61To90 => "61-90",
            Self::Over90 => "90+",
        }
    }
}

impl std::fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One delinquent unit in the aging report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelinquencyLine {
    /// Unit number.
    pub unit: UnitNumber,
    /// Owner of record.
    pub owner: String,
    /// The unit's monthly fee.
    pub monthly_fee: Decimal,
    /// Amount owed.
    pub balance: Decimal,
    /// Aging bucket.
    pub bucket: AgingBucket,
}

/// Per-bucket delinquency totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DelinquencyTotals {
    /// Total owed at most one month out.
    pub current: Decimal,
    /// Total owed in the 31-60 bucket.
    pub days_31_60: Decimal,
    /// Total owed in the 61-90 bucket.
    pub days_61_90: Decimal,
    /// Total owed beyond 90 days.
    pub over_90: Decimal,
    /// Total owed across all buckets.
    pub total: Decimal,
}

/// Delinquency aging report.
///
/// Bucketing is a documented approximation: it infers age from how many
/// months of fees the balance represents rather than from invoice
/// dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DelinquencyReport {
    /// Units with a positive balance, in unit number order.
    pub lines: Vec<DelinquencyLine>,
    /// Per-bucket totals.
    pub totals: DelinquencyTotals,
}

/// One reserve item's funding status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveLine {
    /// Item id.
    pub id: ReserveItemId,
    /// Component name.
    pub name: String,
    /// Estimated replacement cost.
    pub estimated_cost: Decimal,
    /// Money set aside so far.
    pub current_funding: Decimal,
    /// Unfunded portion, floored at zero.
    pub funding_gap: Decimal,
    /// Percent funded (100 for zero-cost items).
    pub percent_funded: Decimal,
    /// Contribution needed per remaining year.
    pub annual_needed: Decimal,
    /// Whether the item is a contingency placeholder.
    pub is_contingency: bool,
}

/// Reserve funding report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReserveReport {
    /// Per-item lines.
    pub lines: Vec<ReserveLine>,
    /// Sum of estimated costs.
    pub total_estimated: Decimal,
    /// Sum of current funding.
    pub total_funded: Decimal,
    /// Sum of funding gaps.
    pub total_gap: Decimal,
    /// Recommended annual contribution: the sum of `annual_needed`
    /// over non-contingency items.
    pub recommended_annual: Decimal,
}
