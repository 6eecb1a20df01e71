//! Association settings and the well-known posting accounts.

use serde::{Deserialize, Serialize};
use strata_shared::AccountNumber;

use crate::coa::{AccountKind, AccountType, Chart, CoaError};

use super::error::EngineError;

/// Association-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Association display name.
    pub name: String,
    /// Day of month assessments fall due (1 through 28, so every
    /// month has the day).
    pub due_day: u32,
    /// The accounts subsidiary operations post against.
    pub accounts: PostingAccounts,
}

impl Settings {
    /// Settings wired to the [`standard_chart`] account numbers.
    #[must_use]
    pub fn standard(name: impl Into<String>, due_day: u32) -> Self {
        Self {
            name: name.into(),
            due_day,
            accounts: PostingAccounts::standard(),
        }
    }
}

/// The well-known accounts every subsidiary posting uses.
///
/// Validated against the chart when the engine is constructed or
/// restored: each must exist, be a detail account, and carry the
/// expected type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingAccounts {
    /// Cash account debited by owner payments and credited by
    /// expenses and reserve transfers.
    pub operating_cash: AccountNumber,
    /// Cash account debited by reserve transfers.
    pub reserve_cash: AccountNumber,
    /// Receivable charged by invoices, late fees, and special
    /// assessments, and relieved by payments.
    pub assessments_receivable: AccountNumber,
    /// Income credited when regular assessments are billed.
    pub assessment_income: AccountNumber,
    /// Income credited when late fees are imposed.
    pub late_fee_income: AccountNumber,
    /// Income credited when special assessments are levied.
    pub special_assessment_income: AccountNumber,
}

impl PostingAccounts {
    /// The numbers used by [`standard_chart`].
    #[must_use]
    pub fn standard() -> Self {
        Self {
            operating_cash: AccountNumber::from("1110"),
            reserve_cash: AccountNumber::from("1120"),
            assessments_receivable: AccountNumber::from("1200"),
            assessment_income: AccountNumber::from("4010"),
            late_fee_income: AccountNumber::from("4020"),
            special_assessment_income: AccountNumber::from("4030"),
        }
    }

    /// Each role with its number and required account type.
    fn roles(&self) -> [(&'static str, &AccountNumber, AccountType); 6] {
        [
            ("operating_cash", &self.operating_cash, AccountType::Asset),
            ("reserve_cash", &self.reserve_cash, AccountType::Asset),
            (
                "assessments_receivable",
                &self.assessments_receivable,
                AccountType::Asset,
            ),
            (
                "assessment_income",
                &self.assessment_income,
                AccountType::Income,
            ),
            ("late_fee_income", &self.late_fee_income, AccountType::Income),
            (
                "special_assessment_income",
                &self.special_assessment_income,
                AccountType::Income,
            ),
        ]
    }

    /// Checks every role against the chart.
    pub fn validate(&self, chart: &Chart) -> Result<(), EngineError> {
        for (role, number, expected) in self.roles() {
            let valid = chart.get(number).is_some_and(|account| {
                account.is_postable() && account.account_type == expected
            });
            if !valid {
                return Err(EngineError::InvalidPostingAccount {
                    role,
                    number: number.clone(),
                    expected,
                });
            }
        }
        Ok(())
    }

    /// Whether `number` fills any posting role.
    #[must_use]
    pub fn uses(&self, number: &AccountNumber) -> bool {
        self.roles().iter().any(|(_, n, _)| *n == number)
    }
}

/// Builds the conventional HOA chart of accounts.
///
/// The seeder and tests share this one well-formed chart; the numbers
/// match [`PostingAccounts::standard`].
pub fn standard_chart() -> Result<Chart, CoaError> {
    let mut chart = Chart::new();

    let n = AccountNumber::from;

    chart.add_section(n("1000"), "Assets", AccountType::Asset)?;
    chart.add_account(n("1100"), "Cash", AccountKind::Header, &n("1000"))?;
    chart.add_account(n("1110"), "Operating Cash", AccountKind::Detail, &n("1100"))?;
    chart.add_account(n("1120"), "Reserve Cash", AccountKind::Detail, &n("1100"))?;
    chart.add_account(
        n("1200"),
        "Assessments Receivable",
        AccountKind::Detail,
        &n("1000"),
    )?;

    chart.add_section(n("2000"), "Liabilities", AccountType::Liability)?;
    chart.add_account(n("2010"), "Accounts Payable", AccountKind::Detail, &n("2000"))?;
    chart.add_account(
        n("2020"),
        "Prepaid Assessments",
        AccountKind::Detail,
        &n("2000"),
    )?;

    chart.add_section(n("3000"), "Equity", AccountType::Equity)?;
    chart.add_account(n("3010"), "Retained Surplus", AccountKind::Detail, &n("3000"))?;
    chart.add_account(
        n("3020"),
        "Reserve Fund Balance",
        AccountKind::Detail,
        &n("3000"),
    )?;

    chart.add_section(n("4000"), "Income", AccountType::Income)?;
    chart.add_account(n("4010"), "Assessment Income", AccountKind::Detail, &n("4000"))?;
    chart.add_account(n("4020"), "Late Fee Income", AccountKind::Detail, &n("4000"))?;
    chart.add_account(
        n("4030"),
        "Special Assessment Income",
        AccountKind::Detail,
        &n("4000"),
    )?;
    chart.add_account(n("4040"), "Other Income", AccountKind::Detail, &n("4000"))?;

    chart.add_section(n("5000"), "Expenses", AccountType::Expense)?;
    chart.add_account(n("5010"), "Landscaping", AccountKind::Detail, &n("5000"))?;
    chart.add_account(n("5020"), "Utilities", AccountKind::Detail, &n("5000"))?;
    chart.add_account(n("5030"), "Insurance", AccountKind::Detail, &n("5000"))?;
    chart.add_account(
        n("5040"),
        "Repairs & Maintenance",
        AccountKind::Detail,
        &n("5000"),
    )?;
    chart.add_account(n("5050"), "Management Fees", AccountKind::Detail, &n("5000"))?;
    chart.add_account(
        n("5060"),
        "Legal & Professional",
        AccountKind::Detail,
        &n("5000"),
    )?;

    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_chart_satisfies_standard_accounts() {
        let chart = standard_chart().unwrap();
        PostingAccounts::standard().validate(&chart).unwrap();
    }

    #[test]
    fn test_validate_rejects_missing_account() {
        let chart = Chart::new();
        let err = PostingAccounts::standard().validate(&chart).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidPostingAccount {
                role: "operating_cash",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_type() {
        let chart = standard_chart().unwrap();
        let mut accounts = PostingAccounts::standard();
        // a liability where an income account belongs
        accounts.late_fee_income = AccountNumber::from("2010");
        let err = accounts.validate(&chart).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidPostingAccount {
                role: "late_fee_income",
                expected: AccountType::Income,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_header_account() {
        let chart = standard_chart().unwrap();
        let mut accounts = PostingAccounts::standard();
        accounts.operating_cash = AccountNumber::from("1100");
        assert!(accounts.validate(&chart).is_err());
    }

    #[test]
    fn test_uses_matches_roles_only() {
        let accounts = PostingAccounts::standard();
        assert!(accounts.uses(&AccountNumber::from("1110")));
        assert!(accounts.uses(&AccountNumber::from("4030")));
        assert!(!accounts.uses(&AccountNumber::from("5010")));
    }
}
