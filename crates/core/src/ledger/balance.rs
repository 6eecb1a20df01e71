//! Account balance calculations.
//!
//! The debit-normal / credit-normal convention is implemented here and
//! nowhere else: every balance, roll-up, and report figure in the crate
//! goes through [`NormalBalance::signed`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strata_shared::AccountNumber;

use crate::coa::{Account, AccountType, Chart, CoaError};

use super::journal::Journal;

/// Which side of an entry increases an account.
///
/// - Asset/Expense: balance = debits - credits (debit-normal)
/// - Liability/Equity/Income: balance = credits - debits (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalBalance {
    /// Debit-normal accounts (Asset, Expense).
    DebitNormal,
    /// Credit-normal accounts (Liability, Equity, Income).
    CreditNormal,
}

impl From<AccountType> for NormalBalance {
    fn from(account_type: AccountType) -> Self {
        match account_type {
            AccountType::Asset | AccountType::Expense => Self::DebitNormal,
            AccountType::Liability | AccountType::Equity | AccountType::Income => {
                Self::CreditNormal
            }
        }
    }
}

impl NormalBalance {
    /// Applies the sign convention to raw leg totals.
    #[must_use]
    pub fn signed(self, debits: Decimal, credits: Decimal) -> Decimal {
        match self {
            Self::DebitNormal => debits - credits,
            Self::CreditNormal => credits - debits,
        }
    }
}

/// Raw leg totals for one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegTotals {
    /// Sum of debit legs touching the account.
    pub debits: Decimal,
    /// Sum of credit legs touching the account.
    pub credits: Decimal,
}

/// Read-only balance view over a chart and journal.
///
/// Cheap to construct; borrow it where balances are needed rather than
/// threading raw sums around.
#[derive(Debug, Clone, Copy)]
pub struct Balances<'a> {
    chart: &'a Chart,
    journal: &'a Journal,
}

impl<'a> Balances<'a> {
    /// Creates a view over the given chart and journal.
    #[must_use]
    pub fn new(chart: &'a Chart, journal: &'a Journal) -> Self {
        Self { chart, journal }
    }

    /// Raw debit and credit totals for an account, optionally cut off
    /// at a date (inclusive).
    #[must_use]
    pub fn leg_totals(&self, number: &AccountNumber, through: Option<NaiveDate>) -> LegTotals {
        let mut debits = Decimal::ZERO;
        let mut credits = Decimal::ZERO;
        for entry in self.journal.entries() {
            if through.is_some_and(|cutoff| entry.date > cutoff) {
                continue;
            }
            debits += entry.debit_to(number);
            credits += entry.credit_to(number);
        }
        LegTotals { debits, credits }
    }

    /// Signed balance of a single account over the whole journal.
    ///
    /// An account with no postings balances to zero. Unknown accounts
    /// are an error, not zero.
    pub fn of(&self, number: &AccountNumber) -> Result<Decimal, CoaError> {
        let account = self.chart.require(number)?;
        Ok(self.of_account(account, None))
    }

    /// Signed balance including only entries dated on or before `as_of`.
    pub fn of_through(&self, number: &AccountNumber, as_of: NaiveDate) -> Result<Decimal, CoaError> {
        let account = self.chart.require(number)?;
        Ok(self.of_account(account, Some(as_of)))
    }

    /// Hierarchy roll-up.
    ///
    /// For an account with children, the sum of its children's
    /// roll-ups; for a leaf, its own balance. Headers cannot take
    /// postings, so a header's roll-up is exactly its subtree total.
    pub fn group_of(&self, number: &AccountNumber) -> Result<Decimal, CoaError> {
        let account = self.chart.require(number)?;
        let mut children = self.chart.children_of(number).peekable();
        if children.peek().is_none() {
            return Ok(self.of_account(account, None));
        }
        let mut total = Decimal::ZERO;
        let child_numbers: Vec<AccountNumber> =
            children.map(|child| child.number.clone()).collect();
        for child in child_numbers {
            total += self.group_of(&child)?;
        }
        Ok(total)
    }

    /// Signed balance of an already-resolved account, optionally cut
    /// off at a date. Used by reports iterating the chart directly.
    #[must_use]
    pub fn of_account(&self, account: &Account, through: Option<NaiveDate>) -> Decimal {
        let totals = self.leg_totals(&account.number, through);
        NormalBalance::from(account.account_type).signed(totals.debits, totals.credits)
    }

    /// Signed balance of an account over a date window (inclusive on
    /// both ends).
    #[must_use]
    pub fn of_account_between(
        &self,
        account: &Account,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Decimal {
        let mut debits = Decimal::ZERO;
        let mut credits = Decimal::ZERO;
        for entry in self.journal.entries() {
            if entry.date < start || entry.date > end {
                continue;
            }
            debits += entry.debit_to(&account.number);
            credits += entry.credit_to(&account.number);
        }
        NormalBalance::from(account.account_type).signed(debits, credits)
    }

    /// Signed balance of an account over one calendar year.
    #[must_use]
    pub fn of_account_in_year(&self, account: &Account, year: i32) -> Decimal {
        use chrono::Datelike;
        let mut debits = Decimal::ZERO;
        let mut credits = Decimal::ZERO;
        for entry in self.journal.entries() {
            if entry.date.year() != year {
                continue;
            }
            debits += entry.debit_to(&account.number);
            credits += entry.credit_to(&account.number);
        }
        NormalBalance::from(account.account_type).signed(debits, credits)
    }
}
