//! Account data types.

use serde::{Deserialize, Serialize};
use strata_shared::AccountNumber;

/// The five account classifications.
///
/// The classification determines which side of an entry increases the
/// account (see [`crate::ledger::NormalBalance`]) and which report
/// section the account lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Resources the association owns (cash, receivables).
    Asset,
    /// Amounts the association owes.
    Liability,
    /// Owners' residual interest, including retained surplus.
    Equity,
    /// Revenue: assessments, fees, interest.
    Income,
    /// Operating costs.
    Expense,
}

impl AccountType {
    /// Returns the type as a lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an account organizes or takes postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// Structural account. Groups children; never posted to directly.
    Header,
    /// Leaf account. The only kind journal entries may reference.
    Detail,
}

impl AccountKind {
    /// Returns `true` for header accounts.
    #[must_use]
    pub const fn is_header(self) -> bool {
        matches!(self, Self::Header)
    }
}

/// A single account in the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account number, unique within the chart.
    pub number: AccountNumber,
    /// Display name.
    pub name: String,
    /// Classification, inherited from the parent header at creation.
    pub account_type: AccountType,
    /// Header or detail.
    pub kind: AccountKind,
    /// Parent header, `None` for root sections.
    pub parent: Option<AccountNumber>,
    /// Inactive accounts refuse new postings but keep their history.
    pub active: bool,
}

impl Account {
    /// Returns `true` if this is a header account.
    #[must_use]
    pub const fn is_header(&self) -> bool {
        self.kind.is_header()
    }

    /// Returns `true` if the account can accept new postings.
    #[must_use]
    pub const fn is_postable(&self) -> bool {
        matches!(self.kind, AccountKind::Detail) && self.active
    }
}
