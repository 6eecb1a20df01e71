//! Journal domain types.
//!
//! This module defines the entry record itself plus the input type used
//! to create one. Entries are simple: exactly one debit account, one
//! credit account, one positive amount. That makes every entry balanced
//! by construction.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strata_shared::{AccountNumber, EntryId, InvoiceId, UnitNumber, WorkOrderId};

/// The business event that produced an entry.
///
/// Replaces a free-form source string: subsidiary operations stamp the
/// matching variant, manual journal work uses [`EntrySource::Manual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    /// Periodic owner assessment billed to a unit.
    Assessment,
    /// Special assessment levied on a unit.
    SpecialAssessment,
    /// Late fee imposed on a unit.
    LateFee,
    /// Cash received from an owner.
    Payment,
    /// Vendor work order payment.
    WorkOrder,
    /// Operating expense posted directly.
    Expense,
    /// Movement between the association's own accounts.
    Transfer,
    /// Reversing entry correcting an earlier one.
    Reversal,
    /// Hand-entered journal entry.
    Manual,
}

impl EntrySource {
    /// Returns the source as a lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assessment => "assessment",
            Self::SpecialAssessment => "special_assessment",
            Self::LateFee => "late_fee",
            Self::Payment => "payment",
            Self::WorkOrder => "work_order",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
            Self::Reversal => "reversal",
            Self::Manual => "manual",
        }
    }
}

impl std::fmt::Display for EntrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Link from an entry back to the subsidiary record that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRef {
    /// A unit in the owner subledger.
    Unit(UnitNumber),
    /// A unit invoice.
    Invoice(InvoiceId),
    /// A vendor work order.
    WorkOrder(WorkOrderId),
    /// Another journal entry (used by reversals).
    Entry(EntryId),
}

/// Input for creating a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// Business date of the event.
    pub date: NaiveDate,
    /// Human-readable description.
    pub memo: String,
    /// Account receiving the debit leg.
    pub debit_account: AccountNumber,
    /// Account receiving the credit leg.
    pub credit_account: AccountNumber,
    /// Amount moved; must be positive.
    pub amount: Decimal,
    /// Business event classification.
    pub source: EntrySource,
    /// Optional link to the record behind the event.
    pub source_ref: Option<SourceRef>,
}

/// A posted, immutable journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Sequential id assigned at posting time.
    pub id: EntryId,
    /// Business date of the event.
    pub date: NaiveDate,
    /// Human-readable description.
    pub memo: String,
    /// Account debited.
    pub debit_account: AccountNumber,
    /// Account credited.
    pub credit_account: AccountNumber,
    /// Amount moved; always positive.
    pub amount: Decimal,
    /// Business event classification.
    pub source: EntrySource,
    /// Optional link to the record behind the event.
    pub source_ref: Option<SourceRef>,
    /// Wall-clock timestamp of the posting.
    pub posted_at: DateTime<Utc>,
}

impl Entry {
    /// Returns `true` if either leg touches the account.
    #[must_use]
    pub fn involves(&self, account: &AccountNumber) -> bool {
        &self.debit_account == account || &self.credit_account == account
    }

    /// Amount debited to the account by this entry (zero when the
    /// account is not the debit leg).
    #[must_use]
    pub fn debit_to(&self, account: &AccountNumber) -> Decimal {
        if &self.debit_account == account {
            self.amount
        } else {
            Decimal::ZERO
        }
    }

    /// Amount credited to the account by this entry (zero when the
    /// account is not the credit leg).
    #[must_use]
    pub fn credit_to(&self, account: &AccountNumber) -> Decimal {
        if &self.credit_account == account {
            self.amount
        } else {
            Decimal::ZERO
        }
    }
}
