//! Posting error types.
//!
//! This module defines all errors that can occur while posting to the
//! journal. There is deliberately no "unbalanced" variant: an entry is
//! one amount on two legs, so imbalance is unrepresentable.

use rust_decimal::Decimal;
use strata_shared::{AccountNumber, EntryId};
use thiserror::Error;

/// Errors that can occur during posting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostingError {
    // ========== Validation Errors ==========
    /// Entry amount must be strictly positive.
    #[error("Entry amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Debit and credit legs must name different accounts.
    #[error("Debit and credit cannot both be account {0}")]
    SameAccount(AccountNumber),

    // ========== Account Errors ==========
    /// Account not found in the chart.
    #[error("Account not found: {0}")]
    UnknownAccount(AccountNumber),

    /// Header accounts organize; they never take postings.
    #[error("Account {0} is a header and cannot take postings")]
    PostingToHeader(AccountNumber),

    /// Account is inactive and cannot be used.
    #[error("Account {0} is inactive")]
    InactiveAccount(AccountNumber),

    // ========== Reversal Errors ==========
    /// Entry to reverse was not found.
    #[error("Journal entry {0} not found")]
    UnknownEntry(EntryId),
}
