//! Double-entry journal and balance math.
//!
//! This module implements the core ledger functionality:
//! - Journal entries (one debit leg, one credit leg, equal amount)
//! - Posting validation against the chart of accounts
//! - Reversing entries (corrections are new entries, never edits)
//! - The debit-normal / credit-normal convention, in exactly one place
//! - Account balances and hierarchy roll-ups

pub mod balance;
pub mod error;
pub mod journal;
pub mod types;

#[cfg(test)]
mod journal_props;

pub use balance::{Balances, NormalBalance};
pub use error::PostingError;
pub use journal::Journal;
pub use types::{Entry, EntrySource, Posting, SourceRef};
