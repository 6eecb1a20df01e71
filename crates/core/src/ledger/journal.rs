//! The append-only journal.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strata_shared::{AccountNumber, EntryId};

use crate::coa::{Account, Chart};

use super::error::PostingError;
use super::types::{Entry, EntrySource, Posting, SourceRef};

/// One association's journal.
///
/// Entries are append-only and carry dense, strictly increasing ids
/// starting at 1. Nothing here mutates or removes a posted entry;
/// corrections go through [`Journal::reverse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Journal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Validates and appends an entry.
    ///
    /// Validation order: positive amount, distinct legs, then each leg
    /// must exist in the chart, be a detail account, and be active.
    pub fn post(&mut self, chart: &Chart, posting: Posting) -> Result<EntryId, PostingError> {
        if posting.amount <= rust_decimal::Decimal::ZERO {
            return Err(PostingError::NonPositiveAmount(posting.amount));
        }
        if posting.debit_account == posting.credit_account {
            return Err(PostingError::SameAccount(posting.debit_account));
        }
        postable(chart, &posting.debit_account)?;
        postable(chart, &posting.credit_account)?;

        let id = EntryId::from_raw(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            date: posting.date,
            memo: posting.memo,
            debit_account: posting.debit_account,
            credit_account: posting.credit_account,
            amount: posting.amount,
            source: posting.source,
            source_ref: posting.source_ref,
            posted_at: Utc::now(),
        });
        Ok(id)
    }

    /// Posts a reversing entry for an earlier one.
    ///
    /// The reversal swaps the debit and credit legs at the original
    /// amount and links back to the original through its source ref.
    /// The original entry is untouched; both remain in the journal.
    pub fn reverse(
        &mut self,
        chart: &Chart,
        entry_id: EntryId,
        date: NaiveDate,
        reason: &str,
    ) -> Result<EntryId, PostingError> {
        let original = self
            .entry(entry_id)
            .ok_or(PostingError::UnknownEntry(entry_id))?;
        let posting = Posting {
            date,
            memo: format!("Reversal of {entry_id}: {reason}"),
            debit_account: original.credit_account.clone(),
            credit_account: original.debit_account.clone(),
            amount: original.amount,
            source: EntrySource::Reversal,
            source_ref: Some(SourceRef::Entry(entry_id)),
        };
        self.post(chart, posting)
    }

    /// All entries in posting order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        // ids are dense from 1, so the entry for id n sits at index n-1
        let index = usize::try_from(id.into_inner()).ok()?.checked_sub(1)?;
        self.entries.get(index)
    }

    /// Entries touching an account, in posting order.
    pub fn entries_touching<'a>(
        &'a self,
        account: &'a AccountNumber,
    ) -> impl Iterator<Item = &'a Entry> {
        self.entries.iter().filter(move |e| e.involves(account))
    }

    /// Entries produced by a given subsidiary record.
    pub fn entries_for_source_ref<'a>(
        &'a self,
        source_ref: &'a SourceRef,
    ) -> impl Iterator<Item = &'a Entry> {
        self.entries
            .iter()
            .filter(move |e| e.source_ref.as_ref() == Some(source_ref))
    }

    /// Returns `true` if any entry touches the account.
    #[must_use]
    pub fn references_account(&self, account: &AccountNumber) -> bool {
        self.entries.iter().any(|e| e.involves(account))
    }

    /// How many entries touch the account.
    #[must_use]
    pub fn reference_count(&self, account: &AccountNumber) -> usize {
        self.entries_touching(account).count()
    }

    /// Number of posted entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been posted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves an account for posting: it must exist, be a detail account,
/// and be active.
fn postable<'c>(chart: &'c Chart, number: &AccountNumber) -> Result<&'c Account, PostingError> {
    let account = chart
        .get(number)
        .ok_or_else(|| PostingError::UnknownAccount(number.clone()))?;
    if account.is_header() {
        return Err(PostingError::PostingToHeader(number.clone()));
    }
    if !account.active {
        return Err(PostingError::InactiveAccount(number.clone()));
    }
    Ok(account)
}
