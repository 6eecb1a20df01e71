//! Chart of accounts errors.

use strata_shared::AccountNumber;
use thiserror::Error;

/// Errors from chart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoaError {
    /// An account with this number already exists.
    #[error("Account number {0} already exists")]
    DuplicateNumber(AccountNumber),

    /// The referenced account does not exist.
    #[error("Account not found: {0}")]
    UnknownAccount(AccountNumber),

    /// The requested parent does not exist.
    #[error("Parent account not found: {0}")]
    UnknownParent(AccountNumber),

    /// The requested parent is a detail account; only headers may have
    /// children.
    #[error("Parent account {0} is not a header account")]
    ParentNotHeader(AccountNumber),

    /// The account still has child accounts and cannot be removed.
    #[error("Account {0} has child accounts")]
    HasChildren(AccountNumber),

    /// The account is referenced by journal entries and cannot be
    /// removed.
    #[error("Account {number} is referenced by {entries} journal entries")]
    AccountInUse {
        /// The account that was targeted for removal.
        number: AccountNumber,
        /// How many journal entries reference it.
        entries: usize,
    },
}
