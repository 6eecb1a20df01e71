//! The per-association engine.
//!
//! [`LedgerEngine`] is the aggregate the rest of the workspace talks
//! to: it owns the chart, journal, and subsidiary records for one
//! association and keeps them consistent. Subsidiary mutations that
//! move money always post a journal entry; validation happens before
//! any posting, so a failed operation never leaves a stray entry.

pub mod error;
pub mod service;
pub mod settings;
pub mod snapshot;

#[cfg(test)]
mod service_props;

pub use error::EngineError;
pub use service::LedgerEngine;
pub use settings::{standard_chart, PostingAccounts, Settings};
pub use snapshot::AssociationSnapshot;
