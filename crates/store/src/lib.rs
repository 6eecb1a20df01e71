//! Snapshot persistence for Strata.
//!
//! The ledger engine lives in memory and is authoritative; this crate
//! only writes [`AssociationSnapshot`]s to disk and reads them back.
//! Storage is deliberately simple: one whole-snapshot JSON file per
//! association, replaced atomically on every save.

pub mod error;
pub mod json;

use strata_core::engine::AssociationSnapshot;

pub use error::StoreError;
pub use json::JsonSnapshotStore;

/// Abstraction over snapshot persistence backends.
pub trait SnapshotStore: Send + Sync {
    /// Persists a snapshot under its association's name, replacing any
    /// previously saved state.
    fn save(&self, snapshot: &AssociationSnapshot) -> Result<(), StoreError>;

    /// Loads the snapshot for an association.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet; errors are
    /// reserved for real failures (unreadable file, corrupt JSON).
    fn load(&self, association: &str) -> Result<Option<AssociationSnapshot>, StoreError>;
}
