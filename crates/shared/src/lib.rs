//! Shared identifier types for the Strata workspace.
//!
//! This crate provides the strongly-typed keys used across all other
//! crates:
//! - UUID-backed typed IDs for records the engine creates
//! - String newtypes for externally-assigned keys (account numbers,
//!   unit numbers)
//! - The sequential journal entry id

pub mod types;

pub use types::id::{BudgetCategoryId, EntryId, InvoiceId, ReserveItemId, WorkOrderId};
pub use types::number::{AccountNumber, UnitNumber};
