//! Vendor work orders.
//!
//! Work orders walk a strict lifecycle: `Draft -> Approved -> Invoiced
//! -> Paid`. Skipping a step is an error, and only the final payment
//! step touches the ledger.

pub mod error;
pub mod types;

pub use error::WorkOrderError;
pub use types::{WorkOrder, WorkOrderStatus};
