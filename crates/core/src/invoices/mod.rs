//! Unit invoices and their lifecycle.
//!
//! An invoice is issued (`Sent`) and later paid (`Paid`); there is no
//! other path. Issuing charges the unit and posts receivable against
//! income; paying credits the unit and posts cash against receivable.

pub mod error;
pub mod types;

pub use error::InvoiceError;
pub use types::{InvoiceKind, InvoiceStatus, UnitInvoice};
