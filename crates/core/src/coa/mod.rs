//! Chart of accounts.
//!
//! Accounts form a tree: header accounts organize, detail accounts take
//! postings. Detail accounts inherit their type from the header they are
//! created under, so the five classification roots (assets, liabilities,
//! equity, income, expenses) propagate to every leaf.

pub mod chart;
pub mod error;
pub mod types;

#[cfg(test)]
mod chart_props;

pub use chart::Chart;
pub use error::CoaError;
pub use types::{Account, AccountKind, AccountType};
