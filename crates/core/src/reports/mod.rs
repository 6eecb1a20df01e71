//! Financial report generation.
//!
//! This module provides pure report logic over the engine's state:
//! - Trial Balance
//! - Balance Sheet (with the accounting identity checked)
//! - Income Statement
//! - Budget Variance
//! - Delinquency Aging
//! - Reserve Funding Status
//!
//! Reports never mutate anything and never fail: empty state produces
//! zeroed reports.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::*;
