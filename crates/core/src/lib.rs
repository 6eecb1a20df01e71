//! Core accounting engine for Strata.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `coa` - Chart of accounts hierarchy
//! - `ledger` - Double-entry journal, posting, and balance math
//! - `reports` - Balance sheet, income statement, and operational reports
//! - `budget` - Operating budget categories and variance math
//! - `reserve` - Reserve study items and funding math
//! - `units` - Unit (owner) subledger: payments, late fees, assessments
//! - `invoices` - Unit invoices and their lifecycle
//! - `workorders` - Vendor work orders and their payment lifecycle
//! - `engine` - The owned per-association aggregate tying it all together

pub mod budget;
pub mod coa;
pub mod engine;
pub mod invoices;
pub mod ledger;
pub mod reports;
pub mod reserve;
pub mod units;
pub mod workorders;
