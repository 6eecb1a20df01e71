//! Common key types used across the application.

pub mod id;
pub mod number;

pub use id::*;
pub use number::{AccountNumber, UnitNumber};
