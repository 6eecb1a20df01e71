//! Units and the owner subledger.
//!
//! Each unit carries its own payment, late fee, and special assessment
//! records plus a denormalized `balance` of what the owner currently
//! owes. Mutations here maintain the unit record only; the engine pairs
//! every money-moving mutation with a journal posting.

pub mod error;
pub mod types;

pub use error::UnitError;
pub use types::{LateFee, Payment, PaymentMethod, SpecialAssessment, Unit, UnitStatus};
