//! Unit subledger error types.

use strata_shared::UnitNumber;
use thiserror::Error;

/// Errors from unit subledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// A unit with this number already exists.
    #[error("Unit {0} already exists")]
    DuplicateUnit(UnitNumber),

    /// The referenced unit does not exist.
    #[error("Unit {0} not found")]
    UnknownUnit(UnitNumber),

    /// The referenced late fee does not exist on the unit.
    #[error("Unit {unit} has no late fee at index {index}")]
    UnknownLateFee {
        /// Unit holding the fees.
        unit: UnitNumber,
        /// Requested index into the fee list.
        index: usize,
    },

    /// The late fee was already waived.
    #[error("Late fee {index} on unit {unit} is already waived")]
    AlreadyWaived {
        /// Unit holding the fee.
        unit: UnitNumber,
        /// Index of the fee.
        index: usize,
    },

    /// The referenced special assessment does not exist on the unit.
    #[error("Unit {unit} has no special assessment at index {index}")]
    UnknownSpecialAssessment {
        /// Unit holding the assessments.
        unit: UnitNumber,
        /// Requested index into the assessment list.
        index: usize,
    },

    /// The special assessment was already marked paid.
    #[error("Special assessment {index} on unit {unit} is already paid")]
    AlreadyPaid {
        /// Unit holding the assessment.
        unit: UnitNumber,
        /// Index of the assessment.
        index: usize,
    },
}
