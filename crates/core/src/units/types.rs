//! Unit subledger data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strata_shared::{EntryId, UnitNumber};

use super::error::UnitError;

/// Occupancy status of a unit.
///
/// Delinquency is never stored; the aging report derives it from the
/// balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    /// Someone lives there; monthly assessments apply.
    Occupied,
    /// Empty; no assessment billing.
    Vacant,
}

/// How a payment arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Paper check.
    Check,
    /// Bank transfer.
    Ach,
    /// Credit or debit card.
    Card,
    /// Cash at the office.
    Cash,
    /// Anything else.
    Other,
}

impl PaymentMethod {
    /// Returns the method as a lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Ach => "ach",
            Self::Card => "card",
            Self::Cash => "cash",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment received from the owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Amount received.
    pub amount: Decimal,
    /// Date received.
    pub date: NaiveDate,
    /// How it arrived.
    pub method: PaymentMethod,
    /// Check number, transaction id, etc.
    pub reference: Option<String>,
    /// Journal entry the payment posted.
    pub entry: EntryId,
}

/// A late fee imposed on the unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LateFee {
    /// Fee amount.
    pub amount: Decimal,
    /// Date imposed.
    pub date: NaiveDate,
    /// Why the fee was imposed.
    pub reason: String,
    /// Waived fees stay on record but no longer count against the
    /// owner.
    pub waived: bool,
    /// Journal entry the fee posted when imposed.
    pub entry: EntryId,
}

/// A special assessment levied on the unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialAssessment {
    /// Assessment amount.
    pub amount: Decimal,
    /// Date levied.
    pub levied: NaiveDate,
    /// What the assessment funds.
    pub reason: String,
    /// Whether the owner has paid it.
    pub paid: bool,
    /// Date paid, once paid.
    pub paid_date: Option<NaiveDate>,
    /// Journal entry the levy posted.
    pub entry: EntryId,
}

/// One unit and its owner subledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Unit number, unique within the association.
    pub number: UnitNumber,
    /// Current owner of record.
    pub owner: String,
    /// Monthly assessment amount.
    pub monthly_fee: Decimal,
    /// Amount currently owed. Never negative: overpayments are
    /// forgiven by the floor, not carried as credit.
    pub balance: Decimal,
    /// Occupancy status.
    pub status: UnitStatus,
    /// Payment history, oldest first.
    pub payments: Vec<Payment>,
    /// Late fees imposed, oldest first.
    pub late_fees: Vec<LateFee>,
    /// Special assessments levied, oldest first.
    pub special_assessments: Vec<SpecialAssessment>,
}

impl Unit {
    /// Creates a unit with a zero balance and empty history.
    #[must_use]
    pub fn new(
        number: UnitNumber,
        owner: impl Into<String>,
        monthly_fee: Decimal,
        status: UnitStatus,
    ) -> Self {
        Self {
            number,
            owner: owner.into(),
            monthly_fee,
            balance: Decimal::ZERO,
            status,
            payments: Vec::new(),
            late_fees: Vec::new(),
            special_assessments: Vec::new(),
        }
    }

    /// Increases the balance by a charge (invoice, fee, assessment).
    pub fn charge(&mut self, amount: Decimal) {
        self.balance += amount;
    }

    /// Decreases the balance, flooring at zero.
    pub fn credit_floored(&mut self, amount: Decimal) {
        self.balance = (self.balance - amount).max(Decimal::ZERO);
    }

    /// Records a payment and credits the balance (floored at zero).
    pub fn apply_payment(&mut self, payment: Payment) {
        let amount = payment.amount;
        self.payments.push(payment);
        self.credit_floored(amount);
    }

    /// Records a late fee and charges the balance.
    pub fn impose_late_fee(&mut self, fee: LateFee) {
        let amount = fee.amount;
        self.late_fees.push(fee);
        self.charge(amount);
    }

    /// Waives a late fee: flips the flag and credits the balance.
    ///
    /// Deliberately posts nothing in the engine: the fee income stays
    /// on the books; only the owner's obligation is released. Returns
    /// the waived amount.
    pub fn waive_late_fee(&mut self, index: usize) -> Result<Decimal, UnitError> {
        let number = self.number.clone();
        let fee = self
            .late_fees
            .get_mut(index)
            .ok_or(UnitError::UnknownLateFee {
                unit: number.clone(),
                index,
            })?;
        if fee.waived {
            return Err(UnitError::AlreadyWaived {
                unit: number,
                index,
            });
        }
        fee.waived = true;
        let amount = fee.amount;
        self.credit_floored(amount);
        Ok(amount)
    }

    /// Records a special assessment and charges the balance.
    pub fn add_special_assessment(&mut self, assessment: SpecialAssessment) {
        let amount = assessment.amount;
        self.special_assessments.push(assessment);
        self.charge(amount);
    }

    /// Marks a special assessment paid and credits the balance.
    ///
    /// The assessment record itself is the receipt; no `Payment` is
    /// appended (that would double-count against the records). Returns
    /// the assessment amount.
    pub fn settle_special_assessment(
        &mut self,
        index: usize,
        paid_date: NaiveDate,
    ) -> Result<Decimal, UnitError> {
        let number = self.number.clone();
        let assessment = self.special_assessments.get_mut(index).ok_or(
            UnitError::UnknownSpecialAssessment {
                unit: number.clone(),
                index,
            },
        )?;
        if assessment.paid {
            return Err(UnitError::AlreadyPaid {
                unit: number,
                index,
            });
        }
        assessment.paid = true;
        assessment.paid_date = Some(paid_date);
        let amount = assessment.amount;
        self.credit_floored(amount);
        Ok(amount)
    }
}
