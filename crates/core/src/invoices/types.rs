//! Invoice data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strata_shared::{EntryId, InvoiceId, UnitNumber};

use crate::units::PaymentMethod;

use super::error::InvoiceError;

/// What the invoice bills for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceKind {
    /// Regular monthly assessment.
    MonthlyFee,
    /// One-off special assessment.
    SpecialAssessment,
}

impl InvoiceKind {
    /// Returns the kind as a lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MonthlyFee => "monthly_fee",
            Self::SpecialAssessment => "special_assessment",
        }
    }
}

impl std::fmt::Display for InvoiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Issued to the owner, awaiting payment.
    Sent,
    /// Paid in full.
    Paid,
}

impl InvoiceStatus {
    /// Returns the status as a lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An invoice billed to a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitInvoice {
    /// Invoice id.
    pub id: InvoiceId,
    /// Unit billed.
    pub unit: UnitNumber,
    /// What is billed.
    pub kind: InvoiceKind,
    /// Amount billed.
    pub amount: Decimal,
    /// Issue date.
    pub issued: NaiveDate,
    /// Due date.
    pub due: NaiveDate,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// Date paid, once paid.
    pub paid_date: Option<NaiveDate>,
    /// How it was paid, once paid.
    pub method: Option<PaymentMethod>,
    /// Journal entry posted at issuance.
    pub issue_entry: EntryId,
    /// Journal entry posted at payment, once paid.
    pub payment_entry: Option<EntryId>,
}

impl UnitInvoice {
    /// Transitions `Sent -> Paid`, recording when, how, and which
    /// journal entry settled it.
    pub fn mark_paid(
        &mut self,
        paid_date: NaiveDate,
        method: PaymentMethod,
        payment_entry: EntryId,
    ) -> Result<(), InvoiceError> {
        match self.status {
            InvoiceStatus::Sent => {
                self.status = InvoiceStatus::Paid;
                self.paid_date = Some(paid_date);
                self.method = Some(method);
                self.payment_entry = Some(payment_entry);
                Ok(())
            }
            _ => Err(InvoiceError::InvalidTransition {
                from: self.status,
                to: InvoiceStatus::Paid,
            }),
        }
    }

    /// Returns `true` while the invoice awaits payment.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.status, InvoiceStatus::Sent)
    }
}
