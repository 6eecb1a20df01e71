//! Work order data types and lifecycle transitions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strata_shared::{AccountNumber, EntryId, WorkOrderId};

use super::error::WorkOrderError;

/// Work order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkOrderStatus {
    /// Estimate entered, awaiting board approval.
    Draft,
    /// Approved; vendor may proceed.
    Approved,
    /// Vendor invoice received; amount finalized.
    Invoiced,
    /// Invoice paid; expense posted.
    Paid,
}

impl WorkOrderStatus {
    /// Returns the status as a lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
            Self::Invoiced => "invoiced",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vendor work order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Work order id.
    pub id: WorkOrderId,
    /// What the work is.
    pub title: String,
    /// Who does it.
    pub vendor: String,
    /// Estimated amount until invoiced, then the invoiced amount.
    pub amount: Decimal,
    /// Expense account the eventual payment posts to.
    pub expense_account: AccountNumber,
    /// Lifecycle status.
    pub status: WorkOrderStatus,
    /// Date the order was opened.
    pub opened: NaiveDate,
    /// Date the vendor invoice arrived, once invoiced.
    pub invoice_received: Option<NaiveDate>,
    /// Date paid, once paid.
    pub paid_date: Option<NaiveDate>,
    /// Journal entry posted at payment, once paid.
    pub payment_entry: Option<EntryId>,
}

impl WorkOrder {
    /// Creates a draft work order.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        vendor: impl Into<String>,
        amount: Decimal,
        expense_account: AccountNumber,
        opened: NaiveDate,
    ) -> Self {
        Self {
            id: WorkOrderId::new(),
            title: title.into(),
            vendor: vendor.into(),
            amount,
            expense_account,
            status: WorkOrderStatus::Draft,
            opened,
            invoice_received: None,
            paid_date: None,
            payment_entry: None,
        }
    }

    /// Transitions `Draft -> Approved`.
    pub fn approve(&mut self) -> Result<(), WorkOrderError> {
        match self.status {
            WorkOrderStatus::Draft => {
                self.status = WorkOrderStatus::Approved;
                Ok(())
            }
            _ => Err(WorkOrderError::InvalidTransition {
                from: self.status,
                to: WorkOrderStatus::Approved,
            }),
        }
    }

    /// Transitions `Approved -> Invoiced`.
    ///
    /// The vendor's invoice may revise the estimated amount; the
    /// revision must be positive.
    pub fn receive_invoice(
        &mut self,
        date: NaiveDate,
        revised_amount: Option<Decimal>,
    ) -> Result<(), WorkOrderError> {
        match self.status {
            WorkOrderStatus::Approved => {
                if let Some(amount) = revised_amount {
                    if amount <= Decimal::ZERO {
                        return Err(WorkOrderError::InvalidAmount(amount));
                    }
                    self.amount = amount;
                }
                self.status = WorkOrderStatus::Invoiced;
                self.invoice_received = Some(date);
                Ok(())
            }
            _ => Err(WorkOrderError::InvalidTransition {
                from: self.status,
                to: WorkOrderStatus::Invoiced,
            }),
        }
    }

    /// Transitions `Invoiced -> Paid`, recording the settling entry.
    ///
    /// This is the only transition that corresponds to a posting; the
    /// engine performs the posting and passes the entry id in.
    pub fn mark_paid(&mut self, date: NaiveDate, entry: EntryId) -> Result<(), WorkOrderError> {
        match self.status {
            WorkOrderStatus::Invoiced => {
                self.status = WorkOrderStatus::Paid;
                self.paid_date = Some(date);
                self.payment_entry = Some(entry);
                Ok(())
            }
            _ => Err(WorkOrderError::InvalidTransition {
                from: self.status,
                to: WorkOrderStatus::Paid,
            }),
        }
    }
}
