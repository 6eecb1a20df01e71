//! The association aggregate.
//!
//! [`LedgerEngine`] owns one association's chart, journal, and
//! subsidiary records, and is the only place subsidiary mutations and
//! journal postings are paired. Every operation that moves money posts
//! a balanced entry; every operation that cannot complete leaves the
//! engine untouched.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use strata_shared::{
    AccountNumber, BudgetCategoryId, EntryId, InvoiceId, ReserveItemId, UnitNumber, WorkOrderId,
};
use tracing::{debug, info};

use crate::budget::{BudgetCategory, BudgetError, ExpenseRecord};
use crate::coa::{Account, AccountKind, AccountType, Chart, CoaError};
use crate::invoices::{InvoiceError, InvoiceKind, InvoiceStatus, UnitInvoice};
use crate::ledger::{Balances, Entry, EntrySource, Journal, Posting, SourceRef};
use crate::reports::{
    BalanceSheetReport, BudgetVarianceReport, DelinquencyReport, IncomeStatementReport,
    ReportService, ReserveReport, TrialBalanceReport,
};
use crate::reserve::{ReserveError, ReserveItem};
use crate::units::{LateFee, Payment, PaymentMethod, SpecialAssessment, Unit, UnitError, UnitStatus};
use crate::workorders::{WorkOrder, WorkOrderError, WorkOrderStatus};

use super::error::EngineError;
use super::settings::Settings;
use super::snapshot::AssociationSnapshot;

/// One association's complete accounting state.
///
/// No globals and no ambient context: everything the association owns
/// lives behind this struct, and all access goes through its methods.
/// Mutations take `&mut self` and return `Result<_, EngineError>`;
/// reports and queries take `&self` and never fail on empty state.
#[derive(Debug, Clone)]
pub struct LedgerEngine {
    chart: Chart,
    journal: Journal,
    units: BTreeMap<UnitNumber, Unit>,
    invoices: Vec<UnitInvoice>,
    work_orders: Vec<WorkOrder>,
    budget: Vec<BudgetCategory>,
    reserve: Vec<ReserveItem>,
    settings: Settings,
    revision: u64,
}

impl LedgerEngine {
    /// Opens an empty association over a chart.
    ///
    /// # Errors
    ///
    /// Returns an error when the due day is outside 1 through 28 or
    /// any settings posting account is missing from the chart, not a
    /// detail account, inactive, or of the wrong type.
    pub fn new(settings: Settings, chart: Chart) -> Result<Self, EngineError> {
        Self::validate_settings(&settings, &chart)?;
        info!(
            association = %settings.name,
            accounts = chart.len(),
            "Association opened"
        );
        Ok(Self {
            chart,
            journal: Journal::new(),
            units: BTreeMap::new(),
            invoices: Vec::new(),
            work_orders: Vec::new(),
            budget: Vec::new(),
            reserve: Vec::new(),
            settings,
            revision: 0,
        })
    }

    /// Rebuilds an engine from a snapshot, re-validating the settings
    /// against the snapshot's chart.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LedgerEngine::new`].
    pub fn restore(snapshot: AssociationSnapshot) -> Result<Self, EngineError> {
        Self::validate_settings(&snapshot.settings, &snapshot.chart)?;
        info!(
            association = %snapshot.settings.name,
            revision = snapshot.revision,
            entries = snapshot.journal.len(),
            "Association restored"
        );
        Ok(Self {
            chart: snapshot.chart,
            journal: snapshot.journal,
            units: snapshot.units,
            invoices: snapshot.invoices,
            work_orders: snapshot.work_orders,
            budget: snapshot.budget,
            reserve: snapshot.reserve,
            settings: snapshot.settings,
            revision: snapshot.revision,
        })
    }

    /// Captures the full association state for persistence.
    #[must_use]
    pub fn snapshot(&self) -> AssociationSnapshot {
        AssociationSnapshot {
            settings: self.settings.clone(),
            chart: self.chart.clone(),
            journal: self.journal.clone(),
            units: self.units.clone(),
            invoices: self.invoices.clone(),
            work_orders: self.work_orders.clone(),
            budget: self.budget.clone(),
            reserve: self.reserve.clone(),
            revision: self.revision,
        }
    }

    fn validate_settings(settings: &Settings, chart: &Chart) -> Result<(), EngineError> {
        if !(1..=28).contains(&settings.due_day) {
            return Err(EngineError::InvalidDueDay(settings.due_day));
        }
        settings.accounts.validate(chart)
    }

    /// Association settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The chart of accounts.
    #[must_use]
    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    /// The journal.
    #[must_use]
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Counter incremented by every successful mutation; lets a
    /// persistence layer detect dirty state.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    // ==========================================================================
    // Chart of accounts
    // ==========================================================================

    /// Adds a root header section with an explicit type.
    ///
    /// # Errors
    ///
    /// Returns an error when the number is already taken.
    pub fn add_section(
        &mut self,
        number: AccountNumber,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Result<(), EngineError> {
        self.chart.add_section(number.clone(), name, account_type)?;
        self.bump();
        debug!(account = %number, "Section added");
        Ok(())
    }

    /// Adds an account under an existing header; the account inherits
    /// the parent's type.
    ///
    /// # Errors
    ///
    /// Returns an error when the number is taken, the parent is
    /// unknown, or the parent is not a header.
    pub fn add_account(
        &mut self,
        number: AccountNumber,
        name: impl Into<String>,
        kind: AccountKind,
        parent: &AccountNumber,
    ) -> Result<(), EngineError> {
        self.chart.add_account(number.clone(), name, kind, parent)?;
        self.bump();
        debug!(account = %number, parent = %parent, "Account added");
        Ok(())
    }

    /// Renames an account.
    ///
    /// # Errors
    ///
    /// Returns an error when the account is unknown.
    pub fn rename_account(
        &mut self,
        number: &AccountNumber,
        name: impl Into<String>,
    ) -> Result<(), EngineError> {
        self.chart.rename(number, name)?;
        self.bump();
        debug!(account = %number, "Account renamed");
        Ok(())
    }

    /// Activates or deactivates an account. Inactive detail accounts
    /// refuse new postings; history is unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error when the account is unknown.
    pub fn set_account_active(
        &mut self,
        number: &AccountNumber,
        active: bool,
    ) -> Result<(), EngineError> {
        self.chart.set_active(number, active)?;
        self.bump();
        info!(account = %number, active, "Account active flag changed");
        Ok(())
    }

    /// Removes an account.
    ///
    /// # Errors
    ///
    /// Returns an error when the account is unknown, still has
    /// children, is referenced by any journal entry, or fills one of
    /// the settings posting roles.
    pub fn remove_account(&mut self, number: &AccountNumber) -> Result<Account, EngineError> {
        if self.settings.accounts.uses(number) {
            return Err(EngineError::ProtectedAccount(number.clone()));
        }
        let entries = self.journal.reference_count(number);
        if entries > 0 {
            return Err(CoaError::AccountInUse {
                number: number.clone(),
                entries,
            }
            .into());
        }
        let account = self.chart.remove(number)?;
        self.bump();
        info!(account = %number, "Account removed");
        Ok(account)
    }

    /// Looks up an account.
    #[must_use]
    pub fn account(&self, number: &AccountNumber) -> Option<&Account> {
        self.chart.get(number)
    }

    // ==========================================================================
    // Journal
    // ==========================================================================

    /// Posts a balanced entry. The sole money movement primitive;
    /// every subsidiary operation below funnels through it.
    ///
    /// # Errors
    ///
    /// Returns an error when the amount is not positive, the legs name
    /// the same account, or either account is unknown, a header, or
    /// inactive.
    pub fn post(&mut self, posting: Posting) -> Result<EntryId, EngineError> {
        let amount = posting.amount;
        let entry = self.journal.post(&self.chart, posting)?;
        self.bump();
        debug!(entry = %entry, amount = %amount, "Entry posted");
        Ok(entry)
    }

    /// Posts a reversing entry: swapped legs, same amount, linked back
    /// to the original. History is never mutated.
    ///
    /// # Errors
    ///
    /// Returns an error when the entry is unknown or the reversal
    /// fails posting validation.
    pub fn reverse(
        &mut self,
        entry_id: EntryId,
        date: NaiveDate,
        reason: &str,
    ) -> Result<EntryId, EngineError> {
        let reversal = self.journal.reverse(&self.chart, entry_id, date, reason)?;
        self.bump();
        info!(original = %entry_id, reversal = %reversal, "Entry reversed");
        Ok(reversal)
    }

    /// All entries in posting order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        self.journal.entries()
    }

    /// Looks up one entry.
    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.journal.entry(id)
    }

    /// Entries posting to either side of an account.
    pub fn entries_touching<'a>(
        &'a self,
        account: &'a AccountNumber,
    ) -> impl Iterator<Item = &'a Entry> {
        self.journal.entries_touching(account)
    }

    /// Entries produced by a subsidiary record.
    pub fn entries_for_source_ref<'a>(
        &'a self,
        source_ref: &'a SourceRef,
    ) -> impl Iterator<Item = &'a Entry> {
        self.journal.entries_for_source_ref(source_ref)
    }

    /// Signed balance of one detail account over the whole journal.
    ///
    /// # Errors
    ///
    /// Returns an error when the account is unknown.
    pub fn balance_of(&self, number: &AccountNumber) -> Result<Decimal, EngineError> {
        Ok(Balances::new(&self.chart, &self.journal).of(number)?)
    }

    /// Signed balance through a cutoff date (inclusive).
    ///
    /// # Errors
    ///
    /// Returns an error when the account is unknown.
    pub fn balance_of_through(
        &self,
        number: &AccountNumber,
        as_of: NaiveDate,
    ) -> Result<Decimal, EngineError> {
        Ok(Balances::new(&self.chart, &self.journal).of_through(number, as_of)?)
    }

    /// Hierarchy roll-up: a header's subtree total, a detail account's
    /// own balance.
    ///
    /// # Errors
    ///
    /// Returns an error when the account is unknown.
    pub fn group_balance_of(&self, number: &AccountNumber) -> Result<Decimal, EngineError> {
        Ok(Balances::new(&self.chart, &self.journal).group_of(number)?)
    }

    // ==========================================================================
    // Units
    // ==========================================================================

    /// Registers a unit with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns an error when the unit number is already taken.
    pub fn add_unit(
        &mut self,
        number: UnitNumber,
        owner: impl Into<String>,
        monthly_fee: Decimal,
        status: UnitStatus,
    ) -> Result<(), EngineError> {
        if self.units.contains_key(&number) {
            return Err(UnitError::DuplicateUnit(number).into());
        }
        let unit = Unit::new(number.clone(), owner, monthly_fee, status);
        self.units.insert(number.clone(), unit);
        self.bump();
        info!(unit = %number, "Unit added");
        Ok(())
    }

    /// Records an owner payment: appends the payment to the unit,
    /// credits the unit balance (floored at zero), and posts debit
    /// operating cash / credit assessments receivable.
    ///
    /// # Errors
    ///
    /// Returns an error when the unit is unknown or the posting is
    /// invalid (non-positive amount, bad settings accounts).
    pub fn record_unit_payment(
        &mut self,
        unit: &UnitNumber,
        amount: Decimal,
        date: NaiveDate,
        method: PaymentMethod,
        reference: Option<String>,
    ) -> Result<EntryId, EngineError> {
        let unit_rec = self
            .units
            .get_mut(unit)
            .ok_or_else(|| UnitError::UnknownUnit(unit.clone()))?;
        let posting = Posting {
            date,
            memo: format!("Payment from unit {unit}"),
            debit_account: self.settings.accounts.operating_cash.clone(),
            credit_account: self.settings.accounts.assessments_receivable.clone(),
            amount,
            source: EntrySource::Payment,
            source_ref: Some(SourceRef::Unit(unit.clone())),
        };
        let entry = self.journal.post(&self.chart, posting)?;
        unit_rec.apply_payment(Payment {
            amount,
            date,
            method,
            reference,
            entry,
        });
        self.bump();
        debug!(unit = %unit, entry = %entry, amount = %amount, "Payment recorded");
        Ok(entry)
    }

    /// Imposes a late fee: appends the fee, charges the unit balance,
    /// and posts debit assessments receivable / credit late fee
    /// income.
    ///
    /// # Errors
    ///
    /// Returns an error when the unit is unknown or the posting is
    /// invalid.
    pub fn impose_late_fee(
        &mut self,
        unit: &UnitNumber,
        amount: Decimal,
        date: NaiveDate,
        reason: &str,
    ) -> Result<EntryId, EngineError> {
        let unit_rec = self
            .units
            .get_mut(unit)
            .ok_or_else(|| UnitError::UnknownUnit(unit.clone()))?;
        let posting = Posting {
            date,
            memo: format!("Late fee for unit {unit}: {reason}"),
            debit_account: self.settings.accounts.assessments_receivable.clone(),
            credit_account: self.settings.accounts.late_fee_income.clone(),
            amount,
            source: EntrySource::LateFee,
            source_ref: Some(SourceRef::Unit(unit.clone())),
        };
        let entry = self.journal.post(&self.chart, posting)?;
        unit_rec.impose_late_fee(LateFee {
            amount,
            date,
            reason: reason.to_owned(),
            waived: false,
            entry,
        });
        self.bump();
        info!(unit = %unit, entry = %entry, amount = %amount, "Late fee imposed");
        Ok(entry)
    }

    /// Waives a late fee: flags it and releases the owner's balance.
    ///
    /// Posts nothing. The fee income stays on the books; only the
    /// obligation is released. Returns the waived amount.
    ///
    /// # Errors
    ///
    /// Returns an error when the unit or fee index is unknown, or the
    /// fee is already waived.
    pub fn waive_late_fee(
        &mut self,
        unit: &UnitNumber,
        index: usize,
    ) -> Result<Decimal, EngineError> {
        let unit_rec = self
            .units
            .get_mut(unit)
            .ok_or_else(|| UnitError::UnknownUnit(unit.clone()))?;
        let amount = unit_rec.waive_late_fee(index)?;
        self.bump();
        info!(unit = %unit, index, amount = %amount, "Late fee waived");
        Ok(amount)
    }

    /// Levies a special assessment: appends the record, charges the
    /// unit balance, and posts debit assessments receivable / credit
    /// special assessment income.
    ///
    /// # Errors
    ///
    /// Returns an error when the unit is unknown or the posting is
    /// invalid.
    pub fn add_special_assessment(
        &mut self,
        unit: &UnitNumber,
        amount: Decimal,
        levied: NaiveDate,
        reason: &str,
    ) -> Result<EntryId, EngineError> {
        let unit_rec = self
            .units
            .get_mut(unit)
            .ok_or_else(|| UnitError::UnknownUnit(unit.clone()))?;
        let posting = Posting {
            date: levied,
            memo: format!("Special assessment for unit {unit}: {reason}"),
            debit_account: self.settings.accounts.assessments_receivable.clone(),
            credit_account: self.settings.accounts.special_assessment_income.clone(),
            amount,
            source: EntrySource::SpecialAssessment,
            source_ref: Some(SourceRef::Unit(unit.clone())),
        };
        let entry = self.journal.post(&self.chart, posting)?;
        unit_rec.add_special_assessment(SpecialAssessment {
            amount,
            levied,
            reason: reason.to_owned(),
            paid: false,
            paid_date: None,
            entry,
        });
        self.bump();
        info!(unit = %unit, entry = %entry, amount = %amount, "Special assessment levied");
        Ok(entry)
    }

    /// Settles a special assessment: marks it paid, credits the unit
    /// balance, and posts debit operating cash / credit assessments
    /// receivable. The assessment record itself is the receipt; no
    /// separate payment record is appended.
    ///
    /// # Errors
    ///
    /// Returns an error when the unit or assessment index is unknown,
    /// the assessment is already paid, or the posting is invalid.
    pub fn mark_special_assessment_paid(
        &mut self,
        unit: &UnitNumber,
        index: usize,
        paid_date: NaiveDate,
    ) -> Result<EntryId, EngineError> {
        let unit_rec = self
            .units
            .get_mut(unit)
            .ok_or_else(|| UnitError::UnknownUnit(unit.clone()))?;
        let assessment = unit_rec.special_assessments.get(index).ok_or_else(|| {
            UnitError::UnknownSpecialAssessment {
                unit: unit.clone(),
                index,
            }
        })?;
        if assessment.paid {
            return Err(UnitError::AlreadyPaid {
                unit: unit.clone(),
                index,
            }
            .into());
        }
        let amount = assessment.amount;
        let posting = Posting {
            date: paid_date,
            memo: format!("Special assessment payment from unit {unit}"),
            debit_account: self.settings.accounts.operating_cash.clone(),
            credit_account: self.settings.accounts.assessments_receivable.clone(),
            amount,
            source: EntrySource::Payment,
            source_ref: Some(SourceRef::Unit(unit.clone())),
        };
        let entry = self.journal.post(&self.chart, posting)?;
        unit_rec.settle_special_assessment(index, paid_date)?;
        self.bump();
        info!(unit = %unit, entry = %entry, amount = %amount, "Special assessment paid");
        Ok(entry)
    }

    /// Looks up a unit.
    #[must_use]
    pub fn unit(&self, number: &UnitNumber) -> Option<&Unit> {
        self.units.get(number)
    }

    /// All units in unit number order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Recomputes the unit's receivable from its source records:
    /// invoices billed plus unwaived late fees plus unpaid special
    /// assessments, minus payments, floored at zero.
    ///
    /// Audits the denormalized balance. The two agree exactly unless a
    /// payment once exceeded the balance then outstanding; the floor
    /// forgives such overpayment instead of carrying credit.
    ///
    /// # Errors
    ///
    /// Returns an error when the unit is unknown.
    pub fn receivable_per_records(&self, unit: &UnitNumber) -> Result<Decimal, EngineError> {
        let unit_rec = self
            .units
            .get(unit)
            .ok_or_else(|| UnitError::UnknownUnit(unit.clone()))?;
        let invoiced: Decimal = self
            .invoices
            .iter()
            .filter(|invoice| invoice.unit == *unit)
            .map(|invoice| invoice.amount)
            .sum();
        let fees: Decimal = unit_rec
            .late_fees
            .iter()
            .filter(|fee| !fee.waived)
            .map(|fee| fee.amount)
            .sum();
        let assessments: Decimal = unit_rec
            .special_assessments
            .iter()
            .filter(|assessment| !assessment.paid)
            .map(|assessment| assessment.amount)
            .sum();
        let payments: Decimal = unit_rec.payments.iter().map(|payment| payment.amount).sum();
        Ok((invoiced + fees + assessments - payments).max(Decimal::ZERO))
    }

    // ==========================================================================
    // Invoices
    // ==========================================================================

    /// Issues an invoice to a unit: charges the unit balance and posts
    /// debit assessments receivable / credit the income account the
    /// kind selects.
    ///
    /// # Errors
    ///
    /// Returns an error when the unit is unknown or the posting is
    /// invalid.
    pub fn create_unit_invoice(
        &mut self,
        unit: &UnitNumber,
        kind: InvoiceKind,
        amount: Decimal,
        issued: NaiveDate,
        due: NaiveDate,
    ) -> Result<InvoiceId, EngineError> {
        let unit_rec = self
            .units
            .get_mut(unit)
            .ok_or_else(|| UnitError::UnknownUnit(unit.clone()))?;
        let id = InvoiceId::new();
        let (credit_account, source, memo) = match kind {
            InvoiceKind::MonthlyFee => (
                self.settings.accounts.assessment_income.clone(),
                EntrySource::Assessment,
                format!("Monthly assessment for unit {unit}"),
            ),
            InvoiceKind::SpecialAssessment => (
                self.settings.accounts.special_assessment_income.clone(),
                EntrySource::SpecialAssessment,
                format!("Special assessment billing for unit {unit}"),
            ),
        };
        let posting = Posting {
            date: issued,
            memo,
            debit_account: self.settings.accounts.assessments_receivable.clone(),
            credit_account,
            amount,
            source,
            source_ref: Some(SourceRef::Invoice(id)),
        };
        let entry = self.journal.post(&self.chart, posting)?;
        unit_rec.charge(amount);
        self.invoices.push(UnitInvoice {
            id,
            unit: unit.clone(),
            kind,
            amount,
            issued,
            due,
            status: InvoiceStatus::Sent,
            paid_date: None,
            method: None,
            issue_entry: entry,
            payment_entry: None,
        });
        self.bump();
        info!(invoice = %id, unit = %unit, amount = %amount, "Invoice issued");
        Ok(id)
    }

    /// Pays an invoice: transitions it `Sent -> Paid`, appends a
    /// payment to the unit, credits the unit balance (floored at
    /// zero), and posts debit operating cash / credit assessments
    /// receivable.
    ///
    /// # Errors
    ///
    /// Returns an error when the invoice is unknown, already paid, or
    /// the posting is invalid.
    pub fn pay_unit_invoice(
        &mut self,
        invoice_id: InvoiceId,
        date: NaiveDate,
        method: PaymentMethod,
    ) -> Result<EntryId, EngineError> {
        let idx = self
            .invoices
            .iter()
            .position(|invoice| invoice.id == invoice_id)
            .ok_or(InvoiceError::UnknownInvoice(invoice_id))?;
        let (status, amount, unit) = {
            let invoice = &self.invoices[idx];
            (invoice.status, invoice.amount, invoice.unit.clone())
        };
        if status != InvoiceStatus::Sent {
            return Err(InvoiceError::InvalidTransition {
                from: status,
                to: InvoiceStatus::Paid,
            }
            .into());
        }
        if !self.units.contains_key(&unit) {
            return Err(UnitError::UnknownUnit(unit).into());
        }
        let posting = Posting {
            date,
            memo: format!("Invoice payment from unit {unit}"),
            debit_account: self.settings.accounts.operating_cash.clone(),
            credit_account: self.settings.accounts.assessments_receivable.clone(),
            amount,
            source: EntrySource::Payment,
            source_ref: Some(SourceRef::Invoice(invoice_id)),
        };
        let entry = self.journal.post(&self.chart, posting)?;
        self.invoices[idx].mark_paid(date, method, entry)?;
        if let Some(unit_rec) = self.units.get_mut(&unit) {
            unit_rec.apply_payment(Payment {
                amount,
                date,
                method,
                reference: None,
                entry,
            });
        }
        self.bump();
        info!(invoice = %invoice_id, unit = %unit, entry = %entry, "Invoice paid");
        Ok(entry)
    }

    /// Issues the month's assessment invoices: one `MonthlyFee`
    /// invoice per occupied unit with a positive fee, dated the first
    /// of the month and due on the association's due day. Returns the
    /// created invoice ids in unit number order.
    ///
    /// # Errors
    ///
    /// Returns an error when the month is invalid or any issuance
    /// fails; invoices created before the failure remain.
    pub fn issue_monthly_invoices(
        &mut self,
        year: i32,
        month: u32,
    ) -> Result<Vec<InvoiceId>, EngineError> {
        let issued = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(EngineError::InvalidPeriod { year, month })?;
        let due = NaiveDate::from_ymd_opt(year, month, self.settings.due_day).unwrap_or(issued);
        let billable: Vec<(UnitNumber, Decimal)> = self
            .units
            .values()
            .filter(|unit| unit.status == UnitStatus::Occupied && unit.monthly_fee > Decimal::ZERO)
            .map(|unit| (unit.number.clone(), unit.monthly_fee))
            .collect();
        let mut created = Vec::with_capacity(billable.len());
        for (unit, fee) in billable {
            created.push(self.create_unit_invoice(
                &unit,
                InvoiceKind::MonthlyFee,
                fee,
                issued,
                due,
            )?);
        }
        info!(year, month, count = created.len(), "Monthly invoices issued");
        Ok(created)
    }

    /// Looks up an invoice.
    #[must_use]
    pub fn invoice(&self, id: InvoiceId) -> Option<&UnitInvoice> {
        self.invoices.iter().find(|invoice| invoice.id == id)
    }

    /// All invoices in issuance order.
    #[must_use]
    pub fn invoices(&self) -> &[UnitInvoice] {
        &self.invoices
    }

    /// Invoices billed to one unit.
    pub fn invoices_for_unit<'a>(
        &'a self,
        unit: &'a UnitNumber,
    ) -> impl Iterator<Item = &'a UnitInvoice> {
        self.invoices.iter().filter(move |invoice| invoice.unit == *unit)
    }

    /// Invoices still awaiting payment.
    pub fn open_invoices(&self) -> impl Iterator<Item = &UnitInvoice> {
        self.invoices.iter().filter(|invoice| invoice.is_open())
    }

    // ==========================================================================
    // Work orders
    // ==========================================================================

    /// Opens a draft work order against an expense account.
    ///
    /// # Errors
    ///
    /// Returns an error when the amount is not positive or the account
    /// is not a postable expense account.
    pub fn create_work_order(
        &mut self,
        title: impl Into<String>,
        vendor: impl Into<String>,
        amount: Decimal,
        expense_account: AccountNumber,
        opened: NaiveDate,
    ) -> Result<WorkOrderId, EngineError> {
        if amount <= Decimal::ZERO {
            return Err(WorkOrderError::InvalidAmount(amount).into());
        }
        let postable_expense = self.chart.get(&expense_account).is_some_and(|account| {
            account.is_postable() && account.account_type == AccountType::Expense
        });
        if !postable_expense {
            return Err(WorkOrderError::NotAnExpenseAccount(expense_account).into());
        }
        let order = WorkOrder::new(title, vendor, amount, expense_account, opened);
        let id = order.id;
        self.work_orders.push(order);
        self.bump();
        info!(work_order = %id, amount = %amount, "Work order created");
        Ok(id)
    }

    /// Transitions a work order `Draft -> Approved`.
    ///
    /// # Errors
    ///
    /// Returns an error when the order is unknown or not a draft.
    pub fn approve_work_order(&mut self, id: WorkOrderId) -> Result<(), EngineError> {
        let order = self
            .work_orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(WorkOrderError::UnknownWorkOrder(id))?;
        order.approve()?;
        self.bump();
        info!(work_order = %id, "Work order approved");
        Ok(())
    }

    /// Records the vendor invoice, `Approved -> Invoiced`; an optional
    /// revised amount replaces the estimate.
    ///
    /// # Errors
    ///
    /// Returns an error when the order is unknown, not approved, or
    /// the revised amount is not positive.
    pub fn receive_work_order_invoice(
        &mut self,
        id: WorkOrderId,
        date: NaiveDate,
        revised_amount: Option<Decimal>,
    ) -> Result<(), EngineError> {
        let order = self
            .work_orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(WorkOrderError::UnknownWorkOrder(id))?;
        order.receive_invoice(date, revised_amount)?;
        self.bump();
        info!(work_order = %id, "Work order invoiced");
        Ok(())
    }

    /// Pays a work order, `Invoiced -> Paid`; the only step that
    /// posts: debit the order's expense account / credit operating
    /// cash.
    ///
    /// # Errors
    ///
    /// Returns an error when the order is unknown or not invoiced, or
    /// the posting is invalid. An out-of-order call posts nothing.
    pub fn pay_work_order(
        &mut self,
        id: WorkOrderId,
        date: NaiveDate,
    ) -> Result<EntryId, EngineError> {
        let idx = self
            .work_orders
            .iter()
            .position(|order| order.id == id)
            .ok_or(WorkOrderError::UnknownWorkOrder(id))?;
        let (status, amount, expense_account, vendor, title) = {
            let order = &self.work_orders[idx];
            (
                order.status,
                order.amount,
                order.expense_account.clone(),
                order.vendor.clone(),
                order.title.clone(),
            )
        };
        if status != WorkOrderStatus::Invoiced {
            return Err(WorkOrderError::InvalidTransition {
                from: status,
                to: WorkOrderStatus::Paid,
            }
            .into());
        }
        let posting = Posting {
            date,
            memo: format!("Work order payment to {vendor}: {title}"),
            debit_account: expense_account,
            credit_account: self.settings.accounts.operating_cash.clone(),
            amount,
            source: EntrySource::WorkOrder,
            source_ref: Some(SourceRef::WorkOrder(id)),
        };
        let entry = self.journal.post(&self.chart, posting)?;
        self.work_orders[idx].mark_paid(date, entry)?;
        self.bump();
        info!(work_order = %id, entry = %entry, amount = %amount, "Work order paid");
        Ok(entry)
    }

    /// Looks up a work order.
    #[must_use]
    pub fn work_order(&self, id: WorkOrderId) -> Option<&WorkOrder> {
        self.work_orders.iter().find(|order| order.id == id)
    }

    /// All work orders in creation order.
    #[must_use]
    pub fn work_orders(&self) -> &[WorkOrder] {
        &self.work_orders
    }

    // ==========================================================================
    // Budget
    // ==========================================================================

    /// Adds a budget category for a year, optionally mapped to an
    /// expense account the variance report reads actuals from.
    ///
    /// # Errors
    ///
    /// Returns an error when a category with the same name exists for
    /// the year, or the mapped account is not a postable expense
    /// account.
    pub fn add_budget_category(
        &mut self,
        name: impl Into<String>,
        year: i32,
        budgeted: Decimal,
        account: Option<AccountNumber>,
    ) -> Result<BudgetCategoryId, EngineError> {
        let name = name.into();
        if self
            .budget
            .iter()
            .any(|category| category.year == year && category.name == name)
        {
            return Err(BudgetError::DuplicateCategory { name, year }.into());
        }
        if let Some(number) = &account {
            let postable_expense = self.chart.get(number).is_some_and(|account| {
                account.is_postable() && account.account_type == AccountType::Expense
            });
            if !postable_expense {
                return Err(BudgetError::NotAnExpenseAccount(number.clone()).into());
            }
        }
        let id = BudgetCategoryId::new();
        self.budget.push(BudgetCategory {
            id,
            name,
            year,
            budgeted,
            account,
            expenses: Vec::new(),
        });
        self.bump();
        info!(category = %id, year, "Budget category added");
        Ok(id)
    }

    /// Appends an expense record to a category. Records only; no
    /// posting happens here (postings come from work orders and manual
    /// entries).
    ///
    /// # Errors
    ///
    /// Returns an error when the category is unknown.
    pub fn record_budget_expense(
        &mut self,
        category_id: BudgetCategoryId,
        record: ExpenseRecord,
    ) -> Result<(), EngineError> {
        let category = self
            .budget
            .iter_mut()
            .find(|category| category.id == category_id)
            .ok_or(BudgetError::UnknownCategory(category_id))?;
        category.expenses.push(record);
        self.bump();
        debug!(category = %category_id, "Budget expense recorded");
        Ok(())
    }

    /// Looks up a budget category.
    #[must_use]
    pub fn budget_category(&self, id: BudgetCategoryId) -> Option<&BudgetCategory> {
        self.budget.iter().find(|category| category.id == id)
    }

    /// Categories budgeted for one year.
    pub fn budget_categories(&self, year: i32) -> impl Iterator<Item = &BudgetCategory> {
        self.budget.iter().filter(move |category| category.year == year)
    }

    // ==========================================================================
    // Reserve study
    // ==========================================================================

    /// Adds a reserve study line item.
    pub fn add_reserve_item(
        &mut self,
        name: impl Into<String>,
        estimated_cost: Decimal,
        current_funding: Decimal,
        years_remaining: u32,
        is_contingency: bool,
    ) -> ReserveItemId {
        let id = ReserveItemId::new();
        self.reserve.push(ReserveItem {
            id,
            name: name.into(),
            estimated_cost,
            current_funding,
            years_remaining,
            is_contingency,
        });
        self.bump();
        info!(item = %id, "Reserve item added");
        id
    }

    /// Moves money into the reserve for one item: adds to its funding
    /// and posts debit reserve cash / credit operating cash.
    ///
    /// # Errors
    ///
    /// Returns an error when the item is unknown or the posting is
    /// invalid.
    pub fn fund_reserve_item(
        &mut self,
        id: ReserveItemId,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<EntryId, EngineError> {
        let idx = self
            .reserve
            .iter()
            .position(|item| item.id == id)
            .ok_or(ReserveError::UnknownItem(id))?;
        let name = self.reserve[idx].name.clone();
        let posting = Posting {
            date,
            memo: format!("Reserve funding: {name}"),
            debit_account: self.settings.accounts.reserve_cash.clone(),
            credit_account: self.settings.accounts.operating_cash.clone(),
            amount,
            source: EntrySource::Transfer,
            source_ref: None,
        };
        let entry = self.journal.post(&self.chart, posting)?;
        self.reserve[idx].current_funding += amount;
        self.bump();
        info!(item = %id, entry = %entry, amount = %amount, "Reserve item funded");
        Ok(entry)
    }

    /// All reserve items in creation order.
    #[must_use]
    pub fn reserve_items(&self) -> &[ReserveItem] {
        &self.reserve
    }

    // ==========================================================================
    // Reports
    // ==========================================================================

    /// Raw debit and credit totals per detail account.
    #[must_use]
    pub fn trial_balance(&self) -> TrialBalanceReport {
        ReportService::trial_balance(&self.chart, &self.journal)
    }

    /// Assets, liabilities, and equity as of a date, with net income
    /// to date folded into equity.
    #[must_use]
    pub fn balance_sheet(&self, as_of: NaiveDate) -> BalanceSheetReport {
        ReportService::balance_sheet(&self.chart, &self.journal, as_of)
    }

    /// Income and expenses over an inclusive date window.
    #[must_use]
    pub fn income_statement(&self, start: NaiveDate, end: NaiveDate) -> IncomeStatementReport {
        ReportService::income_statement(&self.chart, &self.journal, start, end)
    }

    /// Budgeted against actual per category for one year.
    #[must_use]
    pub fn budget_variance(&self, year: i32) -> BudgetVarianceReport {
        ReportService::budget_variance(&self.chart, &self.journal, &self.budget, year)
    }

    /// Owed balances bucketed by age relative to each unit's fee.
    #[must_use]
    pub fn delinquency_aging(&self) -> DelinquencyReport {
        ReportService::delinquency_aging(self.units.values())
    }

    /// Reserve funding status per item with totals.
    #[must_use]
    pub fn reserve_funding(&self) -> ReserveReport {
        ReportService::reserve_funding(&self.reserve)
    }

    /// Annual contribution needed across non-contingency items.
    #[must_use]
    pub fn recommended_annual_reserve(&self) -> Decimal {
        ReportService::recommended_annual_reserve(&self.reserve)
    }
}
