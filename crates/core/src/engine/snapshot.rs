//! Serializable engine state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strata_shared::UnitNumber;

use crate::budget::BudgetCategory;
use crate::coa::Chart;
use crate::invoices::UnitInvoice;
use crate::ledger::Journal;
use crate::reserve::ReserveItem;
use crate::units::Unit;
use crate::workorders::WorkOrder;

use super::settings::Settings;

/// Complete state of one association, as captured by
/// [`LedgerEngine::snapshot`](super::LedgerEngine::snapshot) and
/// accepted by [`LedgerEngine::restore`](super::LedgerEngine::restore).
///
/// The snapshot is the persistence boundary: the store serializes this
/// type and nothing else. Restoring a snapshot and snapshotting again
/// yields an equal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationSnapshot {
    /// Association settings.
    pub settings: Settings,
    /// Chart of accounts.
    pub chart: Chart,
    /// The journal, every entry ever posted.
    pub journal: Journal,
    /// Units keyed by unit number.
    pub units: BTreeMap<UnitNumber, Unit>,
    /// Invoices in issuance order.
    pub invoices: Vec<UnitInvoice>,
    /// Work orders in creation order.
    pub work_orders: Vec<WorkOrder>,
    /// Budget categories across all years.
    pub budget: Vec<BudgetCategory>,
    /// Reserve study items.
    pub reserve: Vec<ReserveItem>,
    /// Mutation counter at capture time.
    pub revision: u64,
}
