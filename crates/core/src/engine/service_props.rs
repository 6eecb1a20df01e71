//! Property-based tests for the engine aggregate.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strata_shared::{AccountNumber, InvoiceId, ReserveItemId, UnitNumber};

use crate::invoices::InvoiceKind;
use crate::units::{PaymentMethod, UnitStatus};

use super::{standard_chart, LedgerEngine, Settings};

/// A random owner-facing operation against one unit.
#[derive(Debug, Clone)]
enum UnitOp {
    Invoice(Decimal),
    LateFee(Decimal),
    SpecialAssessment(Decimal),
    /// `amount` is used as-is in unbounded mode; in covered mode the
    /// payment is `quarters`/4 of the balance owed instead.
    Payment { amount: Decimal, quarters: u8 },
    WaiveFee,
    SettleAssessment,
}

fn engine_with_unit() -> (LedgerEngine, UnitNumber) {
    let mut engine = LedgerEngine::new(
        Settings::standard("Willow Creek HOA", 15),
        standard_chart().unwrap(),
    )
    .unwrap();
    let unit = UnitNumber::new("101");
    engine
        .add_unit(unit.clone(), "Ada Jensen", dec!(350), UnitStatus::Occupied)
        .unwrap();
    (engine, unit)
}

/// Strategy to generate positive amounts (0.01 to 1,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn unit_op() -> impl Strategy<Value = UnitOp> {
    prop_oneof![
        amount().prop_map(UnitOp::Invoice),
        amount().prop_map(UnitOp::LateFee),
        amount().prop_map(UnitOp::SpecialAssessment),
        (amount(), 1u8..=4).prop_map(|(amount, quarters)| UnitOp::Payment { amount, quarters }),
        Just(UnitOp::WaiveFee),
        Just(UnitOp::SettleAssessment),
    ]
}

/// Operations with a month and day to post them on.
fn op_vec() -> impl Strategy<Value = Vec<(UnitOp, u32, u32)>> {
    prop::collection::vec((unit_op(), 1u32..=12, 1u32..28), 1..40)
}

/// Applies one operation.
///
/// With `cover_credits`, payments are scaled to the balance and
/// releases (waivers, settlements) are skipped unless the balance
/// covers them, so no credit ever hits the zero floor.
fn apply(
    engine: &mut LedgerEngine,
    unit: &UnitNumber,
    op: UnitOp,
    on: NaiveDate,
    cover_credits: bool,
) {
    match op {
        UnitOp::Invoice(amount) => {
            engine
                .create_unit_invoice(unit, InvoiceKind::MonthlyFee, amount, on, on)
                .unwrap();
        }
        UnitOp::LateFee(amount) => {
            engine.impose_late_fee(unit, amount, on, "past due").unwrap();
        }
        UnitOp::SpecialAssessment(amount) => {
            engine
                .add_special_assessment(unit, amount, on, "capital project")
                .unwrap();
        }
        UnitOp::Payment { amount, quarters } => {
            let amount = if cover_credits {
                let balance = engine.unit(unit).unwrap().balance;
                (balance * Decimal::from(quarters) / Decimal::from(4u8))
                    .round_dp(2)
                    .min(balance)
            } else {
                amount
            };
            if amount > Decimal::ZERO {
                engine
                    .record_unit_payment(unit, amount, on, PaymentMethod::Ach, None)
                    .unwrap();
            }
        }
        UnitOp::WaiveFee => {
            let unit_rec = engine.unit(unit).unwrap();
            let balance = unit_rec.balance;
            let index = unit_rec
                .late_fees
                .iter()
                .position(|fee| !fee.waived && (!cover_credits || fee.amount <= balance));
            if let Some(index) = index {
                engine.waive_late_fee(unit, index).unwrap();
            }
        }
        UnitOp::SettleAssessment => {
            let unit_rec = engine.unit(unit).unwrap();
            let balance = unit_rec.balance;
            let index = unit_rec
                .special_assessments
                .iter()
                .position(|a| !a.paid && (!cover_credits || a.amount <= balance));
            if let Some(index) = index {
                engine.mark_special_assessment_paid(unit, index, on).unwrap();
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Subledger reconciliation
    // =========================================================================

    /// *For any* operation sequence in which no credit exceeds the
    /// balance outstanding at the time, the denormalized balance
    /// equals the recomputation from source records exactly.
    #[test]
    fn prop_balance_matches_records_when_credits_are_covered(ops in op_vec()) {
        let (mut engine, unit) = engine_with_unit();
        for (op, month, day) in ops {
            let on = NaiveDate::from_ymd_opt(2026, month, day).unwrap();
            apply(&mut engine, &unit, op, on, true);
        }
        prop_assert_eq!(
            engine.receivable_per_records(&unit).unwrap(),
            engine.unit(&unit).unwrap().balance
        );
    }

    /// *For any* operation sequence at all, including overpayments and
    /// releases past the floor, the balance stays non-negative and
    /// never undercuts the records recomputation.
    #[test]
    fn prop_balance_bounds_hold_for_any_sequence(ops in op_vec()) {
        let (mut engine, unit) = engine_with_unit();
        for (op, month, day) in ops {
            let on = NaiveDate::from_ymd_opt(2026, month, day).unwrap();
            apply(&mut engine, &unit, op, on, false);
            let balance = engine.unit(&unit).unwrap().balance;
            let records = engine.receivable_per_records(&unit).unwrap();
            prop_assert!(balance >= Decimal::ZERO);
            prop_assert!(records >= Decimal::ZERO);
            prop_assert!(records <= balance);
        }
    }

    // =========================================================================
    // Accounting identity
    // =========================================================================

    /// *For any* operation sequence, the trial balance stays balanced
    /// and the balance sheet identity holds.
    #[test]
    fn prop_engine_activity_preserves_accounting_identity(ops in op_vec()) {
        let (mut engine, unit) = engine_with_unit();
        for (op, month, day) in ops {
            let on = NaiveDate::from_ymd_opt(2026, month, day).unwrap();
            apply(&mut engine, &unit, op, on, false);
        }
        let trial = engine.trial_balance();
        prop_assert!(trial.totals.is_balanced);
        let sheet = engine.balance_sheet(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        prop_assert!(sheet.is_balanced);
    }

    // =========================================================================
    // Purity and persistence
    // =========================================================================

    /// *For any* engine state, running every report changes nothing:
    /// same revision, identical snapshot.
    #[test]
    fn prop_reports_leave_the_engine_untouched(ops in op_vec()) {
        let (mut engine, unit) = engine_with_unit();
        for (op, month, day) in ops {
            let on = NaiveDate::from_ymd_opt(2026, month, day).unwrap();
            apply(&mut engine, &unit, op, on, false);
        }
        let before = engine.snapshot();
        let revision = engine.revision();

        let _ = engine.trial_balance();
        let _ = engine.balance_sheet(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        let _ = engine.income_statement(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        );
        let _ = engine.budget_variance(2026);
        let _ = engine.delinquency_aging();
        let _ = engine.reserve_funding();
        let _ = engine.receivable_per_records(&unit).unwrap();

        prop_assert_eq!(engine.revision(), revision);
        prop_assert_eq!(engine.snapshot(), before);
    }

    /// *For any* engine state, restoring a snapshot reproduces it
    /// exactly.
    #[test]
    fn prop_snapshot_restore_round_trips(ops in op_vec()) {
        let (mut engine, unit) = engine_with_unit();
        for (op, month, day) in ops {
            let on = NaiveDate::from_ymd_opt(2026, month, day).unwrap();
            apply(&mut engine, &unit, op, on, false);
        }
        let snapshot = engine.snapshot();
        let restored = LedgerEngine::restore(snapshot.clone()).unwrap();
        prop_assert_eq!(restored.snapshot(), snapshot);
    }

    /// *For any* engine state, operations that fail leave no trace.
    #[test]
    fn prop_failed_operations_leave_no_trace(ops in op_vec()) {
        let (mut engine, unit) = engine_with_unit();
        for (op, month, day) in ops {
            let on = NaiveDate::from_ymd_opt(2026, month, day).unwrap();
            apply(&mut engine, &unit, op, on, false);
        }
        let before = engine.snapshot();
        let on = NaiveDate::from_ymd_opt(2026, 12, 30).unwrap();

        engine.pay_unit_invoice(InvoiceId::new(), on, PaymentMethod::Check).unwrap_err();
        engine.waive_late_fee(&unit, 10_000).unwrap_err();
        engine.mark_special_assessment_paid(&unit, 10_000, on).unwrap_err();
        engine.fund_reserve_item(ReserveItemId::new(), dec!(10), on).unwrap_err();
        engine.remove_account(&AccountNumber::from("1110")).unwrap_err();
        engine.issue_monthly_invoices(2026, 0).unwrap_err();

        prop_assert_eq!(engine.snapshot(), before);
    }
}
