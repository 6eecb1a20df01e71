//! Property-based tests for posting and balance math.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use strata_shared::AccountNumber;

use crate::coa::{AccountKind, AccountType, Chart};

use super::balance::Balances;
use super::journal::Journal;
use super::types::{EntrySource, Posting};

/// Detail accounts available to the generators, spread across all five
/// classifications.
const DETAILS: [&str; 6] = ["1110", "1200", "2010", "3010", "4010", "5010"];

fn num(s: &str) -> AccountNumber {
    AccountNumber::from(s)
}

/// Builds the fixture chart backing every property below.
fn fixture_chart() -> Chart {
    let mut chart = Chart::new();
    chart.add_section(num("1000"), "Assets", AccountType::Asset).unwrap();
    chart
        .add_account(num("1100"), "Bank", AccountKind::Header, &num("1000"))
        .unwrap();
    chart
        .add_account(num("1110"), "Operating Cash", AccountKind::Detail, &num("1100"))
        .unwrap();
    chart
        .add_account(num("1200"), "Receivable", AccountKind::Detail, &num("1000"))
        .unwrap();
    chart.add_section(num("2000"), "Liabilities", AccountType::Liability).unwrap();
    chart
        .add_account(num("2010"), "Payables", AccountKind::Detail, &num("2000"))
        .unwrap();
    chart.add_section(num("3000"), "Equity", AccountType::Equity).unwrap();
    chart
        .add_account(num("3010"), "Retained Surplus", AccountKind::Detail, &num("3000"))
        .unwrap();
    chart.add_section(num("4000"), "Income", AccountType::Income).unwrap();
    chart
        .add_account(num("4010"), "Assessments", AccountKind::Detail, &num("4000"))
        .unwrap();
    chart.add_section(num("5000"), "Expenses", AccountType::Expense).unwrap();
    chart
        .add_account(num("5010"), "Maintenance", AccountKind::Detail, &num("5000"))
        .unwrap();
    chart
}

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a valid posting against the fixture chart:
/// distinct debit/credit detail accounts and a positive amount.
fn posting_strategy() -> impl Strategy<Value = Posting> {
    (0usize..DETAILS.len(), 1usize..DETAILS.len(), positive_amount(), 1u32..28)
        .prop_map(|(debit, offset, amount, day)| {
            let credit = (debit + offset) % DETAILS.len();
            Posting {
                date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
                memo: "generated".to_owned(),
                debit_account: num(DETAILS[debit]),
                credit_account: num(DETAILS[credit]),
                amount,
                source: EntrySource::Manual,
                source_ref: None,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Journal-wide balance integrity
    // =========================================================================

    /// *For any* sequence of valid postings, total debits equal total
    /// credits across the whole journal.
    #[test]
    fn prop_journal_debits_equal_credits(postings in prop::collection::vec(posting_strategy(), 1..50)) {
        let chart = fixture_chart();
        let mut journal = Journal::new();
        for posting in postings {
            journal.post(&chart, posting).unwrap();
        }
        let balances = Balances::new(&chart, &journal);
        let mut debits = Decimal::ZERO;
        let mut credits = Decimal::ZERO;
        for number in DETAILS {
            let totals = balances.leg_totals(&num(number), None);
            debits += totals.debits;
            credits += totals.credits;
        }
        prop_assert_eq!(debits, credits);
    }

    /// *For any* sequence of valid postings, the sum of debit-normal
    /// balances equals the sum of credit-normal balances.
    #[test]
    fn prop_signed_balances_cancel(postings in prop::collection::vec(posting_strategy(), 1..50)) {
        let chart = fixture_chart();
        let mut journal = Journal::new();
        for posting in postings {
            journal.post(&chart, posting).unwrap();
        }
        let balances = Balances::new(&chart, &journal);
        let debit_normal = balances.of(&num("1110")).unwrap()
            + balances.of(&num("1200")).unwrap()
            + balances.of(&num("5010")).unwrap();
        let credit_normal = balances.of(&num("2010")).unwrap()
            + balances.of(&num("3010")).unwrap()
            + balances.of(&num("4010")).unwrap();
        prop_assert_eq!(debit_normal, credit_normal);
    }

    // =========================================================================
    // Roll-ups
    // =========================================================================

    /// *For any* sequence of valid postings, a section's roll-up equals
    /// the sum of its subtree's detail balances.
    #[test]
    fn prop_rollup_matches_subtree_sum(postings in prop::collection::vec(posting_strategy(), 1..50)) {
        let chart = fixture_chart();
        let mut journal = Journal::new();
        for posting in postings {
            journal.post(&chart, posting).unwrap();
        }
        let balances = Balances::new(&chart, &journal);
        let assets_rollup = balances.group_of(&num("1000")).unwrap();
        let assets_details =
            balances.of(&num("1110")).unwrap() + balances.of(&num("1200")).unwrap();
        prop_assert_eq!(assets_rollup, assets_details);
    }

    // =========================================================================
    // Reversals
    // =========================================================================

    /// *For any* valid posting, reversing it returns every account to
    /// zero while both entries stay in the journal.
    #[test]
    fn prop_reversal_nets_to_zero(posting in posting_strategy()) {
        let chart = fixture_chart();
        let mut journal = Journal::new();
        let id = journal.post(&chart, posting).unwrap();
        journal
            .reverse(&chart, id, NaiveDate::from_ymd_opt(2026, 3, 28).unwrap(), "undo")
            .unwrap();

        prop_assert_eq!(journal.len(), 2);
        let balances = Balances::new(&chart, &journal);
        for number in DETAILS {
            prop_assert_eq!(balances.of(&num(number)).unwrap(), Decimal::ZERO);
        }
    }
}
