//! Property-based and unit tests for the reports module.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strata_shared::{AccountNumber, UnitNumber};

use crate::coa::{AccountKind, AccountType, Chart};
use crate::ledger::{EntrySource, Journal, Posting};
use crate::units::{Unit, UnitStatus};

use super::service::ReportService;

const DETAILS: [&str; 8] = [
    "1110", "1120", "1200", "2010", "3010", "4010", "4020", "5010",
];

fn num(s: &str) -> AccountNumber {
    AccountNumber::from(s)
}

/// A compact HOA chart: cash, reserve cash, receivable, payable,
/// retained surplus, two income accounts, one expense account.
fn fixture_chart() -> Chart {
    let mut chart = Chart::new();
    chart.add_section(num("1000"), "Assets", AccountType::Asset).unwrap();
    chart
        .add_account(num("1110"), "Operating Cash", AccountKind::Detail, &num("1000"))
        .unwrap();
    chart
        .add_account(num("1120"), "Reserve Cash", AccountKind::Detail, &num("1000"))
        .unwrap();
    chart
        .add_account(num("1200"), "Assessments Receivable", AccountKind::Detail, &num("1000"))
        .unwrap();
    chart.add_section(num("2000"), "Liabilities", AccountType::Liability).unwrap();
    chart
        .add_account(num("2010"), "Accounts Payable", AccountKind::Detail, &num("2000"))
        .unwrap();
    chart.add_section(num("3000"), "Equity", AccountType::Equity).unwrap();
    chart
        .add_account(num("3010"), "Retained Surplus", AccountKind::Detail, &num("3000"))
        .unwrap();
    chart.add_section(num("4000"), "Income", AccountType::Income).unwrap();
    chart
        .add_account(num("4010"), "Assessment Income", AccountKind::Detail, &num("4000"))
        .unwrap();
    chart
        .add_account(num("4020"), "Late Fee Income", AccountKind::Detail, &num("4000"))
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

/// Strategy to generate a valid posting against the fixture chart,
/// spread across the first half of 2026.
fn posting_strategy() -> impl Strategy<Value = Posting> {
    (
        0usize..DETAILS.len(),
        1usize..DETAILS.len(),
        positive_amount(),
        1u32..7,
        1u32..28,
    )
        .prop_map(|(debit, offset, amount, month, day)| {
            let credit = (debit + offset) % DETAILS.len();
            Posting {
                date: NaiveDate::from_ymd_opt(2026, month, day).unwrap(),
                memo: "generated".to_owned(),
                debit_account: num(DETAILS[debit]),
                credit_account: num(DETAILS[credit]),
                amount,
                source: EntrySource::Manual,
                source_ref: None,
            }
        })
}

fn journal_from(chart: &Chart, postings: Vec<Posting>) -> Journal {
    let mut journal = Journal::new();
    for posting in postings {
        journal.post(chart, posting).unwrap();
    }
    journal
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Balance sheet identity
    // =========================================================================

    /// *For any* sequence of valid postings, the balance sheet balances:
    /// assets equal liabilities plus equity once net income to date is
    /// folded into equity.
    #[test]
    fn prop_balance_sheet_identity_holds(postings in prop::collection::vec(posting_strategy(), 0..60)) {
        let chart = fixture_chart();
        let journal = journal_from(&chart, postings);
        let as_of = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();

        let report = ReportService::balance_sheet(&chart, &journal, as_of);

        prop_assert!(report.is_balanced,
            "assets {} != liabilities+equity {}",
            report.total_assets, report.liabilities_and_equity);
        prop_assert_eq!(
            report.total_assets,
            report.total_liabilities + report.total_equity
        );
    }

    /// *For any* sequence of valid postings, a mid-period balance sheet
    /// also balances: the cutoff slices income and assets consistently.
    #[test]
    fn prop_balance_sheet_identity_holds_mid_period(postings in prop::collection::vec(posting_strategy(), 0..60)) {
        let chart = fixture_chart();
        let journal = journal_from(&chart, postings);
        let as_of = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

        let report = ReportService::balance_sheet(&chart, &journal, as_of);
        prop_assert!(report.is_balanced);
    }

    // =========================================================================
    // Trial balance
    // =========================================================================

    /// *For any* sequence of valid postings, the trial balance is
    /// balanced and its totals equal the journal's total volume.
    #[test]
    fn prop_trial_balance_always_balances(postings in prop::collection::vec(posting_strategy(), 0..60)) {
        let chart = fixture_chart();
        let expected: Decimal = postings.iter().map(|p| p.amount).sum();
        let journal = journal_from(&chart, postings);

        let report = ReportService::trial_balance(&chart, &journal);

        prop_assert!(report.totals.is_balanced);
        prop_assert_eq!(report.totals.total_debits, expected);
        prop_assert_eq!(report.totals.total_credits, expected);
    }

    // =========================================================================
    // Income statement
    // =========================================================================

    /// *For any* sequence of valid postings, the income statement's net
    /// income is its income total minus its expense total, and the
    /// full-year window matches the balance sheet's net income line.
    #[test]
    fn prop_income_statement_consistent_with_balance_sheet(postings in prop::collection::vec(posting_strategy(), 0..60)) {
        let chart = fixture_chart();
        let journal = journal_from(&chart, postings);
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();

        let income_statement = ReportService::income_statement(&chart, &journal, start, end);
        prop_assert_eq!(
            income_statement.net_income,
            income_statement.income.total - income_statement.expenses.total
        );

        let balance_sheet = ReportService::balance_sheet(&chart, &journal, end);
        prop_assert_eq!(income_statement.net_income, balance_sheet.net_income_to_date);
    }

    // =========================================================================
    // Purity
    // =========================================================================

    /// *For any* state, running a report twice yields identical results.
    #[test]
    fn prop_reports_are_pure(postings in prop::collection::vec(posting_strategy(), 0..40)) {
        let chart = fixture_chart();
        let journal = journal_from(&chart, postings);
        let as_of = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();

        let first = ReportService::balance_sheet(&chart, &journal, as_of);
        let second = ReportService::balance_sheet(&chart, &journal, as_of);
        prop_assert_eq!(first, second);

        let tb_first = ReportService::trial_balance(&chart, &journal);
        let tb_second = ReportService::trial_balance(&chart, &journal);
        prop_assert_eq!(tb_first, tb_second);
    }
}

mod unit_tests {
    use super::*;
    use crate::budget::{BudgetCategory, VarianceStatus};
    use crate::reports::types::AgingBucket;
    use crate::reserve::ReserveItem;
    use rstest::rstest;
    use strata_shared::{BudgetCategoryId, ReserveItemId};

    #[test]
    fn test_empty_state_produces_zeroed_reports() {
        let chart = Chart::new();
        let journal = Journal::new();
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        let tb = ReportService::trial_balance(&chart, &journal);
        assert!(tb.lines.is_empty());
        assert!(tb.totals.is_balanced);

        let bs = ReportService::balance_sheet(&chart, &journal, as_of);
        assert_eq!(bs.total_assets, Decimal::ZERO);
        assert!(bs.is_balanced);

        let is = ReportService::income_statement(&chart, &journal, as_of, as_of);
        assert_eq!(is.net_income, Decimal::ZERO);

        let aging = ReportService::delinquency_aging(std::iter::empty());
        assert!(aging.lines.is_empty());
        assert_eq!(aging.totals.total, Decimal::ZERO);

        let reserve = ReportService::reserve_funding(&[]);
        assert_eq!(reserve.recommended_annual, Decimal::ZERO);
    }

    #[rstest]
    #[case(dec!(200), dec!(350), AgingBucket::Current)]
    #[case(dec!(350), dec!(350), AgingBucket::Current)]
    #[case(dec!(351), dec!(350), AgingBucket::Days31To60)]
    #[case(dec!(700), dec!(350), AgingBucket::Days31To60)]
    #[case(dec!(701), dec!(350), AgingBucket::Days61To90)]
    #[case(dec!(1050), dec!(350), AgingBucket::Days61To90)]
    #[case(dec!(1051), dec!(350), AgingBucket::Over90)]
    #[case(dec!(0.01), dec!(0), AgingBucket::Over90)]
    fn test_aging_bucket_thresholds(
        #[case] balance: Decimal,
        #[case] fee: Decimal,
        #[case] expected: AgingBucket,
    ) {
        assert_eq!(AgingBucket::for_balance(balance, fee), expected);
    }

    #[test]
    fn test_delinquency_skips_settled_units_and_totals_buckets() {
        let mut paid_up = Unit::new(UnitNumber::new("101"), "A", dec!(350), UnitStatus::Occupied);
        paid_up.balance = Decimal::ZERO;
        let mut one_month = Unit::new(UnitNumber::new("102"), "B", dec!(350), UnitStatus::Occupied);
        one_month.balance = dec!(350);
        let mut three_months =
            Unit::new(UnitNumber::new("103"), "C", dec!(350), UnitStatus::Vacant);
        three_months.balance = dec!(1050);
        let mut no_fee = Unit::new(UnitNumber::new("104"), "D", Decimal::ZERO, UnitStatus::Occupied);
        no_fee.balance = dec!(75);

        let report = ReportService::delinquency_aging([&paid_up, &one_month, &three_months, &no_fee]);

        assert_eq!(report.lines.len(), 3);
        assert_eq!(report.totals.current, dec!(350));
        assert_eq!(report.totals.days_61_90, dec!(1050));
        assert_eq!(report.totals.over_90, dec!(75));
        assert_eq!(report.totals.total, dec!(1475));
    }

    #[test]
    fn test_budget_variance_zero_budget_guard() {
        let chart = fixture_chart();
        let journal = Journal::new();
        let categories = vec![BudgetCategory {
            id: BudgetCategoryId::new(),
            name: "Unbudgeted repairs".to_owned(),
            year: 2026,
            budgeted: Decimal::ZERO,
            account: None,
            expenses: vec![crate::budget::ExpenseRecord {
                description: "Emergency plumbing".to_owned(),
                amount: dec!(900),
                date: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
                vendor: None,
            }],
        }];

        let report = ReportService::budget_variance(&chart, &journal, &categories, 2026);
        assert_eq!(report.lines.len(), 1);
        let line = &report.lines[0];
        assert_eq!(line.variance.pct_used, Decimal::ZERO);
        assert_eq!(line.variance.actual, dec!(900));
        assert_eq!(line.variance.status, VarianceStatus::Unfavorable);
    }

    #[test]
    fn test_budget_variance_mapped_account_reads_ledger() {
        let chart = fixture_chart();
        let mut journal = Journal::new();
        journal
            .post(
                &chart,
                Posting {
                    date: NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
                    memo: "Pool pump repair".to_owned(),
                    debit_account: num("5010"),
                    credit_account: num("1110"),
                    amount: dec!(1200),
                    source: EntrySource::Expense,
                    source_ref: None,
                },
            )
            .unwrap();
        // prior-year expense on the same account is excluded
        journal
            .post(
                &chart,
                Posting {
                    date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
                    memo: "Old invoice".to_owned(),
                    debit_account: num("5010"),
                    credit_account: num("1110"),
                    amount: dec!(500),
                    source: EntrySource::Expense,
                    source_ref: None,
                },
            )
            .unwrap();

        let categories = vec![BudgetCategory {
            id: BudgetCategoryId::new(),
            name: "Maintenance".to_owned(),
            year: 2026,
            budgeted: dec!(5000),
            account: Some(num("5010")),
            expenses: Vec::new(),
        }];

        let report = ReportService::budget_variance(&chart, &journal, &categories, 2026);
        assert_eq!(report.lines[0].variance.actual, dec!(1200));
        assert_eq!(report.lines[0].variance.variance, dec!(3800));
        assert_eq!(report.totals.pct_used, dec!(24.00));
    }

    #[test]
    fn test_reserve_report_totals_and_recommendation() {
        let items = vec![
            ReserveItem {
                id: ReserveItemId::new(),
                name: "Roof replacement".to_owned(),
                estimated_cost: dec!(80000),
                current_funding: dec!(20000),
                years_remaining: 10,
                is_contingency: false,
            },
            ReserveItem {
                id: ReserveItemId::new(),
                name: "Contingency".to_owned(),
                estimated_cost: dec!(10000),
                current_funding: Decimal::ZERO,
                years_remaining: 1,
                is_contingency: true,
            },
        ];

        let report = ReportService::reserve_funding(&items);
        assert_eq!(report.total_estimated, dec!(90000));
        assert_eq!(report.total_gap, dec!(70000));
        // contingency's 10000/year is excluded from the recommendation
        assert_eq!(report.recommended_annual, dec!(6000.00));
    }

    #[test]
    fn test_balance_sheet_folds_net_income_into_equity() {
        let chart = fixture_chart();
        let mut journal = Journal::new();
        // bill 350, collect 350, spend 100
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        for (debit, credit, amount) in [
            ("1200", "4010", dec!(350)),
            ("1110", "1200", dec!(350)),
            ("5010", "1110", dec!(100)),
        ] {
            journal
                .post(
                    &chart,
                    Posting {
                        date,
                        memo: "t".to_owned(),
                        debit_account: num(debit),
                        credit_account: num(credit),
                        amount,
                        source: EntrySource::Manual,
                        source_ref: None,
                    },
                )
                .unwrap();
        }

        let report = ReportService::balance_sheet(&chart, &journal, date);
        assert_eq!(report.total_assets, dec!(250));
        assert_eq!(report.net_income_to_date, dec!(250));
        assert_eq!(report.total_equity, dec!(250));
        assert!(report.is_balanced);
    }
}
