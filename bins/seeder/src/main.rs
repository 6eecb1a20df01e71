//! Demo seeder for Strata development.
//!
//! Builds a small association in memory: chart of accounts, units, an
//! annual budget, a reserve study, then a first quarter of activity
//! with billing, payments, late fees, a special assessment, a work
//! order, and a correcting reversal. Prints every report and persists
//! a snapshot under the data directory.
//!
//! Usage: cargo run --bin seeder

use std::path::{Path, PathBuf};

use anyhow::{Context, ensure};
use chrono::{Datelike, NaiveDate};
use rust_decimal_macros::dec;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use strata_core::budget::ExpenseRecord;
use strata_core::engine::{LedgerEngine, Settings, standard_chart};
use strata_core::ledger::{EntrySource, Posting};
use strata_core::reports::{
    BalanceSheetReport, BudgetVarianceReport, DelinquencyReport, IncomeStatementReport,
    ReserveReport, TrialBalanceReport,
};
use strata_core::units::{PaymentMethod, UnitStatus};
use strata_shared::{AccountNumber, InvoiceId, ReserveItemId, UnitNumber};
use strata_store::{JsonSnapshotStore, SnapshotStore};

/// Name the demo association is seeded under.
const ASSOCIATION: &str = "Willow Creek HOA";
/// Day of the month assessments fall due.
const DUE_DAY: u32 = 15;
/// Year all demo activity lands in.
const FISCAL_YEAR: i32 = 2026;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strata=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir =
        PathBuf::from(std::env::var("STRATA_DATA_DIR").unwrap_or_else(|_| "./data".to_owned()));

    println!("Opening association...");
    let mut engine = open_association()?;

    println!("Seeding units...");
    seed_units(&mut engine)?;

    println!("Seeding {FISCAL_YEAR} budget...");
    seed_budget(&mut engine)?;

    println!("Seeding reserve study...");
    let (roof, pool) = seed_reserve(&mut engine);

    println!("Running first quarter...");
    run_first_quarter(&mut engine, roof, pool)?;

    print_reports(&engine);

    println!();
    println!("Saving snapshot to {}...", data_dir.display());
    persist_and_verify(&engine, &data_dir)?;

    println!("Seeding complete!");
    Ok(())
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(FISCAL_YEAR, month, day).expect("valid seed date")
}

/// Opens the association with the standard chart and posts its opening
/// balances.
fn open_association() -> anyhow::Result<LedgerEngine> {
    let chart = standard_chart()?;
    let mut engine = LedgerEngine::new(Settings::standard(ASSOCIATION, DUE_DAY), chart)?;

    engine.post(Posting {
        date: date(1, 1),
        memo: "Opening operating cash balance".to_owned(),
        debit_account: AccountNumber::from("1110"),
        credit_account: AccountNumber::from("3010"),
        amount: dec!(25_000),
        source: EntrySource::Manual,
        source_ref: None,
    })?;
    engine.post(Posting {
        date: date(1, 1),
        memo: "Opening reserve fund balance".to_owned(),
        debit_account: AccountNumber::from("1120"),
        credit_account: AccountNumber::from("3020"),
        amount: dec!(94_500),
        source: EntrySource::Manual,
        source_ref: None,
    })?;
    Ok(engine)
}

/// Registers the unit roster.
fn seed_units(engine: &mut LedgerEngine) -> anyhow::Result<()> {
    let roster = [
        ("101", "Ada Jensen", dec!(350), UnitStatus::Occupied),
        ("102", "Bruno Castillo", dec!(350), UnitStatus::Occupied),
        ("103", "Chen Wei", dec!(425), UnitStatus::Occupied),
        ("104", "Dana Whitfield", dec!(425), UnitStatus::Occupied),
        ("105", "Edith Vance", dec!(350), UnitStatus::Vacant),
        ("106", "Farid Osman", dec!(350), UnitStatus::Occupied),
    ];
    for (number, owner, fee, status) in roster {
        engine.add_unit(UnitNumber::from(number), owner, fee, status)?;
    }
    println!("  Registered {} units", engine.units().count());
    Ok(())
}

/// Lays out the operating budget: one category per expense account plus
/// an unmapped catch-all carrying recorded expenses.
fn seed_budget(engine: &mut LedgerEngine) -> anyhow::Result<()> {
    let mapped = [
        ("Landscaping", dec!(18_000), "5010"),
        ("Utilities", dec!(9_600), "5020"),
        ("Insurance", dec!(14_400), "5030"),
        ("Repairs & Maintenance", dec!(12_000), "5040"),
        ("Management Fees", dec!(21_600), "5050"),
    ];
    for (name, budgeted, account) in mapped {
        engine.add_budget_category(
            name,
            FISCAL_YEAR,
            budgeted,
            Some(AccountNumber::from(account)),
        )?;
    }

    let events = engine.add_budget_category("Community Events", FISCAL_YEAR, dec!(3_000), None)?;
    engine.record_budget_expense(
        events,
        ExpenseRecord {
            description: "Spring block party supplies".to_owned(),
            amount: dec!(420),
            date: date(4, 18),
            vendor: Some("Party Plus".to_owned()),
        },
    )?;
    engine.record_budget_expense(
        events,
        ExpenseRecord {
            description: "Summer picnic catering".to_owned(),
            amount: dec!(650),
            date: date(6, 20),
            vendor: Some("Rosa's Kitchen".to_owned()),
        },
    )?;
    println!(
        "  Budgeted {} categories",
        engine.budget_categories(FISCAL_YEAR).count()
    );
    Ok(())
}

/// Enters the reserve study line items. Returns the two items funded
/// later in the quarter.
fn seed_reserve(engine: &mut LedgerEngine) -> (ReserveItemId, ReserveItemId) {
    let roof = engine.add_reserve_item("Roof replacement", dec!(120_000), dec!(45_000), 10, false);
    let pool = engine.add_reserve_item("Pool resurfacing", dec!(30_000), dec!(12_500), 5, false);
    engine.add_reserve_item("Street repaving", dec!(80_000), dec!(22_000), 8, false);
    engine.add_reserve_item("Contingency", dec!(15_000), dec!(15_000), 1, true);
    println!("  Entered {} reserve items", engine.reserve_items().len());
    (roof, pool)
}

/// Runs January through March: billing, collections, a special
/// assessment, vendor work, month-end postings, and reserve funding.
fn run_first_quarter(
    engine: &mut LedgerEngine,
    roof: ReserveItemId,
    pool: ReserveItemId,
) -> anyhow::Result<()> {
    bill_and_collect(engine)?;
    levy_special_assessment(engine)?;
    run_pool_pump_work_order(engine)?;
    post_operating_expenses(engine)?;
    engine.fund_reserve_item(roof, dec!(1_500), date(3, 31))?;
    engine.fund_reserve_item(pool, dec!(500), date(3, 31))?;
    println!("  Transferred 2,000.00 to reserves");
    Ok(())
}

fn open_invoice_for(engine: &LedgerEngine, unit: &str, month: u32) -> anyhow::Result<InvoiceId> {
    let unit = UnitNumber::from(unit);
    engine
        .invoices_for_unit(&unit)
        .find(|invoice| invoice.is_open() && invoice.issued.month() == month)
        .map(|invoice| invoice.id)
        .with_context(|| format!("no open invoice for unit {unit} in month {month}"))
}

/// Issues three months of invoices and records the owners' payments.
///
/// Unit 103 pays February late and picks up a fee; unit 106's fee is
/// waived by the board; unit 102 stops paying after January.
fn bill_and_collect(engine: &mut LedgerEngine) -> anyhow::Result<()> {
    let mut issued = 0;
    for month in 1..=3 {
        issued += engine.issue_monthly_invoices(FISCAL_YEAR, month)?.len();
    }
    println!("  Issued {issued} invoices across three months");

    // January: everyone pays on time.
    for (unit, day, method) in [
        ("101", 8, PaymentMethod::Ach),
        ("102", 10, PaymentMethod::Check),
        ("103", 12, PaymentMethod::Ach),
        ("104", 9, PaymentMethod::Card),
        ("106", 14, PaymentMethod::Cash),
    ] {
        let invoice = open_invoice_for(engine, unit, 1)?;
        engine.pay_unit_invoice(invoice, date(1, day), method)?;
    }

    // February: 101 and 104 pay on time; 102 goes quiet.
    for (unit, day, method) in [
        ("101", 5, PaymentMethod::Ach),
        ("104", 11, PaymentMethod::Card),
    ] {
        let invoice = open_invoice_for(engine, unit, 2)?;
        engine.pay_unit_invoice(invoice, date(2, day), method)?;
    }

    // 103 misses the due date, picks up a fee, and settles both.
    let unit_103 = UnitNumber::from("103");
    engine.impose_late_fee(&unit_103, dec!(25), date(2, 16), "February assessment past due")?;
    let invoice = open_invoice_for(engine, "103", 2)?;
    engine.pay_unit_invoice(invoice, date(2, 27), PaymentMethod::Check)?;
    engine.record_unit_payment(
        &unit_103,
        dec!(25),
        date(3, 5),
        PaymentMethod::Check,
        Some("late fee receipt 1042".to_owned()),
    )?;

    // 106 is also late, but the board waives the fee.
    let unit_106 = UnitNumber::from("106");
    engine.impose_late_fee(&unit_106, dec!(25), date(2, 16), "February assessment past due")?;
    engine.waive_late_fee(&unit_106, 0)?;
    let invoice = open_invoice_for(engine, "106", 2)?;
    engine.pay_unit_invoice(invoice, date(3, 3), PaymentMethod::Check)?;

    // March: everyone but 102 pays.
    for (unit, day, method) in [
        ("101", 6, PaymentMethod::Ach),
        ("103", 10, PaymentMethod::Ach),
        ("104", 8, PaymentMethod::Card),
        ("106", 12, PaymentMethod::Check),
    ] {
        let invoice = open_invoice_for(engine, unit, 3)?;
        engine.pay_unit_invoice(invoice, date(3, day), method)?;
    }

    println!("  {} invoices remain open", engine.open_invoices().count());
    Ok(())
}

/// Levies the clubhouse roof share on two units and collects one.
fn levy_special_assessment(engine: &mut LedgerEngine) -> anyhow::Result<()> {
    let unit_101 = UnitNumber::from("101");
    let unit_104 = UnitNumber::from("104");
    engine.add_special_assessment(
        &unit_101,
        dec!(1_200),
        date(3, 20),
        "Clubhouse roof repair share",
    )?;
    engine.add_special_assessment(
        &unit_104,
        dec!(1_200),
        date(3, 20),
        "Clubhouse roof repair share",
    )?;
    engine.mark_special_assessment_paid(&unit_101, 0, date(3, 28))?;
    println!("  Collected 1 of 2 special assessments");
    Ok(())
}

/// Walks one work order through its whole lifecycle.
fn run_pool_pump_work_order(engine: &mut LedgerEngine) -> anyhow::Result<()> {
    let order = engine.create_work_order(
        "Replace pool pump",
        "BlueWave Pool Service",
        dec!(1_800),
        AccountNumber::from("5040"),
        date(3, 2),
    )?;
    engine.approve_work_order(order)?;
    engine.receive_work_order_invoice(order, date(3, 18), Some(dec!(1_925)))?;
    engine.pay_work_order(order, date(3, 25))?;
    println!("  Paid work order {order}");
    Ok(())
}

/// Posts the quarter's recurring vendor bills, then corrects a
/// double-posted utility bill with a reversal.
fn post_operating_expenses(engine: &mut LedgerEngine) -> anyhow::Result<()> {
    let bills = [
        ("5050", 1, 31, dec!(1_800), "January management fee"),
        ("5050", 2, 28, dec!(1_800), "February management fee"),
        ("5050", 3, 31, dec!(1_800), "March management fee"),
        ("5010", 1, 28, dec!(1_450), "January grounds maintenance"),
        ("5010", 2, 25, dec!(1_450), "February grounds maintenance"),
        ("5010", 3, 27, dec!(1_450), "March grounds maintenance"),
        ("5020", 1, 20, dec!(780), "January utilities"),
        ("5020", 2, 19, dec!(810), "February utilities"),
        ("5020", 3, 29, dec!(795), "March utilities"),
        ("5030", 1, 15, dec!(3_600), "Q1 insurance premium"),
    ];
    for (account, month, day, amount, memo) in bills {
        engine.post(Posting {
            date: date(month, day),
            memo: memo.to_owned(),
            debit_account: AccountNumber::from(account),
            credit_account: AccountNumber::from("1110"),
            amount,
            source: EntrySource::Expense,
            source_ref: None,
        })?;
    }

    // The March utility bill went in twice; reverse the duplicate.
    let duplicate = engine.post(Posting {
        date: date(3, 29),
        memo: "March utilities".to_owned(),
        debit_account: AccountNumber::from("5020"),
        credit_account: AccountNumber::from("1110"),
        amount: dec!(795),
        source: EntrySource::Expense,
        source_ref: None,
    })?;
    engine.reverse(duplicate, date(3, 30), "Duplicate March utility bill")?;
    println!("  Posted {} vendor bills and corrected a duplicate", bills.len());
    Ok(())
}

/// Prints every report the engine produces.
fn print_reports(engine: &LedgerEngine) {
    print_trial_balance(&engine.trial_balance());
    print_balance_sheet(&engine.balance_sheet(date(3, 31)));
    print_income_statement(&engine.income_statement(date(1, 1), date(3, 31)));
    print_budget_variance(&engine.budget_variance(FISCAL_YEAR));
    print_delinquency(&engine.delinquency_aging());
    print_reserve(&engine.reserve_funding());
}

fn heading(title: &str) {
    println!();
    println!("=== {title} ===");
}

fn print_trial_balance(report: &TrialBalanceReport) {
    heading("Trial Balance");
    println!(
        "{:<6} {:<26} {:>12} {:>12}",
        "Acct", "Account", "Debits", "Credits"
    );
    for line in &report.lines {
        println!(
            "{:<6} {:<26} {:>12.2} {:>12.2}",
            line.number.as_str(),
            line.name,
            line.debits,
            line.credits
        );
    }
    println!(
        "{:<33} {:>12.2} {:>12.2}  {}",
        "Totals",
        report.totals.total_debits,
        report.totals.total_credits,
        if report.totals.is_balanced {
            "balanced"
        } else {
            "OUT OF BALANCE"
        }
    );
}

fn print_balance_sheet(report: &BalanceSheetReport) {
    heading(&format!("Balance Sheet as of {}", report.as_of));
    println!("Assets");
    for line in &report.assets.lines {
        println!(
            "  {:<6} {:<26} {:>12.2}",
            line.number.as_str(),
            line.name,
            line.balance
        );
    }
    println!("  {:<33} {:>12.2}", "Total assets", report.total_assets);
    println!("Liabilities");
    for line in &report.liabilities.lines {
        println!(
            "  {:<6} {:<26} {:>12.2}",
            line.number.as_str(),
            line.name,
            line.balance
        );
    }
    println!(
        "  {:<33} {:>12.2}",
        "Total liabilities", report.total_liabilities
    );
    println!("Equity");
    for line in &report.equity.lines {
        println!(
            "  {:<6} {:<26} {:>12.2}",
            line.number.as_str(),
            line.name,
            line.balance
        );
    }
    println!(
        "  {:<33} {:>12.2}",
        "Net income to date", report.net_income_to_date
    );
    println!("  {:<33} {:>12.2}", "Total equity", report.total_equity);
    println!(
        "{:<35} {:>12.2}  {}",
        "Liabilities and equity",
        report.liabilities_and_equity,
        if report.is_balanced {
            "balanced"
        } else {
            "OUT OF BALANCE"
        }
    );
}

fn print_income_statement(report: &IncomeStatementReport) {
    heading(&format!(
        "Income Statement {} to {}",
        report.period_start, report.period_end
    ));
    println!("Income");
    for line in &report.income.lines {
        println!(
            "  {:<6} {:<26} {:>12.2}",
            line.number.as_str(),
            line.name,
            line.balance
        );
    }
    println!("  {:<33} {:>12.2}", "Total income", report.income.total);
    println!("Expenses");
    for line in &report.expenses.lines {
        println!(
            "  {:<6} {:<26} {:>12.2}",
            line.number.as_str(),
            line.name,
            line.balance
        );
    }
    println!("  {:<33} {:>12.2}", "Total expenses", report.expenses.total);
    println!("{:<35} {:>12.2}", "Net income", report.net_income);
}

fn print_budget_variance(report: &BudgetVarianceReport) {
    heading(&format!("Budget Variance {}", report.year));
    println!(
        "{:<24} {:<6} {:>12} {:>12} {:>12} {:>8}",
        "Category", "Acct", "Budgeted", "Actual", "Variance", "Used"
    );
    for line in &report.lines {
        println!(
            "{:<24} {:<6} {:>12.2} {:>12.2} {:>12.2} {:>7}%  {}",
            line.category,
            line.account.as_ref().map_or("-", AccountNumber::as_str),
            line.variance.budgeted,
            line.variance.actual,
            line.variance.variance,
            line.variance.pct_used,
            line.variance.status.as_str()
        );
    }
    println!(
        "{:<31} {:>12.2} {:>12.2} {:>12.2} {:>7}%",
        "Totals",
        report.totals.budgeted,
        report.totals.actual,
        report.totals.variance,
        report.totals.pct_used
    );
}

fn print_delinquency(report: &DelinquencyReport) {
    heading("Delinquency Aging");
    if report.lines.is_empty() {
        println!("No delinquent units");
        return;
    }
    println!(
        "{:<6} {:<20} {:>10} {:>12} {:>7}",
        "Unit", "Owner", "Fee", "Balance", "Aging"
    );
    for line in &report.lines {
        println!(
            "{:<6} {:<20} {:>10.2} {:>12.2} {:>7}",
            line.unit.as_str(),
            line.owner,
            line.monthly_fee,
            line.balance,
            line.bucket.as_str()
        );
    }
    let totals = &report.totals;
    println!(
        "Totals  0-30 {:.2} | 31-60 {:.2} | 61-90 {:.2} | 90+ {:.2} | total {:.2}",
        totals.current, totals.days_31_60, totals.days_61_90, totals.over_90, totals.total
    );
}

fn print_reserve(report: &ReserveReport) {
    heading("Reserve Funding");
    println!(
        "{:<20} {:>12} {:>12} {:>12} {:>8} {:>10}",
        "Item", "Estimated", "Funded", "Gap", "Funded%", "Annual"
    );
    for line in &report.lines {
        println!(
            "{:<20} {:>12.2} {:>12.2} {:>12.2} {:>7}% {:>10.2}{}",
            line.name,
            line.estimated_cost,
            line.current_funding,
            line.funding_gap,
            line.percent_funded,
            line.annual_needed,
            if line.is_contingency {
                "  (contingency)"
            } else {
                ""
            }
        );
    }
    println!(
        "{:<20} {:>12.2} {:>12.2} {:>12.2}",
        "Totals", report.total_estimated, report.total_funded, report.total_gap
    );
    println!(
        "Recommended annual contribution: {:.2}",
        report.recommended_annual
    );
}

/// Saves a snapshot and reads it back to prove the round trip.
fn persist_and_verify(engine: &LedgerEngine, data_dir: &Path) -> anyhow::Result<()> {
    let store = JsonSnapshotStore::new(data_dir)?;
    let snapshot = engine.snapshot();
    store.save(&snapshot)?;

    let loaded = store
        .load(ASSOCIATION)?
        .context("saved snapshot did not load back")?;
    ensure!(loaded == snapshot, "reloaded snapshot differs from saved state");

    let restored = LedgerEngine::restore(loaded)?;
    ensure!(
        restored.revision() == engine.revision(),
        "restored revision differs"
    );
    println!(
        "  Snapshot verified at revision {} ({} journal entries)",
        restored.revision(),
        restored.entries().len()
    );
    Ok(())
}
