//! Report generation service.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::budget::{BudgetCategory, Variance};
use crate::coa::{Account, AccountType, Chart};
use crate::ledger::{Balances, Journal};
use crate::reserve::ReserveItem;
use crate::units::Unit;

use super::types::{
    AccountLine, AgingBucket, BalanceSheetReport, BalanceSheetSection, BudgetVarianceLine,
    BudgetVarianceReport, DelinquencyLine, DelinquencyReport, DelinquencyTotals,
    IncomeStatementReport, IncomeStatementSection, ReserveLine, ReserveReport, TrialBalanceLine,
    TrialBalanceReport, TrialBalanceTotals,
};

/// Service for generating financial reports.
///
/// Every function here is a pure read: same state in, same report out.
pub struct ReportService;

impl ReportService {
    /// Generates a trial balance over the whole journal.
    ///
    /// Lists every detail account's raw leg totals; the report is
    /// balanced exactly when total debits equal total credits, which
    /// posting guarantees.
    #[must_use]
    pub fn trial_balance(chart: &Chart, journal: &Journal) -> TrialBalanceReport {
        let balances = Balances::new(chart, journal);
        let mut lines = Vec::new();
        let mut total_debits = Decimal::ZERO;
        let mut total_credits = Decimal::ZERO;

        for account in chart.detail_accounts() {
            let totals = balances.leg_totals(&account.number, None);
            total_debits += totals.debits;
            total_credits += totals.credits;
            lines.push(TrialBalanceLine {
                number: account.number.clone(),
                name: account.name.clone(),
                debits: totals.debits,
                credits: totals.credits,
            });
        }

        TrialBalanceReport {
            lines,
            totals: TrialBalanceTotals {
                total_debits,
                total_credits,
                is_balanced: total_debits == total_credits,
            },
        }
    }

    /// Generates a balance sheet as of a date (inclusive).
    ///
    /// Income and expense activity through the date is folded into
    /// equity as net income to date, so the accounting identity holds
    /// without a closing operation.
    #[must_use]
    pub fn balance_sheet(chart: &Chart, journal: &Journal, as_of: NaiveDate) -> BalanceSheetReport {
        let balances = Balances::new(chart, journal);
        let mut assets = BalanceSheetSection::default();
        let mut liabilities = BalanceSheetSection::default();
        let mut equity = BalanceSheetSection::default();
        let mut income_total = Decimal::ZERO;
        let mut expense_total = Decimal::ZERO;

        for account in chart.detail_accounts() {
            let balance = balances.of_account(account, Some(as_of));
            match account.account_type {
                AccountType::Asset => Self::add_line(&mut assets, account, balance),
                AccountType::Liability => Self::add_line(&mut liabilities, account, balance),
                AccountType::Equity => Self::add_line(&mut equity, account, balance),
                AccountType::Income => income_total += balance,
                AccountType::Expense => expense_total += balance,
            }
        }

        let net_income_to_date = income_total - expense_total;
        let total_assets = assets.total;
        let total_liabilities = liabilities.total;
        let total_equity = equity.total + net_income_to_date;
        let liabilities_and_equity = total_liabilities + total_equity;

        BalanceSheetReport {
            as_of,
            assets,
            liabilities,
            equity,
            net_income_to_date,
            total_assets,
            total_liabilities,
            total_equity,
            liabilities_and_equity,
            is_balanced: total_assets == liabilities_and_equity,
        }
    }

    /// Generates an income statement for a date window (inclusive on
    /// both ends).
    #[must_use]
    pub fn income_statement(
        chart: &Chart,
        journal: &Journal,
        start: NaiveDate,
        end: NaiveDate,
    ) -> IncomeStatementReport {
        let balances = Balances::new(chart, journal);
        let mut income = IncomeStatementSection::default();
        let mut expenses = IncomeStatementSection::default();

        for account in chart.detail_accounts() {
            let balance = balances.of_account_between(account, start, end);
            match account.account_type {
                AccountType::Income => Self::add_income_line(&mut income, account, balance),
                AccountType::Expense => Self::add_income_line(&mut expenses, account, balance),
                _ => {}
            }
        }

        let net_income = income.total - expenses.total;
        IncomeStatementReport {
            period_start: start,
            period_end: end,
            income,
            expenses,
            net_income,
        }
    }

    /// Generates the budget variance report for one year.
    ///
    /// Actuals come from the category's mapped expense account when it
    /// exists in the chart; otherwise from the category's recorded
    /// expense list. Percentages are guarded against zero budgets.
    #[must_use]
    pub fn budget_variance(
        chart: &Chart,
        journal: &Journal,
        categories: &[BudgetCategory],
        year: i32,
    ) -> BudgetVarianceReport {
        let balances = Balances::new(chart, journal);
        let mut lines = Vec::new();
        let mut total_budgeted = Decimal::ZERO;
        let mut total_actual = Decimal::ZERO;

        for category in categories.iter().filter(|c| c.year == year) {
            let actual = category
                .account
                .as_ref()
                .and_then(|number| chart.get(number))
                .map_or_else(
                    || category.recorded_total(),
                    |account| balances.of_account_in_year(account, year),
                );
            total_budgeted += category.budgeted;
            total_actual += actual;
            lines.push(BudgetVarianceLine {
                category: category.name.clone(),
                account: category.account.clone(),
                variance: Variance::for_expense(category.budgeted, actual),
            });
        }

        BudgetVarianceReport {
            year,
            lines,
            totals: Variance::for_expense(total_budgeted, total_actual),
        }
    }

    /// Generates the delinquency aging report.
    ///
    /// Buckets every unit with a positive balance by how many months of
    /// fees the balance represents. This is an approximation by fee
    /// multiples, not by invoice dates; a unit with no monthly fee and
    /// a positive balance ages straight to the oldest bucket.
    pub fn delinquency_aging<'a, I>(units: I) -> DelinquencyReport
    where
        I: IntoIterator<Item = &'a Unit>,
    {
        let mut lines = Vec::new();
        let mut totals = DelinquencyTotals::default();

        for unit in units {
            if unit.balance <= Decimal::ZERO {
                continue;
            }
            let bucket = AgingBucket::for_balance(unit.balance, unit.monthly_fee);
            match bucket {
                AgingBucket::Current => totals.current += unit.balance,
                AgingBucket::Days31To60 => totals.days_31_60 += unit.balance,
                AgingBucket::Days61To90 => totals.days_61_90 += unit.balance,
                AgingBucket::Over90 => totals.over_90 += unit.balance,
            }
            totals.total += unit.balance;
            lines.push(DelinquencyLine {
                unit: unit.number.clone(),
                owner: unit.owner.clone(),
                monthly_fee: unit.monthly_fee,
                balance: unit.balance,
                bucket,
            });
        }

        DelinquencyReport { lines, totals }
    }

    /// Generates the reserve funding report.
    #[must_use]
    pub fn reserve_funding(items: &[ReserveItem]) -> ReserveReport {
        let mut lines = Vec::new();
        let mut total_estimated = Decimal::ZERO;
        let mut total_funded = Decimal::ZERO;
        let mut total_gap = Decimal::ZERO;

        for item in items {
            total_estimated += item.estimated_cost;
            total_funded += item.current_funding;
            total_gap += item.funding_gap();
            lines.push(ReserveLine {
                id: item.id,
                name: item.name.clone(),
                estimated_cost: item.estimated_cost,
                current_funding: item.current_funding,
                funding_gap: item.funding_gap(),
                percent_funded: item.percent_funded(),
                annual_needed: item.annual_needed(),
                is_contingency: item.is_contingency,
            });
        }

        ReserveReport {
            lines,
            total_estimated,
            total_funded,
            total_gap,
            recommended_annual: Self::recommended_annual_reserve(items),
        }
    }

    /// Recommended annual reserve contribution: the sum of per-item
    /// annual needs over non-contingency items.
    #[must_use]
    pub fn recommended_annual_reserve(items: &[ReserveItem]) -> Decimal {
        items
            .iter()
            .filter(|item| !item.is_contingency)
            .map(ReserveItem::annual_needed)
            .sum()
    }

    fn add_line(section: &mut BalanceSheetSection, account: &Account, balance: Decimal) {
        section.total += balance;
        section.lines.push(AccountLine {
            number: account.number.clone(),
            name: account.name.clone(),
            account_type: account.account_type,
            balance,
        });
    }

    fn add_income_line(section: &mut IncomeStatementSection, account: &Account, balance: Decimal) {
        section.total += balance;
        section.lines.push(AccountLine {
            number: account.number.clone(),
            name: account.name.clone(),
            account_type: account.account_type,
            balance,
        });
    }
}
