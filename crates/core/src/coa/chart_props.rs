//! Property-based tests for the chart of accounts.

use proptest::prelude::*;
use strata_shared::AccountNumber;

use super::chart::Chart;
use super::types::{AccountKind, AccountType};

/// Strategy to generate one of the five account types.
fn account_type_strategy() -> impl Strategy<Value = AccountType> {
    prop_oneof![
        Just(AccountType::Asset),
        Just(AccountType::Liability),
        Just(AccountType::Equity),
        Just(AccountType::Income),
        Just(AccountType::Expense),
    ]
}

/// A small script of chart-building steps. Each step either starts a new
/// root section or attaches an account to a previously-created one.
#[derive(Debug, Clone)]
enum Step {
    Section(AccountType),
    Child { parent_index: usize, header: bool },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        account_type_strategy().prop_map(Step::Section),
        (0usize..64, any::<bool>()).prop_map(|(parent_index, header)| Step::Child {
            parent_index,
            header
        }),
    ]
}

/// Applies a script, numbering accounts sequentially. Child steps pick
/// their parent among existing headers by index (modulo), so every
/// attachment is valid.
fn build_chart(steps: &[Step]) -> Chart {
    let mut chart = Chart::new();
    let mut headers: Vec<AccountNumber> = Vec::new();
    for (i, step) in steps.iter().enumerate() {
        let number = AccountNumber::new(format!("{}", 1000 + i));
        match step {
            Step::Section(account_type) => {
                chart
                    .add_section(number.clone(), format!("Section {i}"), *account_type)
                    .ok();
                headers.push(number);
            }
            Step::Child {
                parent_index,
                header,
            } => {
                if headers.is_empty() {
                    continue;
                }
                let parent = headers[parent_index % headers.len()].clone();
                let kind = if *header {
                    AccountKind::Header
                } else {
                    AccountKind::Detail
                };
                if chart
                    .add_account(number.clone(), format!("Account {i}"), kind, &parent)
                    .is_ok()
                    && *header
                {
                    headers.push(number);
                }
            }
        }
    }
    chart
}

/// Walks to the root section of an account, counting hops.
fn root_of(chart: &Chart, number: &AccountNumber) -> (AccountNumber, usize) {
    let mut current = number.clone();
    let mut hops = 0;
    while let Some(parent) = chart.get(&current).and_then(|a| a.parent.clone()) {
        current = parent;
        hops += 1;
        assert!(hops <= chart.len(), "parent chain longer than chart; cycle?");
    }
    (current, hops)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Hierarchy shape
    // =========================================================================

    /// *For any* build script, every account's type equals its root
    /// section's type: type inheritance survives arbitrary nesting.
    #[test]
    fn prop_type_inherited_from_root(steps in prop::collection::vec(step_strategy(), 1..40)) {
        let chart = build_chart(&steps);
        for account in chart.iter() {
            let (root, _) = root_of(&chart, &account.number);
            let root_type = chart.get(&root).map(|a| a.account_type);
            prop_assert_eq!(Some(account.account_type), root_type);
        }
    }

    /// *For any* build script, parent chains terminate at a root in at
    /// most `len` hops: the tree has no cycles.
    #[test]
    fn prop_parent_chains_terminate(steps in prop::collection::vec(step_strategy(), 1..40)) {
        let chart = build_chart(&steps);
        for account in chart.iter() {
            let (_, hops) = root_of(&chart, &account.number);
            prop_assert!(hops < chart.len().max(1));
        }
    }

    /// *For any* build script, every non-root's parent exists and is a
    /// header.
    #[test]
    fn prop_parents_are_existing_headers(steps in prop::collection::vec(step_strategy(), 1..40)) {
        let chart = build_chart(&steps);
        for account in chart.iter() {
            if let Some(parent) = &account.parent {
                let parent_account = chart.get(parent);
                prop_assert!(parent_account.is_some_and(super::types::Account::is_header));
            }
        }
    }
}
