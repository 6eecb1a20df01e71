//! The chart itself: an ordered map of accounts with hierarchy rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strata_shared::AccountNumber;

use super::error::CoaError;
use super::types::{Account, AccountKind, AccountType};

/// One association's chart of accounts.
///
/// Backed by a `BTreeMap` keyed on account number so iteration (and
/// therefore every report) is in stable numeric-string order.
///
/// The hierarchy is acyclic by construction: a parent must already
/// exist when a child is added, and there is no reparent operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    accounts: BTreeMap<AccountNumber, Account>,
}

impl Chart {
    /// Creates an empty chart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root header section with an explicit type.
    ///
    /// Sections are the only accounts whose type is caller-supplied;
    /// every descendant inherits it.
    pub fn add_section(
        &mut self,
        number: AccountNumber,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Result<(), CoaError> {
        if self.accounts.contains_key(&number) {
            return Err(CoaError::DuplicateNumber(number));
        }
        self.accounts.insert(
            number.clone(),
            Account {
                number,
                name: name.into(),
                account_type,
                kind: AccountKind::Header,
                parent: None,
                active: true,
            },
        );
        Ok(())
    }

    /// Adds an account under an existing header.
    ///
    /// The new account inherits the parent's type. `kind` may be
    /// `Header` to create a nested section.
    pub fn add_account(
        &mut self,
        number: AccountNumber,
        name: impl Into<String>,
        kind: AccountKind,
        parent: &AccountNumber,
    ) -> Result<(), CoaError> {
        if self.accounts.contains_key(&number) {
            return Err(CoaError::DuplicateNumber(number));
        }
        let parent_account = self
            .accounts
            .get(parent)
            .ok_or_else(|| CoaError::UnknownParent(parent.clone()))?;
        if !parent_account.is_header() {
            return Err(CoaError::ParentNotHeader(parent.clone()));
        }
        let account_type = parent_account.account_type;
        self.accounts.insert(
            number.clone(),
            Account {
                number,
                name: name.into(),
                account_type,
                kind,
                parent: Some(parent.clone()),
                active: true,
            },
        );
        Ok(())
    }

    /// Renames an account.
    pub fn rename(
        &mut self,
        number: &AccountNumber,
        name: impl Into<String>,
    ) -> Result<(), CoaError> {
        let account = self
            .accounts
            .get_mut(number)
            .ok_or_else(|| CoaError::UnknownAccount(number.clone()))?;
        account.name = name.into();
        Ok(())
    }

    /// Activates or deactivates an account.
    ///
    /// Deactivation is the soft alternative to removal: history stays,
    /// new postings are refused.
    pub fn set_active(&mut self, number: &AccountNumber, active: bool) -> Result<(), CoaError> {
        let account = self
            .accounts
            .get_mut(number)
            .ok_or_else(|| CoaError::UnknownAccount(number.clone()))?;
        account.active = active;
        Ok(())
    }

    /// Removes an account that has no children.
    ///
    /// The caller is responsible for checking journal references first;
    /// the chart only knows about structure.
    pub fn remove(&mut self, number: &AccountNumber) -> Result<Account, CoaError> {
        if !self.accounts.contains_key(number) {
            return Err(CoaError::UnknownAccount(number.clone()));
        }
        if self.has_children(number) {
            return Err(CoaError::HasChildren(number.clone()));
        }
        self.accounts
            .remove(number)
            .ok_or_else(|| CoaError::UnknownAccount(number.clone()))
    }

    /// Looks up an account.
    #[must_use]
    pub fn get(&self, number: &AccountNumber) -> Option<&Account> {
        self.accounts.get(number)
    }

    /// Looks up an account, erroring when absent.
    pub fn require(&self, number: &AccountNumber) -> Result<&Account, CoaError> {
        self.accounts
            .get(number)
            .ok_or_else(|| CoaError::UnknownAccount(number.clone()))
    }

    /// Returns `true` if the number is in the chart.
    #[must_use]
    pub fn contains(&self, number: &AccountNumber) -> bool {
        self.accounts.contains_key(number)
    }

    /// Direct children of an account, in number order.
    pub fn children_of<'a>(
        &'a self,
        number: &'a AccountNumber,
    ) -> impl Iterator<Item = &'a Account> {
        self.accounts
            .values()
            .filter(move |account| account.parent.as_ref() == Some(number))
    }

    /// Returns `true` if any account names this one as parent.
    #[must_use]
    pub fn has_children(&self, number: &AccountNumber) -> bool {
        self.children_of(number).next().is_some()
    }

    /// All accounts in number order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Detail accounts in number order.
    pub fn detail_accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts
            .values()
            .filter(|account| !account.is_header())
    }

    /// Root sections in number order.
    pub fn roots(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values().filter(|account| account.parent.is_none())
    }

    /// Number of accounts in the chart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns `true` when the chart has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> AccountNumber {
        AccountNumber::from(s)
    }

    fn sample_chart() -> Chart {
        let mut chart = Chart::new();
        chart
            .add_section(num("1000"), "Assets", AccountType::Asset)
            .unwrap();
        chart
            .add_account(num("1010"), "Operating Cash", AccountKind::Detail, &num("1000"))
            .unwrap();
        chart
            .add_section(num("4000"), "Income", AccountType::Income)
            .unwrap();
        chart
    }

    #[test]
    fn test_add_account_inherits_parent_type() {
        let chart = sample_chart();
        let cash = chart.get(&num("1010")).unwrap();
        assert_eq!(cash.account_type, AccountType::Asset);
        assert_eq!(cash.parent, Some(num("1000")));
    }

    #[test]
    fn test_duplicate_number_rejected() {
        let mut chart = sample_chart();
        let err = chart
            .add_account(num("1010"), "Dup", AccountKind::Detail, &num("1000"))
            .unwrap_err();
        assert_eq!(err, CoaError::DuplicateNumber(num("1010")));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut chart = sample_chart();
        let err = chart
            .add_account(num("2010"), "Payable", AccountKind::Detail, &num("2000"))
            .unwrap_err();
        assert_eq!(err, CoaError::UnknownParent(num("2000")));
    }

    #[test]
    fn test_detail_parent_rejected() {
        let mut chart = sample_chart();
        let err = chart
            .add_account(num("1011"), "Petty Cash", AccountKind::Detail, &num("1010"))
            .unwrap_err();
        assert_eq!(err, CoaError::ParentNotHeader(num("1010")));
    }

    #[test]
    fn test_nested_headers_allowed() {
        let mut chart = sample_chart();
        chart
            .add_account(num("1100"), "Bank Accounts", AccountKind::Header, &num("1000"))
            .unwrap();
        chart
            .add_account(num("1110"), "Reserve Cash", AccountKind::Detail, &num("1100"))
            .unwrap();
        let reserve = chart.get(&num("1110")).unwrap();
        assert_eq!(reserve.account_type, AccountType::Asset);
    }

    #[test]
    fn test_remove_with_children_blocked() {
        let mut chart = sample_chart();
        let err = chart.remove(&num("1000")).unwrap_err();
        assert_eq!(err, CoaError::HasChildren(num("1000")));
    }

    #[test]
    fn test_remove_leaf_succeeds() {
        let mut chart = sample_chart();
        let removed = chart.remove(&num("1010")).unwrap();
        assert_eq!(removed.name, "Operating Cash");
        assert!(!chart.contains(&num("1010")));
        // parent now childless, removable too
        chart.remove(&num("1000")).unwrap();
    }

    #[test]
    fn test_remove_unknown_is_an_error() {
        let mut chart = sample_chart();
        let err = chart.remove(&num("9999")).unwrap_err();
        assert_eq!(err, CoaError::UnknownAccount(num("9999")));
    }

    #[test]
    fn test_rename_and_set_active() {
        let mut chart = sample_chart();
        chart.rename(&num("1010"), "Operating Checking").unwrap();
        chart.set_active(&num("1010"), false).unwrap();
        let cash = chart.get(&num("1010")).unwrap();
        assert_eq!(cash.name, "Operating Checking");
        assert!(!cash.is_postable());
    }

    #[test]
    fn test_iteration_is_number_ordered() {
        let chart = sample_chart();
        let numbers: Vec<&str> = chart.iter().map(|a| a.number.as_str()).collect();
        assert_eq!(numbers, vec!["1000", "1010", "4000"]);
    }
}
