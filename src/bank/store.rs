//! In-memory lookups for customers and their accounts.
use std::collections::HashMap;

use crate::bank::{Account, Customer, LedgerError, StateError};

/// Customers keyed by CPF, with an index from account number to owner.
///
/// Keys are matched exactly; no trimming or punctuation removal is done.
#[derive(Debug, Default)]
pub struct Directory {
    customers: HashMap<String, Customer>,
    owners: HashMap<String, String>,
}

impl Directory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Directory::default()
    }

    /// Registers a customer under its CPF and indexes its account number.
    pub fn insert(&mut self, customer: Customer) -> Result<(), LedgerError> {
        let cpf = customer
            .cpf()
            .ok_or(StateError::Incomplete("CPF"))?
            .to_string();
        let number = customer
            .account()
            .and_then(Account::number)
            .ok_or(StateError::Incomplete("account"))?
            .to_string();
        if self.owners.get(&number).is_some_and(|owner| owner != &cpf) {
            return Err(StateError::DuplicateAccount(number).into());
        }
        if let Some(previous) = self.customers.get(&cpf) {
            if let Some(old_number) = previous.account().and_then(Account::number) {
                self.owners.remove(old_number);
            }
        }
        self.owners.insert(number, cpf.clone());
        self.customers.insert(cpf, customer);
        Ok(())
    }

    /// Gets the customer registered under `cpf`.
    pub fn customer(&self, cpf: &str) -> Option<&Customer> {
        self.customers.get(cpf)
    }

    /// Gets a mutable reference to the customer registered under `cpf`.
    pub fn customer_mut(&mut self, cpf: &str) -> Option<&mut Customer> {
        self.customers.get_mut(cpf)
    }

    /// Gets the account with the given number.
    pub fn account(&self, number: &str) -> Option<&Account> {
        let owner = self.owners.get(number)?;
        self.customers
            .get(owner)?
            .account()
            .filter(|account| account.number() == Some(number))
    }

    /// Gets a mutable reference to the account with the given number.
    pub fn account_mut(&mut self, number: &str) -> Option<&mut Account> {
        let owner = self.owners.get(number)?;
        self.customers
            .get_mut(owner)?
            .account_mut()
            .filter(|account| account.number() == Some(number))
    }

    /// All customers, ordered by account number.
    pub fn customers(&self) -> Vec<&Customer> {
        let mut customers: Vec<&Customer> = self.customers.values().collect();
        customers.sort_by(|a, b| account_number(a).cmp(&account_number(b)));
        customers
    }

    /// Number of registered customers.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Whether no customer is registered.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

fn account_number(customer: &Customer) -> Option<&str> {
    customer.account().and_then(Account::number)
}

#[cfg(test)]
mod tests {
    use crate::bank::{Account, Customer, Directory, LedgerError, StateError, to_money};

    fn customer(cpf: &str, number: &str) -> Customer {
        let mut customer = Customer::new();
        customer.set_cpf(cpf).unwrap();
        let mut account = Account::new();
        account.set_number(number).unwrap();
        customer.set_account(account);
        customer
    }

    #[test]
    fn test_lookup_by_exact_key() {
        let mut directory = Directory::new();
        directory
            .insert(customer("07514033424", "12345-1"))
            .unwrap();
        assert!(directory.customer("07514033424").is_some());
        assert!(directory.customer(" 07514033424").is_none());
        assert!(directory.customer("075.140.334-24").is_none());
        assert!(directory.account("12345-1").is_some());
        assert!(directory.account("12345-2").is_none());
    }

    #[test]
    fn test_account_is_owned_by_customer() {
        let mut directory = Directory::new();
        directory
            .insert(customer("07514033424", "12345-1"))
            .unwrap();
        directory
            .account_mut("12345-1")
            .unwrap()
            .deposit_cash(to_money(50.0).unwrap())
            .unwrap();
        let owner = directory.customer("07514033424").unwrap();
        assert_eq!(owner.account().unwrap().balance(), to_money(50.0).unwrap());
    }

    #[test]
    fn test_incomplete_customer() {
        let mut directory = Directory::new();
        assert!(matches!(
            directory.insert(Customer::new()),
            Err(LedgerError::State(StateError::Incomplete("CPF")))
        ));
        let mut no_account = Customer::new();
        no_account.set_cpf("07514033424").unwrap();
        assert!(matches!(
            directory.insert(no_account),
            Err(LedgerError::State(StateError::Incomplete("account")))
        ));
        assert!(directory.is_empty());
    }

    #[test]
    fn test_duplicate_account_number() {
        let mut directory = Directory::new();
        directory
            .insert(customer("07514033424", "12345-1"))
            .unwrap();
        assert!(matches!(
            directory.insert(customer("23906078027", "12345-1")),
            Err(LedgerError::State(StateError::DuplicateAccount(_)))
        ));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_registered_number_cannot_change() {
        let mut directory = Directory::new();
        directory
            .insert(customer("07514033424", "12345-1"))
            .unwrap();
        assert!(matches!(
            directory.account_mut("12345-1").unwrap().set_number("54321-0"),
            Err(LedgerError::State(StateError::NumberAlreadyAssigned("account")))
        ));
        assert!(directory.account("12345-1").is_some());
        assert!(directory.account("54321-0").is_none());
    }

    #[test]
    fn test_replacing_customer_reindexes_account() {
        let mut directory = Directory::new();
        directory
            .insert(customer("07514033424", "12345-1"))
            .unwrap();
        directory
            .insert(customer("07514033424", "54321-0"))
            .unwrap();
        assert!(directory.account("12345-1").is_none());
        assert!(directory.account("54321-0").is_some());
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_customers_sorted_by_account_number() {
        let mut directory = Directory::new();
        directory
            .insert(customer("23906078027", "67842-3"))
            .unwrap();
        directory
            .insert(customer("07514033424", "12345-1"))
            .unwrap();
        let numbers: Vec<_> = directory
            .customers()
            .into_iter()
            .filter_map(Customer::account)
            .filter_map(Account::number)
            .collect();
        assert_eq!(numbers, vec!["12345-1", "67842-3"]);
    }
}
