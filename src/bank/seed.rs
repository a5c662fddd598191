//! Bootstrap data for a fresh ledger.
use std::sync::Arc;

use crate::bank::{Account, Bank, Branch, Customer, Directory, LedgerError, Record, to_money};

/// The institution, its branches and the customer directory.
#[derive(Debug)]
pub struct Bootstrap {
    pub bank: Arc<Bank>,
    pub branches: Vec<Branch>,
    pub directory: Directory,
}

struct SeedCustomer {
    id: u64,
    name: &'static str,
    cpf: &'static str,
    account: &'static str,
    balance: f64,
    savings: bool,
    /// Overdraft limit; a positive value makes the account special.
    limit: f64,
}

const CUSTOMERS: [SeedCustomer; 4] = [
    SeedCustomer {
        id: 1,
        name: "Lis Azevedo",
        cpf: "23906078027",
        account: "12345-1",
        balance: 2000.0,
        savings: false,
        limit: 0.0,
    },
    SeedCustomer {
        id: 2,
        name: "Leonardo Andrade",
        cpf: "30612517071",
        account: "24355-7",
        balance: 7500.0,
        savings: false,
        limit: 15000.0,
    },
    SeedCustomer {
        id: 3,
        name: "Pablo Henrique",
        cpf: "36601046043",
        account: "67842-3",
        balance: 15000.0,
        savings: false,
        limit: 0.0,
    },
    SeedCustomer {
        id: 4,
        name: "Victor Hugo Makeks",
        cpf: "46566374086",
        account: "67332-3",
        balance: 10.0,
        savings: false,
        limit: 0.0,
    },
];

const DEFAULT_PASSWORD: &str = "1234";

/// Builds a new bank with one branch and the default customers.
///
/// Every call returns independent data; nothing is shared between calls.
pub fn bootstrap() -> Result<Bootstrap, LedgerError> {
    let mut bank = Bank::new("Itaívis", "IT");
    bank.set_id(1);
    bank.set_number("194")?;
    let bank = Arc::new(bank);

    let mut branch = Branch::new(Arc::clone(&bank));
    branch.set_id(1);
    branch.set_number("1867-8")?;

    let mut directory = Directory::new();
    for seed in &CUSTOMERS {
        directory.insert(seed_customer(seed)?)?;
    }

    Ok(Bootstrap {
        bank,
        branches: vec![branch],
        directory,
    })
}

fn seed_customer(seed: &SeedCustomer) -> Result<Customer, LedgerError> {
    let mut customer = Customer::new();
    customer.set_id(seed.id);
    customer.set_name(seed.name)?;
    customer.set_cpf(seed.cpf)?;
    customer.set_password(DEFAULT_PASSWORD)?;

    let mut account = if seed.limit > 0.0 {
        Account::special(to_money(seed.limit)?)?
    } else {
        Account::new()
    };
    account.set_id(seed.id);
    account.set_number(seed.account)?;
    account.set_savings(seed.savings);
    account.set_balance(to_money(seed.balance)?)?;
    customer.set_account(account);
    Ok(customer)
}
