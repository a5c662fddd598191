//! Account management and movement posting for a banking system.
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::bank::{
    Id, Money, Movement, MovementKind, Record, ValidationError, serialize_money, validation,
};

/// Represents a bank account owned by a customer.
///
/// `balance + limit` always fits in [`Money`]; every mutation that would break
/// this fails with [`ValidationError::AmountOutOfRange`].
#[derive(Debug, Default, Clone)]
pub struct Account {
    id: Id,

    /// Account number in the `99999-9` format.
    number: Option<String>,

    /// Savings accounts are opt-in; every account starts as a checking account.
    savings: bool,

    /// Special accounts are the only ones allowed to carry a limit.
    special: bool,

    /// Money in the account, not counting the limit.
    balance: Money,

    /// Overdraft limit, always zero for regular accounts.
    limit: Money,

    /// Movement history, oldest first.
    movements: Vec<Movement>,
}

impl Account {
    /// Creates a regular checking account with no number and a zero balance.
    pub fn new() -> Self {
        Account::default()
    }

    /// Creates a special account with the given overdraft limit.
    pub fn special(limit: Money) -> Result<Self, LedgerError> {
        let mut account = Account::new();
        account.set_special(true);
        account.set_limit(limit)?;
        Ok(account)
    }

    /// Gets the account number, if one was assigned.
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Stores the account number. Once stored it cannot change, since the
    /// directory indexes accounts by number.
    pub fn set_number(&mut self, number: &str) -> Result<(), LedgerError> {
        if self.number.is_some() {
            return Err(StateError::NumberAlreadyAssigned("account").into());
        }
        validation::validate_account_number(number)?;
        self.number = Some(number.to_string());
        Ok(())
    }

    /// Whether this is a savings account.
    pub fn is_savings(&self) -> bool {
        self.savings
    }

    /// Marks the account as a savings account.
    pub fn set_savings(&mut self, savings: bool) {
        self.savings = savings;
    }

    /// Whether this account may use its limit.
    pub fn is_special(&self) -> bool {
        self.special
    }

    /// Marks the account as special. A regular account keeps a zero limit.
    pub fn set_special(&mut self, special: bool) {
        self.special = special;
    }

    /// Gets the balance, not counting the limit.
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Sets the balance directly. Negative balances are rejected.
    pub fn set_balance(&mut self, balance: Money) -> Result<(), ValidationError> {
        if balance < 0 {
            return Err(ValidationError::Negative("Balance"));
        }
        checked_total(balance, self.limit)?;
        self.balance = balance;
        Ok(())
    }

    /// Gets the overdraft limit.
    pub fn limit(&self) -> Money {
        self.limit
    }

    /// Sets the overdraft limit. Only special accounts may have a positive limit.
    pub fn set_limit(&mut self, limit: Money) -> Result<(), LedgerError> {
        if limit < 0 {
            return Err(ValidationError::Negative("Limit").into());
        }
        if !self.special && limit > 0 {
            return Err(StateError::LimitOnRegularAccount.into());
        }
        checked_total(self.balance, limit)?;
        self.limit = limit;
        Ok(())
    }

    /// Gets the movement history, oldest first.
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// Balance plus limit for special accounts, the plain balance otherwise.
    pub fn total_balance(&self) -> Money {
        if self.special {
            // Cannot saturate: every setter keeps the sum in range.
            self.balance.saturating_add(self.limit)
        } else {
            self.balance
        }
    }

    /// Appends a movement to the history. Confirmed movements are applied to
    /// the balance right away, pending ones are only recorded.
    ///
    /// Posting the same movement twice applies it twice.
    pub fn post_movement(&mut self, movement: Movement) -> Result<(), LedgerError> {
        if movement.account_id() != self.id {
            return Err(StateError::NotForThisAccount.into());
        }
        if movement.is_confirmed() {
            self.balance = self.applied(&movement)?;
        }
        self.movements.push(movement);
        Ok(())
    }

    /// Confirms the pending movement at `index` and applies it to the balance.
    ///
    /// A debit larger than the current balance is refused and stays pending.
    pub fn confirm_movement(&mut self, index: usize) -> Result<(), LedgerError> {
        let movement = self
            .movements
            .get(index)
            .ok_or(LedgerError::MovementDoesNotExist(index))?;
        if movement.is_confirmed() {
            return Err(StateError::AlreadyConfirmed.into());
        }
        if movement.kind() == Some(MovementKind::Debit) && movement.value() > self.balance {
            return Err(ValidationError::InsufficientFunds.into());
        }
        let balance = self.applied(movement)?;
        self.movements[index].confirm();
        self.balance = balance;
        debug!(account = ?self.number, index, balance = self.balance, "movement confirmed");
        Ok(())
    }

    /// Balance after applying `movement`, without touching the account.
    fn applied(&self, movement: &Movement) -> Result<Money, ValidationError> {
        let balance = self
            .balance
            .checked_add(movement.effect())
            .ok_or(ValidationError::AmountOutOfRange)?;
        checked_total(balance, self.limit)?;
        Ok(balance)
    }

    /// Withdraws `amount` from the balance. The limit cannot be used to withdraw.
    pub fn withdraw(&mut self, amount: Money) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        if self.balance < amount {
            return Err(ValidationError::InsufficientFunds.into());
        }
        let movement = self.movement(MovementKind::Debit, amount, "Withdrawal", true)?;
        self.post_movement(movement)?;
        debug!(account = ?self.number, amount, balance = self.balance, "withdrawal");
        Ok(())
    }

    /// Deposits cash, which is confirmed immediately.
    pub fn deposit_cash(&mut self, amount: Money) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        let movement = self.movement(MovementKind::Credit, amount, "Cash deposit", true)?;
        self.post_movement(movement)?;
        debug!(account = ?self.number, amount, balance = self.balance, "cash deposit");
        Ok(())
    }

    /// Records a check deposit as a pending credit. The balance only changes
    /// once the movement is confirmed.
    pub fn deposit_check(&mut self, amount: Money) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        let movement = self.movement(MovementKind::Credit, amount, "Check deposit", false)?;
        self.post_movement(movement)?;
        debug!(account = ?self.number, amount, "check deposit pending");
        Ok(())
    }

    fn movement(
        &self,
        kind: MovementKind,
        amount: Money,
        description: &str,
        confirmed: bool,
    ) -> Result<Movement, LedgerError> {
        let mut movement = if confirmed {
            Movement::new(self)
        } else {
            Movement::pending(self)
        };
        movement.set_kind(kind);
        movement.set_value(amount, self)?;
        movement.set_description(description)?;
        Ok(movement)
    }

    /// Flat view of the account and its holder used for CSV output.
    pub fn summary<'a>(&'a self, holder: &'a str) -> AccountSummary<'a> {
        AccountSummary {
            number: self.number().unwrap_or_default(),
            holder,
            savings: self.is_savings(),
            special: self.is_special(),
            balance: self.balance(),
            limit: self.limit(),
            total: self.total_balance(),
            pending: self
                .movements()
                .iter()
                .filter(|movement| !movement.is_confirmed())
                .count(),
        }
    }
}

fn checked_total(balance: Money, limit: Money) -> Result<Money, ValidationError> {
    balance
        .checked_add(limit)
        .ok_or(ValidationError::AmountOutOfRange)
}

impl Record for Account {
    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}

/// Serializable snapshot of an [`Account`].
#[derive(Serialize, Debug)]
pub struct AccountSummary<'a> {
    #[serde(rename = "account")]
    number: &'a str,
    holder: &'a str,
    savings: bool,
    special: bool,
    #[serde(serialize_with = "serialize_money")]
    balance: Money,
    #[serde(serialize_with = "serialize_money")]
    limit: Money,
    #[serde(serialize_with = "serialize_money")]
    total: Money,
    pending: usize,
}

/// Operations that are invalid given the current state of an entity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Only special accounts can have a limit")]
    LimitOnRegularAccount,
    #[error("The {0} number is already assigned")]
    NumberAlreadyAssigned(&'static str),
    #[error("Movement is not for this account")]
    NotForThisAccount,
    #[error("Movement is already confirmed")]
    AlreadyConfirmed,
    #[error("Customer is missing its {0}")]
    Incomplete(&'static str),
    #[error("Account {0} is already registered")]
    DuplicateAccount(String),
}

/// Errors that can occur while operating the ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error("Account {0} does not exist")]
    AccountDoesNotExist(String),
    #[error("Movement {0} does not exist")]
    MovementDoesNotExist(usize),
    #[error("Invalid credentials")]
    AuthenticationFailed,
    #[error("Invalid transaction")]
    InvalidTransaction,
    #[error("Ledger is not running")]
    Unavailable,
}
