//! The `State` module owns the customer directory and applies operations one
//! at a time, so mutations of an account never interleave.
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::bank::{
    Account, Customer, Directory, LedgerError, Money, StateError, Transaction, TransactionType,
    ValidationError, authenticate,
};

/// A transaction together with the channel for its outcome.
#[derive(Debug)]
pub struct Request {
    transaction: Transaction,
    reply: oneshot::Sender<Result<(), LedgerError>>,
}

/// Cloneable handle used to submit transactions to a running [`State`].
#[derive(Clone, Debug)]
pub struct LedgerHandle {
    sender: mpsc::Sender<Request>,
}

impl LedgerHandle {
    /// Submits a transaction and waits for it to be applied.
    pub async fn submit(&self, transaction: Transaction) -> Result<(), LedgerError> {
        let (reply, outcome) = oneshot::channel();
        self.sender
            .send(Request { transaction, reply })
            .await
            .map_err(|_| LedgerError::Unavailable)?;
        outcome.await.map_err(|_| LedgerError::Unavailable)?
    }
}

/// Represents the state of the banking system, including all customers.
pub struct State {
    /// Customers and their accounts.
    directory: Directory,
    /// A channel receiver for processing incoming requests.
    receiver: mpsc::Receiver<Request>,
}

impl State {
    /// Creates a new instance of `State` serving the given directory.
    pub fn new(directory: Directory, receiver: mpsc::Receiver<Request>) -> Self {
        State {
            directory,
            receiver,
        }
    }

    /// Creates a `State` along with the handle that feeds it.
    pub fn channel(directory: Directory, capacity: usize) -> (Self, LedgerHandle) {
        let (sender, receiver) = mpsc::channel(capacity);
        (State::new(directory, receiver), LedgerHandle { sender })
    }

    /// Gets the customer directory.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Authenticates the customer and applies the transaction to their account.
    fn process_transaction(&mut self, transaction: Transaction) -> Result<(), LedgerError> {
        let cpf = transaction.get_cpf();
        let customer = self.directory.customer(cpf);
        if !authenticate(customer, cpf, transaction.get_password()) {
            return Err(LedgerError::AuthenticationFailed);
        }

        match transaction.get_type() {
            TransactionType::Deposit => {
                let amount = required_amount(&transaction)?;
                self.own_account(cpf)?.deposit_cash(amount)
            }
            TransactionType::Check => {
                let amount = required_amount(&transaction)?;
                self.own_account(cpf)?.deposit_check(amount)
            }
            TransactionType::Withdrawal => {
                let amount = required_amount(&transaction)?;
                self.own_account(cpf)?.withdraw(amount)
            }
            TransactionType::Transfer => {
                let amount = required_amount(&transaction)?;
                let destination = transaction
                    .get_destination()
                    .ok_or(LedgerError::InvalidTransaction)?;
                let source = self
                    .own_account(cpf)?
                    .number()
                    .ok_or(StateError::Incomplete("account"))?
                    .to_string();
                transfer(&mut self.directory, &source, destination, amount)
            }
            TransactionType::Confirm => {
                let index = transaction
                    .get_movement()
                    .ok_or(LedgerError::InvalidTransaction)?;
                self.own_account(cpf)?.confirm_movement(index)
            }
        }
    }

    fn own_account(&mut self, cpf: &str) -> Result<&mut Account, LedgerError> {
        self.directory
            .customer_mut(cpf)
            .and_then(Customer::account_mut)
            .ok_or(StateError::Incomplete("account").into())
    }

    /// Runs the state management loop, processing requests from the receiver.
    pub async fn run(&mut self) {
        while let Some(request) = self.receiver.recv().await {
            let tx_type = request.transaction.get_type();
            let result = self.process_transaction(request.transaction);
            match &result {
                Ok(()) => debug!(?tx_type, "transaction applied"),
                Err(e) => warn!(?tx_type, "Error processing transaction: {e}"),
            }
            // The submitter may have stopped waiting.
            let _ = request.reply.send(result);
        }
        info!("ledger stopped");
    }
}

fn required_amount(transaction: &Transaction) -> Result<Money, LedgerError> {
    transaction
        .get_amount()
        .ok_or(LedgerError::InvalidTransaction)
}

/// Moves `amount` between two accounts as a withdrawal followed by a cash
/// deposit.
///
/// The two steps are not atomic, so everything that could make the deposit
/// fail is checked before the withdrawal.
pub fn transfer(
    directory: &mut Directory,
    source: &str,
    destination: &str,
    amount: Money,
) -> Result<(), LedgerError> {
    if amount <= 0 {
        return Err(ValidationError::NonPositiveAmount.into());
    }
    if directory.account(destination).is_none() {
        return Err(LedgerError::AccountDoesNotExist(destination.to_string()));
    }
    directory
        .account_mut(source)
        .ok_or_else(|| LedgerError::AccountDoesNotExist(source.to_string()))?
        .withdraw(amount)?;
    directory
        .account_mut(destination)
        .ok_or_else(|| LedgerError::AccountDoesNotExist(destination.to_string()))?
        .deposit_cash(amount)?;
    info!(source, destination, amount, "transfer completed");
    Ok(())
}
