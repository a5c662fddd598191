//! Customer operations submitted to the ledger.
use serde::{Deserialize, de};

use crate::bank::{Money, to_money};

/// Enum representing the type of operation.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Cash deposit into the customer's own account.
    Deposit,
    /// Check deposit, pending until confirmed.
    Check,
    Withdrawal,
    /// Withdrawal from the customer's account followed by a deposit into `destination`.
    Transfer,
    /// Confirms the pending movement at index `movement`.
    Confirm,
}

/// Custom deserializer for monetary values to handle fixed-point representation.
/// Amounts that do not fit in `Money` fail the row.
fn deserialize_money<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: de::Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    value.map(to_money).transpose().map_err(de::Error::custom)
}

/// An operation performed by an authenticated customer on their own account.
#[derive(Deserialize, Debug, Clone)]
pub struct Transaction {
    #[serde(rename = "type")]
    tx_type: TransactionType,

    /// CPF of the customer performing the operation.
    cpf: String,

    password: String,

    #[serde(default, deserialize_with = "deserialize_money")]
    amount: Option<Money>,

    /// Destination account number for transfers.
    #[serde(default)]
    destination: Option<String>,

    /// Index of the movement to confirm.
    #[serde(default)]
    movement: Option<usize>,
}

#[cfg(test)]
impl Transaction {
    pub fn new(tx_type: TransactionType, cpf: &str, password: &str) -> Self {
        Transaction {
            tx_type,
            cpf: cpf.to_string(),
            password: password.to_string(),
            amount: None,
            destination: None,
            movement: None,
        }
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_destination(mut self, destination: &str) -> Self {
        self.destination = Some(destination.to_string());
        self
    }

    pub fn with_movement(mut self, index: usize) -> Self {
        self.movement = Some(index);
        self
    }
}

impl Transaction {
    /// Gets the kind of operation.
    pub fn get_type(&self) -> TransactionType {
        self.tx_type
    }

    /// Gets the CPF of the customer performing the operation.
    pub fn get_cpf(&self) -> &str {
        &self.cpf
    }

    /// Gets the password supplied with the operation.
    pub fn get_password(&self) -> &str {
        &self.password
    }

    /// Gets the amount, absent for confirmations.
    pub fn get_amount(&self) -> Option<Money> {
        self.amount
    }

    /// Gets the destination account number of a transfer.
    pub fn get_destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// Gets the index of the movement to confirm.
    pub fn get_movement(&self) -> Option<usize> {
        self.movement
    }
}
