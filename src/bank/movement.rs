//! Ledger entries recorded against an account.
use serde::Serialize;

use crate::bank::{
    Account, Id, LedgerError, Money, Record, StateError, ValidationError, serialize_money,
    validation,
};

/// Direction of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    /// Money coming into the account ('C').
    Credit,
    /// Money leaving the account ('D').
    Debit,
}

impl MovementKind {
    /// Gets the one letter code, `C` or `D`.
    pub fn code(self) -> char {
        match self {
            MovementKind::Credit => 'C',
            MovementKind::Debit => 'D',
        }
    }
}

impl TryFrom<char> for MovementKind {
    type Error = ValidationError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        match code {
            'C' => Ok(MovementKind::Credit),
            'D' => Ok(MovementKind::Debit),
            other => Err(ValidationError::MovementKind(other)),
        }
    }
}

/// A single entry in an account's history.
///
/// A movement only affects the balance when it is confirmed at the moment it
/// is posted with [`Account::post_movement`], or later through
/// [`Account::confirm_movement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    id: Id,
    /// Id of the owning account.
    account: Id,
    kind: Option<MovementKind>,
    value: Money,
    description: Option<String>,
    confirmed: bool,
}

impl Movement {
    /// Creates a confirmed movement for `account`.
    pub fn new(account: &Account) -> Self {
        Movement::with_confirmation(account, true)
    }

    /// Creates a movement that is pending until confirmed.
    pub fn pending(account: &Account) -> Self {
        Movement::with_confirmation(account, false)
    }

    fn with_confirmation(account: &Account, confirmed: bool) -> Self {
        Movement {
            id: 0,
            account: account.id(),
            kind: None,
            value: 0,
            description: None,
            confirmed,
        }
    }

    /// Gets the id of the owning account.
    pub fn account_id(&self) -> Id {
        self.account
    }

    /// Gets the direction, if one was set.
    pub fn kind(&self) -> Option<MovementKind> {
        self.kind
    }

    /// Sets the direction.
    pub fn set_kind(&mut self, kind: MovementKind) {
        self.kind = Some(kind);
    }

    /// Gets the value, always non-negative.
    pub fn value(&self) -> Money {
        self.value
    }

    /// Sets the value, checking debits against the total balance of `owner`.
    pub fn set_value(&mut self, value: Money, owner: &Account) -> Result<(), LedgerError> {
        if owner.id() != self.account {
            return Err(StateError::NotForThisAccount.into());
        }
        if value < 0 {
            return Err(ValidationError::Negative("Movement value").into());
        }
        if self.kind == Some(MovementKind::Debit) && value > owner.total_balance() {
            return Err(ValidationError::DebitExceedsTotal.into());
        }
        self.value = value;
        Ok(())
    }

    /// Gets the description, if one was set.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Sets the description. Blank descriptions are rejected.
    pub fn set_description(&mut self, description: &str) -> Result<(), ValidationError> {
        validation::validate_description(description)?;
        self.description = Some(description.to_string());
        Ok(())
    }

    /// Whether the movement has been applied to the balance.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub(crate) fn confirm(&mut self) {
        self.confirmed = true;
    }

    /// Signed effect of this movement on a balance.
    pub(crate) fn effect(&self) -> Money {
        match self.kind {
            Some(MovementKind::Credit) => self.value,
            Some(MovementKind::Debit) => -self.value,
            None => 0,
        }
    }

    /// Flat view of the movement used for CSV output.
    pub fn record<'a>(&'a self, account: &'a str, index: usize) -> MovementRecord<'a> {
        MovementRecord {
            account,
            index,
            kind: self.kind().map(MovementKind::code),
            value: self.value(),
            description: self.description().unwrap_or_default(),
            confirmed: self.is_confirmed(),
        }
    }
}

/// Serializable row of an account's history.
#[derive(Serialize, Debug)]
pub struct MovementRecord<'a> {
    account: &'a str,
    /// Position in the history, as used to confirm the movement.
    index: usize,
    kind: Option<char>,
    #[serde(serialize_with = "serialize_money")]
    value: Money,
    description: &'a str,
    confirmed: bool,
}

impl Record for Movement {
    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::bank::{
        Account, LedgerError, Movement, MovementKind, Record, StateError, ValidationError,
        to_money,
    };

    #[test]
    fn test_id() {
        let mut movement = Movement::new(&Account::new());
        movement.set_id(1);
        assert_eq!(movement.id(), 1);
    }

    #[test]
    fn test_confirmed_by_default() {
        let account = Account::new();
        assert!(Movement::new(&account).is_confirmed());
        assert!(!Movement::pending(&account).is_confirmed());
    }

    #[rstest]
    #[case('C', MovementKind::Credit)]
    #[case('D', MovementKind::Debit)]
    fn test_kind_codes(#[case] code: char, #[case] kind: MovementKind) {
        assert_eq!(MovementKind::try_from(code), Ok(kind));
        assert_eq!(kind.code(), code);
    }

    #[rstest]
    #[case(' ')]
    #[case('A')]
    #[case('c')]
    fn test_invalid_kind(#[case] code: char) {
        assert_eq!(
            MovementKind::try_from(code),
            Err(ValidationError::MovementKind(code))
        );
    }

    #[rstest]
    #[case("")]
    #[case("           ")]
    fn test_blank_description(#[case] description: &str) {
        let mut movement = Movement::new(&Account::new());
        assert!(movement.set_description(description).is_err());
        assert_eq!(movement.description(), None);
    }

    #[test]
    fn test_value() {
        let account = Account::new();
        let mut movement = Movement::new(&account);
        assert!(movement.set_value(to_money(1000.0).unwrap(), &account).is_ok());
        assert_eq!(movement.value(), to_money(1000.0).unwrap());
    }

    #[test]
    fn test_negative_value() {
        let account = Account::new();
        let mut movement = Movement::new(&account);
        movement.set_kind(MovementKind::Credit);
        assert!(matches!(
            movement.set_value(to_money(-4.5).unwrap(), &account),
            Err(LedgerError::Validation(ValidationError::Negative(_)))
        ));
        assert_eq!(movement.value(), 0);
    }

    #[test]
    fn test_debit_over_total_balance() {
        let mut account = Account::new();
        account.deposit_cash(to_money(300.0).unwrap()).unwrap();
        let mut movement = Movement::new(&account);
        movement.set_kind(MovementKind::Debit);
        assert!(matches!(
            movement.set_value(to_money(400.0).unwrap(), &account),
            Err(LedgerError::Validation(ValidationError::DebitExceedsTotal))
        ));
        assert!(movement.set_value(to_money(300.0).unwrap(), &account).is_ok());
    }

    #[test]
    fn test_value_for_other_account() {
        let account = Account::new();
        let mut other = Account::new();
        other.set_id(7);
        let mut movement = Movement::new(&account);
        assert!(matches!(
            movement.set_value(to_money(10.0).unwrap(), &other),
            Err(LedgerError::State(StateError::NotForThisAccount))
        ));
    }

    #[test]
    fn test_record() {
        let mut account = Account::new();
        account.deposit_check(to_money(250.0).unwrap()).unwrap();
        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .serialize(account.movements()[0].record("67332-3", 0))
            .unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            output,
            "account,index,kind,value,description,confirmed\n\
             67332-3,0,C,250.0,Check deposit,false\n"
        );
    }
}
