//! Banks and the branches that belong to them.
use std::sync::Arc;

use crate::bank::{Id, LedgerError, Record, StateError, validation};

/// A banking institution.
///
/// Every bank is expected to have at least one [`Branch`] when it is
/// registered; the branches are held by the caller.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Bank {
    id: Id,
    name: String,
    code: String,
    number: Option<String>,
}

impl Bank {
    /// Creates a bank with no number.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Bank {
            name: name.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    /// Gets the bank name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short code, e.g. `IT`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Gets the three digit bank number, if one was assigned.
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Stores the three digit bank number. Once stored it cannot change.
    pub fn set_number(&mut self, number: &str) -> Result<(), LedgerError> {
        if self.number.is_some() {
            return Err(StateError::NumberAlreadyAssigned("bank").into());
        }
        validation::validate_bank_number(number)?;
        self.number = Some(number.to_string());
        Ok(())
    }
}

impl Record for Bank {
    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}

/// A branch of a [`Bank`]. A branch cannot exist without its bank.
#[derive(Debug, Clone)]
pub struct Branch {
    id: Id,
    bank: Arc<Bank>,
    number: Option<String>,
}

impl Branch {
    /// Creates a branch of `bank` with no number.
    pub fn new(bank: Arc<Bank>) -> Self {
        Branch {
            id: 0,
            bank,
            number: None,
        }
    }

    /// Gets the bank this branch belongs to.
    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// Gets the branch number, if one was assigned.
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Stores the branch number after checking its Módulo 11 digit.
    /// Once stored it cannot change.
    pub fn set_number(&mut self, number: &str) -> Result<(), LedgerError> {
        if self.number.is_some() {
            return Err(StateError::NumberAlreadyAssigned("branch").into());
        }
        validation::validate_branch_number(number)?;
        self.number = Some(number.to_string());
        Ok(())
    }
}

impl Record for Branch {
    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::bank::{Bank, Branch, LedgerError, StateError, ValidationError};

    #[test]
    fn test_bank_number() {
        let mut bank = Bank::new("Itaívis", "IT");
        assert!(bank.set_number("333").is_ok());
        assert_eq!(bank.number(), Some("333"));
    }

    #[test]
    fn test_invalid_bank_number_is_not_stored() {
        let mut bank = Bank::default();
        assert!(matches!(
            bank.set_number("4344"),
            Err(LedgerError::Validation(ValidationError::Format { .. }))
        ));
        assert!(matches!(
            bank.set_number(""),
            Err(LedgerError::Validation(ValidationError::Blank(_)))
        ));
        assert_eq!(bank.number(), None);
    }

    #[test]
    fn test_bank_number_is_immutable() {
        let mut bank = Bank::default();
        bank.set_number("194").unwrap();
        assert!(matches!(
            bank.set_number("333"),
            Err(LedgerError::State(StateError::NumberAlreadyAssigned(_)))
        ));
        assert_eq!(bank.number(), Some("194"));
    }

    #[test]
    fn test_branch_keeps_its_bank() {
        let bank = Arc::new(Bank::new("Itaívis", "IT"));
        let branch = Branch::new(Arc::clone(&bank));
        assert_eq!(branch.bank().name(), "Itaívis");
    }

    #[test]
    fn test_branch_number() {
        let mut branch = Branch::new(Arc::new(Bank::default()));
        assert!(branch.set_number("1867-8").is_ok());
        assert_eq!(branch.number(), Some("1867-8"));
        assert!(matches!(
            branch.set_number("0638-6"),
            Err(LedgerError::State(StateError::NumberAlreadyAssigned(_)))
        ));
    }

    #[test]
    fn test_branch_wrong_check_digit() {
        let mut branch = Branch::new(Arc::new(Bank::default()));
        assert!(matches!(
            branch.set_number("1867-7"),
            Err(LedgerError::Validation(ValidationError::CheckDigit(_)))
        ));
        assert!(matches!(
            branch.set_number("06385-6"),
            Err(LedgerError::Validation(ValidationError::Format { .. }))
        ));
        assert_eq!(branch.number(), None);
    }
}
