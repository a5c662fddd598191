//! Bank customers and credential checks.
use crate::bank::{Account, Id, Record, ValidationError, validation};

/// A customer of the bank, identified by CPF and owning a single account.
#[derive(Debug, Default, Clone)]
pub struct Customer {
    id: Id,
    cpf: Option<String>,
    name: Option<String>,
    password: Option<String>,
    account: Option<Account>,
}

impl Customer {
    /// Creates a customer with no data.
    pub fn new() -> Self {
        Customer::default()
    }

    /// Gets the unformatted CPF.
    pub fn cpf(&self) -> Option<&str> {
        self.cpf.as_deref()
    }

    /// Stores the CPF if it is valid; an invalid CPF leaves the previous one.
    pub fn set_cpf(&mut self, cpf: &str) -> Result<(), ValidationError> {
        validation::validate_cpf(cpf)?;
        self.cpf = Some(cpf.to_string());
        Ok(())
    }

    /// Gets the full name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Stores the name if it has at least one surname.
    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        validation::validate_name(name)?;
        self.name = Some(name.to_string());
        Ok(())
    }

    /// Gets the password in plain text.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Stores the password. Empty passwords are rejected.
    pub fn set_password(&mut self, password: &str) -> Result<(), ValidationError> {
        if password.is_empty() {
            return Err(ValidationError::Blank("Password"));
        }
        self.password = Some(password.to_string());
        Ok(())
    }

    /// Gets the customer's account.
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Gets a mutable reference to the customer's account.
    pub fn account_mut(&mut self) -> Option<&mut Account> {
        self.account.as_mut()
    }

    /// Replaces the customer's account.
    pub fn set_account(&mut self, account: Account) {
        self.account = Some(account);
    }
}

impl Record for Customer {
    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}

/// Checks a password against a customer resolved by the caller.
///
/// The CPF is not compared: identity is whatever customer the lookup found.
/// An absent customer never authenticates.
pub fn authenticate(customer: Option<&Customer>, _cpf: &str, password: &str) -> bool {
    customer.is_some_and(|customer| customer.password() == Some(password))
}

#[cfg(test)]
mod tests {
    use crate::bank::{Account, Customer, ValidationError, authenticate, to_money};

    fn lis() -> Customer {
        let mut customer = Customer::new();
        customer.set_cpf("07514033424").unwrap();
        customer.set_name("Lis Azevedo").unwrap();
        customer.set_password("1234").unwrap();
        let mut account = Account::new();
        account.set_number("12345-1").unwrap();
        account.set_balance(to_money(2000.0).unwrap()).unwrap();
        customer.set_account(account);
        customer
    }

    #[test]
    fn test_cpf() {
        let mut customer = Customer::new();
        assert!(customer.set_cpf("07514033424").is_ok());
        assert_eq!(customer.cpf(), Some("07514033424"));
    }

    #[test]
    fn test_invalid_cpf_keeps_previous_value() {
        let mut customer = Customer::new();
        assert_eq!(customer.set_cpf(""), Err(ValidationError::Blank("CPF")));
        assert_eq!(customer.cpf(), None);

        customer.set_cpf("07514033424").unwrap();
        assert_eq!(
            customer.set_cpf("10710410065"),
            Err(ValidationError::CpfChecksum)
        );
        assert_eq!(
            customer.set_cpf("99999999999"),
            Err(ValidationError::CpfRepeatedDigits)
        );
        assert_eq!(customer.cpf(), Some("07514033424"));
    }

    #[test]
    fn test_name() {
        let mut customer = Customer::new();
        assert_eq!(customer.set_name("  "), Err(ValidationError::Blank("Name")));
        assert_eq!(
            customer.set_name("LisAzevedo"),
            Err(ValidationError::MissingSurname)
        );
        assert_eq!(customer.name(), None);
        assert!(customer.set_name("Lis Azevedo").is_ok());
        assert_eq!(customer.name(), Some("Lis Azevedo"));
    }

    #[test]
    fn test_password() {
        let mut customer = Customer::new();
        assert_eq!(
            customer.set_password(""),
            Err(ValidationError::Blank("Password"))
        );
        assert_eq!(customer.password(), None);
        assert!(customer.set_password("1234").is_ok());
        assert_eq!(customer.password(), Some("1234"));
    }

    #[test]
    fn test_authenticate() {
        let customer = lis();
        assert!(authenticate(Some(&customer), "07514033424", "1234"));
        assert!(!authenticate(Some(&customer), "07514033424", "wrong"));
        assert!(!authenticate(None, "07514033424", "1234"));
        assert!(!authenticate(Some(&Customer::new()), " ", ""));
    }

    #[test]
    fn test_withdraw_full_balance() {
        let mut customer = lis();
        assert!(authenticate(Some(&customer), "07514033424", "1234"));
        let account = customer.account_mut().unwrap();
        account.withdraw(to_money(2000.0).unwrap()).unwrap();
        assert_eq!(account.total_balance(), 0);
    }
}
