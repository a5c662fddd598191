//! Identifier validators for bank, branch, account and CPF numbers.
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::bank::check_digit::{check_digit, check_digit_with_basis};

static BANK_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("Invalid bank number regex pattern"));

static BRANCH_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-[0-9]$").expect("Invalid branch number regex pattern")
});

static ACCOUNT_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{5}-[0-9]$").expect("Invalid account number regex pattern")
});

static CPF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{11}$").expect("Invalid CPF regex pattern"));

/// Errors raised when an input fails shape or content checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    Blank(&'static str),
    #[error("Invalid {field}, expected the format {expected}")]
    Format {
        field: &'static str,
        expected: &'static str,
    },
    #[error("Invalid {0} check digit")]
    CheckDigit(&'static str),
    #[error("Invalid CPF: must contain exactly 11 digits")]
    CpfLength,
    #[error("Invalid CPF: all digits are repeated")]
    CpfRepeatedDigits,
    #[error("Invalid CPF")]
    CpfChecksum,
    #[error("Name must contain at least one surname")]
    MissingSurname,
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("Amount is outside the supported range")]
    AmountOutOfRange,
    #[error("Balance is lower than the requested amount")]
    InsufficientFunds,
    #[error("Debit value exceeds the account total balance")]
    DebitExceedsTotal,
    #[error("Movement kind must be 'C' (credit) or 'D' (debit), got {0:?}")]
    MovementKind(char),
    #[error("Expected numeric digits only")]
    NotNumeric,
}

fn require_present(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(())
}

/// Validates a three digit bank number such as `194`.
pub fn validate_bank_number(number: &str) -> Result<(), ValidationError> {
    require_present(number, "Bank number")?;
    if !BANK_NUMBER_PATTERN.is_match(number) {
        return Err(ValidationError::Format {
            field: "bank number",
            expected: "333",
        });
    }
    Ok(())
}

/// Validates a branch number such as `0638-6`, including its Módulo 11 digit.
pub fn validate_branch_number(number: &str) -> Result<(), ValidationError> {
    require_present(number, "Branch number")?;
    let captures = BRANCH_NUMBER_PATTERN
        .captures(number)
        .ok_or(ValidationError::Format {
            field: "branch number",
            expected: "0638-6",
        })?;
    let expected = check_digit(&captures[1])?;
    if !number.ends_with(expected) {
        return Err(ValidationError::CheckDigit("branch number"));
    }
    Ok(())
}

/// Validates the shape of an account number such as `12345-6`.
///
/// The trailing digit is not verified, unlike branch numbers.
pub fn validate_account_number(number: &str) -> Result<(), ValidationError> {
    require_present(number, "Account number")?;
    if !ACCOUNT_NUMBER_PATTERN.is_match(number) {
        return Err(ValidationError::Format {
            field: "account number",
            expected: "99999-9",
        });
    }
    Ok(())
}

/// Validates an unformatted CPF such as `07514033424`.
pub fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    require_present(cpf, "CPF")?;
    if !CPF_PATTERN.is_match(cpf) {
        return Err(ValidationError::CpfLength);
    }
    let mut chars = cpf.chars();
    let first = chars.next();
    if chars.all(|ch| Some(ch) == first) {
        return Err(ValidationError::CpfRepeatedDigits);
    }

    let first_digit = check_digit_with_basis(cpf, 9)?;
    let second_digit = check_digit_with_basis(cpf, 10)?;
    let computed = [first_digit, second_digit];
    if !cpf[9..].chars().eq(computed) {
        return Err(ValidationError::CpfChecksum);
    }
    Ok(())
}

/// Validates a full name: not blank and with at least one surname.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    require_present(name, "Name")?;
    if !name.trim().contains(' ') {
        return Err(ValidationError::MissingSurname);
    }
    Ok(())
}

/// Validates free text that must carry something other than whitespace.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    require_present(description, "Description")
}
