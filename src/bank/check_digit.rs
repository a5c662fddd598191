//! Módulo 11 check-digit calculation.
//!
//! Digits are weighted right-to-left starting at 2. The default cycle resets
//! the weight to 2 after 9; the CPF variant raises the ceiling so every
//! position gets its own weight.
use crate::bank::ValidationError;

/// Highest weight of the default cycle before it resets to 2.
pub const DEFAULT_CEILING: u32 = 9;

const FIRST_WEIGHT: u32 = 2;

/// Weight sequence applied to digits from the rightmost one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightCycle {
    weight: u32,
    ceiling: u32,
}

impl WeightCycle {
    /// Starts a cycle at 2 that resets after `ceiling`.
    pub fn new(ceiling: u32) -> Self {
        WeightCycle {
            weight: FIRST_WEIGHT,
            ceiling: ceiling.max(FIRST_WEIGHT),
        }
    }
}

impl Default for WeightCycle {
    fn default() -> Self {
        WeightCycle::new(DEFAULT_CEILING)
    }
}

impl Iterator for WeightCycle {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let current = self.weight;
        self.weight = if current >= self.ceiling {
            FIRST_WEIGHT
        } else {
            current + 1
        };
        Some(current)
    }
}

/// Computes the check digit of `digits` with the default 2..=9 cycle.
pub fn check_digit(digits: &str) -> Result<char, ValidationError> {
    weighted_digit(digits, WeightCycle::default())
}

/// Computes the check digit over the first `basis` digits, with weights
/// running from 2 up to `basis + 1`.
///
/// CPF validation calls this with a basis of 9 for the first check digit and
/// 10 for the second.
pub fn check_digit_with_basis(digits: &str, basis: usize) -> Result<char, ValidationError> {
    let body = digits.get(..basis).ok_or(ValidationError::NotNumeric)?;
    let ceiling = u32::try_from(basis + 1).map_err(|_| ValidationError::NotNumeric)?;
    weighted_digit(body, WeightCycle::new(ceiling))
}

fn weighted_digit(digits: &str, weights: WeightCycle) -> Result<char, ValidationError> {
    if digits.is_empty() {
        return Err(ValidationError::NotNumeric);
    }
    let mut sum = 0;
    for (ch, weight) in digits.chars().rev().zip(weights) {
        let value = ch.to_digit(10).ok_or(ValidationError::NotNumeric)?;
        sum += value * weight;
    }
    let remainder = sum % 11;
    let digit = if remainder < 2 { 0 } else { 11 - remainder };
    char::from_digit(digit, 10).ok_or(ValidationError::NotNumeric)
}
