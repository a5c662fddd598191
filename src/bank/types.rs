//! Types used throughout the banking system.
use crate::bank::ValidationError;

/// Decimal precision for monetary values.
/// This is used to convert floating-point values to fixed-point representation.
pub const DECIMAL_PRECISION: f64 = 10000.0;

/// Surrogate identifier shared by every persisted entity.
pub type Id = u64;

/// Money type, representing a fixed-point monetary value.
pub type Money = i64;

/// Converts a floating-point amount into fixed-point `Money`.
/// Non-finite amounts and amounts outside the `Money` range are rejected.
pub fn to_money(value: f64) -> Result<Money, ValidationError> {
    let scaled = (value * DECIMAL_PRECISION).round();
    // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
    if !scaled.is_finite() || scaled >= i64::MAX as f64 || scaled < i64::MIN as f64 {
        return Err(ValidationError::AmountOutOfRange);
    }
    Ok(scaled as Money)
}

/// Converts fixed-point `Money` back into a floating-point amount.
pub fn from_money(money: Money) -> f64 {
    money as f64 / DECIMAL_PRECISION
}

/// Serializes fixed-point `Money` as a decimal amount.
pub(crate) fn serialize_money<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(from_money(*money))
}

/// An entity identified by a surrogate id.
pub trait Record {
    /// Gets the surrogate id.
    fn id(&self) -> Id;
    /// Sets the surrogate id.
    fn set_id(&mut self, id: Id);
}
