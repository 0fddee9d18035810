// src/number.rs

//! Numeric requirements shared by the generic control, estimation and
//! physics components.

use piddiy::Number as PiddiyNumber;

/// Custom trait to encapsulate base number requirements.
pub trait Number: PiddiyNumber {
    /// Returns `true` if the value is strictly greater than zero.
    fn is_above_zero(self) -> bool {
        Self::zero() < self
    }

    /// Returns `true` if the value is strictly less than zero.
    fn is_below_zero(self) -> bool {
        self < Self::zero()
    }
}

impl<T: PiddiyNumber> Number for T {}
