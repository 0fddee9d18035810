// src/test_utils.rs

//! This module contains utilities for testing.

use num_traits::Float;

/// A constant defining the tolerance within which floating-point values
/// are considered close enough to be equal.
pub const TEST_TOLERANCE: f64 = 1e-5;

/// Checks if two floating point numbers are close enough to be considered
/// equal.
///
/// # Arguments
/// * `target` - The target value.
/// * `value` - The value to compare against the target.
///
/// # Returns
/// `true` if the absolute difference between `target` and `value` is less than
/// `TEST_TOLERANCE`, otherwise `false`.
pub fn value_close<T: Float>(target: T, value: T) -> bool {
    value_within(target, value, TEST_TOLERANCE)
}

/// Checks if two floating point numbers are within `tolerance` of each other.
///
/// # Arguments
/// * `target` - The target value.
/// * `value` - The value to compare against the target.
/// * `tolerance` - The largest accepted absolute difference.
///
/// # Returns
/// `true` if the absolute difference between `target` and `value` is less than
/// `tolerance`, otherwise `false`. Always `false` if either value is NaN.
pub fn value_within<T: Float>(target: T, value: T, tolerance: f64) -> bool {
    match T::from(tolerance) {
        Some(tolerance) => (target - value).abs() < tolerance,
        None => false,
    }
}
