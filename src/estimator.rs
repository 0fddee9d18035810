// src/estimator.rs

//! # Scalar Kalman Filter
//!
//! One-dimensional recursive estimator with a random-walk prior and no
//! control input. Each update runs a predict step, where the process
//! noise grows the error variance, followed by a measurement update that
//! blends the new reading into the estimate by the Kalman gain.
//!
//! For positive process noise `q` and measurement noise `r` the gain stays
//! inside `(0, 1)` and the error variance stays strictly positive.

use crate::{Number, SimulationError};

/// Stateful scalar Kalman filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarKalmanFilter<T: Number> {
    q: T,
    r: T,
    estimate: T,
    error_est: T,
}

impl<T: Number> ScalarKalmanFilter<T> {
    /// Creates a filter with process noise `q` and measurement noise `r`.
    ///
    /// The estimate starts at zero with a unit error variance. Both noise
    /// parameters must be strictly positive.
    pub fn new(q: T, r: T) -> Result<Self, SimulationError> {
        if !q.is_above_zero() {
            return Err(SimulationError::NumericDegeneracy(
                "process noise must be positive",
            ));
        }
        if !r.is_above_zero() {
            return Err(SimulationError::NumericDegeneracy(
                "measurement noise must be positive",
            ));
        }

        Ok(Self {
            q,
            r,
            estimate: T::zero(),
            error_est: T::one(),
        })
    }

    /// Folds `measurement` into the estimate and returns the new estimate.
    pub fn update(&mut self, measurement: T) -> T {
        // predict
        self.error_est = self.error_est + self.q;

        // update
        let gain = self.error_est / (self.error_est + self.r);
        self.estimate = self.estimate + gain * (measurement - self.estimate);
        self.error_est = self.error_est * (T::one() - gain);

        self.estimate
    }

    /// Current best estimate.
    pub fn estimate(&self) -> T {
        self.estimate
    }

    /// Current estimation error variance.
    pub fn error_estimate(&self) -> T {
        self.error_est
    }

    /// Process noise.
    pub fn q(&self) -> T {
        self.q
    }

    /// Measurement noise.
    pub fn r(&self) -> T {
        self.r
    }
}
