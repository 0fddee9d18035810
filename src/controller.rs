// src/controller.rs

//! # PID Altitude Controller
//!
//! This module wraps a `piddiy` PID controller configured with the
//! altitude compute callback. The controller owns its integral and
//! previous-error memory; both are updated exactly once per call to
//! [`AltitudeController::compute`], in call order. It is a step-sequential
//! object with no thread-safety contract.

use crate::pid::{compute_altitude, AltitudeControlData};
use crate::{Number, SimulationError};
use piddiy::PidController;

/// Configuration for the altitude PID gains and time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeControllerConfig<T: Number> {
    /// Proportional gain.
    pub kp: T,
    /// Integral gain.
    pub ki: T,
    /// Derivative gain.
    pub kd: T,
    /// Fixed time step between computations. Must be positive.
    pub dt: T,
}

impl<T: Number> AltitudeControllerConfig<T> {
    /// Creates a new configuration with a purely proportional unit gain
    /// and a unit time step. These should be replaced with values tuned
    /// for the vehicle.
    ///
    /// Example Usage
    /// ```
    /// use quadcopter_altitude_sim::controller::{AltitudeController, AltitudeControllerConfig};
    ///
    /// let mut config = AltitudeControllerConfig::<f64>::new();
    /// config.kp = 15.0;
    /// config.ki = 0.5;
    /// config.kd = 10.0;
    /// config.dt = 0.1;
    ///
    /// let controller = AltitudeController::with_config(config).unwrap();
    /// ```
    pub fn new() -> Self {
        Self {
            kp: T::one(),
            ki: T::zero(),
            kd: T::zero(),
            dt: T::one(),
        }
    }
}

impl<T: Number> Default for AltitudeControllerConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateful PID controller producing a thrust correction from an altitude
/// setpoint and a measured altitude.
pub struct AltitudeController<T: Number> {
    pid: PidController<T, AltitudeControlData<T>>,
    dt: T,
}

impl<T: Number> AltitudeController<T> {
    /// Creates a new controller using the provided configuration.
    ///
    /// Rejects a time step that is not strictly positive.
    pub fn with_config(config: AltitudeControllerConfig<T>) -> Result<Self, SimulationError> {
        if !config.dt.is_above_zero() {
            return Err(SimulationError::NumericDegeneracy(
                "controller time step must be positive",
            ));
        }

        let mut pid = PidController::new();
        pid.compute_fn(compute_altitude)
            .kp(config.kp)
            .ki(config.ki)
            .kd(config.kd);

        Ok(AltitudeController { pid, dt: config.dt })
    }

    /// Computes the control output for `set_point` given the `measured`
    /// altitude and advances the integral and previous-error memory.
    pub fn compute(&mut self, set_point: T, measured: T) -> T {
        self.pid.set_point(set_point);
        self.pid.compute(AltitudeControlData {
            measurement: measured,
            dt: self.dt,
        })
    }

    /// Accumulated integral of the error.
    pub fn integral(&self) -> T {
        self.pid.integral
    }

    /// Error seen by the most recent computation; zero before the first.
    pub fn previous_error(&self) -> T {
        self.pid.error
    }

    /// Fixed time step of the controller.
    pub fn dt(&self) -> T {
        self.dt
    }
}
