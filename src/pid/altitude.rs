// src/pid/altitude.rs

//! # Altitude PID Control Module
//!
//! This module provides a compute function and control data structure
//! to perform altitude PID (Proportional-Integral-Derivative) control
//! calculations. Unlike the attitude loops of a flight stabilizer, the
//! altitude loop accumulates its integral without saturation and derives
//! the derivative term from the change in error between calls.

use crate::Number;
use piddiy::PidController;

/// Control data for the altitude PID compute callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AltitudeControlData<T> {
    /// The measured (estimated) altitude.
    pub measurement: T,
    /// The time delta since the last computation.
    pub dt: T,
}

/// Altitude PID compute callback.
///
/// Returns `(error, integral, derivative)`. The integral is a rectangular
/// accumulation of `error * dt` and is never clamped, so a sustained error
/// winds it up without bound. The derivative is taken against the error
/// stored by the previous call; on the first call that error is zero and
/// the derivative spikes to `error / dt`.
pub fn compute_altitude<T: Number>(
    pid: &mut PidController<T, AltitudeControlData<T>>,
    data: AltitudeControlData<T>,
) -> (T, T, T) {
    let error = pid.set_point - data.measurement;
    let integral = pid.integral + error * data.dt;
    let derivative = (error - pid.error) / data.dt;

    (error, integral, derivative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use fixed::types::I16F16;

    fn altitude_pid(
        set_point: f64,
        kp: f64,
        ki: f64,
        kd: f64,
    ) -> PidController<f64, AltitudeControlData<f64>> {
        let mut pid = PidController::new();
        pid.compute_fn(compute_altitude)
            .set_point(set_point)
            .kp(kp)
            .ki(ki)
            .kd(kd);
        pid
    }

    /// Test that the integral term keeps growing under sustained error.
    #[test]
    fn test_pid_altitude_integral_unclamped() {
        let mut pid = altitude_pid(50.0, 1.0, 5.0, 0.1);
        let data = AltitudeControlData {
            measurement: 0.0,
            dt: 1.0,
        };

        // A clamping controller would stop well short of this
        for _ in 0..10 {
            let _ = pid.compute(data);
        }

        let (_, integral, _) = compute_altitude(&mut pid, data);
        assert!(
            value_close(550.0, integral),
            "Integral should keep accumulating, got {integral}."
        );
    }

    /// Test PID response with non-zero set point and zero altitude.
    #[test]
    fn test_pid_altitude_response() {
        let mut pid = altitude_pid(10.0, 1.0, 1.0, 1.0);
        let data = AltitudeControlData {
            measurement: 0.0,
            dt: 1.0,
        };

        let (mut error, mut integral, mut derivative) = compute_altitude(&mut pid, data);
        let mut output = pid.compute(data);

        assert!(value_close(10.0, error), "Error should be 10.");
        assert!(
            value_close(10.0, integral),
            "Integral should start to accumulate."
        );
        assert!(
            value_close(10.0, derivative),
            "First derivative should spike to error / dt."
        );
        assert!(
            value_close(30.0, output),
            "Output should be the sum of terms."
        );

        // Call again to test accumulation
        (error, integral, derivative) = compute_altitude(&mut pid, data);
        output = pid.compute(data);
        assert!(value_close(10.0, error), "Error should be 10.");
        assert!(
            value_close(20.0, integral),
            "Integral should accumulate to 20."
        );
        assert!(value_close(0.0, derivative), "Derivative should be zero.");
        assert!(
            value_close(30.0, output),
            "Output should be the sum of terms."
        );
    }

    /// Test the derivative spike on the first call with a small time step.
    #[test]
    fn test_pid_altitude_first_call_derivative_spike() {
        let mut pid = altitude_pid(5.0, 0.0, 0.0, 1.0);
        let data = AltitudeControlData {
            measurement: 3.0,
            dt: 0.1,
        };

        let (_, _, derivative) = compute_altitude(&mut pid, data);
        assert!(
            value_close(20.0, derivative),
            "Derivative should be error / dt on the first call."
        );
    }

    /// Test that PID computes zero output for zero error with zero initial conditions.
    #[test]
    fn test_pid_altitude_zero_conditions() {
        let mut pid = altitude_pid(0.0, 1.0, 0.0, 0.0);
        let data = AltitudeControlData {
            measurement: 0.0,
            dt: 1.0,
        };
        let (error, integral, derivative) = compute_altitude(&mut pid, data);
        let output = pid.compute(data);

        assert!(value_close(0.0, error), "Error should be zero.");
        assert!(value_close(0.0, integral), "Integral should be zero.");
        assert!(value_close(0.0, derivative), "Derivative should be zero.");
        assert!(value_close(0.0, output), "Output should be zero.");
    }

    /// Test the callback on fixed point numbers.
    #[test]
    fn test_pid_altitude_fixed_point() {
        let mut pid = PidController::new();
        pid.compute_fn(compute_altitude)
            .set_point(I16F16::from_num(10.0))
            .kp(I16F16::from_num(1.0))
            .ki(I16F16::from_num(1.0))
            .kd(I16F16::from_num(1.0));
        let data = AltitudeControlData {
            measurement: I16F16::from_num(7.0),
            dt: I16F16::from_num(1.0),
        };

        let output = pid.compute(data);
        assert!(
            value_close(9.0, output.to_num::<f64>()),
            "Output should be the sum of terms."
        );
        assert!(
            value_close(3.0, pid.integral.to_num::<f64>()),
            "Integral should start to accumulate."
        );
    }
}
