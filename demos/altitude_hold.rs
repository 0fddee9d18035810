// demos/altitude_hold.rs

use quadcopter_altitude_sim::{
    AltitudeController, AltitudeControllerConfig, ScalarKalmanFilter, SimulationError,
    VerticalState,
};

fn main() -> Result<(), SimulationError> {
    let mut config = AltitudeControllerConfig::<f64>::new();

    // Set the PID gains for the altitude loop.
    config.kp = 15.0;
    config.ki = 0.5;
    config.kd = 10.0;

    // Set the fixed time step.
    config.dt = 0.1;

    let mut controller = AltitudeController::with_config(config)?;
    let mut filter = ScalarKalmanFilter::new(0.1, 0.5)?;

    // Simulated vehicle and a fixed altitude setpoint
    let mass = 1.0;
    let gravity = 9.81;
    let set_point = 3.0;
    let mut state = VerticalState::grounded();

    // Deterministic sensor ripple stands in for noise
    let ripple = [0.2, -0.1, 0.05, -0.25, 0.1];

    println!("      t,   Target,     True,   Sensor, Estimate,   Thrust");
    for step in 0..=30 {
        let t = step as f64 * config.dt;

        // Perform the control computation
        let thrust = controller.compute(set_point, filter.estimate()) + mass * gravity;

        // simulate response
        state = state.integrate(thrust, mass, gravity, config.dt);
        let sensor = state.altitude + ripple[step % ripple.len()];
        let estimate = filter.update(sensor);

        // print results
        println!(
            "{:7.1}, {:-8.3}, {:-8.3}, {:-8.3}, {:-8.3}, {:-8.3}",
            t, set_point, state.altitude, sensor, estimate, thrust
        );
    }

    Ok(())
}
