// src/lib.rs

//! # Quadcopter Altitude Simulation
//!
//! This crate simulates a single-axis (vertical) quadcopter altitude
//! control loop. A mission script drives a target-altitude sequencer, a
//! PID controller computes thrust to reach each target, a rigid-body model
//! integrates altitude and velocity under gravity and thrust, and a scalar
//! Kalman filter estimates the altitude from noisy sensor readings. The
//! filtered estimate is fed back into the controller and the sequencer.
//!
//! The simulation is offline, single-threaded and discrete-time. The only
//! randomness is the sensor noise stream, which is supplied by the caller
//! so that runs can be reproduced from a seed.
//!
//! ```
//! use quadcopter_altitude_sim::{parse_mission, run_mission, SimulationConfig, SimulationStatus};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let commands = parse_mission("TAKEOFF 10\nWAIT 1\nLAND 0").unwrap();
//! let config = SimulationConfig {
//!     noise_std_dev: 0.0,
//!     ..SimulationConfig::new()
//! };
//! let outcome = run_mission(commands, config, StdRng::seed_from_u64(0)).unwrap();
//! assert_eq!(outcome.status, SimulationStatus::Completed);
//! ```

#![deny(missing_docs)]

pub mod controller;
pub mod error;
pub mod estimator;
pub mod mission;
pub mod number;
pub mod physics;
pub mod pid;
pub mod simulation;

#[doc(inline)]
pub use controller::{AltitudeController, AltitudeControllerConfig};
#[doc(inline)]
pub use error::SimulationError;
#[doc(inline)]
pub use estimator::ScalarKalmanFilter;
#[doc(inline)]
pub use mission::{
    load_mission, parse_mission, CommandKind, CommandSequencer, MissionCommand,
};
#[doc(inline)]
pub use number::Number;
#[doc(inline)]
pub use physics::VerticalState;
#[doc(inline)]
pub use simulation::*;

#[cfg(test)]
mod test_utils;
