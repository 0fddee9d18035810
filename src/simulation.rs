// src/simulation.rs

//! # Closed-Loop Altitude Simulation
//!
//! Runs the mission sequencer, altitude controller, vertical physics and
//! Kalman filter together at a fixed time step. Each step:
//!
//! 1. queries the sequencer with the previous estimate and the step time,
//!    stopping when the mission is complete,
//! 2. computes thrust as the controller output plus a `mass * gravity`
//!    feed-forward,
//! 3. integrates the true vertical state,
//! 4. synthesizes a measurement by adding zero-mean Gaussian noise to the
//!    true altitude,
//! 5. folds the measurement into the filter to produce the next estimate,
//! 6. records `(time, true altitude, estimate)`.
//!
//! Step time is `step * dt` rather than an accumulated sum. The run ends
//! either when the mission completes or when the step budget runs out.
//! All randomness comes from the single generator handed to the
//! simulation, so a seeded generator reproduces a run exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::controller::{AltitudeController, AltitudeControllerConfig};
use crate::estimator::ScalarKalmanFilter;
use crate::mission::{CommandSequencer, MissionCommand};
use crate::physics::VerticalState;
use crate::{Number, SimulationError};

/// Upper bound on the samples reserved up front; longer runs grow the
/// history as they go.
pub const HISTORY_RESERVE_LIMIT: usize = 4096;

/// Physical constants, gains and limits for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Fixed time step in seconds.
    pub dt: f64,
    /// Vehicle mass in kilograms.
    pub mass: f64,
    /// Gravitational acceleration in m/s².
    pub gravity: f64,
    /// Proportional gain of the altitude controller.
    pub kp: f64,
    /// Integral gain of the altitude controller.
    pub ki: f64,
    /// Derivative gain of the altitude controller.
    pub kd: f64,
    /// Kalman filter process noise `q`.
    pub process_noise: f64,
    /// Kalman filter measurement noise `r`.
    pub measurement_noise: f64,
    /// Standard deviation of the altitude sensor noise in meters.
    pub noise_std_dev: f64,
    /// Step budget; the run stops here if the mission is still incomplete.
    pub max_steps: usize,
    /// RNG seed for deterministic runs. None = random.
    ///
    /// Only read by [`SimulationConfig::rng`] and [`run_mission_seeded`];
    /// [`run_mission`] and [`Simulation::new`] use the generator they are given.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Creates a configuration with the default quadcopter constants.
    pub fn new() -> Self {
        Self {
            dt: 0.1,
            mass: 1.0,
            gravity: 9.81,
            kp: 15.0,
            ki: 0.5,
            kd: 10.0,
            process_noise: 0.1,
            measurement_noise: 0.5,
            noise_std_dev: 0.5,
            max_steps: 500,
            seed: None,
        }
    }

    /// Rejects values that would make the numerics meaningless.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.dt.is_above_zero() || !self.dt.is_finite() {
            return Err(SimulationError::NumericDegeneracy("time step must be positive"));
        }
        if !self.mass.is_above_zero() || !self.mass.is_finite() {
            return Err(SimulationError::NumericDegeneracy("mass must be positive"));
        }
        if !self.gravity.is_finite() {
            return Err(SimulationError::NumericDegeneracy("gravity must be finite"));
        }
        if !(self.kp.is_finite() && self.ki.is_finite() && self.kd.is_finite()) {
            return Err(SimulationError::NumericDegeneracy("controller gains must be finite"));
        }
        if !self.process_noise.is_finite() || !self.measurement_noise.is_finite() {
            return Err(SimulationError::NumericDegeneracy("filter noise must be finite"));
        }
        if !(0.0..f64::INFINITY).contains(&self.noise_std_dev) {
            return Err(SimulationError::NumericDegeneracy(
                "sensor noise standard deviation must be non-negative",
            ));
        }
        Ok(())
    }

    /// Builds the random stream for a run: seeded if a seed is set,
    /// otherwise from system entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn controller_config(&self) -> AltitudeControllerConfig<f64> {
        AltitudeControllerConfig {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
            dt: self.dt,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    /// The sequencer ran out of commands.
    Completed,
    /// The step budget ran out with the mission incomplete.
    Exhausted,
}

/// One recorded simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Step time in seconds.
    pub time: f64,
    /// True altitude after the step.
    pub true_altitude: f64,
    /// Filtered altitude estimate after the step.
    pub estimate: f64,
}

/// Append-only log of completed steps, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationHistory {
    samples: Vec<Sample>,
}

impl SimulationHistory {
    /// Creates an empty history with room for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Appends a sample.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if no step has completed.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// All samples in step order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterates over the samples in step order.
    pub fn iter(&self) -> core::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Step times, for plotting.
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.time).collect()
    }

    /// True altitudes, for plotting.
    pub fn true_altitudes(&self) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.true_altitude).collect()
    }

    /// Filtered estimates, for plotting.
    pub fn estimates(&self) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.estimate).collect()
    }
}

impl<'a> IntoIterator for &'a SimulationHistory {
    type Item = &'a Sample;
    type IntoIter = core::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Final status and history of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// How the run ended.
    pub status: SimulationStatus,
    /// Every completed step.
    pub history: SimulationHistory,
}

/// Closed-loop simulation state.
pub struct Simulation<R: Rng> {
    config: SimulationConfig,
    sequencer: CommandSequencer,
    controller: AltitudeController<f64>,
    filter: ScalarKalmanFilter<f64>,
    state: VerticalState<f64>,
    sensor_noise: Normal<f64>,
    rng: R,
    history: SimulationHistory,
}

impl<R: Rng> Simulation<R> {
    /// Builds a simulation for `commands`, drawing sensor noise from `rng`.
    ///
    /// The vehicle starts at rest on the ground with a zero estimate.
    pub fn new(
        commands: Vec<MissionCommand>,
        config: SimulationConfig,
        rng: R,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let sequencer = CommandSequencer::new(commands)?;
        let controller = AltitudeController::with_config(config.controller_config())?;
        let filter = ScalarKalmanFilter::new(config.process_noise, config.measurement_noise)?;
        let sensor_noise = Normal::new(0.0, config.noise_std_dev).map_err(|_| {
            SimulationError::NumericDegeneracy(
                "sensor noise standard deviation must be non-negative",
            )
        })?;

        Ok(Self {
            config,
            sequencer,
            controller,
            filter,
            state: VerticalState::grounded(),
            sensor_noise,
            rng,
            history: SimulationHistory::with_capacity(config.max_steps.min(HISTORY_RESERVE_LIMIT)),
        })
    }

    /// Runs step `step` and records it.
    ///
    /// Returns `None` without touching any state other than the sequencer
    /// when the mission is already complete.
    pub fn step(&mut self, step: usize) -> Result<Option<Sample>, SimulationError> {
        let time = step as f64 * self.config.dt;
        let previous_estimate = self.filter.estimate();

        let Some(target) = self.sequencer.advance(previous_estimate, time)? else {
            return Ok(None);
        };

        let hover_thrust = self.config.mass * self.config.gravity;
        let thrust = self.controller.compute(target, previous_estimate) + hover_thrust;

        self.state = self
            .state
            .integrate(thrust, self.config.mass, self.config.gravity, self.config.dt);

        let measurement = self.state.altitude + self.sensor_noise.sample(&mut self.rng);
        let estimate = self.filter.update(measurement);

        log::trace!(
            "t={time:.2} target={target:.3} thrust={thrust:.3} altitude={altitude:.3} estimate={estimate:.3}",
            altitude = self.state.altitude
        );

        let sample = Sample {
            time,
            true_altitude: self.state.altitude,
            estimate,
        };
        self.history.push(sample);
        Ok(Some(sample))
    }

    /// Runs until the mission completes or the step budget is spent.
    pub fn run(mut self) -> Result<SimulationOutcome, SimulationError> {
        for step in 0..self.config.max_steps {
            if self.step(step)?.is_none() {
                log::info!(
                    "mission completed after {step} steps ({:.1}s)",
                    step as f64 * self.config.dt
                );
                return Ok(self.finish(SimulationStatus::Completed));
            }
        }

        log::info!(
            "step budget of {} exhausted at command {} of {}",
            self.config.max_steps,
            self.sequencer.cursor() + 1,
            self.sequencer.len()
        );
        Ok(self.finish(SimulationStatus::Exhausted))
    }

    fn finish(self, status: SimulationStatus) -> SimulationOutcome {
        SimulationOutcome {
            status,
            history: self.history,
        }
    }

    /// Steps recorded so far.
    pub fn history(&self) -> &SimulationHistory {
        &self.history
    }

    /// Current filtered altitude estimate.
    pub fn estimate(&self) -> f64 {
        self.filter.estimate()
    }

    /// Current true vertical state.
    pub fn state(&self) -> VerticalState<f64> {
        self.state
    }

    /// Mission sequencer.
    pub fn sequencer(&self) -> &CommandSequencer {
        &self.sequencer
    }

    /// Configuration of this run.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

/// Runs `commands` to completion or exhaustion and returns the outcome.
///
/// Example Usage
/// ```
/// use quadcopter_altitude_sim::mission::parse_mission;
/// use quadcopter_altitude_sim::simulation::{run_mission, SimulationConfig, SimulationStatus};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let commands = parse_mission("TAKEOFF 10\nWAIT 1\nLAND 0").unwrap();
/// let outcome = run_mission(commands, SimulationConfig::new(), StdRng::seed_from_u64(7)).unwrap();
///
/// assert!(outcome.history.len() <= 500);
/// if outcome.status == SimulationStatus::Completed {
///     println!("landed after {:.1}s", outcome.history.last().unwrap().time);
/// }
/// ```
pub fn run_mission<R: Rng>(
    commands: Vec<MissionCommand>,
    config: SimulationConfig,
    rng: R,
) -> Result<SimulationOutcome, SimulationError> {
    Simulation::new(commands, config, rng)?.run()
}

/// Runs `commands` on the random stream built from `config.seed`.
pub fn run_mission_seeded(
    commands: Vec<MissionCommand>,
    config: SimulationConfig,
) -> Result<SimulationOutcome, SimulationError> {
    run_mission(commands, config, config.rng())
}
