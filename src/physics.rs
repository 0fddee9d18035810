// src/physics.rs

//! Single-axis rigid body dynamics under gravity and thrust.
//!
//! Integration is semi-implicit Euler: velocity is advanced first and the
//! new velocity moves the altitude. The ground is an inelastic floor at
//! zero altitude.

use crate::Number;

/// True vertical state of the vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalState<T> {
    /// Height above the ground.
    pub altitude: T,
    /// Vertical velocity, positive upwards.
    pub velocity: T,
}

impl<T: Number> VerticalState<T> {
    /// Vehicle at rest on the ground.
    pub fn grounded() -> Self {
        Self {
            altitude: T::zero(),
            velocity: T::zero(),
        }
    }

    /// Returns the state after applying `thrust` for `dt`.
    ///
    /// See [`integrate`].
    pub fn integrate(self, thrust: T, mass: T, gravity: T, dt: T) -> Self {
        let (velocity, altitude) =
            integrate(thrust, mass, gravity, self.velocity, self.altitude, dt);
        Self { altitude, velocity }
    }
}

/// Advances `(velocity, altitude)` by one step of length `dt`.
///
/// Returns `(new_velocity, new_altitude)`. If the new altitude would be
/// below the ground, both are reset to zero. Neither value is bounded
/// above.
pub fn integrate<T: Number>(
    thrust: T,
    mass: T,
    gravity: T,
    velocity: T,
    altitude: T,
    dt: T,
) -> (T, T) {
    let accel = (thrust - mass * gravity) / mass;
    let velocity = velocity + accel * dt;
    let altitude = altitude + velocity * dt;

    if altitude.is_below_zero() {
        // Ground contact
        (T::zero(), T::zero())
    } else {
        (velocity, altitude)
    }
}
