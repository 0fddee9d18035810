// src/pid.rs

//! # PID Control Module
//!
//! This module provides compute functions and control data structures
//! to perform PID (Proportional-Integral-Derivative) control calculations.

pub mod altitude;
pub use altitude::*;
