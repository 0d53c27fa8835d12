//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units on public inputs and outputs
//! (e.g., mass, power, voltage). This module provides the motor constants that
//! aren't included in [`uom`], plus the gravitational acceleration used
//! throughout sizing.
//!
//! ## Motor constants
//!
//! A motor's torque constant `Kt` (N·m/A) shares its dimension with magnetic
//! flux, so it is constructed with [`weber`](uom::si::magnetic_flux::weber):
//!
//! ```
//! use uom::si::magnetic_flux::weber;
//! use uav_sizing::support::units::TorqueConstant;
//!
//! let kt = TorqueConstant::new::<weber>(0.02);
//! let kv = kt.recip();
//! assert!((kv.value - 50.0).abs() < 1e-12);
//! ```
//!
//! Its reciprocal is the [`SpeedConstant`] (rad/(V·s)).

mod quantities;

pub use quantities::{SpeedConstant, TorqueConstant};

use uom::si::{acceleration::meter_per_second_squared, f64::Acceleration};

/// Gravitational acceleration used by every weight and thrust formula, m/s².
pub const GRAVITY: f64 = 9.81;

/// Returns [`GRAVITY`] as an acceleration.
#[must_use]
pub fn gravity() -> Acceleration {
    Acceleration::new::<meter_per_second_squared>(GRAVITY)
}
