//! Conceptual sizing of electric UAVs.
//!
//! Each discipline is a [`twine_core::Model`] whose input names exactly what
//! it consumes from upstream disciplines and whose output is a plain results
//! struct. Disciplines are composed explicitly:
//!
//! ```text
//! scenarios ─► propeller ─► motor (+ gearbox) ─► battery ─► esc ─► wires
//!     │            │                                               │
//!     ▼            └──────────────► structures ◄───────────────────┘
//! geometry ─► aerodynamics               │
//!     │                                  ▼
//!     └──────────────────────────────► mtow ─► stability ─► performance
//! ```
//!
//! Three assemblies wire them together and close the takeoff-weight loop
//! through [`convergence`]:
//!
//! - [`multirotor::MultirotorSizing`]: rotors on arms around a central body.
//! - [`fixed_wing::FixedWingSizing`]: wing, tails and a forward-flight
//!   propeller.
//! - [`hybrid::HybridSizing`]: a fixed wing that takes off on lift rotors.
//!
//! Every assembly reports its constraints as `(key, margin)` pairs, feasible
//! when non-negative, under the same keys its export writes.

pub mod aerodynamics;
pub mod convergence;
pub mod fixed_wing;
pub mod geometry;
pub mod hybrid;
pub mod margins;
pub mod mtow;
pub mod multirotor;
pub mod performance;
pub mod propulsion;
pub mod scenarios;
pub mod stability;
pub mod structures;
