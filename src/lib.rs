//! # UAV Sizing
//!
//! Multidisciplinary conceptual sizing models for electric UAVs, built on
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Discipline and assembly [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code in this crate follows a natural progression as needs emerge:
//!
//! 1. **Discipline-specific**: Starts in a discipline's private submodules
//!    (e.g., `battery::estimation`)
//! 2. **Domain-specific**: If useful across disciplines (e.g., all propulsion
//!    components), it moves to the domain module
//! 3. **Crate-level**: If useful across domains or potentially useful outside
//!    this crate, it moves to [`support`]
//!
//! Note: Only utilities at the crate-level (in [`support`]) are part of the public API.
//! Discipline-specific sub-steps remain private.

pub mod models;
pub mod support;
