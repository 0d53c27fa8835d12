//! Public Twine models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules. All current models
//! belong to the [`uav`] sizing domain.
//!
//! # Model structure
//!
//! Each discipline lives in its own module. Its sub-steps (definition,
//! estimation, performance, constraints) are private submodules holding plain
//! formulas. The public group type composes them and implements
//! [`twine_core::Model`] as a thin adapter, so the same formulas can be
//! exercised directly in tests and reused by other groups.

pub mod uav;
