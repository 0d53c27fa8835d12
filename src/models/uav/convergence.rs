//! Takeoff-weight closure shared by every vehicle assembly.
//!
//! An assembly evaluates all of its disciplines for a takeoff-weight guess.
//! The guess feeds back through the scenarios, so a consistent design is a
//! fixed point `guess = mtow(guess)`. [`converge`] finds it by bisection
//! between the payload mass and a multiple of it.

mod error;
mod problem;

pub use error::SizingError;

use twine_core::Model;
use twine_solvers::equation::bisection;
use uom::si::{f64::Mass, mass::kilogram};

use super::mtow::MtowResults;

use problem::{GuessModel, MtowProblem};

/// Solver configuration for the takeoff-weight fixed point.
#[derive(Debug, Clone, Copy)]
pub struct MtowConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the takeoff-weight guess.
    pub mass_tol: Mass,

    /// Absolute tolerance on the residual `guess − mtow`.
    pub residual_tol: Mass,

    /// Upper end of the search, as a multiple of the payload mass.
    pub max_payload_ratio: f64,
}

impl Default for MtowConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            mass_tol: Mass::new::<kilogram>(1e-9),
            residual_tol: Mass::new::<kilogram>(1e-9),
            max_payload_ratio: 10.0,
        }
    }
}

impl MtowConfig {
    /// Converts this configuration into a bisection solver configuration.
    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.mass_tol.get::<kilogram>(),
            x_rel_tol: 0.0,
            residual_tol: self.residual_tol.get::<kilogram>(),
        }
    }
}

/// Assembly input carrying the takeoff-weight guess.
pub trait WeightGuess {
    /// The same input evaluated at another guess.
    #[must_use]
    fn with_guess(&self, guess: Mass) -> Self;
}

/// Assembly output closing the takeoff-weight loop.
pub trait SizedVehicle {
    fn mtow(&self) -> &MtowResults;

    /// Every design margin, keyed like its exported variable relative to
    /// the export prefix.
    ///
    /// A feasible design has all of them non-negative.
    fn constraints(&self) -> Vec<(String, f64)>;
}

/// Finds the takeoff weight at which `assembly` agrees with its guess.
///
/// `input` supplies everything but the guess. Logs a warning for every
/// margin left negative by the converged design.
///
/// # Errors
///
/// Returns a [`SizingError`] if the solver fails or does not converge.
pub fn converge<M>(
    assembly: &M,
    input: M::Input,
    payload: Mass,
    config: &MtowConfig,
) -> Result<M::Output, SizingError>
where
    M: Model<Error = SizingError>,
    M::Input: WeightGuess,
    M::Output: SizedVehicle + Clone,
{
    let payload = payload.get::<kilogram>();
    let model = GuessModel::new(assembly, input);

    let solution = bisection::solve(
        &model,
        &MtowProblem::new(),
        [payload, config.max_payload_ratio * payload],
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // A guess the disciplines cannot evaluate is treated as too
            // heavy, steering the search back toward the payload.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(SizingError::MaxIters {
            residual: Mass::new::<kilogram>(solution.residual),
            iters: solution.iters,
        });
    }

    let iters = solution.iters;
    let results = solution.snapshot.output;
    log::debug!(
        "takeoff weight converged to {:.4} kg in {iters} iterations",
        results.mtow().mtow.get::<kilogram>()
    );
    for (name, value) in results.constraints() {
        if value < 0.0 {
            log::warn!("constraint {name} violated: {value:.4}");
        }
    }

    Ok(results)
}
