use thiserror::Error;
use twine_solvers::equation::bisection;

/// Errors that can occur while trimming the cruise attitude.
#[derive(Debug, Error)]
pub enum CruiseAttitudeError {
    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual}")]
    MaxIters {
        /// Best trim residual achieved.
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
