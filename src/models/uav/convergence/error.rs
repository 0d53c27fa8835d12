use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::Mass;

use crate::{
    models::uav::{propulsion::PropulsionError, scenarios::ScenariosError},
    support::{catalogue::CatalogueError, constraint::InvalidInput},
};

/// Errors that can occur while sizing a vehicle.
#[derive(Debug, Error)]
pub enum SizingError {
    /// A mission, layout or design value is out of range.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    /// The sizing scenarios could not be evaluated.
    #[error("sizing scenarios failed")]
    Scenarios(#[from] ScenariosError),

    /// A component could not be sourced.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Best takeoff-weight residual achieved.
        residual: Mass,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}

impl From<PropulsionError> for SizingError {
    fn from(error: PropulsionError) -> Self {
        match error {
            PropulsionError::InvalidInput(e) => SizingError::InvalidInput(e),
            PropulsionError::Catalogue(e) => SizingError::Catalogue(e),
        }
    }
}
