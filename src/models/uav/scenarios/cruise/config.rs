use twine_solvers::equation::bisection;
use uom::si::{angle::radian, f64::Angle};

/// Solver configuration for the cruise attitude trim.
#[derive(Debug, Clone, Copy)]
pub struct CruiseAttitudeConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the attitude angle.
    pub angle_tol: Angle,

    /// Absolute tolerance on the trim residual `tan α − D/(W − L)`.
    pub residual_tol: f64,
}

impl Default for CruiseAttitudeConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            angle_tol: Angle::new::<radian>(1e-12),
            residual_tol: 1e-12,
        }
    }
}

impl CruiseAttitudeConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.angle_tol.get::<radian>(),
            x_rel_tol: 0.0,
            residual_tol: self.residual_tol,
        }
    }
}
