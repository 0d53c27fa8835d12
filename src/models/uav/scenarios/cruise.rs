//! Cruise attitude trim.
//!
//! In forward flight the body tilts by an angle α so that the thrust vector
//! balances weight, body drag and body lift. The exposed surface depends on
//! the tilt, `S(α) = S_top·sin α + S_front·cos α`, so the balance
//! `tan α = D(α) / (W − L(α))` is solved by bisection on `α ∈ [0, π/2]`.

mod config;
mod error;
mod problem;

pub use config::CruiseAttitudeConfig;
pub use error::CruiseAttitudeError;

use std::f64::consts::FRAC_PI_2;

use twine_solvers::equation::bisection;

use problem::CruiseAttitudeProblem;

/// Forces acting on the body in cruise, in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct CruiseBalance {
    pub(super) weight: f64,
    pub(super) dynamic_pressure: f64,
    pub(super) drag_coefficient: f64,
    pub(super) lift_coefficient: f64,
    pub(super) top_surface: f64,
    pub(super) front_surface: f64,
}

/// Trimmed cruise attitude and the body forces at that attitude, in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct CruiseForces {
    /// Body tilt, rad.
    pub(super) angle: f64,
    pub(super) drag: f64,
    /// Negative when the body is pushed down.
    pub(super) lift: f64,
}

impl CruiseBalance {
    fn forces(&self, angle: f64) -> CruiseForces {
        let surface = self.top_surface * angle.sin() + self.front_surface * angle.cos();
        let q_s = self.dynamic_pressure * surface;
        CruiseForces {
            angle,
            drag: q_s * self.drag_coefficient,
            lift: -q_s * self.lift_coefficient,
        }
    }
}

/// Solves the cruise attitude for the given balance.
///
/// # Errors
///
/// Returns [`CruiseAttitudeError`] if the solver fails or does not converge.
pub(super) fn cruise_attitude(
    balance: &CruiseBalance,
    config: &CruiseAttitudeConfig,
) -> Result<CruiseForces, CruiseAttitudeError> {
    let problem = CruiseAttitudeProblem::new(balance.weight);

    let solution = bisection::solve(
        balance,
        &problem,
        [0.0, FRAC_PI_2],
        &config.bisection(),
        |_event: &bisection::Event<'_, _, _>| None,
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(CruiseAttitudeError::MaxIters {
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn faster_cruise_tilts_further() {
        let slow = CruiseBalance {
            weight: 40.0,
            dynamic_pressure: 20.0,
            drag_coefficient: 1.0,
            lift_coefficient: 0.0,
            top_surface: 0.1,
            front_surface: 0.05,
        };
        let fast = CruiseBalance {
            dynamic_pressure: 200.0,
            ..slow
        };

        let config = CruiseAttitudeConfig::default();
        let slow = cruise_attitude(&slow, &config).unwrap();
        let fast = cruise_attitude(&fast, &config).unwrap();

        assert!(slow.angle > 0.0);
        assert!(fast.angle > slow.angle);
        assert!(fast.drag > slow.drag);
        assert_relative_eq!(slow.lift, 0.0);
    }

    #[test]
    fn drag_balances_thrust_tilt() {
        let balance = CruiseBalance {
            weight: 4.0 * 9.81,
            dynamic_pressure: 0.5 * 1.207_468_409_407_066_5 * 144.0,
            drag_coefficient: 1.18,
            lift_coefficient: 0.1,
            top_surface: 0.142_866_094_677_137_93,
            front_surface: 0.071_433_047_338_568_96,
        };

        let forces = cruise_attitude(&balance, &CruiseAttitudeConfig::default()).unwrap();

        assert_relative_eq!(forces.angle, 0.265_348_112_807_244_13, epsilon = 1e-9);
        assert_relative_eq!(
            forces.angle.tan(),
            forces.drag / (balance.weight - forces.lift),
            epsilon = 1e-9
        );
    }
}
