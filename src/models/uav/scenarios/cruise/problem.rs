//! Problem formulation for the cruise attitude trim.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{angle::radian, f64::Angle};

use super::{CruiseBalance, CruiseForces};

impl Model for CruiseBalance {
    type Input = Angle;
    type Output = CruiseForces;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.forces(input.get::<radian>()))
    }
}

/// Equation problem for the cruise trim.
///
/// Computes the residual as `tan α − D/(W − L)`, which is negative for a
/// level body and grows without bound as the body approaches vertical.
pub(super) struct CruiseAttitudeProblem {
    weight: f64,
}

impl CruiseAttitudeProblem {
    pub(super) fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl EquationProblem<1> for CruiseAttitudeProblem {
    type Input = Angle;
    type Output = CruiseForces;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Angle::new::<radian>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.angle.tan() - output.drag / (self.weight - output.lift)])
    }
}
