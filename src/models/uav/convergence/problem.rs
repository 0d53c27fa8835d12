//! Problem formulation for the takeoff-weight fixed point.

use std::{convert::Infallible, marker::PhantomData};

use twine_core::{EquationProblem, Model};
use uom::si::{f64::Mass, mass::kilogram};

use super::{SizedVehicle, SizingError, WeightGuess};

/// Model adapter exposing the takeoff-weight guess as the sole input.
pub(super) struct GuessModel<'m, M: Model> {
    assembly: &'m M,
    input: M::Input,
}

impl<'m, M: Model> GuessModel<'m, M> {
    pub(super) fn new(assembly: &'m M, input: M::Input) -> Self {
        Self { assembly, input }
    }
}

impl<M> Model for GuessModel<'_, M>
where
    M: Model<Error = SizingError>,
    M::Input: WeightGuess,
    M::Output: SizedVehicle,
{
    type Input = Mass;
    type Output = M::Output;
    type Error = SizingError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let results = self.assembly.call(&self.input.with_guess(*input));
        match &results {
            Ok(r) => log::trace!(
                "mtow guess {:.6} kg gives {:.6} kg",
                input.get::<kilogram>(),
                r.mtow().mtow.get::<kilogram>()
            ),
            Err(e) => log::trace!("mtow guess {:.6} kg failed: {e}", input.get::<kilogram>()),
        }
        results
    }
}

/// Equation problem for the takeoff-weight fixed point.
///
/// Computes the residual as `guess − mtow(guess)`, in kilograms. It is
/// negative at the payload mass, since the vehicle weighs more than its
/// payload, and grows as the guess outruns the mass it implies.
pub(super) struct MtowProblem<O> {
    output: PhantomData<fn() -> O>,
}

impl<O> MtowProblem<O> {
    pub(super) fn new() -> Self {
        Self {
            output: PhantomData,
        }
    }
}

impl<O: SizedVehicle> EquationProblem<1> for MtowProblem<O> {
    type Input = Mass;
    type Output = O;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Mass::new::<kilogram>(x[0]))
    }

    fn residuals(&self, input: &Self::Input, output: &Self::Output) -> Result<[f64; 1], Self::Error> {
        Ok([input.get::<kilogram>() - output.mtow().mtow.get::<kilogram>()])
    }
}
