//! Tail surfaces, built as skinned shells like the wing.

use std::convert::Infallible;

use twine_core::Model;
use uom::si::f64::{Area, ArealMassDensity, Mass};

use crate::support::variables::{Export, VariableError, VariableStore};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailSurfaces {
    /// Both sides of the horizontal tail together.
    pub horizontal: Area,
    pub vertical: Area,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailMasses {
    pub horizontal: Mass,
    pub vertical: Mass,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailStructure {
    pub skin_density: ArealMassDensity,
}

impl TailStructure {
    /// Upper and lower skin over a planform.
    fn skin(&self, planform: Area) -> Mass {
        planform * self.skin_density * 2.0
    }
}

impl Model for TailStructure {
    type Input = TailSurfaces;
    type Output = TailMasses;
    type Error = Infallible;

    fn call(&self, surfaces: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(TailMasses {
            horizontal: self.skin(surfaces.horizontal / 2.0) * 2.0,
            vertical: self.skin(surfaces.vertical),
        })
    }
}

impl Export for TailMasses {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        store.put(format!("{prefix}:horizontal:mass"), self.horizontal)?;
        store.put(format!("{prefix}:vertical:mass"), self.vertical)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter, areal_mass_density::kilogram_per_square_meter, mass::kilogram,
    };

    #[test]
    fn both_tails_weigh_twice_their_planform() {
        let tails = TailStructure {
            skin_density: ArealMassDensity::new::<kilogram_per_square_meter>(0.1),
        };
        let out = tails
            .call(&TailSurfaces {
                horizontal: Area::new::<square_meter>(0.2),
                vertical: Area::new::<square_meter>(0.05),
            })
            .unwrap();

        assert_relative_eq!(out.horizontal.get::<kilogram>(), 0.04, epsilon = 1e-15);
        assert_relative_eq!(out.vertical.get::<kilogram>(), 0.01, epsilon = 1e-15);
    }
}
