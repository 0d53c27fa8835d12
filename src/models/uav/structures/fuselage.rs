//! Fuselage shell mass.

use std::convert::Infallible;

use twine_core::Model;
use uom::si::f64::{Area, ArealMassDensity, Mass};

use crate::support::variables::{Export, VariableError, VariableStore};

/// Wetted surfaces of the three fuselage sections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuselageSurfaces {
    pub nose: Area,
    pub mid: Area,
    pub rear: Area,
    /// Total wetted surface, which may differ from the sum of sections.
    pub total: Area,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuselageMasses {
    pub nose: Mass,
    pub mid: Mass,
    pub rear: Mass,
    pub total: Mass,
}

/// Shell of uniform areal density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuselageStructure {
    pub density: ArealMassDensity,
}

impl Model for FuselageStructure {
    type Input = FuselageSurfaces;
    type Output = FuselageMasses;
    type Error = Infallible;

    fn call(&self, surfaces: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(FuselageMasses {
            nose: surfaces.nose * self.density,
            mid: surfaces.mid * self.density,
            rear: surfaces.rear * self.density,
            total: surfaces.total * self.density,
        })
    }
}

impl Export for FuselageMasses {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        store.put(format!("{prefix}:mass"), self.total)?;
        store.put(format!("{prefix}:mass:nose"), self.nose)?;
        store.put(format!("{prefix}:mass:mid"), self.mid)?;
        store.put(format!("{prefix}:mass:rear"), self.rear)?;
        Ok(())
    }
}
