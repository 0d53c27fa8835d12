//! Airframe structures and weights.
//!
//! - [`arms`]: multirotor arms and central body.
//! - [`wing`]: fixed-wing spars, ribs and skin, with spar checks.
//! - [`fuselage`] and [`tails`]: shell masses from wetted surfaces.
//!
//! Airframe geometry is an input here; these models only size the structure
//! that realizes it. [`FixedWingStructures`] runs wing, fuselage and tails
//! together for one sized airframe.

pub mod arms;
pub mod fuselage;
pub mod tails;
pub mod wing;

use twine_core::Model;
use uom::si::{
    areal_mass_density::kilogram_per_square_meter,
    f64::{ArealMassDensity, Mass},
};

use crate::support::{
    constraint::InvalidInput,
    variables::{Export, VariableError, VariableStore},
};

use super::{geometry::AirframeGeometry, margins::Margins, mtow::AirframeMass};

use fuselage::{FuselageMasses, FuselageStructure};
use tails::{TailMasses, TailStructure};
use wing::{VtolLoad, WingInput, WingResults, WingStructure};

/// Structure scopes under a fixed-wing export prefix.
const WING: &str = "wing";
const FUSELAGE: &str = "fuselage";
const TAIL: &str = "tail";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWingStructuresInput {
    pub geometry: AirframeGeometry,
    pub mtow: Mass,
    /// Lift rotors carried by the wing, if any.
    pub vtol: Option<VtolLoad>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWingStructuresResults {
    pub wing: WingResults,
    pub fuselage: FuselageMasses,
    pub tails: TailMasses,
}

impl FixedWingStructuresResults {
    /// Structural masses, with `arms` for a hybrid VTOL.
    #[must_use]
    pub fn airframe_mass(&self, arms: Option<Mass>) -> AirframeMass {
        let wing = self.wing.mass;
        let fuselage = self.fuselage.total;
        let horizontal_tail = self.tails.horizontal;
        let vertical_tail = self.tails.vertical;
        match arms {
            None => AirframeMass::FixedWing {
                wing,
                fuselage,
                horizontal_tail,
                vertical_tail,
            },
            Some(arms) => AirframeMass::HybridVtol {
                wing,
                fuselage,
                horizontal_tail,
                vertical_tail,
                arms,
            },
        }
    }

    /// Structural margins, scoped under `scope`.
    #[must_use]
    pub fn margin_groups(&self, scope: &str) -> Vec<(String, &dyn Margins)> {
        vec![(format!("{scope}:{WING}"), &self.wing.constraints as &dyn Margins)]
    }
}

/// Wing, fuselage and tails of a fixed-wing airframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWingStructures {
    pub wing: WingStructure,
    pub fuselage: FuselageStructure,
    pub tails: TailStructure,
    /// Ultimate load factor the wing spar is sized on.
    pub load_factor: f64,
}

impl Default for FixedWingStructures {
    fn default() -> Self {
        Self {
            wing: WingStructure::default(),
            fuselage: FuselageStructure {
                density: ArealMassDensity::new::<kilogram_per_square_meter>(0.3),
            },
            tails: TailStructure {
                skin_density: ArealMassDensity::new::<kilogram_per_square_meter>(0.1),
            },
            load_factor: 3.0,
        }
    }
}

impl Model for FixedWingStructures {
    type Input = FixedWingStructuresInput;
    type Output = FixedWingStructuresResults;
    type Error = InvalidInput;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let g = &input.geometry;
        let wing = self.wing.call(&WingInput {
            geometry: g.wing.structure(),
            mtow: input.mtow,
            load_factor: self.load_factor,
            vtol: input.vtol,
        })?;
        let fuselage = self
            .fuselage
            .call(&g.fuselage.surfaces)
            .unwrap_or_else(|never| match never {});
        let tails = self
            .tails
            .call(&g.tail_surfaces())
            .unwrap_or_else(|never| match never {});

        Ok(FixedWingStructuresResults {
            wing,
            fuselage,
            tails,
        })
    }
}

impl Export for FixedWingStructuresResults {
    /// Writes under `{prefix}:wing`, `{prefix}:fuselage` and `{prefix}:tail`.
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        self.wing.export(&format!("{prefix}:{WING}"), store)?;
        self.fuselage.export(&format!("{prefix}:{FUSELAGE}"), store)?;
        self.tails.export(&format!("{prefix}:{TAIL}"), store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{area::square_meter, mass::kilogram};

    use crate::models::uav::geometry::tests::airframe;

    fn evaluate() -> FixedWingStructuresResults {
        FixedWingStructures::default()
            .call(&FixedWingStructuresInput {
                geometry: airframe(),
                mtow: Mass::new::<kilogram>(4.0),
                vtol: None,
            })
            .unwrap()
    }

    #[test]
    fn shells_follow_the_geometry() {
        let g = airframe();
        let out = evaluate();

        assert_relative_eq!(
            out.fuselage.total.get::<kilogram>(),
            0.3 * g.fuselage.surfaces.total.get::<square_meter>(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            out.tails.vertical.get::<kilogram>(),
            0.2 * g.vertical_tail.planform.surface.get::<square_meter>(),
            epsilon = 1e-12
        );
        assert!(out.wing.constraints.vtol_stress.is_none());
    }

    #[test]
    fn arms_make_a_hybrid() {
        let out = evaluate();
        let fixed = out.airframe_mass(None);
        let hybrid = out.airframe_mass(Some(Mass::new::<kilogram>(0.2)));

        assert!(matches!(fixed, AirframeMass::FixedWing { .. }));
        assert_relative_eq!(
            hybrid.total().get::<kilogram>(),
            fixed.total().get::<kilogram>() + 0.2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn exports_each_structure() {
        let mut store = VariableStore::new();
        evaluate().export("st", &mut store).unwrap();

        assert!(store.variable("st:wing:mass").is_some());
        assert!(store.variable("st:wing:constraints:spar:depth").is_some());
        assert!(store.variable("st:fuselage:mass").is_some());
        assert!(store.variable("st:tail:horizontal:mass").is_some());

        let out = evaluate();
        for (key, value) in crate::models::uav::margins::collect_margins(&out.margin_groups("st")) {
            assert_eq!(store.get::<f64>(&key).unwrap(), value, "{key}");
        }
    }
}
