//! Whole-vehicle sizing of a fixed-wing UAV.
//!
//! [`FixedWingSizing`] evaluates every discipline for one takeoff-weight
//! guess, in dependency order:
//!
//! ```text
//! induced drag → scenarios (wing loading) → geometry
//!              → propeller → motor → battery → ESC → wires
//!              → aerodynamics → structures → MTOW → stability → endurance
//! ```
//!
//! The scenarios assume a parasitic drag that the aerodynamics later build
//! up from the sized airframe; the two are tied by a margin rather than by
//! iteration. The takeoff weight is closed by
//! [`convergence::converge`](super::convergence::converge).

mod config;
mod results;

pub use config::{FixedWingConfig, PropellerMount};
pub use results::FixedWingResults;

use twine_core::Model;
use uom::si::f64::Mass;

use crate::support::{atmosphere::Atmosphere, catalogue::CatalogueError, scenario::Scenario};

use super::{
    aerodynamics::{AerodynamicsInput, FixedWingAerodynamics, InducedDrag},
    convergence::{self, MtowConfig, SizingError, WeightGuess},
    geometry::{AirframeGeometry, Geometry, GeometryDesign, GeometryInput},
    mtow::{Mtow, MtowInput},
    performance::{BatteryDrain, Endurance, EnduranceInput},
    propulsion::{
        Catalogues, ChainInput, PropulsionChain, PropulsionDesign, PropulsionId,
        wires::{WireRun, Wires, WiresInput},
    },
    scenarios::{
        FixedWingMission, FixedWingScenarios, FixedWingScenariosInput, Mission, WingLoadingDesign,
    },
    stability::{PropulsionMasses, StabilityInput, StaticStability, TailVolume, VtolArms},
    structures::{FixedWingStructures, FixedWingStructuresInput, FixedWingStructuresResults},
};

/// Sizing coefficients an optimizer would vary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWingDesign {
    pub propulsion: PropulsionDesign,
    pub geometry: GeometryDesign,
    pub wing_loading: WingLoadingDesign,
}

impl Default for FixedWingDesign {
    fn default() -> Self {
        Self {
            propulsion: PropulsionDesign::forward_flight(),
            geometry: GeometryDesign::default(),
            wing_loading: WingLoadingDesign::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWingInput {
    pub mission: Mission,
    pub fixed_wing: FixedWingMission,
    pub design: FixedWingDesign,
    /// Takeoff weight the disciplines are evaluated for.
    pub mtow_guess: Mass,
}

impl WeightGuess for FixedWingInput {
    fn with_guess(&self, guess: Mass) -> Self {
        Self {
            mtow_guess: guess,
            ..*self
        }
    }
}

/// Fixed-wing assembly.
#[derive(Debug, Clone, Copy)]
pub struct FixedWingSizing<'a> {
    propeller_count: u32,
    mount: PropellerMount,
    misc_mass: Mass,
    mtow: MtowConfig,
    propulsion: PropulsionChain<'a>,
    wires: Wires,
    structures: FixedWingStructures,
    stability: StaticStability,
}

impl<'a> FixedWingSizing<'a> {
    /// Builds the assembly, resolving every `off_the_shelf` flag against the
    /// supplied catalogues.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Missing`] if a flag is set for a component
    /// without a catalogue.
    pub fn new(config: &FixedWingConfig, catalogues: Catalogues<'a>) -> Result<Self, CatalogueError> {
        Ok(Self {
            propeller_count: config.propeller_count,
            mount: config.mount,
            misc_mass: config.misc_mass,
            mtow: config.mtow,
            propulsion: PropulsionChain::new(
                &config.references,
                &config.propulsion,
                Scenario::Cruise,
                catalogues,
            )?,
            wires: Wires {
                reference: config.references.wires,
            },
            structures: config.structures,
            stability: StaticStability {
                bounds: config.static_margin,
            },
        })
    }

    /// Finds the takeoff weight the vehicle actually has.
    ///
    /// # Errors
    ///
    /// Returns a [`SizingError`] if the mission is invalid, the solver fails,
    /// or it does not converge.
    pub fn converge(
        &self,
        mission: &Mission,
        fixed_wing: &FixedWingMission,
        design: &FixedWingDesign,
    ) -> Result<FixedWingResults, SizingError> {
        mission.validate()?;
        fixed_wing.validate()?;
        convergence::converge(
            self,
            FixedWingInput {
                mission: *mission,
                fixed_wing: *fixed_wing,
                design: *design,
                mtow_guess: mission.payload_mass,
            },
            mission.payload_mass,
            &self.mtow,
        )
    }
}

impl Model for FixedWingSizing<'_> {
    type Input = FixedWingInput;
    type Output = FixedWingResults;
    type Error = SizingError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let FixedWingInput {
            mission,
            fixed_wing,
            design,
            mtow_guess,
        } = input;
        let id = PropulsionId::FixedWing;
        let propeller_count = self.propeller_count;

        let induced = InducedDrag::for_aspect_ratio(design.geometry.wing.aspect_ratio)?;
        let scenarios = FixedWingScenarios.call(&FixedWingScenariosInput {
            mission: *mission,
            fixed_wing: *fixed_wing,
            design: design.wing_loading,
            induced,
            propeller_count,
            mtow: *mtow_guess,
        })?;

        let geometry = Geometry.call(&GeometryInput {
            design: design.geometry,
            mtow: *mtow_guess,
            wing_loading: scenarios.wing_loading.selected,
        })?;

        let propulsion = self.propulsion.call(&ChainInput {
            design: design.propulsion,
            flight: scenarios.flight,
            propeller_count,
            payload_mass: mission.payload_mass,
            payload_power: mission.payload_power,
        })?;

        let wires = self.wires.call(&WiresInput {
            current: propulsion.motor.operating.cruise.current,
            propeller_count,
            run: WireRun::Fuselage(geometry.fuselage.length),
        })?;

        let aerodynamics = FixedWingAerodynamics.call(&AerodynamicsInput {
            geometry,
            cruise_air: Atmosphere::isa(mission.cruise_altitude(), mission.delta_isa),
            cruise_speed: mission.cruise_speed,
            induced,
            cd0_guess: design.wing_loading.cd0_guess,
            stopped_propellers: None,
        })?;

        let structures = self.structures.call(&FixedWingStructuresInput {
            geometry,
            mtow: *mtow_guess,
            vtol: None,
        })?;

        let mtow = Mtow.call(&MtowInput {
            payload: mission.payload_mass,
            misc: self.misc_mass,
            propulsion: vec![propulsion.masses(id, propeller_count, &wires)],
            airframe: structures.airframe_mass(None),
            guess: *mtow_guess,
            requirement: mission.mtow_requirement,
        })?;

        let stability = self.stability.call(&stability_input(
            &geometry,
            &design.geometry,
            induced.oswald,
            &structures,
            None,
            vec![propulsion.balance(id, self.mount.into(), propeller_count)],
        ))?;

        let geometry_constraints =
            geometry.constraints(fixed_wing.payload_volume + propulsion.battery.characteristics.volume);

        let endurance = Endurance
            .call(&EnduranceInput {
                hover: None,
                cruise: Some(BatteryDrain::of(&propulsion.battery, Scenario::Cruise)),
                cruise_speed: mission.cruise_speed,
            })
            .unwrap_or_else(|never| match never {});

        Ok(FixedWingResults {
            scenarios,
            geometry,
            geometry_constraints,
            propulsion,
            wires,
            aerodynamics,
            structures,
            mtow,
            stability,
            endurance,
        })
    }
}

/// Balance of a sized fixed-wing airframe carrying `propulsion`.
pub(super) fn stability_input(
    geometry: &AirframeGeometry,
    design: &GeometryDesign,
    oswald: f64,
    structures: &FixedWingStructuresResults,
    vtol_arms: Option<VtolArms>,
    propulsion: Vec<PropulsionMasses>,
) -> StabilityInput {
    let horizontal = &design.tails.horizontal;
    StabilityInput {
        wing: geometry.wing.stability(oswald),
        wing_mass: structures.wing.mass,
        tail_volume: TailVolume {
            coefficient: horizontal.volume_coefficient,
            aspect_ratio: horizontal.aspect_ratio,
        },
        horizontal_tail: geometry.horizontal_tail.placement(structures.tails.horizontal),
        vertical_tail: geometry.vertical_tail.placement(structures.tails.vertical),
        fuselage: geometry.fuselage.sections,
        fuselage_mass: structures.fuselage,
        vtol_arms,
        propulsion,
    }
}
