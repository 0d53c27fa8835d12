//! Whole-vehicle sizing of a hybrid VTOL: a fixed wing carrying lift rotors
//! on booms.
//!
//! [`HybridSizing`] sizes two propulsion systems for one takeoff-weight
//! guess. The lift rotors take off, hover and climb vertically and are
//! stopped in cruise; the forward-flight propellers carry the cruise.
//!
//! ```text
//! induced drag → scenarios (wing loading) → geometry → lift scenarios
//!              → lift chain ─┬─► arms ─► rotor placement ─► wires
//!              → cruise chain┘
//!              → aerodynamics (stopped rotors) → structures → MTOW
//!              → stability → endurance
//! ```

mod config;
mod results;

pub use config::{HybridConfig, SystemConfig};
pub use results::HybridResults;

use std::f64::consts::PI;

use twine_core::Model;
use uom::si::{
    f64::{Length, Mass, Power},
    power::watt,
};

use crate::support::{atmosphere::Atmosphere, catalogue::CatalogueError, scenario::Scenario};

use super::{
    aerodynamics::{AerodynamicsInput, FixedWingAerodynamics, InducedDrag, StoppedPropellers},
    convergence::{self, MtowConfig, SizingError, WeightGuess},
    fixed_wing::{PropellerMount, stability_input},
    geometry::{Geometry, GeometryDesign, GeometryInput},
    mtow::{Mtow, MtowInput},
    performance::{BatteryDrain, Endurance, EnduranceInput},
    propulsion::{
        Catalogues, ChainInput, PropulsionChain, PropulsionDesign, PropulsionId,
        battery::BatteryDesign,
        wires::{WireRun, Wires, WiresInput},
    },
    scenarios::{
        ArmLayout, FixedWingMission, FixedWingScenarios, FixedWingScenariosInput, Mission,
        VtolScenarios, VtolScenariosInput, WingLoadingDesign,
    },
    stability::{PropulsionLayout, RotorSpan, StaticStability, VtolArms},
    structures::{
        FixedWingStructures, FixedWingStructuresInput,
        arms::{Arms, ArmsInput},
        wing::VtolLoad,
    },
};

const LIFT: PropulsionId = PropulsionId::Multirotor;
const CRUISE: PropulsionId = PropulsionId::FixedWing;

/// Sizing coefficients an optimizer would vary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridDesign {
    pub lift: PropulsionDesign,
    pub cruise: PropulsionDesign,
    pub geometry: GeometryDesign,
    pub wing_loading: WingLoadingDesign,
    /// Inner over outer diameter of the rotor booms.
    pub arm_diameter_ratio: f64,
}

impl Default for HybridDesign {
    /// The lift pack only covers the vertical phases, so it carries half
    /// the energy a multirotor pack would.
    fn default() -> Self {
        Self {
            lift: PropulsionDesign {
                battery: BatteryDesign {
                    mass_ratio: 0.5,
                    ..BatteryDesign::default()
                },
                ..PropulsionDesign::default()
            },
            cruise: PropulsionDesign::forward_flight(),
            geometry: GeometryDesign::default(),
            wing_loading: WingLoadingDesign::default(),
            arm_diameter_ratio: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridInput {
    pub mission: Mission,
    pub fixed_wing: FixedWingMission,
    pub design: HybridDesign,
    /// Takeoff weight the disciplines are evaluated for.
    pub mtow_guess: Mass,
}

impl WeightGuess for HybridInput {
    fn with_guess(&self, guess: Mass) -> Self {
        Self {
            mtow_guess: guess,
            ..*self
        }
    }
}

/// Hybrid VTOL assembly.
#[derive(Debug, Clone, Copy)]
pub struct HybridSizing<'a> {
    layout: ArmLayout,
    cruise_propeller_count: u32,
    mount: PropellerMount,
    vertical_drag_coefficient: f64,
    misc_mass: Mass,
    mtow: MtowConfig,
    lift: PropulsionChain<'a>,
    cruise: PropulsionChain<'a>,
    lift_wires: Wires,
    cruise_wires: Wires,
    arms: Arms,
    structures: FixedWingStructures,
    stability: StaticStability,
}

impl<'a> HybridSizing<'a> {
    /// Builds the assembly, resolving every `off_the_shelf` flag of each
    /// system against its own catalogues.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Missing`] if a flag is set for a component
    /// without a catalogue.
    pub fn new(
        config: &HybridConfig,
        lift: Catalogues<'a>,
        cruise: Catalogues<'a>,
    ) -> Result<Self, CatalogueError> {
        Ok(Self {
            layout: config.layout,
            cruise_propeller_count: config.cruise_propeller_count,
            mount: config.mount,
            vertical_drag_coefficient: config.vertical_drag_coefficient,
            misc_mass: config.misc_mass,
            mtow: config.mtow,
            lift: PropulsionChain::new(
                &config.lift.references,
                &config.lift.flags,
                Scenario::Hover,
                lift,
            )?,
            cruise: PropulsionChain::new(
                &config.cruise.references,
                &config.cruise.flags,
                Scenario::Cruise,
                cruise,
            )?,
            lift_wires: Wires {
                reference: config.lift.references.wires,
            },
            cruise_wires: Wires {
                reference: config.cruise.references.wires,
            },
            arms: Arms {
                material: config.arm_material,
                frame: config.frame,
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
        design: &HybridDesign,
    ) -> Result<HybridResults, SizingError> {
        mission.validate()?;
        fixed_wing.validate()?;
        self.layout.validate()?;
        convergence::converge(
            self,
            HybridInput {
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

impl Model for HybridSizing<'_> {
    type Input = HybridInput;
    type Output = HybridResults;
    type Error = SizingError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let HybridInput {
            mission,
            fixed_wing,
            design,
            mtow_guess,
        } = input;
        let cruise_count = self.cruise_propeller_count;

        let induced = InducedDrag::for_aspect_ratio(design.geometry.wing.aspect_ratio)?;
        let cruise_scenarios = FixedWingScenarios.call(&FixedWingScenariosInput {
            mission: *mission,
            fixed_wing: *fixed_wing,
            design: design.wing_loading,
            induced,
            propeller_count: cruise_count,
            mtow: *mtow_guess,
        })?;

        let geometry = Geometry.call(&GeometryInput {
            design: design.geometry,
            mtow: *mtow_guess,
            wing_loading: cruise_scenarios.wing_loading.selected,
        })?;

        let lift_scenarios = VtolScenarios.call(&VtolScenariosInput {
            mission: *mission,
            layout: self.layout,
            drag_coefficient: self.vertical_drag_coefficient,
            top_surface: geometry.top_projected_area(),
            mtow: *mtow_guess,
        })?;
        let lift_count = lift_scenarios.propeller_count;

        // The payload draws from the cruise pack only.
        let lift = self.lift.call(&ChainInput {
            design: design.lift,
            flight: lift_scenarios.flight,
            propeller_count: lift_count,
            payload_mass: mission.payload_mass,
            payload_power: Power::new::<watt>(0.0),
        })?;
        let cruise = self.cruise.call(&ChainInput {
            design: design.cruise,
            flight: cruise_scenarios.flight,
            propeller_count: cruise_count,
            payload_mass: mission.payload_mass,
            payload_power: mission.payload_power,
        })?;

        let lift_diameter = lift.propeller.characteristics.diameter;
        let arms = self.arms.call(&ArmsInput {
            layout: self.layout,
            propeller_diameter: lift_diameter,
            takeoff_thrust: lift_scenarios.flight.takeoff.thrust,
            diameter_ratio: design.arm_diameter_ratio,
        })?;
        let (rotors, propeller_y) =
            rotor_placement(geometry.wing.quarter_chord(), arms.arm_length, self.layout.arms);

        let lift_wires = self.lift_wires.call(&WiresInput {
            current: lift.motor.operating.hover.current,
            propeller_count: lift_count,
            run: WireRun::Arm(arms.arm_length),
        })?;
        let cruise_wires = self.cruise_wires.call(&WiresInput {
            current: cruise.motor.operating.cruise.current,
            propeller_count: cruise_count,
            run: WireRun::Fuselage(geometry.fuselage.length),
        })?;

        let aerodynamics = FixedWingAerodynamics.call(&AerodynamicsInput {
            geometry,
            cruise_air: Atmosphere::isa(mission.cruise_altitude(), mission.delta_isa),
            cruise_speed: mission.cruise_speed,
            induced,
            cd0_guess: design.wing_loading.cd0_guess,
            stopped_propellers: Some(StoppedPropellers {
                count: lift_count,
                diameter: lift_diameter,
            }),
        })?;

        let structures = self.structures.call(&FixedWingStructuresInput {
            geometry,
            mtow: *mtow_guess,
            vtol: Some(VtolLoad {
                takeoff_thrust: lift_scenarios.flight.takeoff.thrust,
                propeller_count: lift_count,
                propeller_y,
            }),
        })?;

        let mtow = Mtow.call(&MtowInput {
            payload: mission.payload_mass,
            misc: self.misc_mass,
            propulsion: vec![
                lift.masses(LIFT, lift_count, &lift_wires),
                cruise.masses(CRUISE, cruise_count, &cruise_wires),
            ],
            airframe: structures.airframe_mass(Some(arms.arms_mass)),
            guess: *mtow_guess,
            requirement: mission.mtow_requirement,
        })?;

        let stability = self.stability.call(&stability_input(
            &geometry,
            &design.geometry,
            induced.oswald,
            &structures,
            Some(VtolArms {
                span: rotors,
                mass: arms.arms_mass,
            }),
            vec![
                cruise.balance(CRUISE, self.mount.into(), cruise_count),
                lift.balance(LIFT, PropulsionLayout::Vtol(rotors), lift_count),
            ],
        ))?;

        let geometry_constraints = geometry.constraints(
            fixed_wing.payload_volume
                + lift.battery.characteristics.volume
                + cruise.battery.characteristics.volume,
        );

        let endurance = Endurance
            .call(&EnduranceInput {
                hover: Some(BatteryDrain::of(&lift.battery, Scenario::Hover)),
                cruise: Some(BatteryDrain::of(&cruise.battery, Scenario::Cruise)),
                cruise_speed: mission.cruise_speed,
            })
            .unwrap_or_else(|never| match never {});

        Ok(HybridResults {
            lift_scenarios,
            cruise_scenarios,
            geometry,
            geometry_constraints,
            lift,
            cruise,
            lift_wires,
            cruise_wires,
            arms,
            rotors,
            aerodynamics,
            structures,
            mtow,
            stability,
            endurance,
        })
    }
}

/// Longitudinal span and lateral offset of the lift rotors, with the arms
/// spread evenly around the wing quarter chord.
fn rotor_placement(quarter_chord: Length, arm_length: Length, arms: u32) -> (RotorSpan, Length) {
    let half_angle = PI / f64::from(arms);
    let reach = arm_length * half_angle.cos();
    (
        RotorSpan {
            front: quarter_chord - reach,
            rear: quarter_chord + reach,
        },
        arm_length * half_angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::uav::convergence::SizedVehicle;

    use approx::assert_relative_eq;
    use uom::si::{force::newton, length::meter, mass::kilogram, time::second};

    use crate::{
        models::uav::{
            fixed_wing::{FixedWingConfig, FixedWingDesign, FixedWingSizing},
            mtow::AirframeMass,
            scenarios::tests::{fixed_wing, fixed_wing_mission},
        },
        support::{
            catalogue::Component,
            variables::{Export, VariableStore},
        },
    };

    fn sizing() -> HybridSizing<'static> {
        HybridSizing::new(
            &HybridConfig::default(),
            Catalogues::default(),
            Catalogues::default(),
        )
        .unwrap()
    }

    fn input(guess: f64) -> HybridInput {
        HybridInput {
            mission: fixed_wing_mission(),
            fixed_wing: fixed_wing(),
            design: HybridDesign::default(),
            mtow_guess: Mass::new::<kilogram>(guess),
        }
    }

    #[test]
    fn rotors_straddle_the_quarter_chord() {
        let x = Length::new::<meter>(0.3);
        let (span, y) = rotor_placement(x, Length::new::<meter>(0.5), 4);

        let reach = 0.5 * (PI / 4.0).cos();
        assert_relative_eq!(span.front.get::<meter>(), 0.3 - reach, epsilon = 1e-12);
        assert_relative_eq!(span.rear.get::<meter>(), 0.3 + reach, epsilon = 1e-12);
        assert_relative_eq!(y.get::<meter>(), 0.5 * (PI / 4.0).sin(), epsilon = 1e-12);
    }

    #[test]
    fn single_pass_sizes_both_systems() {
        let out = sizing().call(&input(5.0)).unwrap();

        assert_eq!(out.mtow.propulsion.len(), 2);
        assert!(out.endurance.hover.unwrap().get::<second>() > 0.0);
        assert!(out.endurance.cruise.unwrap().get::<second>() > 0.0);
        assert!(out.aerodynamics.cd0 > 0.0);
        assert!(out.structures.wing.constraints.vtol_stress.is_some());
        assert!(matches!(out.mtow.airframe, AirframeMass::HybridVtol { .. }));
        assert_relative_eq!(
            out.rotors.midpoint().get::<meter>(),
            out.geometry.wing.quarter_chord().get::<meter>(),
            epsilon = 1e-12
        );
        assert_eq!(out.lift_wires.count, 12);
        assert_eq!(out.cruise_wires.count, 3);
    }

    #[test]
    fn lift_rotors_rest_in_cruise() {
        let out = sizing().call(&input(5.0)).unwrap();

        assert_relative_eq!(
            out.lift_scenarios.flight.cruise.thrust.get::<newton>(),
            0.0
        );
        assert!(
            out.lift.battery.operating.hover.current > out.lift.battery.operating.cruise.current
        );
    }

    #[test]
    fn converges_to_consistent_weight() {
        let out = sizing()
            .converge(&fixed_wing_mission(), &fixed_wing(), &HybridDesign::default())
            .unwrap();

        assert_relative_eq!(
            out.mtow.mtow.get::<kilogram>(),
            out.mtow.guess.get::<kilogram>(),
            max_relative = 1e-6
        );
    }

    #[test]
    fn rotors_cost_weight() {
        let hybrid = sizing()
            .converge(&fixed_wing_mission(), &fixed_wing(), &HybridDesign::default())
            .unwrap();
        let fixed_wing_only = FixedWingSizing::new(&FixedWingConfig::default(), Catalogues::default())
            .unwrap()
            .converge(&fixed_wing_mission(), &fixed_wing(), &FixedWingDesign::default())
            .unwrap();

        assert!(hybrid.mtow.mtow > fixed_wing_only.mtow.mtow);
        assert!(hybrid.endurance.hover.is_some());
    }

    #[test]
    fn every_constraint_is_exported() {
        let out = sizing().call(&input(5.0)).unwrap();
        let mut store = VariableStore::new();
        out.export("data", &mut store).unwrap();

        for (key, value) in out.constraints() {
            assert_eq!(store.get::<f64>(&format!("data:{key}")).unwrap(), value, "{key}");
        }
        assert!(store.variable("data:performance:endurance:hover").is_some());
        assert!(store.variable("data:propulsion:multirotor:wires:mass").is_some());
        assert!(store.variable("data:structures:arms:mass").is_some());
        assert!(store.variable("data:structures:body:mass").is_none());
        assert!(store.variable("data:geometry:rotors:front:x").is_some());
    }

    #[test]
    fn missing_lift_catalogue_is_rejected() {
        let mut config = HybridConfig::default();
        config.lift.flags.off_the_shelf_motor = true;

        let err = HybridSizing::new(&config, Catalogues::default(), Catalogues::default()).unwrap_err();
        assert_eq!(err, CatalogueError::Missing(Component::Motor));
    }

    #[test]
    fn rejects_armless_layout() {
        let config = HybridConfig {
            layout: ArmLayout {
                arms: 0,
                propellers_per_arm: 1,
            },
            ..HybridConfig::default()
        };
        let err = HybridSizing::new(&config, Catalogues::default(), Catalogues::default())
            .unwrap()
            .converge(&fixed_wing_mission(), &fixed_wing(), &HybridDesign::default())
            .unwrap_err();
        assert!(matches!(err, SizingError::InvalidInput(e) if e.field == "arms"));
    }
}
