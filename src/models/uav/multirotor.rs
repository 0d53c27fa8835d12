//! Whole-vehicle sizing of a multirotor.
//!
//! [`MultirotorSizing`] evaluates every discipline for one takeoff-weight
//! guess, in dependency order:
//!
//! ```text
//! scenarios → propeller → motor (+ gearbox) → battery → ESC
//!           → arms and body → wires → MTOW → endurance
//! ```
//!
//! The battery needs the ESC efficiency before the ESC is sized; it uses the
//! reference efficiency, which the ESC keeps whatever its sourcing.
//!
//! The takeoff weight is closed by
//! [`convergence::converge`](super::convergence::converge), by bisection
//! between the payload mass and a multiple of it.

mod config;
mod results;

pub use config::SizingConfig;
pub use results::MultirotorResults;

pub use super::{
    convergence::{MtowConfig, SizingError},
    propulsion::Catalogues,
};

use twine_core::Model;
use uom::si::f64::Mass;

use crate::support::{catalogue::CatalogueError, scenario::Scenario};

use super::{
    convergence::{self, WeightGuess},
    mtow::{AirframeMass, Mtow, MtowInput},
    performance::{BatteryDrain, Endurance, EnduranceInput},
    propulsion::{
        ChainInput, PropulsionChain, PropulsionDesign, PropulsionId,
        wires::{WireRun, Wires, WiresInput},
    },
    scenarios::{ArmLayout, BodyAerodynamics, Mission, ScenariosInput, SizingScenarios},
    structures::arms::{Arms, ArmsInput},
};

/// Sizing coefficients an optimizer would vary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignVariables {
    pub propulsion: PropulsionDesign,
    /// Inner over outer diameter of the arm tubes.
    pub arm_diameter_ratio: f64,
}

impl Default for DesignVariables {
    fn default() -> Self {
        Self {
            propulsion: PropulsionDesign::default(),
            arm_diameter_ratio: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultirotorInput {
    pub mission: Mission,
    pub design: DesignVariables,
    /// Takeoff weight the disciplines are evaluated for.
    pub mtow_guess: Mass,
}

impl WeightGuess for MultirotorInput {
    fn with_guess(&self, guess: Mass) -> Self {
        Self {
            mtow_guess: guess,
            ..*self
        }
    }
}

/// Multirotor assembly.
#[derive(Debug, Clone, Copy)]
pub struct MultirotorSizing<'a> {
    layout: ArmLayout,
    body: BodyAerodynamics,
    misc_mass: Mass,
    mtow: MtowConfig,
    scenarios: SizingScenarios,
    propulsion: PropulsionChain<'a>,
    wires: Wires,
    arms: Arms,
}

impl<'a> MultirotorSizing<'a> {
    /// Builds the assembly, resolving every `off_the_shelf` flag against the
    /// supplied catalogues.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Missing`] if a flag is set for a component
    /// without a catalogue.
    pub fn new(config: &SizingConfig, catalogues: Catalogues<'a>) -> Result<Self, CatalogueError> {
        Ok(Self {
            layout: config.layout,
            body: config.body,
            misc_mass: config.misc_mass,
            mtow: config.mtow,
            scenarios: SizingScenarios {
                cruise: config.cruise,
            },
            propulsion: PropulsionChain::new(
                &config.references,
                &config.propulsion,
                Scenario::Hover,
                catalogues,
            )?,
            wires: Wires {
                reference: config.references.wires,
            },
            arms: Arms {
                material: config.arm_material,
                frame: config.frame,
            },
        })
    }

    /// Finds the takeoff weight the vehicle actually has.
    ///
    /// Logs a warning for every margin left negative by the converged design.
    ///
    /// # Errors
    ///
    /// Returns a [`SizingError`] if the mission is invalid, the solver fails,
    /// or it does not converge.
    pub fn converge(
        &self,
        mission: &Mission,
        design: &DesignVariables,
    ) -> Result<MultirotorResults, SizingError> {
        mission.validate()?;
        self.layout.validate()?;
        convergence::converge(
            self,
            MultirotorInput {
                mission: *mission,
                design: *design,
                mtow_guess: mission.payload_mass,
            },
            mission.payload_mass,
            &self.mtow,
        )
    }
}

impl Model for MultirotorSizing<'_> {
    type Input = MultirotorInput;
    type Output = MultirotorResults;
    type Error = SizingError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let MultirotorInput {
            mission,
            design,
            mtow_guess,
        } = input;
        let id = PropulsionId::Multirotor;

        let scenarios = self.scenarios.call(&ScenariosInput {
            mission: *mission,
            layout: self.layout,
            body: self.body,
            mtow: *mtow_guess,
        })?;
        let propeller_count = scenarios.propeller_count;

        let propulsion = self.propulsion.call(&ChainInput {
            design: design.propulsion,
            flight: scenarios.flight,
            propeller_count,
            payload_mass: mission.payload_mass,
            payload_power: mission.payload_power,
        })?;

        let arms = self.arms.call(&ArmsInput {
            layout: self.layout,
            propeller_diameter: propulsion.propeller.characteristics.diameter,
            takeoff_thrust: scenarios.flight.takeoff.thrust,
            diameter_ratio: design.arm_diameter_ratio,
        })?;

        let wires = self.wires.call(&WiresInput {
            current: propulsion.motor.operating.cruise.current,
            propeller_count,
            run: WireRun::Arm(arms.arm_length),
        })?;

        let mtow = Mtow.call(&MtowInput {
            payload: mission.payload_mass,
            misc: self.misc_mass,
            propulsion: vec![propulsion.masses(id, propeller_count, &wires)],
            airframe: AirframeMass::Multirotor {
                body: arms.body_mass,
                arms: arms.arms_mass,
            },
            guess: *mtow_guess,
            requirement: mission.mtow_requirement,
        })?;

        let endurance = Endurance
            .call(&EnduranceInput {
                hover: Some(BatteryDrain::of(&propulsion.battery, Scenario::Hover)),
                cruise: Some(BatteryDrain::of(&propulsion.battery, Scenario::Cruise)),
                cruise_speed: mission.cruise_speed,
            })
            .unwrap_or_else(|never| match never {});

        Ok(MultirotorResults {
            scenarios,
            propulsion,
            wires,
            arms,
            mtow,
            endurance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Length, length::meter, mass::kilogram, time::second};

    use crate::{
        models::uav::{
            convergence::SizedVehicle,
            propulsion::{
                battery::{BatteryCharacteristics, BatteryDesign},
                motor::MotorDesign,
                propeller::{PropellerCharacteristics, PropellerDesign},
            },
            scenarios::tests::{body, mission},
        },
        support::{
            catalogue::Component,
            variables::{Export, UnitTag, VariableStore},
        },
    };

    fn config() -> SizingConfig {
        SizingConfig {
            body: body(),
            ..SizingConfig::default()
        }
    }

    fn sizing(config: &SizingConfig) -> MultirotorSizing<'static> {
        MultirotorSizing::new(config, Catalogues::default()).unwrap()
    }

    fn at_guess(guess: f64) -> MultirotorInput {
        MultirotorInput {
            mission: mission(),
            design: DesignVariables::default(),
            mtow_guess: Mass::new::<kilogram>(guess),
        }
    }

    fn exported(results: &MultirotorResults) -> VariableStore {
        let mut store = VariableStore::new();
        results.export("data", &mut store).unwrap();
        store
    }

    fn exported_keys(sizing: &MultirotorSizing<'_>, input: &MultirotorInput) -> Vec<String> {
        let store = exported(&sizing.call(input).unwrap());
        store.keys().map(String::from).collect()
    }

    #[test]
    fn single_pass_at_a_guess() {
        let out = sizing(&config()).call(&at_guess(4.0)).unwrap();

        assert_relative_eq!(out.mtow.mtow.get::<kilogram>(), 3.744_420_475_423_63, max_relative = 1e-9);
        assert!(out.mtow.constraints.consistency > 0.0);
        // Battery mass follows the payload alone.
        assert_relative_eq!(
            out.propulsion.battery.characteristics.mass.get::<kilogram>(),
            1.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn converges_to_consistent_weight() {
        let out = sizing(&config())
            .converge(&mission(), &DesignVariables::default())
            .unwrap();
        let p = &out.propulsion;

        assert_relative_eq!(out.mtow.mtow.get::<kilogram>(), 3.662_255_369_372_868, epsilon = 1e-6);
        assert_relative_eq!(out.mtow.guess.get::<kilogram>(), out.mtow.mtow.get::<kilogram>(), epsilon = 1e-6);
        assert_relative_eq!(
            p.propeller.characteristics.diameter.get::<meter>(),
            0.313_714_421_818_514_06,
            max_relative = 1e-6
        );
        assert_relative_eq!(p.motor.characteristics.mass.get::<kilogram>(), 0.080_813_178_008_316_99, max_relative = 1e-6);
        assert_relative_eq!(p.esc.characteristics.mass.get::<kilogram>(), 0.017_867_326_326_534_365, max_relative = 1e-6);
        assert_relative_eq!(out.arms.arms_mass.get::<kilogram>(), 0.031_887_702_008_877_486, max_relative = 1e-6);
        assert_relative_eq!(out.wires.mass.get::<kilogram>(), 0.030_502_518_579_685_68, max_relative = 1e-6);
        assert_relative_eq!(out.endurance.hover.unwrap().get::<second>(), 976.705_568_188_524_9, max_relative = 1e-6);
        assert_relative_eq!(out.endurance.range.unwrap().get::<meter>(), 9_543.872_204_806_936, max_relative = 1e-6);
        assert_relative_eq!(out.mtow.constraints.requirement, 1.730_557_809_711_784, max_relative = 1e-6);
    }

    #[test]
    fn gearbox_lightens_the_vehicle() {
        let mut config = config();
        config.propulsion.gearbox = true;
        let design = DesignVariables {
            propulsion: PropulsionDesign {
                motor: MotorDesign {
                    reduction_ratio: 4.0,
                    ..MotorDesign::default()
                },
                ..PropulsionDesign::default()
            },
            ..DesignVariables::default()
        };

        let out = sizing(&config).converge(&mission(), &design).unwrap();

        assert_relative_eq!(out.mtow.mtow.get::<kilogram>(), 3.403_350_145_834_33, epsilon = 1e-6);
        assert_relative_eq!(
            out.propulsion.motor.gearbox.mass.get::<kilogram>(),
            0.003_988_980_930_591_779_5,
            max_relative = 1e-6
        );
    }

    #[test]
    fn missing_catalogue_is_rejected() {
        let mut config = config();
        config.propulsion.off_the_shelf_esc = true;

        let err = MultirotorSizing::new(&config, Catalogues::default()).unwrap_err();
        assert_eq!(err, CatalogueError::Missing(Component::Esc));
    }

    #[test]
    fn rejects_empty_layout() {
        let config = SizingConfig {
            layout: ArmLayout {
                arms: 4,
                propellers_per_arm: 0,
            },
            ..config()
        };

        let err = sizing(&config)
            .converge(&mission(), &DesignVariables::default())
            .unwrap_err();
        assert!(matches!(err, SizingError::InvalidInput(e) if e.field == "propellers_per_arm"));
    }

    #[test]
    fn constraint_keys_match_the_export() {
        let out = sizing(&config()).call(&at_guess(4.0)).unwrap();
        let store = exported(&out);
        let constraints = out.constraints();

        assert_eq!(constraints.len(), 23);
        for (key, value) in &constraints {
            assert_eq!(store.get::<f64>(&format!("data:{key}")).unwrap(), *value, "{key}");
        }
        // Every exported margin except the closed consistency residual is a
        // design constraint.
        let exported_margins = store
            .keys()
            .filter(|key| key.contains(":constraints:") && !key.ends_with("mtow:consistency"))
            .count();
        assert_eq!(exported_margins, constraints.len());
        assert!(constraints.iter().any(|(key, _)| key == "propulsion:multirotor:esc:constraints:voltage:min"));
        assert!(constraints.iter().any(|(key, _)| key == "weight:constraints:mtow:requirement"));
    }

    #[test]
    fn sweep_keeps_quantities_physical() {
        let layouts = [
            ArmLayout::QUAD,
            ArmLayout {
                arms: 6,
                propellers_per_arm: 1,
            },
            ArmLayout {
                arms: 4,
                propellers_per_arm: 2,
            },
            ArmLayout {
                arms: 8,
                propellers_per_arm: 1,
            },
        ];
        let designs = [
            DesignVariables::default(),
            DesignVariables {
                propulsion: PropulsionDesign {
                    propeller: PropellerDesign {
                        pitch_ratio: 0.5,
                        nd_ratio: 0.75,
                        ..PropellerDesign::default()
                    },
                    motor: MotorDesign {
                        torque_ratio: 2.0,
                        ..MotorDesign::default()
                    },
                    battery: BatteryDesign {
                        voltage_ratio: 1.5,
                        mass_ratio: 0.8,
                    },
                    ..PropulsionDesign::default()
                },
                arm_diameter_ratio: 0.8,
            },
            DesignVariables {
                propulsion: PropulsionDesign {
                    battery: BatteryDesign {
                        mass_ratio: 1.3,
                        ..BatteryDesign::default()
                    },
                    ..PropulsionDesign::default()
                },
                arm_diameter_ratio: 0.95,
            },
        ];

        for payload in [0.5, 1.5, 4.0] {
            let mission = Mission {
                payload_mass: Mass::new::<kilogram>(payload),
                mtow_requirement: Mass::new::<kilogram>(50.0),
                ..mission()
            };
            for layout in layouts {
                let sizing = sizing(&SizingConfig { layout, ..config() });
                for design in &designs {
                    let case = format!("payload {payload} kg, {layout:?}, {design:?}");
                    let out = sizing.converge(&mission, design).expect(&case);
                    let store = exported(&out);

                    for (key, variable) in store.iter() {
                        let physical = match variable.unit {
                            UnitTag::Kilogram | UnitTag::Ampere => true,
                            UnitTag::Newton => key.contains(":thrust:"),
                            _ => false,
                        };
                        if physical {
                            assert!(
                                variable.value.is_finite() && variable.value >= 0.0,
                                "{key} = {} ({case})",
                                variable.value
                            );
                        }
                    }
                    for (key, value) in out.constraints() {
                        assert!(value.is_finite(), "{key} = {value} ({case})");
                    }
                }
            }
        }
    }

    #[test]
    fn sourcing_keeps_the_exported_keys() {
        let input = at_guess(4.0);
        let round_up = |estimated: &PropellerCharacteristics| -> Result<_, CatalogueError> {
            Ok(PropellerCharacteristics {
                diameter: Length::new::<meter>((estimated.diameter.get::<meter>() * 40.0).ceil() / 40.0),
                ..*estimated
            })
        };
        let heavier = |estimated: &BatteryCharacteristics| -> Result<_, CatalogueError> {
            Ok(BatteryCharacteristics {
                mass: estimated.mass * 1.1,
                ..*estimated
            })
        };
        let mut shelf_config = config();
        shelf_config.propulsion.off_the_shelf_propeller = true;
        shelf_config.propulsion.off_the_shelf_battery = true;
        let shelf = MultirotorSizing::new(
            &shelf_config,
            Catalogues {
                propeller: Some(&round_up),
                battery: Some(&heavier),
                ..Catalogues::default()
            },
        )
        .unwrap();

        let estimated = exported_keys(&sizing(&config()), &input);
        assert_eq!(estimated, exported_keys(&shelf, &input));
        assert!(estimated.contains(&"data:propulsion:multirotor:battery:mass".to_owned()));
        assert!(estimated.contains(&"data:propulsion:multirotor:gearbox:mass".to_owned()));
        assert!(estimated.contains(&"data:weight:constraints:mtow:consistency".to_owned()));
        assert!(estimated.contains(&format!(
            "data:scenarios:multirotor:thrust:{}",
            Scenario::Cruise.name()
        )));
    }
}
