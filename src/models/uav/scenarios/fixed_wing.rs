//! Fixed-wing sizing scenarios.
//!
//! The wing loading is chosen for best range in cruise, scaled by a design
//! ratio and checked against the stall speed. Thrust in each scenario then
//! follows from the drag polar at that wing loading. Takeoff is a launch at
//! ten percent above stall speed; the vehicle never hovers.

use std::f64::consts::FRAC_PI_2;

use twine_core::Model;
use uom::si::{
    angle::radian,
    f64::{Angle, Mass, Pressure, Velocity, Volume},
    mass::kilogram,
    pressure::pascal,
    velocity::meter_per_second,
};

use crate::{
    models::uav::{
        aerodynamics::InducedDrag,
        margins::{Margins, export_margins},
    },
    support::{
        atmosphere::Atmosphere,
        constraint::{InvalidInput, NonNegative, StrictlyPositive},
        scenario::PerScenario,
        units::GRAVITY,
        variables::{Export, VariableError, VariableStore},
    },
};

use super::{FlightCondition, Mission, condition};

/// Launch speed over stall speed.
const LAUNCH_MARGIN: f64 = 1.1;

/// Below this wing loading, in pascals, a higher lift coefficient pays off.
const LOW_WING_LOADING: f64 = 100.0;

/// Requirements specific to fixed-wing flight.
///
/// The climb rate is the mission's climb speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWingMission {
    /// Stall speed at cruise altitude.
    pub stall_speed: Velocity,
    /// Airspeed along the climb path.
    pub climb_airspeed: Velocity,
    /// Room the payload needs in the mid fuselage.
    pub payload_volume: Volume,
}

impl FixedWingMission {
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        StrictlyPositive::new(self.stall_speed).map_err(|e| e.on("stall_speed"))?;
        StrictlyPositive::new(self.climb_airspeed).map_err(|e| e.on("climb_airspeed"))?;
        NonNegative::new(self.payload_volume).map_err(|e| e.on("payload_volume"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingLoadingDesign {
    /// Selected wing loading over the best-range one, `k_WS`.
    pub ratio: f64,
    /// Parasitic drag assumed before the airframe is sized.
    pub cd0_guess: f64,
    pub max_lift_coefficient: f64,
}

impl Default for WingLoadingDesign {
    fn default() -> Self {
        Self {
            ratio: 0.8,
            cd0_guess: 0.05,
            max_lift_coefficient: 1.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWingScenariosInput {
    pub mission: Mission,
    pub fixed_wing: FixedWingMission,
    pub design: WingLoadingDesign,
    pub induced: InducedDrag,
    pub propeller_count: u32,
    /// Takeoff weight the scenarios are evaluated for.
    pub mtow: Mass,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingLoading {
    /// Highest wing loading that still meets the stall speed.
    pub stall: Pressure,
    /// Wing loading of best cruise range.
    pub cruise: Pressure,
    pub selected: Pressure,
    /// Stall wing loading over the selected one.
    pub stall_margin: f64,
}

impl Margins for WingLoading {
    fn margins(&self) -> Vec<(&'static str, f64)> {
        vec![("wing_loading:stall", self.stall_margin)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWingConditions {
    pub propeller_count: u32,
    pub wing_loading: WingLoading,
    /// Thrust over weight in every scenario; zero in hover.
    pub thrust_to_weight: PerScenario<f64>,
    pub flight: PerScenario<FlightCondition>,
}

/// Flight conditions of the forward-flight propellers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedWingScenarios;

impl Model for FixedWingScenarios {
    type Input = FixedWingScenariosInput;
    type Output = FixedWingConditions;
    type Error = InvalidInput;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let FixedWingScenariosInput {
            mission,
            fixed_wing,
            design,
            induced,
            propeller_count,
            mtow,
        } = input;
        mission.validate()?;
        fixed_wing.validate()?;
        let n_pro = f64::from(
            StrictlyPositive::new(*propeller_count)
                .map_err(|e| e.on("propeller_count"))?
                .into_inner(),
        );
        StrictlyPositive::new(*mtow).map_err(|e| e.on("mtow"))?;
        let cd0 = StrictlyPositive::new(design.cd0_guess)
            .map_err(|e| e.on("cd0_guess"))?
            .into_inner();
        StrictlyPositive::new(design.ratio).map_err(|e| e.on("wing_loading_ratio"))?;
        StrictlyPositive::new(design.max_lift_coefficient)
            .map_err(|e| e.on("max_lift_coefficient"))?;
        let k = induced.k;

        let takeoff_air = Atmosphere::isa(mission.takeoff_altitude, mission.delta_isa);
        let cruise_air = Atmosphere::isa(mission.cruise_altitude(), mission.delta_isa);
        let q = |air: &Atmosphere, v: Velocity| air.dynamic_pressure(v).get::<pascal>();

        let q_cruise = q(&cruise_air, mission.cruise_speed);
        let stall = q(&cruise_air, fixed_wing.stall_speed) * design.max_lift_coefficient;
        let cruise = q_cruise * (cd0 / k).sqrt();
        let selected = design.ratio * cruise;
        if selected < LOW_WING_LOADING {
            log::warn!(
                "wing loading {selected:.1} Pa is very low; consider a higher lift coefficient"
            );
        }

        let polar = |q: f64| q * cd0 / selected + k * selected / q;
        let launch_speed = fixed_wing.stall_speed * LAUNCH_MARGIN;
        let climb = mission.climb_speed.get::<meter_per_second>()
            / fixed_wing.climb_airspeed.get::<meter_per_second>()
            + polar(q(&cruise_air, fixed_wing.climb_airspeed));
        let thrust_to_weight = PerScenario {
            takeoff: polar(q(&takeoff_air, launch_speed)),
            hover: 0.0,
            climb,
            cruise: polar(q_cruise),
        };

        let thrust = |ratio: f64| ratio * mtow.get::<kilogram>() * GRAVITY / n_pro;
        let axial = Angle::new::<radian>(FRAC_PI_2);
        let at_rest = Velocity::new::<meter_per_second>(0.0);
        let t = &thrust_to_weight;
        let flight = PerScenario {
            takeoff: condition(thrust(t.takeoff), &takeoff_air, launch_speed, axial),
            hover: condition(0.0, &cruise_air, at_rest, axial),
            climb: condition(thrust(t.climb), &cruise_air, fixed_wing.climb_airspeed, axial),
            cruise: condition(thrust(t.cruise), &cruise_air, mission.cruise_speed, axial),
        };

        let p = Pressure::new::<pascal>;
        Ok(FixedWingConditions {
            propeller_count: *propeller_count,
            wing_loading: WingLoading {
                stall: p(stall),
                cruise: p(cruise),
                selected: p(selected),
                stall_margin: (stall - selected) / selected,
            },
            thrust_to_weight,
            flight,
        })
    }
}

impl Export for FixedWingConditions {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        store.put(
            format!("{prefix}:propeller:number"),
            f64::from(self.propeller_count),
        )?;
        let w = &self.wing_loading;
        store.put(format!("{prefix}:wing_loading"), w.selected)?;
        store.put(format!("{prefix}:wing_loading:stall"), w.stall)?;
        store.put(format!("{prefix}:wing_loading:cruise"), w.cruise)?;
        for (scenario, ratio) in self.thrust_to_weight.iter() {
            store.put(format!("{prefix}:TW:{}", scenario.name()), *ratio)?;
        }
        self.flight.export(prefix, store)?;
        export_margins(w, prefix, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{force::newton, mass_density::kilogram_per_cubic_meter};

    use crate::models::uav::scenarios::tests::{fixed_wing, fixed_wing_mission};

    fn evaluate(design: WingLoadingDesign) -> FixedWingConditions {
        FixedWingScenarios
            .call(&FixedWingScenariosInput {
                mission: fixed_wing_mission(),
                fixed_wing: fixed_wing(),
                design,
                induced: InducedDrag::for_aspect_ratio(8.0).unwrap(),
                propeller_count: 1,
                mtow: Mass::new::<kilogram>(4.0),
            })
            .unwrap()
    }

    fn design() -> WingLoadingDesign {
        WingLoadingDesign {
            cd0_guess: 0.04,
            ..WingLoadingDesign::default()
        }
    }

    #[test]
    fn wing_loading_for_best_range() {
        let w = evaluate(design()).wing_loading;

        assert_relative_eq!(w.selected.get::<pascal>(), 211.024_218_577_286_83, epsilon = 1e-9);
        assert_relative_eq!(w.stall.get::<pascal>(), 254.292_847_021_128_2, epsilon = 1e-9);
        assert_relative_eq!(w.stall_margin, 0.205_041_055_171_562_7, epsilon = 1e-10);
    }

    #[test]
    fn thrust_from_drag_polar() {
        let out = evaluate(design());
        let f = out.flight;

        assert_relative_eq!(f.takeoff.thrust.get::<newton>(), 3.478_758_758_651_454_6, epsilon = 1e-9);
        assert_relative_eq!(f.climb.thrust.get::<newton>(), 10.072_864_848_061_224, epsilon = 1e-9);
        assert_relative_eq!(f.cruise.thrust.get::<newton>(), 3.564_443_052_542_727_3, epsilon = 1e-9);
        assert_relative_eq!(f.hover.thrust.get::<newton>(), 0.0);
        assert_relative_eq!(out.thrust_to_weight.hover, 0.0);

        assert_relative_eq!(f.takeoff.airspeed.get::<meter_per_second>(), 19.8, epsilon = 1e-12);
        assert_relative_eq!(
            f.takeoff.density.get::<kilogram_per_cubic_meter>(),
            1.225_012_265_990_694_6,
            epsilon = 1e-12
        );
        assert_relative_eq!(f.cruise.angle_of_attack.get::<radian>(), FRAC_PI_2);
    }

    #[test]
    fn overloaded_wing_stalls() {
        let w = evaluate(WingLoadingDesign {
            ratio: 1.5,
            ..design()
        })
        .wing_loading;

        assert!(w.stall_margin < 0.0);
        assert_eq!(w.margins()[0].0, "wing_loading:stall");
    }

    #[test]
    fn zero_stall_speed_is_rejected() {
        let err = FixedWingScenarios
            .call(&FixedWingScenariosInput {
                mission: fixed_wing_mission(),
                fixed_wing: FixedWingMission {
                    stall_speed: Velocity::new::<meter_per_second>(0.0),
                    ..fixed_wing()
                },
                design: design(),
                induced: InducedDrag::for_aspect_ratio(8.0).unwrap(),
                propeller_count: 1,
                mtow: Mass::new::<kilogram>(4.0),
            })
            .unwrap_err();

        assert_eq!(err.field, "stall_speed");
    }
}
