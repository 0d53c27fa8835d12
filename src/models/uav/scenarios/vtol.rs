//! Lift-rotor scenarios of a hybrid VTOL.
//!
//! The lift rotors carry the whole vehicle at takeoff, in hover and through
//! the climb, where the drag of the airframe seen from above opposes them.
//! They are stopped in cruise, when the wing lifts the vehicle.

use twine_core::Model;
use uom::si::{
    area::square_meter,
    f64::{Area, Force, Mass},
    force::newton,
    mass::kilogram,
};

use crate::support::{
    constraint::{InvalidInput, StrictlyPositive},
    units::GRAVITY,
};

use super::{ArmLayout, Mission, ScenarioConditions, vertical_flight};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VtolScenariosInput {
    pub mission: Mission,
    pub layout: ArmLayout,
    /// Drag coefficient of the airframe in axial flow.
    pub drag_coefficient: f64,
    /// Airframe area seen from above, before the airframe is sized.
    pub top_surface: Area,
    pub mtow: Mass,
}

/// Flight conditions of the lift rotors.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VtolScenarios;

impl Model for VtolScenarios {
    type Input = VtolScenariosInput;
    type Output = ScenarioConditions;
    type Error = InvalidInput;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        input.mission.validate()?;
        input.layout.validate()?;
        let propeller_count = input.layout.propeller_count()?;
        let mtow = StrictlyPositive::new(input.mtow)
            .map_err(|e| e.on("mtow"))?
            .into_inner();
        let top = StrictlyPositive::new(input.top_surface.get::<square_meter>())
            .map_err(|e| e.on("top_surface"))?
            .into_inner();
        let cd = StrictlyPositive::new(input.drag_coefficient)
            .map_err(|e| e.on("drag_coefficient"))?
            .into_inner();

        let weight = mtow.get::<kilogram>() * GRAVITY;
        let flight = vertical_flight(&input.mission, f64::from(propeller_count), weight, cd * top);

        let none = Force::new::<newton>(0.0);
        Ok(ScenarioConditions {
            propeller_count,
            top_surface: input.top_surface,
            front_surface: Area::new::<square_meter>(0.0),
            cruise_drag: none,
            cruise_lift: none,
            flight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Velocity, velocity::meter_per_second};

    use crate::models::uav::scenarios::tests::mission;

    fn input() -> VtolScenariosInput {
        VtolScenariosInput {
            mission: mission(),
            layout: ArmLayout::QUAD,
            drag_coefficient: 1.18,
            top_surface: Area::new::<square_meter>(0.25),
            mtow: Mass::new::<kilogram>(4.0),
        }
    }

    #[test]
    fn lift_rotors_carry_the_weight() {
        let out = VtolScenarios.call(&input()).unwrap();
        let f = out.flight;

        assert_eq!(out.propeller_count, 4);
        assert_relative_eq!(f.hover.thrust.get::<newton>(), 9.81, epsilon = 1e-12);
        assert_relative_eq!(f.takeoff.thrust.get::<newton>(), 19.62, epsilon = 1e-12);
        assert_relative_eq!(f.climb.thrust.get::<newton>(), 11.412_914_313_487_882, epsilon = 1e-9);
    }

    #[test]
    fn rotors_stop_in_cruise() {
        let out = VtolScenarios.call(&input()).unwrap();

        assert_relative_eq!(out.flight.cruise.thrust.get::<newton>(), 0.0);
        assert_relative_eq!(out.flight.cruise.airspeed.get::<meter_per_second>(), 0.0);
        assert_relative_eq!(out.cruise_drag.get::<newton>(), 0.0);
        assert_relative_eq!(out.front_surface.get::<square_meter>(), 0.0);
    }

    #[test]
    fn rejects_missing_top_surface() {
        let err = VtolScenarios
            .call(&VtolScenariosInput {
                top_surface: Area::new::<square_meter>(0.0),
                ..input()
            })
            .unwrap_err();
        assert_eq!(err.field, "top_surface");

        let mut slow = input();
        slow.mission.climb_speed = Velocity::new::<meter_per_second>(-1.0);
        assert_eq!(VtolScenarios.call(&slow).unwrap_err().field, "climb_speed");
    }
}
