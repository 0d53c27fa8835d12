use std::f64::consts::TAU;

use uom::si::{
    angle::radian,
    angular_velocity::radian_per_second,
    f64::{AngularVelocity, Power, Torque},
    force::newton,
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    power::watt,
    torque::newton_meter,
};

use crate::{
    models::uav::scenarios::FlightCondition,
    support::scenario::{PerScenario, Scenario},
};

use super::{
    PropellerCharacteristics, PropellerDesign, PropellerOperating,
    aerodynamics::{Coefficients, PropellerAerodynamics},
};

/// Coefficients for `scenario`: static at takeoff and hover, inclined in
/// climb and cruise.
pub(super) fn coefficients(
    aero: &PropellerAerodynamics,
    design: &PropellerDesign,
    pitch_ratio: f64,
    scenario: Scenario,
    condition: &FlightCondition,
) -> Coefficients {
    let alpha = condition.angle_of_attack.get::<radian>();
    match scenario {
        Scenario::Takeoff | Scenario::Hover => aero.static_coefficients(pitch_ratio),
        Scenario::Climb => aero.inclined_coefficients(pitch_ratio, design.climb_advance_ratio, alpha),
        Scenario::Cruise => {
            aero.inclined_coefficients(pitch_ratio, design.cruise_advance_ratio, alpha)
        }
    }
}

/// Operating point that delivers the scenario thrust.
///
/// Speed is zero when the thrust coefficient, density or diameter is zero,
/// and torque is zero when speed is zero.
pub(super) fn operating_point(
    propeller: &PropellerCharacteristics,
    condition: &FlightCondition,
    coefficients: Coefficients,
) -> PropellerOperating {
    let thrust = condition.thrust.get::<newton>();
    let rho = condition.density.get::<kilogram_per_cubic_meter>();
    let d = propeller.diameter.get::<meter>();
    let ct = coefficients.thrust;
    let cp = coefficients.power;

    let n = if ct * rho * d == 0.0 {
        0.0
    } else {
        (thrust / (ct * rho * d.powi(4))).sqrt()
    };
    let omega = TAU * n;
    let power = cp * rho * n.powi(3) * d.powi(5);
    let torque = if omega == 0.0 { 0.0 } else { power / omega };

    PropellerOperating {
        thrust: condition.thrust,
        thrust_coefficient: ct,
        power_coefficient: cp,
        speed: AngularVelocity::new::<radian_per_second>(omega),
        power: Power::new::<watt>(power),
        torque: Torque::new::<newton_meter>(torque),
    }
}

pub(super) fn operating_points(
    aero: &PropellerAerodynamics,
    design: &PropellerDesign,
    propeller: &PropellerCharacteristics,
    flight: &PerScenario<FlightCondition>,
) -> PerScenario<PropellerOperating> {
    flight.map(|scenario, condition| {
        let coefficients = coefficients(aero, design, propeller.pitch_ratio, scenario, condition);
        operating_point(propeller, condition, coefficients)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Angle, Force, Length, Mass, MassDensity, Velocity},
        mass::kilogram,
        velocity::meter_per_second,
    };

    fn hover() -> FlightCondition {
        FlightCondition {
            thrust: Force::new::<newton>(9.81),
            density: MassDensity::new::<kilogram_per_cubic_meter>(1.207_468_409_407_066_5),
            airspeed: Velocity::new::<meter_per_second>(0.0),
            angle_of_attack: Angle::new::<radian>(std::f64::consts::FRAC_PI_2),
        }
    }

    fn propeller(diameter: f64) -> PropellerCharacteristics {
        PropellerCharacteristics {
            pitch_ratio: 0.35,
            diameter: Length::new::<meter>(diameter),
            mass: Mass::new::<kilogram>(0.02),
        }
    }

    #[test]
    fn hover_point() {
        let op = operating_point(
            &propeller(0.327_861_308_360_664_85),
            &hover(),
            Coefficients {
                thrust: 0.0931,
                power: 0.03254,
            },
        );

        assert_relative_eq!(
            op.speed.get::<radian_per_second>(),
            546.036_039_078_688_4,
            epsilon = 1e-9
        );
        assert_relative_eq!(op.power.get::<watt>(), 97.694_132_748_780_86, epsilon = 1e-9);
        assert_relative_eq!(
            op.torque.get::<newton_meter>(),
            0.178_915_173_646_079_26,
            epsilon = 1e-12
        );
    }

    #[test]
    fn zero_diameter_is_at_rest() {
        let op = operating_point(
            &propeller(0.0),
            &hover(),
            Coefficients {
                thrust: 0.0931,
                power: 0.03254,
            },
        );

        assert_eq!(op.speed.get::<radian_per_second>(), 0.0);
        assert_eq!(op.power.get::<watt>(), 0.0);
        assert_eq!(op.torque.get::<newton_meter>(), 0.0);
    }
}
