use uom::si::{
    angular_velocity::radian_per_second,
    electrical_resistance::ohm,
    f64::{ElectricalResistance, Length, Mass, Torque},
    length::meter,
    magnetic_flux::weber,
    mass::kilogram,
    power::watt,
    torque::newton_meter,
};

use crate::{
    models::uav::propulsion::propeller::PropellerOperating, support::units::TorqueConstant,
};

use super::{MotorCharacteristics, MotorDesign, MotorReference};

/// Torque the motor must sustain in steady flight, on the motor side of the
/// gearbox.
pub(super) fn nominal_torque(
    design: &MotorDesign,
    reduction_ratio: f64,
    steady: &PropellerOperating,
) -> Torque {
    steady.torque * design.torque_ratio / reduction_ratio
}

/// Battery voltage regressed on takeoff propeller power, V.
pub(super) fn voltage_estimate(takeoff: &PropellerOperating) -> f64 {
    1.84 * takeoff.power.get::<watt>().powf(0.36)
}

/// Torque constant that reaches takeoff speed with margin at the estimated
/// battery voltage.
pub(super) fn torque_constant(
    design: &MotorDesign,
    reduction_ratio: f64,
    takeoff: &PropellerOperating,
) -> TorqueConstant {
    let omega = takeoff.speed.get::<radian_per_second>() * reduction_ratio;
    TorqueConstant::new::<weber>(voltage_estimate(takeoff) / (design.speed_ratio * omega))
}

/// Scales the reference motor to `nominal_torque`.
pub(super) fn characteristics(
    nominal_torque: Torque,
    torque_constant: TorqueConstant,
    reference: &MotorReference,
) -> MotorCharacteristics {
    let r = nominal_torque.get::<newton_meter>() / reference.nominal_torque.get::<newton_meter>();
    let kt = torque_constant.get::<weber>() / reference.torque_constant.get::<weber>();

    let mass = reference.mass.get::<kilogram>() * r.powf(3.0 / 3.5);
    let mass_ratio = mass / reference.mass.get::<kilogram>();

    MotorCharacteristics {
        nominal_torque,
        max_torque: reference.max_torque * r,
        torque_constant,
        resistance: ElectricalResistance::new::<ohm>(
            reference.resistance.get::<ohm>() * r.powf(-5.0 / 3.5) * kt * kt,
        ),
        friction_torque: Torque::new::<newton_meter>(
            reference.friction_torque.get::<newton_meter>() * r.powf(3.0 / 3.5),
        ),
        mass: Mass::new::<kilogram>(mass),
        length: Length::new::<meter>(reference.length.get::<meter>() * mass_ratio.cbrt()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn reference_scales_to_itself() {
        let reference = MotorReference::default();
        let motor = characteristics(
            reference.nominal_torque,
            reference.torque_constant,
            &reference,
        );

        assert_relative_eq!(motor.mass.get::<kilogram>(), 0.575, epsilon = 1e-14);
        assert_relative_eq!(motor.length.get::<meter>(), 0.0789, epsilon = 1e-14);
        assert_relative_eq!(motor.resistance.get::<ohm>(), 0.03, epsilon = 1e-14);
        assert_relative_eq!(motor.max_torque.get::<newton_meter>(), 2.74, epsilon = 1e-14);
    }

    #[test]
    fn small_motor() {
        let motor = characteristics(
            Torque::new::<newton_meter>(0.268_372_760_469_118_9),
            TorqueConstant::new::<weber>(0.015_094_329_072_589_44),
            &MotorReference::default(),
        );

        assert_relative_eq!(
            motor.max_torque.get::<newton_meter>(),
            0.316_957_484_347_149_1,
            epsilon = 1e-14
        );
        assert_relative_eq!(
            motor.friction_torque.get::<newton_meter>(),
            0.004_722_729_457_823_98,
            epsilon = 1e-14
        );
        assert_relative_eq!(motor.resistance.get::<ohm>(), 0.165_470_286_193_990_3, epsilon = 1e-12);
        assert_relative_eq!(motor.mass.get::<kilogram>(), 0.090_518_981_274_959_61, epsilon = 1e-14);
        assert_relative_eq!(motor.length.get::<meter>(), 0.042_602_420_451_532_23, epsilon = 1e-14);
    }
}
