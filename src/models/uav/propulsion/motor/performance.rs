use uom::si::{
    angular_velocity::radian_per_second,
    electric_current::ampere,
    electric_potential::volt,
    electrical_resistance::ohm,
    f64::{ElectricCurrent, ElectricPotential, Power},
    magnetic_flux::weber,
    power::watt,
    torque::newton_meter,
};

use crate::{
    models::uav::propulsion::propeller::PropellerOperating, support::scenario::PerScenario,
};

use super::{MotorCharacteristics, MotorOperating};

/// Electrical operating point that drives the propeller through the gearbox.
///
/// Efficiency is zero when the motor draws no power.
pub(super) fn operating_point(
    motor: &MotorCharacteristics,
    reduction_ratio: f64,
    propeller: &PropellerOperating,
) -> MotorOperating {
    let torque = propeller.torque / reduction_ratio;
    let speed = propeller.speed * reduction_ratio;

    let t = torque.get::<newton_meter>();
    let omega = speed.get::<radian_per_second>();
    let kt = motor.torque_constant.get::<weber>();

    let current = (t + motor.friction_torque.get::<newton_meter>()) / kt;
    let voltage = motor.resistance.get::<ohm>() * current + omega * kt;
    let power = voltage * current;
    let efficiency = if power == 0.0 { 0.0 } else { t * omega / power };

    MotorOperating {
        torque,
        speed,
        current: ElectricCurrent::new::<ampere>(current),
        voltage: ElectricPotential::new::<volt>(voltage),
        power: Power::new::<watt>(power),
        efficiency,
    }
}

pub(super) fn operating_points(
    motor: &MotorCharacteristics,
    reduction_ratio: f64,
    propeller: &PerScenario<PropellerOperating>,
) -> PerScenario<MotorOperating> {
    propeller.map(|_, op| operating_point(motor, reduction_ratio, op))
}
