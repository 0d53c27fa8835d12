use uom::si::{
    electric_current::ampere,
    electric_potential::volt,
    f64::{ElectricCurrent, Power},
    power::watt,
};

use crate::{
    models::uav::propulsion::{margin, motor::MotorOperating},
    support::scenario::PerScenario,
};

use super::{BatteryCharacteristics, BatteryConstraints, BatteryOperating};

/// Electrical load shared by all motors of one propulsion system.
#[derive(Debug, Clone, Copy)]
pub(super) struct Load {
    pub motors: f64,
    pub esc_efficiency: f64,
    pub payload_power: Power,
}

impl Load {
    /// Power drawn from the pack to run every motor at `motor`.
    fn power(&self, motor: &MotorOperating) -> f64 {
        motor.power.get::<watt>() * self.motors / self.esc_efficiency
    }
}

/// Pack power and current. Current is zero for a zero-voltage pack.
pub(super) fn operating_points(
    battery: &BatteryCharacteristics,
    load: &Load,
    motor: &PerScenario<MotorOperating>,
) -> PerScenario<BatteryOperating> {
    let voltage = battery.voltage.get::<volt>();
    motor.map(|_, op| {
        let power = load.power(op) + load.payload_power.get::<watt>();
        let current = if voltage == 0.0 { 0.0 } else { power / voltage };
        BatteryOperating {
            power: Power::new::<watt>(power),
            current: ElectricCurrent::new::<ampere>(current),
        }
    })
}

/// Voltage and power margins in the three powered scenarios.
pub(super) fn constraints(
    battery: &BatteryCharacteristics,
    load: &Load,
    motor: &PerScenario<MotorOperating>,
) -> BatteryConstraints {
    let voltage = battery.voltage.get::<volt>();
    let max_power = voltage * battery.max_current.get::<ampere>();

    let voltage_margin = |op: &MotorOperating| margin(voltage, op.voltage.get::<volt>());
    let power_margin = |op: &MotorOperating| {
        let drawn = op.voltage.get::<volt>() * op.current.get::<ampere>() * load.motors
            / load.esc_efficiency;
        margin(max_power, drawn)
    };

    BatteryConstraints {
        takeoff_voltage: voltage_margin(&motor.takeoff),
        climb_voltage: voltage_margin(&motor.climb),
        cruise_voltage: voltage_margin(&motor.cruise),
        takeoff_power: power_margin(&motor.takeoff),
        climb_power: power_margin(&motor.climb),
        cruise_power: power_margin(&motor.cruise),
    }
}
