//! Electronic speed controller sizing.
//!
//! The ESC is sized on the takeoff power it must switch at battery voltage.
//! Its efficiency is a reference value, known before the battery is sized,
//! which lets the battery account for ESC losses without a loop.

use twine_core::Model;
use uom::si::{
    electric_potential::volt,
    f64::{ElectricPotential, Mass, Power},
    mass::kilogram,
    power::watt,
};

use crate::{
    models::uav::margins::{Margins, export_margins},
    support::{
        catalogue::Sourcing,
        constraint::StrictlyPositive,
        scenario::PerScenario,
        variables::{Export, VariableError, VariableStore},
    },
};

use super::{PropulsionError, margin, motor::MotorOperating};

/// Regression error bounds of the voltage on power, in volts.
const VOLTAGE_ERROR_LOW: f64 = -13.33;
const VOLTAGE_ERROR_HIGH: f64 = 12.78;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscReference {
    pub max_power: Power,
    pub voltage: ElectricPotential,
    pub mass: Mass,
    pub efficiency: f64,
}

impl Default for EscReference {
    fn default() -> Self {
        Self {
            max_power: Power::new::<watt>(3180.0),
            voltage: ElectricPotential::new::<volt>(44.4),
            mass: Mass::new::<kilogram>(0.115),
            efficiency: 0.95,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscDesign {
    /// Maximum power over the takeoff power at battery voltage, `k_esc`.
    pub power_ratio: f64,
    /// Widening of the voltage band, in percent.
    pub voltage_tolerance: f64,
}

impl Default for EscDesign {
    fn default() -> Self {
        Self {
            power_ratio: 1.2,
            voltage_tolerance: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscCharacteristics {
    pub max_power: Power,
    pub voltage: ElectricPotential,
    pub mass: Mass,
    pub efficiency: f64,
}

/// ESC margins, feasible when non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscConstraints {
    pub takeoff_power: f64,
    pub climb_power: f64,
    pub cruise_power: f64,
    /// ESC voltage against the battery voltage.
    pub battery_voltage: f64,
    /// Voltage above the band of real ESCs of this power.
    pub voltage_min: f64,
    /// Voltage below the band of real ESCs of this power.
    pub voltage_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscInput {
    pub design: EscDesign,
    pub battery_voltage: ElectricPotential,
    pub motor: PerScenario<MotorOperating>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscResults {
    pub estimated: EscCharacteristics,
    pub characteristics: EscCharacteristics,
    /// Power switched in each scenario.
    pub power: PerScenario<Power>,
    pub constraints: EscConstraints,
}

/// ESC discipline group.
#[derive(Debug, Clone, Copy)]
pub struct Esc<'a> {
    pub reference: EscReference,
    pub sourcing: Sourcing<'a, EscCharacteristics>,
}

impl Default for Esc<'_> {
    fn default() -> Self {
        Self {
            reference: EscReference::default(),
            sourcing: Sourcing::Estimated,
        }
    }
}

impl Esc<'_> {
    /// Efficiency seen by the battery.
    #[must_use]
    pub fn efficiency(&self) -> f64 {
        self.reference.efficiency
    }
}

impl Model for Esc<'_> {
    type Input = EscInput;
    type Output = EscResults;
    type Error = PropulsionError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let battery = StrictlyPositive::new(input.battery_voltage.get::<volt>())
            .map_err(|e| e.on("battery_voltage"))?
            .into_inner();

        let takeoff = &input.motor.takeoff;
        let takeoff_voltage = StrictlyPositive::new(takeoff.voltage.get::<volt>())
            .map_err(|e| e.on("motor:voltage:takeoff"))?
            .into_inner();
        let max_power =
            input.design.power_ratio * takeoff.power.get::<watt>() / takeoff_voltage * battery;
        let power_ratio = max_power / self.reference.max_power.get::<watt>();
        let estimated = EscCharacteristics {
            max_power: Power::new::<watt>(max_power),
            voltage: self.reference.voltage * power_ratio.cbrt(),
            mass: self.reference.mass * power_ratio,
            efficiency: self.reference.efficiency,
        };

        log::debug!("ESC sourcing: {:?}", self.sourcing);
        let characteristics = EscCharacteristics {
            efficiency: estimated.efficiency,
            ..self.sourcing.resolve(estimated)?
        };

        let power = input.motor.map(|_, op| {
            let voltage = op.voltage.get::<volt>();
            if voltage == 0.0 {
                Power::new::<watt>(0.0)
            } else {
                op.power * (battery / voltage)
            }
        });

        let constraints = constraints(&characteristics, battery, &power, input.design.voltage_tolerance);

        Ok(EscResults {
            estimated,
            characteristics,
            power,
            constraints,
        })
    }
}

fn constraints(
    esc: &EscCharacteristics,
    battery_voltage: f64,
    power: &PerScenario<Power>,
    tolerance: f64,
) -> EscConstraints {
    let max_power = esc.max_power.get::<watt>();
    let voltage = esc.voltage.get::<volt>();

    let k = 1.0 + tolerance / 100.0;
    let voltage_hat = 1.84 * max_power.powf(0.36);
    let voltage_min = voltage_hat + k * VOLTAGE_ERROR_LOW;
    let voltage_max = voltage_hat + k * VOLTAGE_ERROR_HIGH;

    EscConstraints {
        takeoff_power: margin(max_power, power.takeoff.get::<watt>()),
        climb_power: margin(max_power, power.climb.get::<watt>()),
        cruise_power: margin(max_power, power.cruise.get::<watt>()),
        battery_voltage: margin(voltage, battery_voltage),
        voltage_min: (voltage - voltage_min) / voltage,
        voltage_max: (voltage_max - voltage) / voltage,
    }
}

impl Export for EscCharacteristics {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        store.put(format!("{prefix}:power:max"), self.max_power)?;
        store.put(format!("{prefix}:voltage"), self.voltage)?;
        store.put(format!("{prefix}:mass"), self.mass)?;
        store.put(format!("{prefix}:efficiency"), self.efficiency)?;
        Ok(())
    }
}

impl Export for EscResults {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        self.estimated.export(&format!("{prefix}:estimated"), store)?;
        self.characteristics.export(prefix, store)?;
        for (scenario, power) in self.power.iter() {
            store.put(format!("{prefix}:power:{}", scenario.name()), *power)?;
        }

        export_margins(&self.constraints, prefix, store)
    }
}

impl Margins for EscConstraints {
    fn margins(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("power:takeoff", self.takeoff_power),
            ("power:climb", self.climb_power),
            ("power:cruise", self.cruise_power),
            ("voltage", self.battery_voltage),
            ("voltage:min", self.voltage_min),
            ("voltage:max", self.voltage_max),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use uom::si::{electric_current::ampere, f64::ElectricCurrent};

    use crate::{
        models::uav::propulsion::battery::tests::quad_motor,
        support::{catalogue::CatalogueError, constraint::ConstraintError},
    };

    fn input() -> EscInput {
        EscInput {
            design: EscDesign::default(),
            battery_voltage: ElectricPotential::new::<volt>(18.656_047_786_635_824),
            motor: quad_motor(),
        }
    }

    #[test]
    fn sized_on_takeoff_power() {
        let out = Esc::default().call(&input()).unwrap();
        let esc = out.characteristics;

        assert_relative_eq!(esc.max_power.get::<watt>(), 537.723_074_077_317_6, epsilon = 1e-7);
        assert_relative_eq!(esc.voltage.get::<volt>(), 24.552_373_815_486_742, epsilon = 1e-9);
        assert_relative_eq!(esc.mass.get::<kilogram>(), 0.019_445_960_226_066_518, epsilon = 1e-12);
        assert_relative_eq!(out.power.hover.get::<watt>(), 226.969_842_731_558_63, epsilon = 1e-7);
    }

    #[test]
    fn margins() {
        let c = Esc::default().call(&input()).unwrap().constraints;

        // k_esc sizes the ESC exactly on takeoff.
        assert_relative_eq!(c.takeoff_power, 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(c.cruise_power, 0.523_302_808_957_467, epsilon = 1e-9);
        assert_relative_eq!(c.battery_voltage, 0.240_152_991_851_717_85, epsilon = 1e-9);
        assert_relative_eq!(c.voltage_min, 0.822_269_256_952_591_7, epsilon = 1e-9);
        assert_relative_eq!(c.voltage_max, 0.241_171_703_836_738_06, epsilon = 1e-9);
    }

    #[test]
    fn unpowered_scenario_switches_no_power() {
        let mut input = input();
        input.motor.cruise.voltage = ElectricPotential::new::<volt>(0.0);
        input.motor.cruise.current = ElectricCurrent::new::<ampere>(0.0);

        let out = Esc::default().call(&input).unwrap();

        assert_relative_eq!(out.power.cruise.get::<watt>(), 0.0);
        assert_relative_eq!(out.constraints.cruise_power, 1.0);
        for (name, value) in out.constraints.margins() {
            assert!(value.is_finite(), "{name} = {value}");
        }
    }

    #[test]
    fn zero_takeoff_voltage_is_rejected() {
        let mut input = input();
        input.motor.takeoff.voltage = ElectricPotential::new::<volt>(0.0);

        let err = Esc::default().call(&input).unwrap_err();

        assert!(matches!(
            err,
            PropulsionError::InvalidInput(e) if e == ConstraintError::Zero.on("motor:voltage:takeoff")
        ));
    }

    #[test]
    fn catalogue_keeps_reference_efficiency() {
        let catalogue = |estimated: &EscCharacteristics| -> Result<_, CatalogueError> {
            Ok(EscCharacteristics {
                max_power: Power::new::<watt>(600.0),
                efficiency: 0.5,
                ..*estimated
            })
        };
        let esc = Esc {
            sourcing: Sourcing::OffTheShelf(&catalogue),
            ..Esc::default()
        };

        let out = esc.call(&input()).unwrap();
        assert_relative_eq!(out.characteristics.max_power.get::<watt>(), 600.0);
        assert_relative_eq!(out.characteristics.efficiency, esc.efficiency());
    }
}
