//! Lithium-polymer battery sizing.
//!
//! The pack energy is proportional to the payload mass and its voltage
//! follows the takeoff motor voltage. [`HoverPackSizing`] keeps the older
//! cell-count sizing for a given battery mass.

mod estimation;
mod hover_pack;
mod performance;

pub use hover_pack::{HoverPackInput, HoverPackResults, HoverPackSizing};

use twine_core::Model;
use uom::si::{
    electric_charge::coulomb,
    electric_current::ampere,
    electric_potential::volt,
    energy::joule,
    f64::{ElectricCharge, ElectricCurrent, ElectricPotential, Energy, Mass, Power, Volume},
    mass::kilogram,
    volume::cubic_meter,
};

use crate::{
    models::uav::margins::{Margins, export_margins},
    support::{
        catalogue::{CatalogueError, Sourcing},
        scenario::PerScenario,
        variables::{Export, VariableError, VariableStore},
    },
};

use super::motor::MotorOperating;

/// Reference battery the scaling laws are anchored to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryReference {
    pub mass: Mass,
    pub voltage: ElectricPotential,
    pub capacity: ElectricCharge,
    pub energy: Energy,
    pub max_current: ElectricCurrent,
    pub volume: Volume,
    /// Usable fraction of the capacity.
    pub depth_of_discharge: f64,
    pub cell_voltage: ElectricPotential,
}

impl Default for BatteryReference {
    /// A 3S 3300 mAh pack.
    fn default() -> Self {
        Self {
            mass: Mass::new::<kilogram>(0.329),
            voltage: ElectricPotential::new::<volt>(11.1),
            capacity: ElectricCharge::new::<coulomb>(11_880.0),
            energy: Energy::new::<joule>(131_868.0),
            max_current: ElectricCurrent::new::<ampere>(150.0),
            volume: Volume::new::<cubic_meter>(1.64e-4),
            depth_of_discharge: 0.8,
            cell_voltage: ElectricPotential::new::<volt>(3.7),
        }
    }
}

/// Battery design variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryDesign {
    /// Pack voltage over the takeoff motor voltage, `k_vb`.
    pub voltage_ratio: f64,
    /// Battery mass over payload mass, `k_mb`.
    pub mass_ratio: f64,
}

impl Default for BatteryDesign {
    fn default() -> Self {
        Self {
            voltage_ratio: 1.2,
            mass_ratio: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryCharacteristics {
    /// Cells in series; a single branch in parallel.
    pub cells: f64,
    pub voltage: ElectricPotential,
    pub capacity: ElectricCharge,
    pub energy: Energy,
    pub max_current: ElectricCurrent,
    pub max_power: Power,
    pub mass: Mass,
    pub volume: Volume,
    pub depth_of_discharge: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryOperating {
    pub power: Power,
    pub current: ElectricCurrent,
}

/// Battery margins, feasible when non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryConstraints {
    pub takeoff_voltage: f64,
    pub climb_voltage: f64,
    pub cruise_voltage: f64,
    pub takeoff_power: f64,
    pub climb_power: f64,
    pub cruise_power: f64,
}

/// Input to [`Battery`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryInput {
    pub design: BatteryDesign,
    pub payload_mass: Mass,
    pub payload_power: Power,
    pub propeller_count: u32,
    pub esc_efficiency: f64,
    pub motor: PerScenario<MotorOperating>,
}

/// Output of [`Battery`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryResults {
    pub estimated: BatteryCharacteristics,
    pub characteristics: BatteryCharacteristics,
    pub operating: PerScenario<BatteryOperating>,
    pub constraints: BatteryConstraints,
}

/// Battery discipline group.
#[derive(Debug, Clone, Copy)]
pub struct Battery<'a> {
    pub reference: BatteryReference,
    pub sourcing: Sourcing<'a, BatteryCharacteristics>,
}

impl Default for Battery<'_> {
    fn default() -> Self {
        Self {
            reference: BatteryReference::default(),
            sourcing: Sourcing::Estimated,
        }
    }
}

impl Model for Battery<'_> {
    type Input = BatteryInput;
    type Output = BatteryResults;
    type Error = CatalogueError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let energy = estimation::energy(&input.design, input.payload_mass, &self.reference);
        let cells = estimation::series_cells(&input.design, &input.motor.takeoff, &self.reference);
        let estimated = estimation::characteristics(cells, energy, &self.reference);

        log::debug!("battery sourcing: {:?}", self.sourcing);
        let characteristics = self.sourcing.resolve(estimated)?;

        let load = performance::Load {
            motors: f64::from(input.propeller_count),
            esc_efficiency: input.esc_efficiency,
            payload_power: input.payload_power,
        };
        let operating = performance::operating_points(&characteristics, &load, &input.motor);
        let constraints = performance::constraints(&characteristics, &load, &input.motor);

        Ok(BatteryResults {
            estimated,
            characteristics,
            operating,
            constraints,
        })
    }
}

impl Export for BatteryCharacteristics {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        store.put(format!("{prefix}:cell:number:series"), self.cells)?;
        store.put(format!("{prefix}:cell:number:parallel"), 1.0)?;
        store.put(format!("{prefix}:voltage"), self.voltage)?;
        store.put(format!("{prefix}:capacity"), self.capacity)?;
        store.put(format!("{prefix}:energy"), self.energy)?;
        store.put(format!("{prefix}:current:max"), self.max_current)?;
        store.put(format!("{prefix}:power:max"), self.max_power)?;
        store.put(format!("{prefix}:mass"), self.mass)?;
        store.put(format!("{prefix}:volume"), self.volume)?;
        store.put(format!("{prefix}:DoD:max"), self.depth_of_discharge)?;
        Ok(())
    }
}

impl Export for BatteryResults {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        self.estimated.export(&format!("{prefix}:estimated"), store)?;
        self.characteristics.export(prefix, store)?;

        for (scenario, op) in self.operating.iter() {
            store.put(format!("{prefix}:power:{}", scenario.name()), op.power)?;
            store.put(format!("{prefix}:current:{}", scenario.name()), op.current)?;
        }

        export_margins(&self.constraints, prefix, store)
    }
}

impl Margins for BatteryConstraints {
    fn margins(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("voltage:takeoff", self.takeoff_voltage),
            ("voltage:climb", self.climb_voltage),
            ("voltage:cruise", self.cruise_voltage),
            ("power:takeoff", self.takeoff_power),
            ("power:climb", self.climb_power),
            ("power:cruise", self.cruise_power),
        ]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::power::watt;

    use crate::models::uav::propulsion::motor::{
        Motor, MotorDesign, MotorInput, tests::quad_propeller,
    };

    pub(crate) fn quad_motor() -> PerScenario<MotorOperating> {
        Motor::default()
            .call(&MotorInput {
                design: MotorDesign::default(),
                propeller: quad_propeller(),
            })
            .unwrap()
            .operating
    }

    fn input() -> BatteryInput {
        BatteryInput {
            design: BatteryDesign::default(),
            payload_mass: Mass::new::<kilogram>(1.5),
            payload_power: Power::new::<watt>(10.0),
            propeller_count: 4,
            esc_efficiency: 0.95,
            motor: quad_motor(),
        }
    }

    #[test]
    fn pack_follows_takeoff_voltage() {
        let out = Battery::default().call(&input()).unwrap();

        assert_relative_eq!(out.characteristics.cells, 5.042_175_077_469_142, epsilon = 1e-9);
        assert_relative_eq!(
            out.characteristics.voltage.get::<volt>(),
            18.656_047_786_635_824,
            epsilon = 1e-9
        );
        // k_vb sizes the pack exactly on the takeoff motor voltage.
        assert_relative_eq!(out.constraints.takeoff_voltage, 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(out.constraints.cruise_voltage, 0.407_321_602_023_549_3, epsilon = 1e-9);
        assert_relative_eq!(out.constraints.takeoff_power, 0.792_879_556_314_867_4, epsilon = 1e-9);
    }

    #[test]
    fn scenario_loads() {
        let op = Battery::default().call(&input()).unwrap().operating;

        assert_relative_eq!(op.takeoff.power.get::<watt>(), 1_582.289_690_284_554_6, epsilon = 1e-6);
        assert_relative_eq!(op.hover.current.get::<ampere>(), 28.694_407_545_858_212, epsilon = 1e-8);
        assert_relative_eq!(op.climb.current.get::<ampere>(), 42.792_329_409_964_715, epsilon = 1e-8);
        assert_relative_eq!(op.cruise.power.get::<watt>(), 649.671_129_416_22, epsilon = 1e-6);
    }

    #[test]
    fn dead_pack_draws_no_current() {
        let catalogue = |estimated: &BatteryCharacteristics| -> Result<_, CatalogueError> {
            Ok(BatteryCharacteristics {
                voltage: ElectricPotential::new::<volt>(0.0),
                ..*estimated
            })
        };
        let battery = Battery {
            sourcing: Sourcing::OffTheShelf(&catalogue),
            ..Battery::default()
        };

        let op = battery.call(&input()).unwrap().operating;
        for (_, op) in op.iter() {
            assert_eq!(op.current.get::<ampere>(), 0.0);
        }
        assert!(op.hover.power.get::<watt>() > 0.0);
    }
}
