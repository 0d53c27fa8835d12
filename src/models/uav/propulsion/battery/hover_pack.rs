//! Cell-count pack sizing from a battery mass and hover power.
//!
//! An older sizing path that fixes the battery mass first and rounds the
//! voltage up to a whole number of cells, instead of sizing the energy on
//! the payload.

use twine_core::Model;
use uom::si::{
    electric_charge::coulomb,
    electric_current::ampere,
    electric_potential::volt,
    f64::{ElectricCharge, ElectricCurrent, ElectricPotential, Mass, Power, Time},
    mass::kilogram,
    power::watt,
    time::second,
};

use crate::support::constraint::{InvalidInput, StrictlyPositive, UnitInterval};

use super::{BatteryReference, estimation};

/// Input to [`HoverPackSizing`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverPackInput {
    /// Battery mass.
    pub mass: Mass,
    /// Voltage the pack must at least reach.
    pub voltage_estimate: ElectricPotential,
    /// Electrical power of one motor in hover.
    pub hover_power: Power,
    pub propeller_count: u32,
    pub esc_efficiency: f64,
}

/// Output of [`HoverPackSizing`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverPackResults {
    /// Cells in series.
    pub cells: u32,
    pub voltage: ElectricPotential,
    pub capacity: ElectricCharge,
    /// Current drawn in hover.
    pub current: ElectricCurrent,
    pub max_current: ElectricCurrent,
    /// Hover time down to the usable depth of discharge.
    pub hover_time: Time,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoverPackSizing {
    pub reference: BatteryReference,
}

impl Model for HoverPackSizing {
    type Input = HoverPackInput;
    type Output = HoverPackResults;
    type Error = InvalidInput;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        StrictlyPositive::new(input.mass).map_err(|e| e.on("mass"))?;
        StrictlyPositive::new(input.voltage_estimate).map_err(|e| e.on("voltage_estimate"))?;
        StrictlyPositive::new(input.hover_power).map_err(|e| e.on("hover_power"))?;
        StrictlyPositive::new(input.propeller_count).map_err(|e| e.on("propeller_count"))?;
        UnitInterval::new(input.esc_efficiency).map_err(|e| e.on("esc_efficiency"))?;
        StrictlyPositive::new(input.esc_efficiency).map_err(|e| e.on("esc_efficiency"))?;

        let reference = &self.reference;
        let cell = reference.cell_voltage.get::<volt>();
        let cells = (input.voltage_estimate.get::<volt>() / cell).ceil() as u32;
        let voltage = cell * f64::from(cells);

        let capacity = input.mass.get::<kilogram>() / reference.mass.get::<kilogram>()
            * reference.capacity.get::<coulomb>()
            / voltage
            * reference.voltage.get::<volt>();
        let current = input.hover_power.get::<watt>() * f64::from(input.propeller_count)
            / input.esc_efficiency
            / voltage;
        let capacity = ElectricCharge::new::<coulomb>(capacity);

        Ok(HoverPackResults {
            cells,
            voltage: ElectricPotential::new::<volt>(voltage),
            capacity,
            current: ElectricCurrent::new::<ampere>(current),
            max_current: estimation::max_current(capacity, reference),
            hover_time: Time::new::<second>(
                reference.depth_of_discharge * capacity.get::<coulomb>() / current,
            ),
        })
    }
}
