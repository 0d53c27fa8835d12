//! Endurance and range on one battery charge.
//!
//! Hover endurance and cruise endurance may drain different batteries: a
//! hybrid VTOL hovers on its lift pack and cruises on its forward-flight
//! pack. A vehicle that never hovers has no hover endurance.

use std::convert::Infallible;

use twine_core::Model;
use uom::si::{
    electric_charge::coulomb,
    electric_current::ampere,
    f64::{ElectricCharge, ElectricCurrent, Length, Time, Velocity},
    length::meter,
    time::second,
    velocity::meter_per_second,
};

use crate::support::{
    scenario::Scenario,
    variables::{Export, VariableError, VariableStore},
};

use super::propulsion::battery::BatteryResults;

/// A battery drained at a constant current.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryDrain {
    pub capacity: ElectricCharge,
    pub depth_of_discharge: f64,
    pub current: ElectricCurrent,
}

impl BatteryDrain {
    /// `battery` drained at its current in `scenario`.
    #[must_use]
    pub fn of(battery: &BatteryResults, scenario: Scenario) -> Self {
        Self {
            capacity: battery.characteristics.capacity,
            depth_of_discharge: battery.characteristics.depth_of_discharge,
            current: battery.operating[scenario].current,
        }
    }

    /// Zero when no current is drawn.
    fn flight_time(&self) -> Time {
        let charge = self.depth_of_discharge * self.capacity.get::<coulomb>();
        let current = self.current.get::<ampere>();
        Time::new::<second>(if current > 0.0 { charge / current } else { 0.0 })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnduranceInput {
    pub hover: Option<BatteryDrain>,
    pub cruise: Option<BatteryDrain>,
    pub cruise_speed: Velocity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnduranceResults {
    pub hover: Option<Time>,
    pub cruise: Option<Time>,
    pub range: Option<Length>,
}

/// Time to drain the usable charge at a constant current.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Endurance;

impl Model for Endurance {
    type Input = EnduranceInput;
    type Output = EnduranceResults;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let cruise = input.cruise.map(|drain| drain.flight_time());
        let speed = input.cruise_speed.get::<meter_per_second>();

        Ok(EnduranceResults {
            hover: input.hover.map(|drain| drain.flight_time()),
            cruise,
            range: cruise.map(|time| Length::new::<meter>(speed * time.get::<second>())),
        })
    }
}

impl Export for EnduranceResults {
    /// Writes only the endurances the vehicle has.
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        if let Some(hover) = self.hover {
            store.put(format!("{prefix}:endurance:hover"), hover)?;
        }
        if let Some(cruise) = self.cruise {
            store.put(format!("{prefix}:endurance:cruise"), cruise)?;
        }
        if let Some(range) = self.range {
            store.put(format!("{prefix}:range:cruise"), range)?;
        }
        Ok(())
    }
}
