//! Electric propulsion chain: propeller, motor (and gearbox), battery, ESC
//! and wires.
//!
//! Each component group runs the same pipeline:
//!
//! 1. **Definition**: a few sizing parameters derived from design variables
//!    and upstream results.
//! 2. **Estimation**: scaling laws from a reference component.
//! 3. **Selection**: optionally, a catalogue replaces the estimate with a real
//!    product (see [`Sourcing`](crate::support::catalogue::Sourcing)).
//! 4. **Performance**: operating point in every sizing scenario.
//! 5. **Constraints**: normalized margins, feasible when non-negative.
//!
//! Whether a component is estimated or selected never changes the shape of its
//! results, only where the characteristics came from.
//!
//! [`PropulsionChain`] runs propeller, motor, battery and ESC in that order
//! for one propulsion system. Wires are left to the assembly, which knows
//! where they run.

pub mod battery;
pub mod esc;
pub mod gearbox;
pub mod motor;
pub mod propeller;
pub mod wires;

use std::fmt;

use thiserror::Error;
use twine_core::Model;
use uom::si::f64::{Mass, Power};

use crate::{
    models::uav::{
        margins::Margins,
        mtow::PropulsionMass,
        scenarios::FlightCondition,
        stability::{PropulsionLayout, PropulsionMasses},
    },
    support::{
        catalogue::{Catalogue, CatalogueError, Component, Sourcing},
        constraint::InvalidInput,
        scenario::{PerScenario, Scenario},
        variables::{Export, VariableError, VariableStore},
    },
};

use battery::{
    Battery, BatteryCharacteristics, BatteryDesign, BatteryInput, BatteryReference, BatteryResults,
};
use esc::{Esc, EscCharacteristics, EscDesign, EscInput, EscReference, EscResults};
use motor::{Motor, MotorCharacteristics, MotorDesign, MotorInput, MotorReference, MotorResults};
use propeller::{
    Propeller, PropellerCharacteristics, PropellerDesign, PropellerInput, PropellerReference,
    PropellerResults,
};
use wires::{WiresReference, WiresResults};

/// Identifies a propulsion system on vehicles that may carry more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropulsionId {
    /// Vertical-lift rotors.
    Multirotor,
    /// Forward-flight propellers.
    FixedWing,
}

impl PropulsionId {
    /// Name used in variable keys.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PropulsionId::Multirotor => "multirotor",
            PropulsionId::FixedWing => "fixedwing",
        }
    }
}

impl fmt::Display for PropulsionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sourcing and architecture switches for one propulsion system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropulsionConfig {
    pub off_the_shelf_propeller: bool,
    pub off_the_shelf_motor: bool,
    pub off_the_shelf_battery: bool,
    pub off_the_shelf_esc: bool,
    /// Fits a reduction gearbox between motor and propeller.
    pub gearbox: bool,
}

/// Component scopes under a propulsion system's export prefix.
const PROPELLER: &str = "propeller";
const MOTOR: &str = "motor";
const GEARBOX: &str = "gearbox";
const BATTERY: &str = "battery";
const ESC: &str = "esc";

/// Errors raised while sizing a propulsion system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropulsionError {
    /// An upstream value would break the sizing formulas.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    /// A component could not be sourced.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

/// Catalogues for components sourced off the shelf.
///
/// Only the components whose `off_the_shelf` flag is set need one.
#[derive(Clone, Copy, Default)]
pub struct Catalogues<'a> {
    pub propeller: Option<&'a dyn Catalogue<PropellerCharacteristics>>,
    pub motor: Option<&'a dyn Catalogue<MotorCharacteristics>>,
    pub battery: Option<&'a dyn Catalogue<BatteryCharacteristics>>,
    pub esc: Option<&'a dyn Catalogue<EscCharacteristics>>,
}

/// Reference components of one propulsion system.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PropulsionReferences {
    pub propeller: PropellerReference,
    pub motor: MotorReference,
    pub battery: BatteryReference,
    pub esc: EscReference,
    pub wires: WiresReference,
}

/// Sizing coefficients of one propulsion system.
///
/// The defaults suit lift rotors.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PropulsionDesign {
    pub propeller: PropellerDesign,
    pub motor: MotorDesign,
    pub battery: BatteryDesign,
    pub esc: EscDesign,
}

impl PropulsionDesign {
    /// Coefficients for a propeller pulling a wing through the air.
    ///
    /// Cruise sets the nominal torque, so climb and takeoff need headroom
    /// in motor torque, battery voltage and ESC power.
    #[must_use]
    pub fn forward_flight() -> Self {
        Self {
            propeller: PropellerDesign {
                pitch_ratio: 0.7,
                nd_ratio: 0.4,
                climb_advance_ratio: 0.45,
                cruise_advance_ratio: 0.6,
            },
            motor: MotorDesign {
                torque_ratio: 2.5,
                ..MotorDesign::default()
            },
            battery: BatteryDesign {
                voltage_ratio: 2.5,
                ..BatteryDesign::default()
            },
            esc: EscDesign {
                power_ratio: 4.5,
                ..EscDesign::default()
            },
        }
    }
}

/// Input to [`PropulsionChain`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainInput {
    pub design: PropulsionDesign,
    pub flight: PerScenario<FlightCondition>,
    pub propeller_count: u32,
    /// Sizes the battery energy.
    pub payload_mass: Mass,
    /// Drawn from this system's battery in every scenario.
    pub payload_power: Power,
}

/// Output of [`PropulsionChain`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionResults {
    pub propeller: PropellerResults,
    /// Motor and, when fitted, its gearbox.
    pub motor: MotorResults,
    pub battery: BatteryResults,
    pub esc: EscResults,
}

/// Propeller, motor, battery and ESC of one propulsion system.
#[derive(Debug, Clone, Copy)]
pub struct PropulsionChain<'a> {
    pub propeller: Propeller<'a>,
    pub motor: Motor<'a>,
    pub battery: Battery<'a>,
    pub esc: Esc<'a>,
}

impl<'a> PropulsionChain<'a> {
    /// Builds the chain, resolving every `off_the_shelf` flag against the
    /// supplied catalogues.
    ///
    /// `steady` is the scenario the motor's nominal torque is sized on.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Missing`] if a flag is set for a component
    /// without a catalogue.
    pub fn new(
        references: &PropulsionReferences,
        flags: &PropulsionConfig,
        steady: Scenario,
        catalogues: Catalogues<'a>,
    ) -> Result<Self, CatalogueError> {
        Ok(Self {
            propeller: Propeller::estimated(references.propeller).with_sourcing(
                Sourcing::from_flag(
                    flags.off_the_shelf_propeller,
                    Component::Propeller,
                    catalogues.propeller,
                )?,
            ),
            motor: Motor {
                reference: references.motor,
                gearbox: flags.gearbox,
                steady,
                sourcing: Sourcing::from_flag(
                    flags.off_the_shelf_motor,
                    Component::Motor,
                    catalogues.motor,
                )?,
            },
            battery: Battery {
                reference: references.battery,
                sourcing: Sourcing::from_flag(
                    flags.off_the_shelf_battery,
                    Component::Battery,
                    catalogues.battery,
                )?,
            },
            esc: Esc {
                reference: references.esc,
                sourcing: Sourcing::from_flag(
                    flags.off_the_shelf_esc,
                    Component::Esc,
                    catalogues.esc,
                )?,
            },
        })
    }
}

impl Model for PropulsionChain<'_> {
    type Input = ChainInput;
    type Output = PropulsionResults;
    type Error = PropulsionError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let ChainInput {
            design,
            flight,
            propeller_count,
            payload_mass,
            payload_power,
        } = input;

        let propeller = self.propeller.call(&PropellerInput {
            design: design.propeller,
            flight: *flight,
        })?;

        let motor = self.motor.call(&MotorInput {
            design: design.motor,
            propeller: propeller.operating,
        })?;

        // The ESC efficiency is a reference value, known before the ESC is
        // sized, whatever its sourcing.
        let battery = self.battery.call(&BatteryInput {
            design: design.battery,
            payload_mass: *payload_mass,
            payload_power: *payload_power,
            propeller_count: *propeller_count,
            esc_efficiency: self.esc.efficiency(),
            motor: motor.operating,
        })?;

        let esc = self.esc.call(&EscInput {
            design: design.esc,
            battery_voltage: battery.characteristics.voltage,
            motor: motor.operating,
        })?;

        Ok(PropulsionResults {
            propeller,
            motor,
            battery,
            esc,
        })
    }
}

impl PropulsionResults {
    /// Masses of this system for the takeoff-weight sum.
    #[must_use]
    pub fn masses(&self, id: PropulsionId, propeller_count: u32, wires: &WiresResults) -> PropulsionMass {
        PropulsionMass {
            id,
            propeller_count,
            propeller: self.propeller.characteristics.mass,
            motor: self.motor.characteristics.mass,
            gearbox: self.motor.gearbox.mass,
            esc: self.esc.characteristics.mass,
            wires: wires.mass,
            battery: self.battery.characteristics.mass,
        }
    }

    /// Masses and their placement for the balance of the vehicle.
    #[must_use]
    pub fn balance(&self, id: PropulsionId, layout: PropulsionLayout, propeller_count: u32) -> PropulsionMasses {
        PropulsionMasses {
            id,
            layout,
            propeller_count,
            propeller: self.propeller.characteristics.mass,
            motor: self.motor.characteristics.mass,
            motor_length: self.motor.characteristics.length,
            battery: self.battery.characteristics.mass,
        }
    }

    /// Each component's margins, scoped under `scope`.
    #[must_use]
    pub fn margin_groups(&self, scope: &str) -> Vec<(String, &dyn Margins)> {
        vec![
            (format!("{scope}:{PROPELLER}"), &self.propeller.constraints as &dyn Margins),
            (format!("{scope}:{MOTOR}"), &self.motor.constraints),
            (format!("{scope}:{BATTERY}"), &self.battery.constraints),
            (format!("{scope}:{ESC}"), &self.esc.constraints),
        ]
    }
}

impl Export for PropulsionResults {
    /// Writes one scope per component, and one for the gearbox.
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        self.propeller.export(&format!("{prefix}:{PROPELLER}"), store)?;
        self.motor.export(&format!("{prefix}:{MOTOR}"), store)?;
        self.motor.gearbox.export(&format!("{prefix}:{GEARBOX}"), store)?;
        self.battery.export(&format!("{prefix}:{BATTERY}"), store)?;
        self.esc.export(&format!("{prefix}:{ESC}"), store)?;
        Ok(())
    }
}

/// Relative margin `(limit − value) / limit`.
///
/// Non-negative when `value` does not exceed `limit`.
pub(crate) fn margin(limit: f64, value: f64) -> f64 {
    (limit - value) / limit
}
