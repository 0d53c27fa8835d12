//! Brushless DC motor sizing, with an optional reduction gearbox.
//!
//! The motor is sized on its nominal torque in steady flight and on a torque constant
//! that lets it reach takeoff speed from an estimated battery voltage. All
//! other characteristics scale from a reference motor.

mod constraints;
mod estimation;
mod performance;

use twine_core::Model;
use uom::si::{
    electrical_resistance::ohm,
    f64::{
        AngularVelocity, ElectricCurrent, ElectricPotential, ElectricalResistance, Length, Mass,
        Power, Torque,
    },
    length::meter,
    magnetic_flux::weber,
    mass::kilogram,
    torque::newton_meter,
};

use crate::{
    models::uav::margins::{Margins, export_margins},
    support::{
        catalogue::{CatalogueError, Sourcing},
        scenario::{PerScenario, Scenario},
        units::TorqueConstant,
        variables::{Export, VariableError, VariableStore},
    },
};

use super::{
    gearbox::{Gearbox, GearboxInput, GearboxResults},
    propeller::PropellerOperating,
};

/// Reference motor the scaling laws are anchored to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorReference {
    pub nominal_torque: Torque,
    pub max_torque: Torque,
    pub torque_constant: TorqueConstant,
    pub resistance: ElectricalResistance,
    pub friction_torque: Torque,
    pub mass: Mass,
    pub length: Length,
}

impl Default for MotorReference {
    /// An AXI 5325/16 outrunner.
    fn default() -> Self {
        Self {
            nominal_torque: Torque::new::<newton_meter>(2.32),
            max_torque: Torque::new::<newton_meter>(2.74),
            torque_constant: TorqueConstant::new::<weber>(0.03),
            resistance: ElectricalResistance::new::<ohm>(0.03),
            friction_torque: Torque::new::<newton_meter>(0.03),
            mass: Mass::new::<kilogram>(0.575),
            length: Length::new::<meter>(0.0789),
        }
    }
}

impl From<MotorReference> for MotorCharacteristics {
    fn from(reference: MotorReference) -> Self {
        Self {
            nominal_torque: reference.nominal_torque,
            max_torque: reference.max_torque,
            torque_constant: reference.torque_constant,
            resistance: reference.resistance,
            friction_torque: reference.friction_torque,
            mass: reference.mass,
            length: reference.length,
        }
    }
}

/// Motor design variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorDesign {
    /// Nominal torque over the hover torque, `k_mot`.
    pub torque_ratio: f64,
    /// Speed reachable at the estimated voltage over takeoff speed, `k_speed`.
    pub speed_ratio: f64,
    /// Gearbox reduction ratio, ignored without a gearbox.
    pub reduction_ratio: f64,
    /// Widening of the speed constant band, in percent.
    pub speed_constant_tolerance: f64,
}

impl Default for MotorDesign {
    fn default() -> Self {
        Self {
            torque_ratio: 1.5,
            speed_ratio: 1.2,
            reduction_ratio: 1.0,
            speed_constant_tolerance: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorCharacteristics {
    pub nominal_torque: Torque,
    pub max_torque: Torque,
    pub torque_constant: TorqueConstant,
    pub resistance: ElectricalResistance,
    pub friction_torque: Torque,
    pub mass: Mass,
    pub length: Length,
}

/// Motor operating point in one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorOperating {
    pub torque: Torque,
    pub speed: AngularVelocity,
    pub current: ElectricCurrent,
    pub voltage: ElectricPotential,
    pub power: Power,
    pub efficiency: f64,
}

/// Motor margins, feasible when non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorConstraints {
    /// Takeoff torque against the maximum (transient) torque.
    pub takeoff_torque: f64,
    /// Climb torque against the maximum torque.
    pub climb_torque: f64,
    /// Hover torque against the nominal (steady) torque.
    pub hover_torque: f64,
    /// Cruise torque against the nominal torque.
    pub cruise_torque: f64,
    /// Speed constant above the band of real motors.
    pub speed_constant_min: f64,
    /// Speed constant below the band of real motors.
    pub speed_constant_max: f64,
}

/// Input to [`Motor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorInput {
    pub design: MotorDesign,
    pub propeller: PerScenario<PropellerOperating>,
}

/// Output of [`Motor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorResults {
    pub gearbox: GearboxResults,
    pub estimated: MotorCharacteristics,
    pub characteristics: MotorCharacteristics,
    pub operating: PerScenario<MotorOperating>,
    pub constraints: MotorConstraints,
}

/// Motor discipline group.
#[derive(Debug, Clone, Copy)]
pub struct Motor<'a> {
    pub reference: MotorReference,
    /// Fits a reduction gearbox.
    pub gearbox: bool,
    /// Scenario the nominal torque is sized on: hover for lift rotors,
    /// cruise for forward-flight propellers.
    pub steady: Scenario,
    pub sourcing: Sourcing<'a, MotorCharacteristics>,
}

impl Default for Motor<'_> {
    fn default() -> Self {
        Self {
            reference: MotorReference::default(),
            gearbox: false,
            steady: Scenario::Hover,
            sourcing: Sourcing::Estimated,
        }
    }
}

impl Model for Motor<'_> {
    type Input = MotorInput;
    type Output = MotorResults;
    type Error = CatalogueError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let MotorInput { design, propeller } = input;
        let ratio = if self.gearbox {
            design.reduction_ratio
        } else {
            1.0
        };

        let nominal_torque = estimation::nominal_torque(design, ratio, &propeller[self.steady]);
        let torque_constant = estimation::torque_constant(design, ratio, &propeller.takeoff);
        let estimated = estimation::characteristics(nominal_torque, torque_constant, &self.reference);

        log::debug!("motor sourcing: {:?}", self.sourcing);
        let characteristics = self.sourcing.resolve(estimated)?;

        let gearbox = if self.gearbox {
            Gearbox
                .call(&GearboxInput {
                    reduction_ratio: ratio,
                    nominal_torque: characteristics.nominal_torque,
                })
                .unwrap_or_else(|never| match never {})
        } else {
            GearboxResults::direct_drive()
        };

        let operating = performance::operating_points(&characteristics, ratio, propeller);
        let constraints =
            constraints::constraints(&characteristics, &operating, design.speed_constant_tolerance);

        Ok(MotorResults {
            gearbox,
            estimated,
            characteristics,
            operating,
            constraints,
        })
    }
}

impl Export for MotorCharacteristics {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        store.put(format!("{prefix}:torque:nominal"), self.nominal_torque)?;
        store.put(format!("{prefix}:torque:max"), self.max_torque)?;
        store.put(format!("{prefix}:torque:coefficient"), self.torque_constant)?;
        store.put(format!("{prefix}:torque:friction"), self.friction_torque)?;
        store.put(format!("{prefix}:resistance"), self.resistance)?;
        store.put(format!("{prefix}:mass"), self.mass)?;
        store.put(format!("{prefix}:length"), self.length)?;
        Ok(())
    }
}

impl Export for MotorResults {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        self.estimated.export(&format!("{prefix}:estimated"), store)?;
        self.characteristics.export(prefix, store)?;

        for (scenario, op) in self.operating.iter() {
            let name = scenario.name();
            store.put(format!("{prefix}:torque:{name}"), op.torque)?;
            store.put(format!("{prefix}:speed:{name}"), op.speed)?;
            store.put(format!("{prefix}:current:{name}"), op.current)?;
            store.put(format!("{prefix}:voltage:{name}"), op.voltage)?;
            store.put(format!("{prefix}:power:{name}"), op.power)?;
            store.put(format!("{prefix}:efficiency:{name}"), op.efficiency)?;
        }

        export_margins(&self.constraints, prefix, store)
    }
}

impl Margins for MotorConstraints {
    fn margins(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("torque:takeoff", self.takeoff_torque),
            ("torque:climb", self.climb_torque),
            ("torque:hover", self.hover_torque),
            ("torque:cruise", self.cruise_torque),
            ("speed_constant:min", self.speed_constant_min),
            ("speed_constant:max", self.speed_constant_max),
        ]
    }
}
