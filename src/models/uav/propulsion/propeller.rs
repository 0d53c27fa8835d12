//! Propeller sizing.
//!
//! The propeller is sized for takeoff: its diameter delivers the takeoff
//! thrust at a chosen fraction of the maximum tip-speed proxy `n·D`. The
//! operating point in every scenario then follows from the thrust and the
//! aerodynamic surrogates in [`PropellerAerodynamics`].

mod aerodynamics;
mod constraints;
mod definition;
mod estimation;
mod performance;

pub use aerodynamics::{IncidenceModel, PropellerAerodynamics};

use twine_core::Model;
use uom::si::{
    f64::{AngularVelocity, Force, Length, Mass, Power, Torque, Velocity},
    length::meter,
    mass::kilogram,
    velocity::meter_per_second,
};

use crate::{
    models::uav::{
        margins::{Margins, export_margins},
        scenarios::FlightCondition,
    },
    support::{
        catalogue::{CatalogueError, Sourcing},
        scenario::PerScenario,
        variables::{Export, VariableError, VariableStore},
    },
};

/// Reference propeller the scaling laws are anchored to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropellerReference {
    pub diameter: Length,
    pub mass: Mass,
    /// Maximum rotational speed times diameter allowed by the manufacturer.
    pub nd_max: Velocity,
}

impl Default for PropellerReference {
    /// An 11 inch APC multirotor propeller.
    fn default() -> Self {
        Self {
            diameter: Length::new::<meter>(0.2794),
            mass: Mass::new::<kilogram>(0.014),
            nd_max: Velocity::new::<meter_per_second>(44.45),
        }
    }
}

/// Propeller design variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropellerDesign {
    /// Pitch over diameter, β.
    pub pitch_ratio: f64,
    /// Takeoff `n·D` over the reference maximum.
    pub nd_ratio: f64,
    pub climb_advance_ratio: f64,
    pub cruise_advance_ratio: f64,
}

impl Default for PropellerDesign {
    fn default() -> Self {
        Self {
            pitch_ratio: 0.35,
            nd_ratio: 0.9,
            climb_advance_ratio: 0.15,
            cruise_advance_ratio: 0.3,
        }
    }
}

/// Characteristics seen by the rest of the vehicle, whether estimated or
/// taken from a catalogue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropellerCharacteristics {
    pub pitch_ratio: f64,
    pub diameter: Length,
    pub mass: Mass,
}

/// Propeller operating point in one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropellerOperating {
    pub thrust: Force,
    pub thrust_coefficient: f64,
    pub power_coefficient: f64,
    pub speed: AngularVelocity,
    pub power: Power,
    pub torque: Torque,
}

/// Propeller margins, feasible when non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropellerConstraints {
    /// Climb `n·D` against the reference maximum.
    pub climb_speed: f64,
    /// Cruise `n·D` against the reference maximum.
    pub cruise_speed: f64,
    /// Climb airspeed against the one implied by the advance ratio.
    pub climb_advance_ratio: f64,
    /// Cruise airspeed against the one implied by the advance ratio.
    pub cruise_advance_ratio: f64,
}

/// Input to [`Propeller`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropellerInput {
    pub design: PropellerDesign,
    pub flight: PerScenario<FlightCondition>,
}

/// Output of [`Propeller`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropellerResults {
    pub takeoff_nd: Velocity,
    pub estimated: PropellerCharacteristics,
    pub characteristics: PropellerCharacteristics,
    pub operating: PerScenario<PropellerOperating>,
    pub constraints: PropellerConstraints,
}

/// Propeller discipline group.
#[derive(Debug, Clone, Copy)]
pub struct Propeller<'a> {
    pub reference: PropellerReference,
    pub aerodynamics: PropellerAerodynamics,
    pub sourcing: Sourcing<'a, PropellerCharacteristics>,
}

impl Default for Propeller<'_> {
    fn default() -> Self {
        Self::estimated(PropellerReference::default())
    }
}

impl<'a> Propeller<'a> {
    /// A propeller sized by scaling laws alone.
    #[must_use]
    pub fn estimated(reference: PropellerReference) -> Self {
        Self {
            reference,
            aerodynamics: PropellerAerodynamics::default(),
            sourcing: Sourcing::Estimated,
        }
    }

    /// Replaces the sourcing strategy.
    #[must_use]
    pub fn with_sourcing(self, sourcing: Sourcing<'a, PropellerCharacteristics>) -> Self {
        Self { sourcing, ..self }
    }
}

impl Model for Propeller<'_> {
    type Input = PropellerInput;
    type Output = PropellerResults;
    type Error = CatalogueError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let PropellerInput { design, flight } = input;

        let takeoff_nd = definition::takeoff_nd(design, &self.reference);
        let diameter = estimation::diameter(
            flight.takeoff.thrust,
            flight.takeoff.density,
            takeoff_nd,
            self.aerodynamics.static_coefficients(design.pitch_ratio),
        );
        let estimated = estimation::characteristics(design.pitch_ratio, diameter, &self.reference);

        log::debug!("propeller sourcing: {:?}", self.sourcing);
        let characteristics = self.sourcing.resolve(estimated)?;

        let operating =
            performance::operating_points(&self.aerodynamics, design, &characteristics, flight);
        let constraints = constraints::constraints(
            &self.reference,
            design,
            &characteristics,
            &operating,
            flight,
        );

        Ok(PropellerResults {
            takeoff_nd,
            estimated,
            characteristics,
            operating,
            constraints,
        })
    }
}

impl Export for PropellerResults {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        store.put(format!("{prefix}:ND:takeoff"), self.takeoff_nd)?;
        store.put(format!("{prefix}:beta:estimated"), self.estimated.pitch_ratio)?;
        store.put(format!("{prefix}:diameter:estimated"), self.estimated.diameter)?;
        store.put(format!("{prefix}:mass:estimated"), self.estimated.mass)?;
        store.put(format!("{prefix}:beta"), self.characteristics.pitch_ratio)?;
        store.put(format!("{prefix}:diameter"), self.characteristics.diameter)?;
        store.put(format!("{prefix}:mass"), self.characteristics.mass)?;

        for (scenario, op) in self.operating.iter() {
            let name = scenario.name();
            store.put(format!("{prefix}:thrust:{name}"), op.thrust)?;
            store.put(format!("{prefix}:CT:{name}"), op.thrust_coefficient)?;
            store.put(format!("{prefix}:CP:{name}"), op.power_coefficient)?;
            store.put(format!("{prefix}:speed:{name}"), op.speed)?;
            store.put(format!("{prefix}:power:{name}"), op.power)?;
            store.put(format!("{prefix}:torque:{name}"), op.torque)?;
        }

        export_margins(&self.constraints, prefix, store)
    }
}

impl Margins for PropellerConstraints {
    fn margins(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("ND:climb", self.climb_speed),
            ("ND:cruise", self.cruise_speed),
            ("airspeed:climb", self.climb_advance_ratio),
            ("airspeed:cruise", self.cruise_advance_ratio),
        ]
    }
}
