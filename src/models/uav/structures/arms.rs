//! Multirotor arms and body.
//!
//! Arms are hollow tubes long enough to keep neighbouring propellers apart,
//! sized in bending by the takeoff thrust at their tip. The body scales with
//! the arms from a reference frame.

use std::f64::consts::PI;

use twine_core::Model;
use uom::si::{
    f64::{Force, Length, Mass, MassDensity, Pressure},
    force::newton,
    length::meter,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
};

use crate::{
    models::uav::scenarios::ArmLayout,
    support::{
        constraint::{InvalidInput, StrictlyPositive, UnitInterval},
        variables::{Export, VariableError, VariableStore},
    },
};

/// Arm tube material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmMaterial {
    pub max_stress: Pressure,
    pub density: MassDensity,
}

impl Default for ArmMaterial {
    /// Carbon fibre tube.
    fn default() -> Self {
        Self {
            max_stress: Pressure::new::<pascal>(70e6),
            density: MassDensity::new::<kilogram_per_cubic_meter>(1700.0),
        }
    }
}

/// Reference frame the body mass scales from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReference {
    pub body_mass: Mass,
    pub arms_mass: Mass,
}

impl Default for FrameReference {
    fn default() -> Self {
        Self {
            body_mass: Mass::new::<kilogram>(1.5),
            arms_mass: Mass::new::<kilogram>(0.38),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmsInput {
    pub layout: ArmLayout,
    pub propeller_diameter: Length,
    /// Takeoff thrust of one propeller.
    pub takeoff_thrust: Force,
    /// Inner over outer tube diameter.
    pub diameter_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmsResults {
    pub arm_length: Length,
    pub outer_diameter: Length,
    pub inner_diameter: Length,
    /// All arms together.
    pub arms_mass: Mass,
    pub body_mass: Mass,
}

impl ArmsResults {
    #[must_use]
    pub fn airframe_mass(&self) -> Mass {
        self.arms_mass + self.body_mass
    }
}

/// Arms and body of a multirotor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Arms {
    pub material: ArmMaterial,
    pub frame: FrameReference,
}

impl Model for Arms {
    type Input = ArmsInput;
    type Output = ArmsResults;
    type Error = InvalidInput;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        input.layout.validate()?;
        UnitInterval::new(input.diameter_ratio).map_err(|e| e.on("diameter_ratio"))?;
        StrictlyPositive::new(1.0 - input.diameter_ratio).map_err(|e| e.on("diameter_ratio"))?;

        let arms = f64::from(input.layout.arms);
        let k = input.diameter_ratio;

        // Propeller tips of neighbouring arms just touch.
        let length = input.propeller_diameter.get::<meter>() / 2.0 / (PI / arms).sin();

        let moment = input.takeoff_thrust.get::<newton>()
            * f64::from(input.layout.propellers_per_arm)
            * length;
        let outer = (32.0 * moment
            / (PI * self.material.max_stress.get::<pascal>() * (1.0 - k.powi(4))))
        .cbrt();
        let inner = k * outer;

        let arms_mass = PI / 4.0
            * (outer * outer - inner * inner)
            * length
            * self.material.density.get::<kilogram_per_cubic_meter>()
            * arms;
        let body_mass = self.frame.body_mass.get::<kilogram>() * arms_mass
            / self.frame.arms_mass.get::<kilogram>();

        Ok(ArmsResults {
            arm_length: Length::new::<meter>(length),
            outer_diameter: Length::new::<meter>(outer),
            inner_diameter: Length::new::<meter>(inner),
            arms_mass: Mass::new::<kilogram>(arms_mass),
            body_mass: Mass::new::<kilogram>(body_mass),
        })
    }
}

impl ArmsResults {
    /// Writes the arm tubes without the body, for airframes that carry the
    /// arms on a fuselage.
    ///
    /// # Errors
    ///
    /// Propagates [`VariableError::Duplicate`] from the store.
    pub fn export_arms(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        store.put(format!("{prefix}:arms:length"), self.arm_length)?;
        store.put(format!("{prefix}:arms:diameter:outer"), self.outer_diameter)?;
        store.put(format!("{prefix}:arms:diameter:inner"), self.inner_diameter)?;
        store.put(format!("{prefix}:arms:mass"), self.arms_mass)?;
        Ok(())
    }
}

impl Export for ArmsResults {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        self.export_arms(prefix, store)?;
        store.put(format!("{prefix}:body:mass"), self.body_mass)?;
        Ok(())
    }
}
