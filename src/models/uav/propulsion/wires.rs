//! Power cables between ESCs and motors.
//!
//! Each motor is fed by three phase wires sized on the current of its
//! steady scenario: cruise for forward flight, hover for lift rotors that
//! stop in cruise.

use twine_core::Model;
use uom::si::{
    electric_current::ampere,
    f64::{ElectricCurrent, Length, LinearMassDensity, Mass},
    length::meter,
    linear_mass_density::kilogram_per_meter,
    mass::kilogram,
};

use crate::support::{
    constraint::{ConstraintError, InvalidInput, NonNegative},
    variables::{Export, VariableError, VariableStore},
};

/// Phases per brushless motor.
const WIRES_PER_MOTOR: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WiresReference {
    pub current: ElectricCurrent,
    pub radius: Length,
    pub linear_density: LinearMassDensity,
}

impl Default for WiresReference {
    fn default() -> Self {
        Self {
            current: ElectricCurrent::new::<ampere>(10.0),
            radius: Length::new::<meter>(0.5e-3),
            linear_density: LinearMassDensity::new::<kilogram_per_meter>(0.008),
        }
    }
}

/// Where the cables run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WireRun {
    /// Along a multirotor arm of this length.
    Arm(Length),
    /// From the middle of a fuselage of this length.
    Fuselage(Length),
}

impl WireRun {
    #[must_use]
    pub fn length(self) -> Length {
        match self {
            WireRun::Arm(arm) => arm,
            WireRun::Fuselage(fuselage) => fuselage / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WiresInput {
    /// Per-motor current the wires are sized on.
    pub current: ElectricCurrent,
    pub propeller_count: u32,
    pub run: WireRun,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WiresResults {
    pub radius: Length,
    pub linear_density: LinearMassDensity,
    pub count: u32,
    pub length: Length,
    pub mass: Mass,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Wires {
    pub reference: WiresReference,
}

impl Model for Wires {
    type Input = WiresInput;
    type Output = WiresResults;
    type Error = InvalidInput;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let current = NonNegative::new(input.current.get::<ampere>())
            .map_err(|e| e.on("current"))?
            .into_inner();
        let count = WIRES_PER_MOTOR
            .checked_mul(input.propeller_count)
            .ok_or(ConstraintError::AboveMaximum.on("propeller_count"))?;

        let reference = &self.reference;
        let current_ratio = current / reference.current.get::<ampere>();
        let radius = reference.radius.get::<meter>() * current_ratio.powf(2.0 / 3.0);
        let radius_ratio = radius / reference.radius.get::<meter>();
        let density = reference.linear_density.get::<kilogram_per_meter>() * radius_ratio.powi(2);

        let length = input.run.length();

        Ok(WiresResults {
            radius: Length::new::<meter>(radius),
            linear_density: LinearMassDensity::new::<kilogram_per_meter>(density),
            count,
            length,
            mass: Mass::new::<kilogram>(density * length.get::<meter>() * f64::from(count)),
        })
    }
}

impl Export for WiresResults {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        store.put(format!("{prefix}:radius"), self.radius)?;
        store.put(format!("{prefix}:density"), self.linear_density)?;
        store.put(format!("{prefix}:number"), f64::from(self.count))?;
        store.put(format!("{prefix}:length"), self.length)?;
        store.put(format!("{prefix}:mass"), self.mass)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn call(current: f64, run: WireRun) -> WiresResults {
        Wires::default()
            .call(&WiresInput {
                current: ElectricCurrent::new::<ampere>(current),
                propeller_count: 4,
                run,
            })
            .unwrap()
    }

    #[test]
    fn quadrotor_arms() {
        let out = call(13.739_838_249_933_88, WireRun::Arm(Length::new::<meter>(0.3)));

        assert_eq!(out.count, 12);
        assert_relative_eq!(out.radius.get::<meter>(), 6.179_562_813_320_847e-4, epsilon = 1e-15);
        assert_relative_eq!(
            out.linear_density.get::<kilogram_per_meter>(),
            0.012_219_838_900_408_914,
            epsilon = 1e-14
        );
        assert_relative_eq!(out.mass.get::<kilogram>(), 0.043_991_420_041_472_09, epsilon = 1e-13);
    }

    #[test]
    fn fuselage_run_is_half_length() {
        let arm = call(10.0, WireRun::Arm(Length::new::<meter>(0.5)));
        let fuselage = call(10.0, WireRun::Fuselage(Length::new::<meter>(1.0)));
        assert_eq!(arm, fuselage);
    }

    #[test]
    fn reference_current_gives_reference_wire() {
        let out = call(10.0, WireRun::Arm(Length::new::<meter>(1.0)));
        assert_relative_eq!(out.radius.get::<meter>(), 0.5e-3, epsilon = 1e-15);
        assert_relative_eq!(out.mass.get::<kilogram>(), 12.0 * 0.008, epsilon = 1e-14);
    }

    #[test]
    fn wire_count_overflow_is_invalid_input() {
        let err = Wires::default()
            .call(&WiresInput {
                current: ElectricCurrent::new::<ampere>(10.0),
                propeller_count: u32::MAX / 2,
                run: WireRun::Arm(Length::new::<meter>(0.3)),
            })
            .unwrap_err();

        assert_eq!(err, ConstraintError::AboveMaximum.on("propeller_count"));
    }

    #[test]
    fn negative_current_is_rejected() {
        let err = Wires::default()
            .call(&WiresInput {
                current: ElectricCurrent::new::<ampere>(-1.0),
                propeller_count: 4,
                run: WireRun::Arm(Length::new::<meter>(0.3)),
            })
            .unwrap_err();

        assert_eq!(err.field, "current");
    }
}
