//! Maximum takeoff weight.
//!
//! Sums payload, every propulsion system and the airframe, then checks the
//! sum against the guess the disciplines were evaluated for and against the
//! mission requirement.

use twine_core::Model;
use uom::si::{f64::Mass, mass::kilogram};

use crate::support::{
    constraint::{InvalidInput, NonNegative, StrictlyPositive},
    variables::{Export, VariableError, VariableStore},
};

use super::{
    margins::{Margins, export_margins},
    propulsion::PropulsionId,
};

/// Component masses of one propulsion system.
///
/// Per-propeller components are counted once per propeller, the battery and
/// the wire harness once per system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionMass {
    pub id: PropulsionId,
    pub propeller_count: u32,
    pub propeller: Mass,
    pub motor: Mass,
    /// Zero without a gearbox.
    pub gearbox: Mass,
    pub esc: Mass,
    pub wires: Mass,
    pub battery: Mass,
}

impl PropulsionMass {
    #[must_use]
    pub fn total(&self) -> Mass {
        (self.gearbox + self.motor + self.esc + self.propeller) * f64::from(self.propeller_count)
            + self.wires
            + self.battery
    }
}

/// Structural masses, by airframe type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AirframeMass {
    Multirotor {
        body: Mass,
        arms: Mass,
    },
    FixedWing {
        wing: Mass,
        fuselage: Mass,
        horizontal_tail: Mass,
        vertical_tail: Mass,
    },
    /// Fixed-wing airframe carrying lift-rotor arms.
    HybridVtol {
        wing: Mass,
        fuselage: Mass,
        horizontal_tail: Mass,
        vertical_tail: Mass,
        arms: Mass,
    },
}

impl AirframeMass {
    #[must_use]
    pub fn total(&self) -> Mass {
        match *self {
            AirframeMass::Multirotor { body, arms } => body + arms,
            AirframeMass::FixedWing {
                wing,
                fuselage,
                horizontal_tail,
                vertical_tail,
            } => wing + fuselage + horizontal_tail + vertical_tail,
            AirframeMass::HybridVtol {
                wing,
                fuselage,
                horizontal_tail,
                vertical_tail,
                arms,
            } => wing + fuselage + horizontal_tail + vertical_tail + arms,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MtowInput {
    pub payload: Mass,
    /// Anything not modelled elsewhere: avionics, landing gear, fasteners.
    pub misc: Mass,
    pub propulsion: Vec<PropulsionMass>,
    pub airframe: AirframeMass,
    /// Takeoff weight the disciplines were evaluated for.
    pub guess: Mass,
    pub requirement: Mass,
}

/// Weight margins, feasible when non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MtowConstraints {
    /// Guess against the computed weight; zero on a converged design.
    pub consistency: f64,
    pub requirement: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MtowResults {
    pub mtow: Mass,
    pub guess: Mass,
    pub propulsion: Vec<(PropulsionId, Mass)>,
    pub airframe: Mass,
    pub constraints: MtowConstraints,
}

/// Sums the vehicle mass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mtow;

impl Model for Mtow {
    type Input = MtowInput;
    type Output = MtowResults;
    type Error = InvalidInput;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        StrictlyPositive::new(input.payload).map_err(|e| e.on("payload"))?;
        NonNegative::new(input.misc).map_err(|e| e.on("misc"))?;

        let propulsion: Vec<_> = input.propulsion.iter().map(|p| (p.id, p.total())).collect();
        let airframe = input.airframe.total();
        let mtow = propulsion
            .iter()
            .fold(input.payload + input.misc + airframe, |sum, (_, m)| sum + *m);

        let m = mtow.get::<kilogram>();
        let constraints = MtowConstraints {
            consistency: (input.guess.get::<kilogram>() - m) / m,
            requirement: (input.requirement.get::<kilogram>() - m) / m,
        };

        Ok(MtowResults {
            mtow,
            guess: input.guess,
            propulsion,
            airframe,
            constraints,
        })
    }
}

impl Export for MtowResults {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        store.put(format!("{prefix}:mtow"), self.mtow)?;
        store.put(format!("{prefix}:mtow:guess"), self.guess)?;
        store.put(format!("{prefix}:airframe"), self.airframe)?;
        for (id, mass) in &self.propulsion {
            store.put(format!("{prefix}:propulsion:{id}"), *mass)?;
        }
        store.put(
            format!("{prefix}:constraints:mtow:consistency"),
            self.constraints.consistency,
        )?;
        export_margins(&self.constraints, prefix, store)
    }
}

/// Only the requirement is a design margin; consistency is closed by the
/// takeoff-weight solve.
impl Margins for MtowConstraints {
    fn margins(&self) -> Vec<(&'static str, f64)> {
        vec![("mtow:requirement", self.requirement)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn kg(x: f64) -> Mass {
        Mass::new::<kilogram>(x)
    }

    fn quad() -> PropulsionMass {
        PropulsionMass {
            id: PropulsionId::Multirotor,
            propeller_count: 4,
            propeller: kg(0.02),
            motor: kg(0.1),
            gearbox: kg(0.0),
            esc: kg(0.03),
            wires: kg(0.05),
            battery: kg(0.6),
        }
    }

    fn input(guess: f64) -> MtowInput {
        MtowInput {
            payload: kg(1.5),
            misc: kg(0.1),
            propulsion: vec![quad()],
            airframe: AirframeMass::Multirotor {
                body: kg(0.4),
                arms: kg(0.1),
            },
            guess: kg(guess),
            requirement: kg(5.0),
        }
    }

    #[test]
    fn sums_the_vehicle() {
        let out = Mtow.call(&input(3.0)).unwrap();

        // 4·0.15 + 0.05 + 0.6
        assert_relative_eq!(out.propulsion[0].1.get::<kilogram>(), 1.25, epsilon = 1e-14);
        assert_relative_eq!(out.airframe.get::<kilogram>(), 0.5, epsilon = 1e-14);
        assert_relative_eq!(out.mtow.get::<kilogram>(), 3.35, epsilon = 1e-14);
        assert_relative_eq!(out.constraints.consistency, -0.35 / 3.35, epsilon = 1e-14);
        assert_relative_eq!(out.constraints.requirement, 1.65 / 3.35, epsilon = 1e-14);
    }

    #[test]
    fn hybrid_counts_every_system() {
        let cruise = PropulsionMass {
            id: PropulsionId::FixedWing,
            propeller_count: 1,
            gearbox: kg(0.01),
            ..quad()
        };
        let out = Mtow
            .call(&MtowInput {
                propulsion: vec![quad(), cruise],
                airframe: AirframeMass::HybridVtol {
                    wing: kg(0.8),
                    fuselage: kg(0.3),
                    horizontal_tail: kg(0.05),
                    vertical_tail: kg(0.04),
                    arms: kg(0.1),
                },
                ..input(4.0)
            })
            .unwrap();

        assert_relative_eq!(out.propulsion[1].1.get::<kilogram>(), 0.81, epsilon = 1e-14);
        assert_relative_eq!(out.airframe.get::<kilogram>(), 1.29, epsilon = 1e-14);
        assert_relative_eq!(out.mtow.get::<kilogram>(), 4.95, epsilon = 1e-14);

        let mut store = VariableStore::new();
        out.export("data:weight", &mut store).unwrap();
        let total: Mass = store.get("data:weight:propulsion:fixedwing").unwrap();
        assert_relative_eq!(total.get::<kilogram>(), 0.81, epsilon = 1e-14);
    }

    #[test]
    fn rejects_missing_payload() {
        let err = Mtow
            .call(&MtowInput {
                payload: kg(0.0),
                ..input(3.0)
            })
            .unwrap_err();
        assert_eq!(err.field, "payload");
    }
}
