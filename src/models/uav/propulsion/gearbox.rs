//! Single-stage reduction gearbox between motor and propeller.
//!
//! Gear masses and diameters come from a surface-durability correlation for
//! spur gears, calibrated on aircraft reducers.

use std::convert::Infallible;

use twine_core::Model;
use uom::si::{
    f64::{Length, Mass, Torque},
    length::meter,
    mass::kilogram,
    torque::newton_meter,
};

use crate::support::variables::{Export, VariableError, VariableStore};

/// Surface durability factor, lb/in.
const SURFACE_DURABILITY: f64 = 1000.0;

/// Pound-inch per newton-meter.
const LBF_IN_PER_N_M: f64 = 8.85;

/// Calibration of the solid rotor volume to aircraft reducer masses.
const AIRCRAFT_FACTOR: f64 = 0.3;

const KG_PER_LB: f64 = 0.4535;
const M_PER_IN: f64 = 0.0254;

/// Input to [`Gearbox`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearboxInput {
    /// Propeller speed over motor speed, inverted (`N ≥ 1` reduces).
    pub reduction_ratio: f64,
    /// Motor nominal torque.
    pub nominal_torque: Torque,
}

/// Output of [`Gearbox`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearboxResults {
    pub reduction_ratio: f64,
    pub mass: Mass,
    pub pinion_diameter: Length,
    pub gear_diameter: Length,
    pub inner_diameter: Length,
}

impl GearboxResults {
    /// Direct drive: unit ratio and nothing to weigh.
    #[must_use]
    pub fn direct_drive() -> Self {
        Self {
            reduction_ratio: 1.0,
            mass: Mass::new::<kilogram>(0.0),
            pinion_diameter: Length::new::<meter>(0.0),
            gear_diameter: Length::new::<meter>(0.0),
            inner_diameter: Length::new::<meter>(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gearbox;

impl Model for Gearbox {
    type Input = GearboxInput;
    type Output = GearboxResults;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let n = input.reduction_ratio;

        // Input pinion to mating gear ratio.
        let mg1 = 0.0309 * n * n + 0.1944 * n + 0.6389;
        let weight_factor = 1.0 + 1.0 / mg1 + mg1 + mg1 * mg1 + n * n / mg1 + n * n;

        // C = 2T/K, in³.
        let c = 2.0 * LBF_IN_PER_N_M * input.nominal_torque.get::<newton_meter>()
            / SURFACE_DURABILITY;

        let mass = weight_factor * c * AIRCRAFT_FACTOR * KG_PER_LB;
        let pinion = (c * (n + 1.0) / n / 0.7).cbrt() * M_PER_IN;

        Ok(GearboxResults {
            reduction_ratio: n,
            mass: Mass::new::<kilogram>(mass),
            pinion_diameter: Length::new::<meter>(pinion),
            gear_diameter: Length::new::<meter>(n * pinion),
            inner_diameter: Length::new::<meter>(mg1 * pinion),
        })
    }
}

impl Export for GearboxResults {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        store.put(format!("{prefix}:N_red"), self.reduction_ratio)?;
        store.put(format!("{prefix}:mass"), self.mass)?;
        store.put(format!("{prefix}:pinion_diameter"), self.pinion_diameter)?;
        store.put(format!("{prefix}:gear_diameter"), self.gear_diameter)?;
        store.put(format!("{prefix}:inner_diameter"), self.inner_diameter)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn four_to_one_reducer() {
        let out = Gearbox
            .call(&GearboxInput {
                reduction_ratio: 4.0,
                nominal_torque: Torque::new::<newton_meter>(0.2),
            })
            .unwrap();

        assert_relative_eq!(out.mass.get::<kilogram>(), 0.015_151_078_614_832_093, epsilon = 1e-14);
        assert_relative_eq!(
            out.pinion_diameter.get::<meter>(),
            0.004_696_476_226_584_852,
            epsilon = 1e-14
        );
        assert_relative_eq!(
            out.gear_diameter.get::<meter>(),
            0.018_785_904_906_339_41,
            epsilon = 1e-14
        );
        assert_relative_eq!(
            out.inner_diameter.get::<meter>(),
            0.008_974_496_421_380_995,
            epsilon = 1e-14
        );
    }

    #[test]
    fn heavier_for_more_torque() {
        let mass = |torque: f64| {
            Gearbox
                .call(&GearboxInput {
                    reduction_ratio: 3.0,
                    nominal_torque: Torque::new::<newton_meter>(torque),
                })
                .unwrap()
                .mass
        };
        assert_relative_eq!(
            mass(0.4).get::<kilogram>(),
            2.0 * mass(0.2).get::<kilogram>(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn direct_drive_weighs_nothing() {
        let out = GearboxResults::direct_drive();
        assert_eq!(out.reduction_ratio, 1.0);
        assert_eq!(out.mass.get::<kilogram>(), 0.0);
    }
}
