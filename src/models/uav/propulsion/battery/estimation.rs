use uom::si::{
    electric_charge::coulomb,
    electric_current::ampere,
    electric_potential::volt,
    energy::joule,
    f64::{ElectricCharge, ElectricCurrent, ElectricPotential, Energy, Mass, Power, Volume},
    mass::kilogram,
    power::watt,
    volume::cubic_meter,
};

use crate::models::uav::propulsion::motor::MotorOperating;

use super::{BatteryCharacteristics, BatteryDesign, BatteryReference};

/// Energy carried, scaled on the payload mass.
pub(super) fn energy(design: &BatteryDesign, payload: Mass, reference: &BatteryReference) -> Energy {
    let mass_ratio = payload.get::<kilogram>() / reference.mass.get::<kilogram>();
    reference.energy * (design.mass_ratio * mass_ratio)
}

/// Cells in series to supply the takeoff motor voltage with margin.
///
/// Fractional: rounding is left to catalogue selection.
pub(super) fn series_cells(
    design: &BatteryDesign,
    takeoff: &MotorOperating,
    reference: &BatteryReference,
) -> f64 {
    design.voltage_ratio * takeoff.voltage.get::<volt>() / reference.cell_voltage.get::<volt>()
}

/// Maximum current of a pack with the given capacity.
pub(super) fn max_current(capacity: ElectricCharge, reference: &BatteryReference) -> ElectricCurrent {
    reference.max_current * (capacity.get::<coulomb>() / reference.capacity.get::<coulomb>())
}

pub(super) fn characteristics(
    cells: f64,
    energy: Energy,
    reference: &BatteryReference,
) -> BatteryCharacteristics {
    let voltage = reference.cell_voltage.get::<volt>() * cells;
    let capacity = energy.get::<joule>() / voltage;

    let energy_ratio = energy.get::<joule>() / reference.energy.get::<joule>();
    let volume_ratio = capacity * voltage
        / (reference.capacity.get::<coulomb>() * reference.voltage.get::<volt>());
    let reference_power = reference.voltage.get::<volt>() * reference.max_current.get::<ampere>();
    let capacity = ElectricCharge::new::<coulomb>(capacity);

    BatteryCharacteristics {
        cells,
        voltage: ElectricPotential::new::<volt>(voltage),
        capacity,
        energy,
        max_current: max_current(capacity, reference),
        max_power: Power::new::<watt>(reference_power * energy_ratio),
        mass: Mass::new::<kilogram>(reference.mass.get::<kilogram>() * energy_ratio),
        volume: Volume::new::<cubic_meter>(reference.volume.get::<cubic_meter>() * volume_ratio),
        depth_of_discharge: reference.depth_of_discharge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn payload_driven_pack() {
        let reference = BatteryReference::default();
        let energy = energy(
            &BatteryDesign::default(),
            Mass::new::<kilogram>(1.5),
            &reference,
        );
        let pack = characteristics(5.042_175_077_469_142, energy, &reference);

        assert_relative_eq!(pack.energy.get::<joule>(), 601_221.884_498_480_2, epsilon = 1e-6);
        assert_relative_eq!(pack.voltage.get::<volt>(), 18.656_047_786_635_824, epsilon = 1e-12);
        assert_relative_eq!(pack.capacity.get::<coulomb>(), 32_226.647_968_234_88, epsilon = 1e-7);
        assert_relative_eq!(pack.max_current.get::<ampere>(), 406.902_120_811_046_5, epsilon = 1e-9);
        assert_relative_eq!(pack.max_power.get::<watt>(), 7_591.185_410_334_347, epsilon = 1e-8);
        assert_relative_eq!(pack.mass.get::<kilogram>(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(
            pack.volume.get::<cubic_meter>(),
            7.477_203_647_416_413e-4,
            epsilon = 1e-15
        );
    }

    #[test]
    fn current_scales_with_capacity() {
        let reference = BatteryReference::default();
        let doubled = max_current(reference.capacity * 2.0, &reference);
        assert_relative_eq!(doubled.get::<ampere>(), 300.0, epsilon = 1e-12);
    }
}
