//! International Standard Atmosphere (troposphere).
//!
//! Sizing scenarios need air density, the speed of sound and viscosity at
//! takeoff and cruise altitude, so this module implements the troposphere
//! layer of the ISA with an optional temperature offset.

use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{
        DynamicViscosity, KinematicViscosity, Length, MassDensity, Pressure, TemperatureInterval,
        ThermodynamicTemperature, Velocity,
    },
    kinematic_viscosity::square_meter_per_second,
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

const SEA_LEVEL_TEMPERATURE: f64 = 288.15;
const SEA_LEVEL_PRESSURE: f64 = 101_325.0;
const LAPSE_RATE: f64 = 0.0065;
const PRESSURE_EXPONENT: f64 = 5.2559;
const GAS_CONSTANT: f64 = 287.05;
const HEAT_CAPACITY_RATIO: f64 = 1.4;

/// Sutherland's law for air.
const SUTHERLAND_CONSTANT: f64 = 1.458e-6;
const SUTHERLAND_TEMPERATURE: f64 = 110.4;

/// Air state at a given altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub density: MassDensity,
    pub speed_of_sound: Velocity,
    pub dynamic_viscosity: DynamicViscosity,
}

impl Atmosphere {
    /// Evaluates the ISA troposphere at `altitude` with an offset `delta_isa`
    /// added to the standard temperature.
    ///
    /// The offset shifts temperature and therefore density, but not pressure.
    #[must_use]
    pub fn isa(altitude: Length, delta_isa: TemperatureInterval) -> Self {
        let h = altitude.get::<meter>();
        let t = SEA_LEVEL_TEMPERATURE - LAPSE_RATE * h + delta_isa.get::<delta_kelvin>();
        let p = SEA_LEVEL_PRESSURE
            * (1.0 - LAPSE_RATE * h / SEA_LEVEL_TEMPERATURE).powf(PRESSURE_EXPONENT);
        let rho = p / (GAS_CONSTANT * t);
        let a = (HEAT_CAPACITY_RATIO * GAS_CONSTANT * t).sqrt();
        let mu = SUTHERLAND_CONSTANT * t.powf(1.5) / (t + SUTHERLAND_TEMPERATURE);

        Self {
            temperature: ThermodynamicTemperature::new::<kelvin>(t),
            pressure: Pressure::new::<pascal>(p),
            density: MassDensity::new::<kilogram_per_cubic_meter>(rho),
            speed_of_sound: Velocity::new::<meter_per_second>(a),
            dynamic_viscosity: DynamicViscosity::new::<pascal_second>(mu),
        }
    }

    /// Standard day at `altitude`.
    #[must_use]
    pub fn standard(altitude: Length) -> Self {
        Self::isa(altitude, TemperatureInterval::new::<delta_kelvin>(0.0))
    }

    #[must_use]
    pub fn kinematic_viscosity(&self) -> KinematicViscosity {
        KinematicViscosity::new::<square_meter_per_second>(
            self.dynamic_viscosity.get::<pascal_second>()
                / self.density.get::<kilogram_per_cubic_meter>(),
        )
    }

    /// Dynamic pressure `½ρV²` at `airspeed`.
    #[must_use]
    pub fn dynamic_pressure(&self, airspeed: Velocity) -> Pressure {
        let v = airspeed.get::<meter_per_second>();
        Pressure::new::<pascal>(0.5 * self.density.get::<kilogram_per_cubic_meter>() * v * v)
    }

    /// Flight Mach number at `airspeed`.
    #[must_use]
    pub fn mach(&self, airspeed: Velocity) -> f64 {
        airspeed.get::<meter_per_second>() / self.speed_of_sound.get::<meter_per_second>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn sea_level() {
        let air = Atmosphere::standard(Length::new::<meter>(0.0));

        assert_relative_eq!(air.temperature.get::<kelvin>(), 288.15);
        assert_relative_eq!(air.pressure.get::<pascal>(), 101_325.0);
        assert_relative_eq!(
            air.density.get::<kilogram_per_cubic_meter>(),
            1.225_012_265_990_694_6,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            air.speed_of_sound.get::<meter_per_second>(),
            340.292_286_865_277,
            epsilon = 1e-9
        );
    }

    #[test]
    fn sea_level_viscosity_and_dynamic_pressure() {
        let air = Atmosphere::standard(Length::new::<meter>(0.0));

        assert_relative_eq!(
            air.dynamic_viscosity.get::<pascal_second>(),
            1.789_380_278_077_583e-5,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            air.kinematic_viscosity().get::<square_meter_per_second>(),
            1.460_703_968_241_878_5e-5,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            air.dynamic_pressure(Velocity::new::<meter_per_second>(20.0)).get::<pascal>(),
            245.002_453_198_138_9,
            epsilon = 1e-9
        );
    }

    #[test]
    fn cruise_altitude() {
        let air = Atmosphere::standard(Length::new::<meter>(150.0));
        assert_relative_eq!(
            air.density.get::<kilogram_per_cubic_meter>(),
            1.207_468_409_407_066_5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn hot_day_is_thinner() {
        let air = Atmosphere::isa(
            Length::new::<meter>(1000.0),
            TemperatureInterval::new::<delta_kelvin>(10.0),
        );

        assert_relative_eq!(air.temperature.get::<kelvin>(), 291.65, epsilon = 1e-12);
        assert_relative_eq!(air.pressure.get::<pascal>(), 89_874.521_520_606_72, epsilon = 1e-6);
        assert_relative_eq!(
            air.density.get::<kilogram_per_cubic_meter>(),
            1.073_537_104_050_986,
            epsilon = 1e-12
        );

        let standard = Atmosphere::standard(Length::new::<meter>(1000.0));
        assert!(air.density < standard.density);
        assert_relative_eq!(
            air.pressure.get::<pascal>(),
            standard.pressure.get::<pascal>()
        );
    }
}
