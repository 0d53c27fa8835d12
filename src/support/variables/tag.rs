use std::fmt;

use uom::si::{
    angle::radian,
    angular_velocity::radian_per_second,
    area::square_meter,
    electric_charge::coulomb,
    electric_current::ampere,
    electric_potential::volt,
    electrical_resistance::ohm,
    energy::joule,
    f64::{
        Angle, AngularVelocity, Area, ElectricCharge, ElectricCurrent, ElectricPotential,
        ElectricalResistance, Energy, Force, Length, LinearMassDensity, Mass, MassDensity, Power,
        Pressure, Ratio, Time, Torque, Velocity, Volume,
    },
    force::newton,
    length::meter,
    linear_mass_density::kilogram_per_meter,
    magnetic_flux::weber,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    power::watt,
    pressure::pascal,
    ratio::ratio,
    time::second,
    torque::newton_meter,
    velocity::meter_per_second,
    volume::cubic_meter,
};

use crate::support::units::TorqueConstant;

/// SI unit attached to a stored variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitTag {
    Dimensionless,
    Kilogram,
    Meter,
    SquareMeter,
    CubicMeter,
    Second,
    MeterPerSecond,
    Radian,
    RadianPerSecond,
    Newton,
    NewtonMeter,
    Pascal,
    Watt,
    Joule,
    Volt,
    Ampere,
    AmpereSecond,
    Ohm,
    NewtonMeterPerAmpere,
    KilogramPerMeter,
    KilogramPerCubicMeter,
}

impl UnitTag {
    /// Conventional symbol for the unit.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            UnitTag::Dimensionless => "-",
            UnitTag::Kilogram => "kg",
            UnitTag::Meter => "m",
            UnitTag::SquareMeter => "m**2",
            UnitTag::CubicMeter => "m**3",
            UnitTag::Second => "s",
            UnitTag::MeterPerSecond => "m/s",
            UnitTag::Radian => "rad",
            UnitTag::RadianPerSecond => "rad/s",
            UnitTag::Newton => "N",
            UnitTag::NewtonMeter => "N*m",
            UnitTag::Pascal => "Pa",
            UnitTag::Watt => "W",
            UnitTag::Joule => "J",
            UnitTag::Volt => "V",
            UnitTag::Ampere => "A",
            UnitTag::AmpereSecond => "A*s",
            UnitTag::Ohm => "ohm",
            UnitTag::NewtonMeterPerAmpere => "N*m/A",
            UnitTag::KilogramPerMeter => "kg/m",
            UnitTag::KilogramPerCubicMeter => "kg/m**3",
        }
    }
}

impl fmt::Display for UnitTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A quantity with a fixed SI unit tag.
pub trait Tagged: Sized {
    const TAG: UnitTag;

    /// Value in the unit named by [`Tagged::TAG`].
    fn si_value(&self) -> f64;

    /// Rebuilds the quantity from a value in the unit named by [`Tagged::TAG`].
    fn from_si(value: f64) -> Self;
}

impl Tagged for f64 {
    const TAG: UnitTag = UnitTag::Dimensionless;

    fn si_value(&self) -> f64 {
        *self
    }

    fn from_si(value: f64) -> Self {
        value
    }
}

macro_rules! tagged {
    ($($quantity:ty => $tag:ident in $unit:ty;)*) => {
        $(
            impl Tagged for $quantity {
                const TAG: UnitTag = UnitTag::$tag;

                fn si_value(&self) -> f64 {
                    self.get::<$unit>()
                }

                fn from_si(value: f64) -> Self {
                    <$quantity>::new::<$unit>(value)
                }
            }
        )*
    };
}

tagged! {
    Ratio => Dimensionless in ratio;
    Mass => Kilogram in kilogram;
    Length => Meter in meter;
    Area => SquareMeter in square_meter;
    Volume => CubicMeter in cubic_meter;
    Time => Second in second;
    Velocity => MeterPerSecond in meter_per_second;
    Angle => Radian in radian;
    AngularVelocity => RadianPerSecond in radian_per_second;
    Force => Newton in newton;
    Torque => NewtonMeter in newton_meter;
    Pressure => Pascal in pascal;
    Power => Watt in watt;
    Energy => Joule in joule;
    ElectricPotential => Volt in volt;
    ElectricCurrent => Ampere in ampere;
    ElectricCharge => AmpereSecond in coulomb;
    ElectricalResistance => Ohm in ohm;
    TorqueConstant => NewtonMeterPerAmpere in weber;
    LinearMassDensity => KilogramPerMeter in kilogram_per_meter;
    MassDensity => KilogramPerCubicMeter in kilogram_per_cubic_meter;
}
