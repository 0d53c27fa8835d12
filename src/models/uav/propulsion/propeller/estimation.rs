use uom::si::{
    f64::{Force, Length, Mass, MassDensity, Velocity},
    force::newton,
    length::meter,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    velocity::meter_per_second,
};

use super::{PropellerCharacteristics, PropellerReference, aerodynamics::Coefficients};

/// Diameter that delivers `thrust` at the takeoff tip-speed proxy `nd`.
pub(super) fn diameter(
    thrust: Force,
    density: MassDensity,
    nd: Velocity,
    coefficients: Coefficients,
) -> Length {
    let nd = nd.get::<meter_per_second>();
    let d = (thrust.get::<newton>()
        / (coefficients.thrust * density.get::<kilogram_per_cubic_meter>() * nd * nd))
        .sqrt();
    Length::new::<meter>(d)
}

/// Mass scales with the cube of the diameter.
pub(super) fn mass(diameter: Length, reference: &PropellerReference) -> Mass {
    let ratio = diameter.get::<meter>() / reference.diameter.get::<meter>();
    Mass::new::<kilogram>(reference.mass.get::<kilogram>() * ratio.powi(3))
}

pub(super) fn characteristics(
    pitch_ratio: f64,
    diameter: Length,
    reference: &PropellerReference,
) -> PropellerCharacteristics {
    PropellerCharacteristics {
        pitch_ratio,
        diameter,
        mass: mass(diameter, reference),
    }
}
