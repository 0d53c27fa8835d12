use uom::si::{
    f64::{Length, Mass},
    length::meter,
    mass::kilogram,
};

use crate::support::constraint::{InvalidInput, StrictlyPositive};

/// A mass located along the longitudinal axis, measured from the nose tip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassPoint {
    pub x: Length,
    pub mass: Mass,
}

impl MassPoint {
    #[must_use]
    pub fn new(x: Length, mass: Mass) -> Self {
        Self { x, mass }
    }

    /// Combines points into one at their mass-weighted position.
    ///
    /// # Errors
    ///
    /// Fails with `field` if the points carry no mass.
    pub fn combine<I>(points: I, field: &'static str) -> Result<Self, InvalidInput>
    where
        I: IntoIterator<Item = MassPoint>,
    {
        let (moment, mass) = points.into_iter().fold((0.0, 0.0), |(moment, mass), p| {
            let m = p.mass.get::<kilogram>();
            (moment + p.x.get::<meter>() * m, mass + m)
        });
        StrictlyPositive::new(mass).map_err(|e| e.on(field))?;

        Ok(Self {
            x: Length::new::<meter>(moment / mass),
            mass: Mass::new::<kilogram>(mass),
        })
    }
}
