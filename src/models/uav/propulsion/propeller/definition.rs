use uom::si::f64::Velocity;

use super::{PropellerDesign, PropellerReference};

/// Tip-speed proxy `n·D` the propeller is sized for at takeoff.
pub(super) fn takeoff_nd(design: &PropellerDesign, reference: &PropellerReference) -> Velocity {
    reference.nd_max * design.nd_ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::velocity::meter_per_second;

    #[test]
    fn scales_reference_limit() {
        let design = PropellerDesign {
            nd_ratio: 0.9,
            ..PropellerDesign::default()
        };
        let nd = takeoff_nd(&design, &PropellerReference::default());
        assert_relative_eq!(nd.get::<meter_per_second>(), 40.005, epsilon = 1e-12);
    }
}
