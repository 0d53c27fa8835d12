use std::f64::consts::TAU;

use uom::si::{angular_velocity::radian_per_second, length::meter, velocity::meter_per_second};

use crate::{models::uav::{propulsion::margin, scenarios::FlightCondition}, support::scenario::PerScenario};

use super::{
    PropellerCharacteristics, PropellerConstraints, PropellerDesign, PropellerOperating,
    PropellerReference,
};

pub(super) fn constraints(
    reference: &PropellerReference,
    design: &PropellerDesign,
    propeller: &PropellerCharacteristics,
    operating: &PerScenario<PropellerOperating>,
    flight: &PerScenario<FlightCondition>,
) -> PropellerConstraints {
    let nd_max = reference.nd_max.get::<meter_per_second>();
    let d = propeller.diameter.get::<meter>();
    let nd = |op: &PropellerOperating| op.speed.get::<radian_per_second>() / TAU * d;

    // The advance ratio is a design variable; the propeller must actually
    // turn fast enough for it at the scenario airspeed. A stopped rotor at
    // rest sits exactly on the bound.
    let airspeed = |condition: &FlightCondition, j: f64, op: &PropellerOperating| {
        let v = condition.airspeed.get::<meter_per_second>();
        let required = j * nd(op);
        if v == 0.0 && required == 0.0 { 0.0 } else { margin(v, required) }
    };

    PropellerConstraints {
        climb_speed: margin(nd_max, nd(&operating.climb)),
        cruise_speed: margin(nd_max, nd(&operating.cruise)),
        climb_advance_ratio: airspeed(&flight.climb, design.climb_advance_ratio, &operating.climb),
        cruise_advance_ratio: airspeed(
            &flight.cruise,
            design.cruise_advance_ratio,
            &operating.cruise,
        ),
    }
}
