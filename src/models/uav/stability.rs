//! Static longitudinal stability of fixed-wing and hybrid VTOL UAVs.
//!
//! Positions are measured aft from the nose tip. The neutral point follows
//! from the wing and horizontal tail, the centre of gravity from the airframe
//! and every propulsion system, and the static margin from both.

mod balance;

pub use balance::MassPoint;

use twine_core::Model;
use uom::si::{
    f64::{Length, Mass},
    length::meter,
    mass::kilogram,
};

use crate::support::{
    constraint::{InvalidInput, NonNegative, StrictlyPositive},
    variables::{Export, VariableError, VariableStore},
};

use super::{
    margins::{Margins, export_margins},
    propulsion::PropulsionId,
    structures::fuselage::FuselageMasses,
};

/// Fraction of the mean aerodynamic chord, from its leading edge, where the
/// mass of a lifting surface sits.
const SURFACE_CG_CHORD: f64 = 0.4;

/// Wing planform and aerodynamics seen by the neutral point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingPlanform {
    pub aspect_ratio: f64,
    /// Oswald efficiency.
    pub oswald: f64,
    pub mac_length: Length,
    /// Leading edge of the mean aerodynamic chord.
    pub mac_leading_edge: Length,
    /// Leading edge of the root chord.
    pub root_leading_edge: Length,
    pub root_chord: Length,
}

impl WingPlanform {
    /// Aerodynamic centre, at the quarter chord.
    #[must_use]
    pub fn aerodynamic_centre(&self) -> Length {
        self.mac_leading_edge + self.mac_length / 4.0
    }
}

/// Horizontal tail sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailVolume {
    pub coefficient: f64,
    pub aspect_ratio: f64,
}

impl Default for TailVolume {
    fn default() -> Self {
        Self {
            coefficient: 0.5,
            aspect_ratio: 4.0,
        }
    }
}

/// Lengths and diameters of the three fuselage sections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuselageGeometry {
    pub nose_length: Length,
    pub mid_length: Length,
    pub rear_length: Length,
    pub mid_diameter: Length,
    /// Diameter at the rear tip of the tapered section.
    pub tip_diameter: Length,
}

impl FuselageGeometry {
    #[must_use]
    pub fn length(&self) -> Length {
        self.nose_length + self.mid_length + self.rear_length
    }
}

/// A tail surface, located by its mean aerodynamic chord.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailPlacement {
    pub mac_leading_edge: Length,
    pub mac_length: Length,
    pub mass: Mass,
}

/// Longitudinal positions of the foremost and aftmost lift propellers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotorSpan {
    pub front: Length,
    pub rear: Length,
}

impl RotorSpan {
    #[must_use]
    pub fn midpoint(&self) -> Length {
        (self.front + self.rear) / 2.0
    }
}

/// Where the propellers and motors of a propulsion system sit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropulsionLayout {
    /// Propeller at the nose tip, motor just behind it.
    Tractor,
    /// Propeller at the fuselage tail, motor just ahead of it.
    Pusher,
    /// Lift rotors on booms.
    Vtol(RotorSpan),
}

/// Masses of one propulsion system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionMasses {
    pub id: PropulsionId,
    pub layout: PropulsionLayout,
    pub propeller_count: u32,
    /// Mass of one propeller.
    pub propeller: Mass,
    /// Mass of one motor.
    pub motor: Mass,
    pub motor_length: Length,
    pub battery: Mass,
}

/// Booms carrying the VTOL rotors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VtolArms {
    pub span: RotorSpan,
    pub mass: Mass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StabilityInput {
    pub wing: WingPlanform,
    pub wing_mass: Mass,
    pub tail_volume: TailVolume,
    pub horizontal_tail: TailPlacement,
    pub vertical_tail: TailPlacement,
    pub fuselage: FuselageGeometry,
    pub fuselage_mass: FuselageMasses,
    pub vtol_arms: Option<VtolArms>,
    pub propulsion: Vec<PropulsionMasses>,
}

/// Centres of gravity of the airframe parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirframeBalance {
    pub fuselage: Length,
    pub wing: Length,
    pub horizontal_tail: Length,
    pub vertical_tail: Length,
    pub arms: Option<Length>,
    pub airframe: MassPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StabilityResults {
    pub neutral_point: Length,
    pub airframe: AirframeBalance,
    pub propulsion: Vec<(PropulsionId, MassPoint)>,
    pub centre_of_gravity: Length,
    /// Neutral point ahead of the centre of gravity, in mean chords.
    pub static_margin: f64,
    pub constraints: StabilityConstraints,
}

/// Acceptable static margin band, in mean chords.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticMarginBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for StaticMarginBounds {
    fn default() -> Self {
        Self {
            min: 0.05,
            max: 0.10,
        }
    }
}

/// Stability margins, feasible when non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityConstraints {
    /// Static margin above the lower bound.
    pub static_margin_min: f64,
    /// Static margin below the upper bound.
    pub static_margin_max: f64,
}

/// Neutral point, centre of gravity and static margin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StaticStability {
    pub bounds: StaticMarginBounds,
}

impl Model for StaticStability {
    type Input = StabilityInput;
    type Output = StabilityResults;
    type Error = InvalidInput;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let wing = &input.wing;
        StrictlyPositive::new(wing.aspect_ratio).map_err(|e| e.on("aspect_ratio"))?;
        StrictlyPositive::new(wing.oswald).map_err(|e| e.on("oswald"))?;
        StrictlyPositive::new(wing.mac_length).map_err(|e| e.on("mac_length"))?;
        StrictlyPositive::new(input.tail_volume.aspect_ratio)
            .map_err(|e| e.on("tail_aspect_ratio"))?;
        NonNegative::new(input.fuselage.tip_diameter).map_err(|e| e.on("tip_diameter"))?;
        StrictlyPositive::new(input.fuselage.mid_diameter).map_err(|e| e.on("mid_diameter"))?;
        StrictlyPositive::new(self.bounds.min).map_err(|e| e.on("static_margin_min"))?;
        StrictlyPositive::new(self.bounds.max).map_err(|e| e.on("static_margin_max"))?;

        let neutral_point = neutral_point(wing, &input.tail_volume);
        let airframe = airframe_balance(input)?;

        let propulsion = input
            .propulsion
            .iter()
            .map(|p| propulsion_balance(p, wing, &input.fuselage).map(|point| (p.id, point)))
            .collect::<Result<Vec<_>, _>>()?;

        let vehicle = MassPoint::combine(
            std::iter::once(airframe.airframe).chain(propulsion.iter().map(|(_, p)| *p)),
            "vehicle_mass",
        )?;
        let static_margin =
            (neutral_point - vehicle.x).get::<meter>() / wing.mac_length.get::<meter>();

        let constraints = StabilityConstraints {
            static_margin_min: (static_margin - self.bounds.min) / self.bounds.min,
            static_margin_max: (self.bounds.max - static_margin) / self.bounds.max,
        };

        Ok(StabilityResults {
            neutral_point,
            airframe,
            propulsion,
            centre_of_gravity: vehicle.x,
            static_margin,
            constraints,
        })
    }
}

/// Position of the neutral point, from the wing aerodynamic centre shifted
/// aft by the horizontal tail contribution.
fn neutral_point(wing: &WingPlanform, tail: &TailVolume) -> Length {
    let e_ar = wing.oswald * wing.aspect_ratio;
    let shift = wing.mac_length.get::<meter>()
        * tail.coefficient
        * (1.0 - 4.0 / (2.0 + e_ar))
        * (1.0 + 2.0 / e_ar)
        / (1.0 + 2.0 / tail.aspect_ratio);
    wing.aerodynamic_centre() + Length::new::<meter>(shift)
}

fn airframe_balance(input: &StabilityInput) -> Result<AirframeBalance, InvalidInput> {
    let fuselage = fuselage_centre(&input.fuselage, &input.fuselage_mass)?;
    let surface = |leading_edge: Length, mac: Length| leading_edge + mac * SURFACE_CG_CHORD;

    let wing = surface(input.wing.mac_leading_edge, input.wing.mac_length);
    let ht = &input.horizontal_tail;
    let vt = &input.vertical_tail;
    let horizontal_tail = surface(ht.mac_leading_edge, ht.mac_length);
    let vertical_tail = surface(vt.mac_leading_edge, vt.mac_length);
    let arms = input.vtol_arms.map(|a| MassPoint::new(a.span.midpoint(), a.mass));

    let airframe = MassPoint::combine(
        [
            MassPoint::new(fuselage, input.fuselage_mass.total),
            MassPoint::new(wing, input.wing_mass),
            MassPoint::new(horizontal_tail, ht.mass),
            MassPoint::new(vertical_tail, vt.mass),
        ]
        .into_iter()
        .chain(arms),
        "airframe_mass",
    )?;

    Ok(AirframeBalance {
        fuselage,
        wing,
        horizontal_tail,
        vertical_tail,
        arms: arms.map(|a| a.x),
        airframe,
    })
}

/// Section moments over the total fuselage mass. The rear section is a
/// truncated cone whose centroid moves forward as it tapers.
fn fuselage_centre(
    geometry: &FuselageGeometry,
    masses: &FuselageMasses,
) -> Result<Length, InvalidInput> {
    StrictlyPositive::new(masses.total).map_err(|e| e.on("fuselage_mass"))?;

    let nose = geometry.nose_length / 2.0;
    let mid = geometry.nose_length + geometry.mid_length / 2.0;
    let d_mid = geometry.mid_diameter.get::<meter>();
    let d_tip = geometry.tip_diameter.get::<meter>();
    let taper = (d_mid + 2.0 * d_tip) / (d_mid + d_tip);
    let rear = geometry.nose_length + geometry.mid_length + geometry.rear_length / 3.0 * taper;

    let moment = nose.get::<meter>() * masses.nose.get::<kilogram>()
        + mid.get::<meter>() * masses.mid.get::<kilogram>()
        + rear.get::<meter>() * masses.rear.get::<kilogram>();
    Ok(Length::new::<meter>(moment / masses.total.get::<kilogram>()))
}

fn propulsion_balance(
    masses: &PropulsionMasses,
    wing: &WingPlanform,
    fuselage: &FuselageGeometry,
) -> Result<MassPoint, InvalidInput> {
    let (propeller, motor) = match masses.layout {
        PropulsionLayout::Tractor => (Length::new::<meter>(0.0), masses.motor_length / 2.0),
        PropulsionLayout::Pusher => {
            let tail = fuselage.length();
            (tail, tail - masses.motor_length / 2.0)
        }
        PropulsionLayout::Vtol(span) => (span.midpoint(), span.midpoint()),
    };
    // Battery integrated at the middle of the wing root.
    let battery = wing.root_leading_edge + wing.root_chord / 2.0;

    let n = f64::from(masses.propeller_count);
    MassPoint::combine(
        [
            MassPoint::new(propeller, masses.propeller * n),
            MassPoint::new(motor, masses.motor * n),
            MassPoint::new(battery, masses.battery),
        ],
        "propulsion_mass",
    )
}

impl Export for StabilityResults {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        let a = &self.airframe;
        store.put(format!("{prefix}:neutral_point"), self.neutral_point)?;
        store.put(format!("{prefix}:CoG:airframe:fuselage"), a.fuselage)?;
        store.put(format!("{prefix}:CoG:airframe:wing"), a.wing)?;
        store.put(format!("{prefix}:CoG:airframe:tail:horizontal"), a.horizontal_tail)?;
        store.put(format!("{prefix}:CoG:airframe:tail:vertical"), a.vertical_tail)?;
        if let Some(arms) = a.arms {
            store.put(format!("{prefix}:CoG:arms"), arms)?;
        }
        store.put(format!("{prefix}:CoG:airframe"), a.airframe.x)?;
        for (id, point) in &self.propulsion {
            store.put(format!("{prefix}:CoG:propulsion:{id}"), point.x)?;
        }
        store.put(format!("{prefix}:CoG"), self.centre_of_gravity)?;
        store.put(format!("{prefix}:static_margin"), self.static_margin)?;
        export_margins(&self.constraints, prefix, store)
    }
}

impl Margins for StabilityConstraints {
    fn margins(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("static_margin:min", self.static_margin_min),
            ("static_margin:max", self.static_margin_max),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn m(x: f64) -> Length {
        Length::new::<meter>(x)
    }

    fn kg(x: f64) -> Mass {
        Mass::new::<kilogram>(x)
    }

    fn fixed_wing(layout: PropulsionLayout) -> PropulsionMasses {
        PropulsionMasses {
            id: PropulsionId::FixedWing,
            layout,
            propeller_count: 1,
            propeller: kg(0.05),
            motor: kg(0.2),
            motor_length: m(0.06),
            battery: kg(1.0),
        }
    }

    fn input(propulsion: Vec<PropulsionMasses>, vtol_arms: Option<VtolArms>) -> StabilityInput {
        StabilityInput {
            wing: WingPlanform {
                aspect_ratio: 8.0,
                oswald: 0.8,
                mac_length: m(0.3),
                mac_leading_edge: m(0.5),
                root_leading_edge: m(0.48),
                root_chord: m(0.35),
            },
            wing_mass: kg(1.2),
            tail_volume: TailVolume::default(),
            horizontal_tail: TailPlacement {
                mac_leading_edge: m(1.25),
                mac_length: m(0.15),
                mass: kg(0.08),
            },
            vertical_tail: TailPlacement {
                mac_leading_edge: m(1.2),
                mac_length: m(0.2),
                mass: kg(0.06),
            },
            fuselage: FuselageGeometry {
                nose_length: m(0.3),
                mid_length: m(0.6),
                rear_length: m(0.5),
                mid_diameter: m(0.15),
                tip_diameter: m(0.05),
            },
            fuselage_mass: FuselageMasses {
                nose: kg(0.1),
                mid: kg(0.3),
                rear: kg(0.15),
                total: kg(0.55),
            },
            vtol_arms,
            propulsion,
        }
    }

    #[test]
    fn tractor_is_stable() {
        let out = StaticStability::default()
            .call(&input(vec![fixed_wing(PropulsionLayout::Tractor)], None))
            .unwrap();

        assert_relative_eq!(out.neutral_point.get::<meter>(), 0.64375, epsilon = 1e-14);
        assert_relative_eq!(out.airframe.fuselage.get::<meter>(), 0.656_818_181_818_181_7, epsilon = 1e-14);
        assert_relative_eq!(out.airframe.wing.get::<meter>(), 0.62, epsilon = 1e-14);
        assert_relative_eq!(out.airframe.airframe.x.get::<meter>(), 0.680_873_015_873_015_9, epsilon = 1e-14);
        assert_relative_eq!(out.airframe.airframe.mass.get::<kilogram>(), 1.89, epsilon = 1e-14);

        let (id, propulsion) = out.propulsion[0];
        assert_eq!(id, PropulsionId::FixedWing);
        assert_relative_eq!(propulsion.x.get::<meter>(), 0.5288, epsilon = 1e-14);
        assert_relative_eq!(propulsion.mass.get::<kilogram>(), 1.25, epsilon = 1e-14);

        assert_relative_eq!(out.centre_of_gravity.get::<meter>(), 0.620_334_394_904_458_6, epsilon = 1e-14);
        assert_relative_eq!(out.static_margin, 0.078_052_016_985_137_68, epsilon = 1e-12);
        assert_relative_eq!(out.constraints.static_margin_min, 0.561_040_339_702_753_6, epsilon = 1e-10);
        assert_relative_eq!(out.constraints.static_margin_max, 0.219_479_830_148_623_3, epsilon = 1e-10);
    }

    #[test]
    fn pusher_moves_balance_aft() {
        let out = StaticStability::default()
            .call(&input(vec![fixed_wing(PropulsionLayout::Pusher)], None))
            .unwrap();

        assert_relative_eq!(out.propulsion[0].1.x.get::<meter>(), 0.7992, epsilon = 1e-14);
        assert_relative_eq!(out.centre_of_gravity.get::<meter>(), 0.727_977_707_006_369_3, epsilon = 1e-14);
        assert_relative_eq!(out.static_margin, -0.280_759_023_354_564_65, epsilon = 1e-12);
        assert!(out.constraints.static_margin_min < 0.0);
    }

    #[test]
    fn hybrid_vtol() {
        let span = RotorSpan {
            front: m(0.1),
            rear: m(1.1),
        };
        let lift = PropulsionMasses {
            id: PropulsionId::Multirotor,
            layout: PropulsionLayout::Vtol(span),
            propeller_count: 4,
            propeller: kg(0.03),
            motor: kg(0.1),
            motor_length: m(0.04),
            battery: kg(0.8),
        };
        let arms = VtolArms {
            span,
            mass: kg(0.4),
        };
        let out = StaticStability::default()
            .call(&input(vec![fixed_wing(PropulsionLayout::Tractor), lift], Some(arms)))
            .unwrap();

        assert_relative_eq!(out.airframe.arms.unwrap().get::<meter>(), 0.6, epsilon = 1e-14);
        assert_relative_eq!(out.airframe.airframe.x.get::<meter>(), 0.666_746_724_890_829_8, epsilon = 1e-14);
        assert_relative_eq!(out.propulsion[1].1.x.get::<meter>(), 0.633_333_333_333_333_4, epsilon = 1e-14);
        assert_relative_eq!(out.propulsion[1].1.mass.get::<kilogram>(), 1.32, epsilon = 1e-14);
        assert_relative_eq!(out.centre_of_gravity.get::<meter>(), 0.622_191_358_024_691_4, epsilon = 1e-14);
        assert_relative_eq!(out.static_margin, 0.071_862_139_917_695_16, epsilon = 1e-12);

        let mut store = VariableStore::new();
        out.export("data:stability", &mut store).unwrap();
        assert!(store.variable("data:stability:CoG:arms").is_some());
        assert!(store.variable("data:stability:CoG:propulsion:multirotor").is_some());
        assert!(store.variable("data:stability:CoG:propulsion:fixedwing").is_some());
    }

    #[test]
    fn massless_fuselage_rejected() {
        let mut input = input(vec![], None);
        input.fuselage_mass.total = kg(0.0);

        let err = StaticStability::default().call(&input).unwrap_err();
        assert_eq!(err.field, "fuselage_mass");
    }
}
