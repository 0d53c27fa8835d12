//! Airframe aerodynamics of fixed-wing and hybrid VTOL UAVs.
//!
//! The drag polar is `CD = CD0 + K·CL²`. The induced drag constant `K`
//! depends on the wing aspect ratio alone, so the scenarios use it before
//! the airframe exists. The parasitic drag `CD0` is built up from the sized
//! airframe at cruise and checked against the guess the scenarios assumed.

use std::f64::consts::PI;

use twine_core::Model;
use uom::si::{
    area::square_meter,
    f64::{Length, Velocity},
    kinematic_viscosity::square_meter_per_second,
    length::meter,
    velocity::meter_per_second,
};

use crate::support::{
    atmosphere::Atmosphere,
    constraint::{InvalidInput, StrictlyPositive},
    variables::{Export, VariableError, VariableStore},
};

use super::{
    geometry::{AirframeGeometry, TailLayout},
    margins::{Margins, export_margins},
};

/// Drag coefficient of a feathered blade at zero incidence.
const STOPPED_BLADE_DRAG: f64 = 0.1;
/// Blade area over disk area for three blades of aspect ratio seven.
const STOPPED_BLADE_AREA_RATIO: f64 = 3.0 / (7.0 * PI);

/// Lift-induced drag of a straight tapered wing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InducedDrag {
    /// Oswald span efficiency.
    pub oswald: f64,
    /// `K` in `CDi = K·CL²`.
    pub k: f64,
}

impl InducedDrag {
    /// Raymer's span efficiency for a straight wing of `aspect_ratio`.
    ///
    /// # Errors
    ///
    /// Fails if the aspect ratio is not positive, or so large that the
    /// efficiency fit turns non-positive.
    pub fn for_aspect_ratio(aspect_ratio: f64) -> Result<Self, InvalidInput> {
        let ar = StrictlyPositive::new(aspect_ratio)
            .map_err(|e| e.on("aspect_ratio"))?
            .into_inner();
        let oswald = StrictlyPositive::new(1.78 * (1.0 - 0.045 * ar.powf(0.68)) - 0.64)
            .map_err(|e| e.on("oswald"))?
            .into_inner();

        Ok(Self {
            oswald,
            k: 1.0 / (PI * oswald * ar),
        })
    }
}

/// Lift propellers of a hybrid VTOL, stopped in cruise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoppedPropellers {
    pub count: u32,
    pub diameter: Length,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AerodynamicsInput {
    pub geometry: AirframeGeometry,
    pub cruise_air: Atmosphere,
    pub cruise_speed: Velocity,
    pub induced: InducedDrag,
    /// Parasitic drag the scenarios were evaluated with.
    pub cd0_guess: f64,
    pub stopped_propellers: Option<StoppedPropellers>,
}

/// Parasitic drag contributions, all referenced to the wing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParasiticDrag {
    pub wing: f64,
    pub horizontal_tail: f64,
    pub vertical_tail: f64,
    pub fuselage: f64,
    /// Zero without stopped propellers.
    pub stopped_propellers: f64,
}

impl ParasiticDrag {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.wing + self.horizontal_tail + self.vertical_tail + self.fuselage + self.stopped_propellers
    }
}

/// Aerodynamic margins, feasible when non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AerodynamicsConstraints {
    /// Guessed parasitic drag over the built-up one.
    pub cd0_guess: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AerodynamicsResults {
    pub parasitic: ParasiticDrag,
    pub cd0: f64,
    pub induced: InducedDrag,
    pub max_lift_to_drag: f64,
    /// Whether stopped propellers were counted.
    pub stopped_propellers: bool,
    pub constraints: AerodynamicsConstraints,
}

/// Component buildup of the parasitic drag at cruise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedWingAerodynamics;

impl Model for FixedWingAerodynamics {
    type Input = AerodynamicsInput;
    type Output = AerodynamicsResults;
    type Error = InvalidInput;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let g = &input.geometry;
        let cd0_guess = StrictlyPositive::new(input.cd0_guess)
            .map_err(|e| e.on("cd0_guess"))?
            .into_inner();
        let speed = StrictlyPositive::new(input.cruise_speed.get::<meter_per_second>())
            .map_err(|e| e.on("cruise_speed"))?
            .into_inner();
        let fineness = g.fuselage.fineness;
        StrictlyPositive::new(fineness - 2.0).map_err(|e| e.on("fineness"))?;

        let nu = input
            .cruise_air
            .kinematic_viscosity()
            .get::<square_meter_per_second>();
        let friction = |length: Length| -> Result<f64, InvalidInput> {
            skin_friction(speed * length.get::<meter>() / nu)
        };
        let surface = g.wing.planform.surface.get::<square_meter>();

        let tc = g.thickness_ratio;
        let section_form = 1.0 + 2.0 * tc + 100.0 * tc.powi(4);
        let wing = friction(g.wing.planform.mac_length)? * section_form * 2.0;

        let tail_form = section_form * 1.34 * input.cruise_air.mach(input.cruise_speed).powf(0.18);
        let tail = |t: &TailLayout| -> Result<f64, InvalidInput> {
            let p = &t.planform;
            Ok(friction(p.mac_length)? * tail_form * 2.0 * p.surface.get::<square_meter>() / surface)
        };
        let horizontal_tail = tail(&g.horizontal_tail)?;
        let vertical_tail = tail(&g.vertical_tail)?;

        let f = &g.fuselage;
        let fuselage_form = 1.0 + 60.0 / fineness.powi(3) + fineness / 400.0;
        let fuselage_wetted = PI
            * f.sections.mid_diameter.get::<meter>()
            * f.length.get::<meter>()
            * (1.0 - 2.0 / fineness).powf(2.0 / 3.0)
            * (1.0 + 1.0 / fineness.powi(2));
        let fuselage = friction(f.length)? * fuselage_form * fuselage_wetted / surface;

        let stopped_propellers = input.stopped_propellers.map_or(0.0, |p| {
            let radius = p.diameter.get::<meter>() / 2.0;
            let disks = f64::from(p.count) * PI * radius * radius;
            STOPPED_BLADE_DRAG * STOPPED_BLADE_AREA_RATIO * disks / surface
        });

        let parasitic = ParasiticDrag {
            wing,
            horizontal_tail,
            vertical_tail,
            fuselage,
            stopped_propellers,
        };
        let cd0 = parasitic.total();

        Ok(AerodynamicsResults {
            parasitic,
            cd0,
            induced: input.induced,
            max_lift_to_drag: 0.5 / (cd0 * input.induced.k).sqrt(),
            stopped_propellers: input.stopped_propellers.is_some(),
            constraints: AerodynamicsConstraints {
                cd0_guess: (cd0_guess - cd0) / cd0,
            },
        })
    }
}

/// Turbulent flat-plate skin friction at Reynolds number `re`.
fn skin_friction(re: f64) -> Result<f64, InvalidInput> {
    let log_re = StrictlyPositive::new(re.log10())
        .map_err(|e| e.on("reynolds_number"))?
        .into_inner();
    Ok(0.455 / log_re.powf(2.58))
}

impl Export for AerodynamicsResults {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        let p = &self.parasitic;
        store.put(format!("{prefix}:CD0:wing"), p.wing)?;
        store.put(format!("{prefix}:CD0:tail:horizontal"), p.horizontal_tail)?;
        store.put(format!("{prefix}:CD0:tail:vertical"), p.vertical_tail)?;
        store.put(format!("{prefix}:CD0:fuselage"), p.fuselage)?;
        if self.stopped_propellers {
            store.put(format!("{prefix}:CD0:stopped_propellers"), p.stopped_propellers)?;
        }
        store.put(format!("{prefix}:CD0"), self.cd0)?;
        store.put(format!("{prefix}:CDi:e"), self.induced.oswald)?;
        store.put(format!("{prefix}:CDi:K"), self.induced.k)?;
        store.put(format!("{prefix}:LD:max"), self.max_lift_to_drag)?;
        export_margins(&self.constraints, prefix, store)
    }
}

impl Margins for AerodynamicsConstraints {
    fn margins(&self) -> Vec<(&'static str, f64)> {
        vec![("CD0:guess", self.cd0_guess)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin as delta_kelvin};

    use crate::models::uav::geometry::tests::airframe;

    fn input(stopped_propellers: Option<StoppedPropellers>) -> AerodynamicsInput {
        AerodynamicsInput {
            geometry: airframe(),
            cruise_air: Atmosphere::isa(
                Length::new::<meter>(150.0),
                TemperatureInterval::new::<delta_kelvin>(0.0),
            ),
            cruise_speed: Velocity::new::<meter_per_second>(22.0),
            induced: InducedDrag::for_aspect_ratio(8.0).unwrap(),
            cd0_guess: 0.04,
            stopped_propellers,
        }
    }

    #[test]
    fn oswald_efficiency_fit() {
        let induced = InducedDrag::for_aspect_ratio(8.0).unwrap();
        assert_relative_eq!(induced.oswald, 0.810_592_329_939_396_3, epsilon = 1e-12);
        assert_relative_eq!(induced.k, 0.049_086_000_821_089_22, epsilon = 1e-12);

        assert!(InducedDrag::for_aspect_ratio(0.0).is_err());
        assert!(InducedDrag::for_aspect_ratio(100.0).is_err());
    }

    #[test]
    fn parasitic_drag_buildup() {
        let out = FixedWingAerodynamics.call(&input(None)).unwrap();
        let p = out.parasitic;

        assert_relative_eq!(p.wing, 0.015_975_804_979_989_728, epsilon = 1e-9);
        assert_relative_eq!(p.horizontal_tail, 0.001_377_069_893_252_555, epsilon = 1e-9);
        assert_relative_eq!(p.vertical_tail, 0.000_804_072_426_352_608_2, epsilon = 1e-9);
        assert_relative_eq!(p.fuselage, 0.032_012_605_658_647_52, epsilon = 1e-9);
        assert_relative_eq!(out.cd0, 0.050_169_552_958_242_41, epsilon = 1e-9);
        assert_relative_eq!(out.max_lift_to_drag, 10.075_603_383_494_222, epsilon = 1e-6);

        // The guess is too optimistic.
        assert_relative_eq!(out.constraints.cd0_guess, -0.202_703_678_996_438_85, epsilon = 1e-8);
    }

    #[test]
    fn stopped_propellers_add_drag() {
        let out = FixedWingAerodynamics
            .call(&input(Some(StoppedPropellers {
                count: 4,
                diameter: Length::new::<meter>(0.3),
            })))
            .unwrap();

        assert_relative_eq!(out.parasitic.stopped_propellers, 0.019_659_239_842_726_082, epsilon = 1e-12);
        assert_relative_eq!(out.cd0, 0.069_828_792_800_968_49, epsilon = 1e-9);

        let mut store = VariableStore::new();
        out.export("a", &mut store).unwrap();
        assert!(store.variable("a:CD0:stopped_propellers").is_some());
        assert!(store.variable("a:constraints:CD0:guess").is_some());
    }
}
