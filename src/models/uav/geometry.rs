//! Airframe geometry of fixed-wing and hybrid VTOL UAVs.
//!
//! The wing surface follows from the takeoff weight and the selected wing
//! loading. Tails are sized by volume coefficients on an arm proportional
//! to the span, and the fuselage runs from the nose tip to the trailing
//! edge of the horizontal tail root. Longitudinal positions are measured aft
//! from the nose tip.

use std::f64::consts::PI;

use twine_core::Model;
use uom::si::{
    angle::radian,
    area::square_meter,
    f64::{Angle, Area, Length, Mass, Pressure, Volume},
    length::meter,
    mass::kilogram,
    pressure::pascal,
    volume::cubic_meter,
};

use crate::support::{
    constraint::{InvalidInput, NonNegative, StrictlyPositive, UnitInterval},
    units::GRAVITY,
    variables::{Export, VariableError, VariableStore},
};

use super::{
    margins::{Margins, export_margins},
    stability::{FuselageGeometry, TailPlacement, WingPlanform},
    structures::{fuselage::FuselageSurfaces, tails::TailSurfaces, wing::WingGeometry},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingDesign {
    pub aspect_ratio: f64,
    /// Tip chord over root chord.
    pub taper_ratio: f64,
    /// Thickness over chord, shared by the tails.
    pub thickness_ratio: f64,
    pub leading_edge_sweep: Angle,
    /// Leading edge of the mean aerodynamic chord, in spans from the nose.
    pub mac_position: f64,
}

impl Default for WingDesign {
    fn default() -> Self {
        Self {
            aspect_ratio: 8.0,
            taper_ratio: 0.5,
            thickness_ratio: 0.15,
            leading_edge_sweep: Angle::new::<radian>(0.0),
            mac_position: 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailDesign {
    pub volume_coefficient: f64,
    pub aspect_ratio: f64,
    pub taper_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailsDesign {
    /// Tail arm, in wing spans.
    pub arm_ratio: f64,
    pub horizontal: TailDesign,
    pub vertical: TailDesign,
}

impl Default for TailsDesign {
    fn default() -> Self {
        Self {
            arm_ratio: 0.75,
            horizontal: TailDesign {
                volume_coefficient: 0.5,
                aspect_ratio: 4.0,
                taper_ratio: 0.9,
            },
            vertical: TailDesign {
                volume_coefficient: 0.04,
                aspect_ratio: 1.5,
                taper_ratio: 0.9,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuselageDesign {
    /// Length over mid diameter.
    pub fineness: f64,
    /// Tail tip diameter over mid diameter.
    pub tip_diameter_ratio: f64,
}

impl Default for FuselageDesign {
    fn default() -> Self {
        Self {
            fineness: 5.0,
            tip_diameter_ratio: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometryDesign {
    pub wing: WingDesign,
    pub tails: TailsDesign,
    pub fuselage: FuselageDesign,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryInput {
    pub design: GeometryDesign,
    pub mtow: Mass,
    pub wing_loading: Pressure,
}

/// A trapezoidal lifting surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trapezoid {
    pub surface: Area,
    pub span: Length,
    pub root_chord: Length,
    pub tip_chord: Length,
    pub mac_length: Length,
    /// Spanwise position of the mean aerodynamic chord from the root.
    pub mac_y: Length,
}

impl Trapezoid {
    fn new(surface: f64, aspect_ratio: f64, taper: f64) -> Self {
        let span = (aspect_ratio * surface).sqrt();
        let root = 2.0 * surface / span / (1.0 + taper);
        let mac = 2.0 / 3.0 * root * (1.0 + taper + taper * taper) / (1.0 + taper);
        let mac_y = span / 6.0 * (1.0 + 2.0 * taper) / (1.0 + taper);

        let m = Length::new::<meter>;
        Self {
            surface: Area::new::<square_meter>(surface),
            span: m(span),
            root_chord: m(root),
            tip_chord: m(taper * root),
            mac_length: m(mac),
            mac_y: m(mac_y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingLayout {
    pub planform: Trapezoid,
    pub aspect_ratio: f64,
    pub mac_leading_edge: Length,
    pub root_leading_edge: Length,
    pub root_thickness: Length,
    pub tip_thickness: Length,
}

impl WingLayout {
    #[must_use]
    pub fn quarter_chord(&self) -> Length {
        self.mac_leading_edge + self.planform.mac_length / 4.0
    }

    #[must_use]
    pub fn root_trailing_edge(&self) -> Length {
        self.root_leading_edge + self.planform.root_chord
    }

    /// What the wing structure is sized on.
    #[must_use]
    pub fn structure(&self) -> WingGeometry {
        let p = &self.planform;
        WingGeometry {
            span: p.span,
            surface: p.surface,
            mac_length: p.mac_length,
            mac_y: p.mac_y,
            root_chord: p.root_chord,
            tip_chord: p.tip_chord,
            root_thickness: self.root_thickness,
            tip_thickness: self.tip_thickness,
        }
    }

    /// What the neutral point is located from.
    #[must_use]
    pub fn stability(&self, oswald: f64) -> WingPlanform {
        WingPlanform {
            aspect_ratio: self.aspect_ratio,
            oswald,
            mac_length: self.planform.mac_length,
            mac_leading_edge: self.mac_leading_edge,
            root_leading_edge: self.root_leading_edge,
            root_chord: self.planform.root_chord,
        }
    }
}

/// A tail surface, unswept, placed one arm behind the wing quarter chord.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailLayout {
    pub arm: Length,
    pub planform: Trapezoid,
    pub mac_leading_edge: Length,
}

impl TailLayout {
    fn new(surface: f64, design: &TailDesign, arm: f64, wing_quarter_chord: Length) -> Self {
        let planform = Trapezoid::new(surface, design.aspect_ratio, design.taper_ratio);
        let quarter_chord = wing_quarter_chord + Length::new::<meter>(arm);
        Self {
            arm: Length::new::<meter>(arm),
            planform,
            mac_leading_edge: quarter_chord - planform.mac_length / 4.0,
        }
    }

    #[must_use]
    pub fn root_trailing_edge(&self) -> Length {
        self.mac_leading_edge + self.planform.root_chord
    }

    #[must_use]
    pub fn placement(&self, mass: Mass) -> TailPlacement {
        TailPlacement {
            mac_leading_edge: self.mac_leading_edge,
            mac_length: self.planform.mac_length,
            mass,
        }
    }
}

/// Half-sphere nose, cylindrical mid section and conical rear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuselageLayout {
    pub fineness: f64,
    pub length: Length,
    pub sections: FuselageGeometry,
    pub surfaces: FuselageSurfaces,
    /// Volume of the mid section, where payload and batteries go.
    pub mid_volume: Volume,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirframeGeometry {
    pub thickness_ratio: f64,
    pub wing: WingLayout,
    pub horizontal_tail: TailLayout,
    pub vertical_tail: TailLayout,
    pub fuselage: FuselageLayout,
}

impl AirframeGeometry {
    #[must_use]
    pub fn tail_surfaces(&self) -> TailSurfaces {
        TailSurfaces {
            horizontal: self.horizontal_tail.planform.surface,
            vertical: self.vertical_tail.planform.surface,
        }
    }

    /// Area seen from above: wing, horizontal tail and fuselage shadow.
    #[must_use]
    pub fn top_projected_area(&self) -> Area {
        self.wing.planform.surface
            + self.horizontal_tail.planform.surface
            + self.fuselage.surfaces.total / PI
    }

    /// Checks the mid fuselage against the `required_volume` of payload and
    /// batteries.
    #[must_use]
    pub fn constraints(&self, required_volume: Volume) -> AirframeConstraints {
        let required = required_volume.get::<cubic_meter>();
        AirframeConstraints {
            fuselage_volume: (self.fuselage.mid_volume.get::<cubic_meter>() - required) / required,
        }
    }
}

/// Geometric margins, feasible when non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirframeConstraints {
    /// Mid fuselage volume against payload and batteries.
    pub fuselage_volume: f64,
}

/// Sizes wing, tails and fuselage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry;

impl Model for Geometry {
    type Input = GeometryInput;
    type Output = AirframeGeometry;
    type Error = InvalidInput;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let GeometryDesign {
            wing: wing_design,
            tails,
            fuselage: fuselage_design,
        } = &input.design;
        validate(&input.design)?;
        let mtow = StrictlyPositive::new(input.mtow.get::<kilogram>())
            .map_err(|e| e.on("mtow"))?
            .into_inner();
        let loading = StrictlyPositive::new(input.wing_loading.get::<pascal>())
            .map_err(|e| e.on("wing_loading"))?
            .into_inner();

        let planform = Trapezoid::new(
            mtow * GRAVITY / loading,
            wing_design.aspect_ratio,
            wing_design.taper_ratio,
        );
        let mac_leading_edge = planform.span * wing_design.mac_position;
        let tc = wing_design.thickness_ratio;
        let wing = WingLayout {
            planform,
            aspect_ratio: wing_design.aspect_ratio,
            mac_leading_edge,
            root_leading_edge: mac_leading_edge
                - planform.mac_y * wing_design.leading_edge_sweep.get::<radian>().tan(),
            root_thickness: planform.root_chord * tc,
            tip_thickness: planform.tip_chord * tc,
        };

        let s = planform.surface.get::<square_meter>();
        let b = planform.span.get::<meter>();
        let arm = tails.arm_ratio * b;
        let horizontal_tail = TailLayout::new(
            tails.horizontal.volume_coefficient * s * planform.mac_length.get::<meter>() / arm,
            &tails.horizontal,
            arm,
            wing.quarter_chord(),
        );
        let vertical_tail = TailLayout::new(
            tails.vertical.volume_coefficient * s * b / arm,
            &tails.vertical,
            arm,
            wing.quarter_chord(),
        );

        let fuselage = fuselage_layout(
            fuselage_design,
            horizontal_tail.root_trailing_edge(),
            wing.root_trailing_edge(),
        )?;

        Ok(AirframeGeometry {
            thickness_ratio: tc,
            wing,
            horizontal_tail,
            vertical_tail,
            fuselage,
        })
    }
}

fn validate(design: &GeometryDesign) -> Result<(), InvalidInput> {
    let GeometryDesign {
        wing,
        tails,
        fuselage,
    } = design;
    StrictlyPositive::new(wing.aspect_ratio).map_err(|e| e.on("wing:aspect_ratio"))?;
    StrictlyPositive::new(wing.taper_ratio).map_err(|e| e.on("wing:taper_ratio"))?;
    UnitInterval::new(wing.taper_ratio).map_err(|e| e.on("wing:taper_ratio"))?;
    StrictlyPositive::new(wing.thickness_ratio).map_err(|e| e.on("wing:thickness_ratio"))?;
    NonNegative::new(wing.mac_position).map_err(|e| e.on("wing:mac_position"))?;
    StrictlyPositive::new(tails.arm_ratio).map_err(|e| e.on("tail:arm_ratio"))?;
    for (field, tail) in [
        ("tail:horizontal", &tails.horizontal),
        ("tail:vertical", &tails.vertical),
    ] {
        StrictlyPositive::new(tail.volume_coefficient).map_err(|e| e.on(field))?;
        StrictlyPositive::new(tail.aspect_ratio).map_err(|e| e.on(field))?;
        StrictlyPositive::new(tail.taper_ratio).map_err(|e| e.on(field))?;
    }
    StrictlyPositive::new(fuselage.fineness).map_err(|e| e.on("fuselage:fineness"))?;
    UnitInterval::new(fuselage.tip_diameter_ratio)
        .map_err(|e| e.on("fuselage:tip_diameter_ratio"))?;
    Ok(())
}

/// The rear section spans from the wing root trailing edge to the tail end.
fn fuselage_layout(
    design: &FuselageDesign,
    tail_end: Length,
    wing_trailing_edge: Length,
) -> Result<FuselageLayout, InvalidInput> {
    let length = tail_end.get::<meter>();
    let d = length / design.fineness;
    let d_tip = design.tip_diameter_ratio * d;
    let nose = d / 2.0;
    let rear = NonNegative::new(length - wing_trailing_edge.get::<meter>())
        .map_err(|e| e.on("fuselage:rear_length"))?
        .into_inner();
    let mid = NonNegative::new(length - rear - nose)
        .map_err(|e| e.on("fuselage:mid_length"))?
        .into_inner();

    let rear_surface = PI * (d + d_tip) / 2.0 * rear + PI * (d_tip / 2.0).powi(2);
    let mid_surface = PI * d * mid;
    let nose_surface = 2.0 * PI * (d / 2.0).powi(2);

    let m = Length::new::<meter>;
    let a = Area::new::<square_meter>;
    Ok(FuselageLayout {
        fineness: design.fineness,
        length: m(length),
        sections: FuselageGeometry {
            nose_length: m(nose),
            mid_length: m(mid),
            rear_length: m(rear),
            mid_diameter: m(d),
            tip_diameter: m(d_tip),
        },
        surfaces: FuselageSurfaces {
            nose: a(nose_surface),
            mid: a(mid_surface),
            rear: a(rear_surface),
            total: a(nose_surface + mid_surface + rear_surface),
        },
        mid_volume: Volume::new::<cubic_meter>(PI * (d / 2.0).powi(2) * mid),
    })
}

impl Export for AirframeGeometry {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        let w = &self.wing;
        store.put(format!("{prefix}:wing:surface"), w.planform.surface)?;
        store.put(format!("{prefix}:wing:span"), w.planform.span)?;
        store.put(format!("{prefix}:wing:AR"), w.aspect_ratio)?;
        store.put(format!("{prefix}:wing:root:chord"), w.planform.root_chord)?;
        store.put(format!("{prefix}:wing:tip:chord"), w.planform.tip_chord)?;
        store.put(format!("{prefix}:wing:root:thickness"), w.root_thickness)?;
        store.put(format!("{prefix}:wing:tip:thickness"), w.tip_thickness)?;
        store.put(format!("{prefix}:wing:MAC:length"), w.planform.mac_length)?;
        store.put(format!("{prefix}:wing:MAC:y"), w.planform.mac_y)?;
        store.put(format!("{prefix}:wing:MAC:LE:x"), w.mac_leading_edge)?;
        store.put(format!("{prefix}:wing:MAC:C4:x"), w.quarter_chord())?;
        store.put(format!("{prefix}:wing:root:LE:x"), w.root_leading_edge)?;
        store.put(format!("{prefix}:wing:root:TE:x"), w.root_trailing_edge())?;

        for (name, tail) in [
            ("horizontal", &self.horizontal_tail),
            ("vertical", &self.vertical_tail),
        ] {
            let scope = format!("{prefix}:tail:{name}");
            store.put(format!("{scope}:arm"), tail.arm)?;
            store.put(format!("{scope}:surface"), tail.planform.surface)?;
            store.put(format!("{scope}:span"), tail.planform.span)?;
            store.put(format!("{scope}:root:chord"), tail.planform.root_chord)?;
            store.put(format!("{scope}:tip:chord"), tail.planform.tip_chord)?;
            store.put(format!("{scope}:MAC:length"), tail.planform.mac_length)?;
            store.put(format!("{scope}:MAC:LE:x"), tail.mac_leading_edge)?;
            store.put(format!("{scope}:root:TE:x"), tail.root_trailing_edge())?;
        }

        let f = &self.fuselage;
        store.put(format!("{prefix}:fuselage:length"), f.length)?;
        store.put(format!("{prefix}:fuselage:length:nose"), f.sections.nose_length)?;
        store.put(format!("{prefix}:fuselage:length:mid"), f.sections.mid_length)?;
        store.put(format!("{prefix}:fuselage:length:rear"), f.sections.rear_length)?;
        store.put(format!("{prefix}:fuselage:diameter:mid"), f.sections.mid_diameter)?;
        store.put(format!("{prefix}:fuselage:diameter:tip"), f.sections.tip_diameter)?;
        store.put(format!("{prefix}:fuselage:surface"), f.surfaces.total)?;
        store.put(format!("{prefix}:fuselage:surface:nose"), f.surfaces.nose)?;
        store.put(format!("{prefix}:fuselage:surface:mid"), f.surfaces.mid)?;
        store.put(format!("{prefix}:fuselage:surface:rear"), f.surfaces.rear)?;
        store.put(format!("{prefix}:fuselage:volume:mid"), f.mid_volume)?;
        store.put(format!("{prefix}:projected_area:top"), self.top_projected_area())?;
        Ok(())
    }
}

impl Export for AirframeConstraints {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        export_margins(self, prefix, store)
    }
}

impl Margins for AirframeConstraints {
    fn margins(&self) -> Vec<(&'static str, f64)> {
        vec![("fuselage:volume", self.fuselage_volume)]
    }
}
