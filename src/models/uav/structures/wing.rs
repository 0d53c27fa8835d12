//! Wing structure of a fixed-wing UAV.
//!
//! Spars are sized on an ultimate aerodynamic load acting at the mean
//! aerodynamic chord. Two checks follow: the spar must fit inside the wing
//! tip, and on VTOL aircraft it must carry the lift propellers at takeoff.

mod spar;

pub use spar::{SparModel, SparSection};

use twine_core::Model;
use uom::si::{
    areal_mass_density::kilogram_per_square_meter,
    area::square_meter,
    f64::{Area, ArealMassDensity, Force, Length, Mass, MassDensity, Pressure},
    force::newton,
    length::meter,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
};

use crate::{
    models::uav::margins::{Margins, export_margins},
    support::{
        constraint::{InvalidInput, StrictlyPositive},
        units::GRAVITY,
        variables::{Export, VariableError, VariableStore},
    },
};

/// Planform and thickness of the wing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingGeometry {
    pub span: Length,
    pub surface: Area,
    pub mac_length: Length,
    /// Spanwise position of the mean aerodynamic chord.
    pub mac_y: Length,
    pub root_chord: Length,
    pub tip_chord: Length,
    pub root_thickness: Length,
    pub tip_thickness: Length,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingMaterials {
    pub spar_max_stress: Pressure,
    pub spar_density: MassDensity,
    pub ribs_density: MassDensity,
    pub ribs_thickness: Length,
    pub skin_density: ArealMassDensity,
}

impl Default for WingMaterials {
    /// Carbon spar, balsa ribs and film skin.
    fn default() -> Self {
        Self {
            spar_max_stress: Pressure::new::<pascal>(70e6),
            spar_density: MassDensity::new::<kilogram_per_cubic_meter>(1700.0),
            ribs_density: MassDensity::new::<kilogram_per_cubic_meter>(160.0),
            ribs_thickness: Length::new::<meter>(0.003),
            skin_density: ArealMassDensity::new::<kilogram_per_square_meter>(0.1),
        }
    }
}

/// Lift propellers mounted on booms across the wing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VtolLoad {
    /// Takeoff thrust of one propeller.
    pub takeoff_thrust: Force,
    pub propeller_count: u32,
    /// Spanwise position of the propellers.
    pub propeller_y: Length,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingInput {
    pub geometry: WingGeometry,
    pub mtow: Mass,
    pub load_factor: f64,
    pub vtol: Option<VtolLoad>,
}

/// Wing margins, feasible when non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingConstraints {
    /// Tip thickness against spar depth.
    pub spar_depth: f64,
    /// Allowable stress against the VTOL takeoff stress.
    pub vtol_stress: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingResults {
    pub section: SparSection,
    /// Both half-spars.
    pub spar_mass: Mass,
    pub ribs_count: f64,
    pub ribs_mass: Mass,
    pub skin_mass: Mass,
    pub mass: Mass,
    pub vtol_stress: Option<Pressure>,
    pub constraints: WingConstraints,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingStructure {
    pub spar: SparModel,
    pub materials: WingMaterials,
}

impl Default for WingStructure {
    fn default() -> Self {
        Self {
            spar: SparModel::pipe(),
            materials: WingMaterials::default(),
        }
    }
}

impl Model for WingStructure {
    type Input = WingInput;
    type Output = WingResults;
    type Error = InvalidInput;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let WingInput {
            geometry: g,
            mtow,
            load_factor,
            vtol,
        } = input;
        StrictlyPositive::new(g.mac_length).map_err(|e| e.on("mac_length"))?;
        StrictlyPositive::new(*load_factor).map_err(|e| e.on("load_factor"))?;

        let m = &self.materials;
        let half_span = g.span.get::<meter>() / 2.0;

        let load = load_factor * mtow.get::<kilogram>() * GRAVITY / 2.0;
        let moment = load * g.mac_y.get::<meter>();
        let section = self.spar.size(moment, m.spar_max_stress.get::<pascal>());
        let spar_mass =
            2.0 * m.spar_density.get::<kilogram_per_cubic_meter>() * half_span * section.area();

        let ribs_per_side = 2.0 * half_span / g.mac_length.get::<meter>();
        let rib_area = (g.root_chord * g.root_thickness + g.tip_chord * g.tip_thickness)
            .get::<square_meter>()
            / 2.0;
        let ribs_mass = 2.0
            * ribs_per_side
            * m.ribs_density.get::<kilogram_per_cubic_meter>()
            * m.ribs_thickness.get::<meter>()
            * rib_area;

        // Upper and lower skin on each half-wing.
        let skin_mass =
            2.0 * g.surface.get::<square_meter>() * m.skin_density.get::<kilogram_per_square_meter>();

        let depth = section.depth().get::<meter>();
        let vtol_stress = vtol.map(|v| {
            let moment = v.takeoff_thrust.get::<newton>() * f64::from(v.propeller_count) / 2.0
                * v.propeller_y.get::<meter>();
            section.stress(moment)
        });
        let max_stress = m.spar_max_stress.get::<pascal>();

        Ok(WingResults {
            section,
            spar_mass: Mass::new::<kilogram>(spar_mass),
            ribs_count: 2.0 * ribs_per_side,
            ribs_mass: Mass::new::<kilogram>(ribs_mass),
            skin_mass: Mass::new::<kilogram>(skin_mass),
            mass: Mass::new::<kilogram>(spar_mass + ribs_mass + skin_mass),
            vtol_stress: vtol_stress.map(Pressure::new::<pascal>),
            constraints: WingConstraints {
                spar_depth: (g.tip_thickness.get::<meter>() - depth) / depth,
                vtol_stress: vtol_stress.map(|stress| (max_stress - stress) / stress),
            },
        })
    }
}

impl Export for WingResults {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        match self.section {
            SparSection::Pipe {
                outer_diameter,
                inner_diameter,
            } => {
                store.put(format!("{prefix}:spar:diameter:outer"), outer_diameter)?;
                store.put(format!("{prefix}:spar:diameter:inner"), inner_diameter)?;
            }
            SparSection::IBeam {
                web_depth,
                web_thickness,
                flange_depth,
                flange_thickness,
            } => {
                store.put(format!("{prefix}:spar:web:depth"), web_depth)?;
                store.put(format!("{prefix}:spar:web:thickness"), web_thickness)?;
                store.put(format!("{prefix}:spar:flange:depth"), flange_depth)?;
                store.put(format!("{prefix}:spar:flange:thickness"), flange_thickness)?;
            }
        }
        store.put(format!("{prefix}:spar:depth"), self.section.depth())?;
        store.put(format!("{prefix}:spar:mass"), self.spar_mass)?;
        store.put(format!("{prefix}:ribs:number"), self.ribs_count)?;
        store.put(format!("{prefix}:ribs:mass"), self.ribs_mass)?;
        store.put(format!("{prefix}:skin:mass"), self.skin_mass)?;
        store.put(format!("{prefix}:mass"), self.mass)?;
        if let Some(stress) = self.vtol_stress {
            store.put(format!("{prefix}:spar:stress:VTOL"), stress)?;
        }
        export_margins(&self.constraints, prefix, store)
    }
}

impl Margins for WingConstraints {
    fn margins(&self) -> Vec<(&'static str, f64)> {
        let mut margins = vec![("spar:depth", self.spar_depth)];
        if let Some(stress) = self.vtol_stress {
            margins.push(("spar:stress:VTOL", stress));
        }
        margins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn input(vtol: Option<VtolLoad>) -> WingInput {
        let m = Length::new::<meter>;
        WingInput {
            geometry: WingGeometry {
                span: m(3.0),
                surface: Area::new::<square_meter>(0.9),
                mac_length: m(0.3),
                mac_y: m(0.7),
                root_chord: m(0.35),
                tip_chord: m(0.25),
                root_thickness: m(0.042),
                tip_thickness: m(0.03),
            },
            mtow: Mass::new::<kilogram>(10.0),
            load_factor: 3.0,
            vtol,
        }
    }

    fn quad_booms() -> Option<VtolLoad> {
        Some(VtolLoad {
            takeoff_thrust: Force::new::<newton>(30.0),
            propeller_count: 4,
            propeller_y: Length::new::<meter>(0.5),
        })
    }

    #[test]
    fn pipe_spar_wing() {
        let out = WingStructure::default().call(&input(quad_booms())).unwrap();

        assert_relative_eq!(
            out.section.depth().get::<meter>(),
            0.035_191_901_392_488_65,
            epsilon = 1e-14
        );
        assert_relative_eq!(out.spar_mass.get::<kilogram>(), 0.942_538_551_326_635_6, epsilon = 1e-12);
        assert_relative_eq!(out.ribs_count, 20.0, epsilon = 1e-12);
        assert_relative_eq!(out.ribs_mass.get::<kilogram>(), 0.106_56, epsilon = 1e-12);
        assert_relative_eq!(out.skin_mass.get::<kilogram>(), 0.18, epsilon = 1e-12);
        assert_relative_eq!(out.mass.get::<kilogram>(), 1.229_098_551_326_635_5, epsilon = 1e-12);

        // The spar is too deep for the tip.
        assert_relative_eq!(out.constraints.spar_depth, -0.147_531_141_741_514_7, epsilon = 1e-12);
    }

    #[test]
    fn i_beam_fits_the_tip() {
        let wing = WingStructure {
            spar: SparModel::i_beam(),
            ..WingStructure::default()
        };
        let out = wing.call(&input(None)).unwrap();

        assert_relative_eq!(out.spar_mass.get::<kilogram>(), 0.748_921_823_265_585_9, epsilon = 1e-12);
        assert_relative_eq!(out.constraints.spar_depth, 0.079_342_635_583_383_09, epsilon = 1e-12);
        assert_eq!(out.vtol_stress, None);
        assert_eq!(out.constraints.vtol_stress, None);
    }

    #[test]
    fn vtol_stress_ratio_follows_moments() {
        // Sized for 103.005 N·m, loaded with 30 N·m.
        for spar in [SparModel::pipe(), SparModel::i_beam()] {
            let wing = WingStructure {
                spar,
                ..WingStructure::default()
            };
            let out = wing.call(&input(quad_booms())).unwrap();

            assert_relative_eq!(
                out.vtol_stress.unwrap().get::<pascal>(),
                20_387_359.836_901_1,
                max_relative = 1e-12
            );
            assert_relative_eq!(out.constraints.vtol_stress.unwrap(), 2.4335, epsilon = 1e-10);
        }
    }

    #[test]
    fn exports_section_specific_keys() {
        let mut store = VariableStore::new();
        WingStructure::default()
            .call(&input(None))
            .unwrap()
            .export("data:structures:wing", &mut store)
            .unwrap();

        assert!(store.variable("data:structures:wing:spar:diameter:outer").is_some());
        assert!(store.variable("data:structures:wing:spar:web:depth").is_none());
        assert!(store.variable("data:structures:wing:spar:stress:VTOL").is_none());
        assert!(store.variable("data:structures:wing:constraints:spar:depth").is_some());
        assert!(
            store
                .variable("data:structures:wing:constraints:spar:stress:VTOL")
                .is_none()
        );
    }
}
