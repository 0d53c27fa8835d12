use std::f64::consts::PI;

use uom::si::{f64::Length, length::meter};

/// Flange aspect ratio: flange thickness is its depth over this.
const FLANGE_ASPECT: f64 = 0.1;

/// Web aspect ratio: web thickness is its depth over this.
const WEB_ASPECT: f64 = 30.0;

/// Spar cross-section model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SparModel {
    /// Hollow circular tube.
    Pipe {
        /// Inner over outer diameter.
        diameter_ratio: f64,
        /// Scales the outer diameter beyond the bending requirement.
        outer_factor: f64,
    },
    /// Two flanges joined by a web.
    IBeam {
        /// Flange depth over web depth.
        depth_ratio: f64,
        /// Scales the web depth beyond the bending requirement.
        web_factor: f64,
    },
}

impl SparModel {
    #[must_use]
    pub fn pipe() -> Self {
        SparModel::Pipe {
            diameter_ratio: 0.9,
            outer_factor: 1.0,
        }
    }

    #[must_use]
    pub fn i_beam() -> Self {
        SparModel::IBeam {
            depth_ratio: 0.1,
            web_factor: 1.0,
        }
    }

    /// Sizes a cross-section for a root bending moment, N·m, and an
    /// allowable stress, Pa.
    pub(super) fn size(self, moment: f64, max_stress: f64) -> SparSection {
        match self {
            SparModel::Pipe {
                diameter_ratio: k,
                outer_factor,
            } => {
                let outer = outer_factor
                    * (32.0 * moment / (PI * (1.0 - k.powi(4)) * max_stress)).cbrt();
                SparSection::Pipe {
                    outer_diameter: Length::new::<meter>(outer),
                    inner_diameter: Length::new::<meter>(k * outer),
                }
            }
            SparModel::IBeam {
                depth_ratio: k,
                web_factor,
            } => {
                let web = web_factor
                    * (moment * (1.0 + k) / (max_stress * i_beam_modulus(k))).cbrt();
                let flange = k * web;
                SparSection::IBeam {
                    web_depth: Length::new::<meter>(web),
                    web_thickness: Length::new::<meter>(web / WEB_ASPECT),
                    flange_depth: Length::new::<meter>(flange),
                    flange_thickness: Length::new::<meter>(flange / FLANGE_ASPECT),
                }
            }
        }
    }
}

/// Section modulus of the flanges per cubed web depth.
fn i_beam_modulus(k: f64) -> f64 {
    k * k * (1.0 + k * k / 3.0) / FLANGE_ASPECT
}

/// A sized spar cross-section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SparSection {
    Pipe {
        outer_diameter: Length,
        inner_diameter: Length,
    },
    IBeam {
        web_depth: Length,
        web_thickness: Length,
        flange_depth: Length,
        flange_thickness: Length,
    },
}

impl SparSection {
    /// Overall depth the wing must enclose.
    #[must_use]
    pub fn depth(&self) -> Length {
        match *self {
            SparSection::Pipe { outer_diameter, .. } => outer_diameter,
            SparSection::IBeam {
                web_depth,
                flange_depth,
                ..
            } => web_depth + flange_depth,
        }
    }

    /// Root stress, Pa, under a bending moment, N·m.
    pub(super) fn stress(&self, moment: f64) -> f64 {
        match *self {
            SparSection::Pipe {
                outer_diameter,
                inner_diameter,
            } => {
                let outer = outer_diameter.get::<meter>();
                let k = inner_diameter.get::<meter>() / outer;
                32.0 * moment / (PI * (1.0 - k.powi(4)) * outer.powi(3))
            }
            SparSection::IBeam {
                web_depth,
                flange_depth,
                ..
            } => {
                let web = web_depth.get::<meter>();
                let k = flange_depth.get::<meter>() / web;
                moment * (1.0 + k) / (web.powi(3) * i_beam_modulus(k))
            }
        }
    }

    /// Cross-section area, m².
    pub(super) fn area(&self) -> f64 {
        match *self {
            SparSection::Pipe {
                outer_diameter,
                inner_diameter,
            } => {
                let outer = outer_diameter.get::<meter>();
                let inner = inner_diameter.get::<meter>();
                PI / 4.0 * (outer * outer - inner * inner)
            }
            SparSection::IBeam {
                web_depth,
                web_thickness,
                flange_depth,
                flange_thickness,
            } => {
                let a = flange_depth.get::<meter>();
                2.0 * a * flange_thickness.get::<meter>()
                    + (web_depth.get::<meter>() - a) * web_thickness.get::<meter>()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn sized_section_carries_its_design_stress() {
        for model in [SparModel::pipe(), SparModel::i_beam()] {
            let section = model.size(103.005, 70e6);
            assert_relative_eq!(section.stress(103.005), 70e6, max_relative = 1e-12);
        }
    }

    #[test]
    fn i_beam_proportions() {
        let section = SparModel::i_beam().size(103.005, 70e6);
        let SparSection::IBeam {
            web_depth,
            web_thickness,
            flange_thickness,
            ..
        } = section
        else {
            panic!("expected an I-beam");
        };

        assert_relative_eq!(web_depth.get::<meter>(), 0.025_267_905_087_420_55, epsilon = 1e-14);
        assert_relative_eq!(
            web_thickness.get::<meter>() * 30.0,
            web_depth.get::<meter>(),
            epsilon = 1e-15
        );
        assert_relative_eq!(flange_thickness.get::<meter>(), web_depth.get::<meter>(), epsilon = 1e-15);
        assert_relative_eq!(
            section.depth().get::<meter>(),
            0.027_794_695_596_162_607,
            epsilon = 1e-14
        );
    }
}
