use uom::si::{f64::Mass, mass::kilogram};

use crate::models::uav::{
    convergence::MtowConfig,
    propulsion::{PropulsionConfig, PropulsionReferences},
    scenarios::{ArmLayout, BodyAerodynamics, CruiseAttitudeConfig},
    structures::arms::{ArmMaterial, FrameReference},
};

/// Architecture, reference components and solver settings of a multirotor.
#[derive(Debug, Clone, Copy)]
pub struct SizingConfig {
    pub layout: ArmLayout,
    pub body: BodyAerodynamics,
    pub propulsion: PropulsionConfig,
    pub references: PropulsionReferences,
    pub arm_material: ArmMaterial,
    pub frame: FrameReference,
    /// Mass not carried by any discipline.
    pub misc_mass: Mass,
    pub cruise: CruiseAttitudeConfig,
    pub mtow: MtowConfig,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            layout: ArmLayout::QUAD,
            body: BodyAerodynamics::default(),
            propulsion: PropulsionConfig::default(),
            references: PropulsionReferences::default(),
            arm_material: ArmMaterial::default(),
            frame: FrameReference::default(),
            misc_mass: Mass::new::<kilogram>(0.0),
            cruise: CruiseAttitudeConfig::default(),
            mtow: MtowConfig::default(),
        }
    }
}
