use uom::si::{f64::Mass, mass::kilogram};

use crate::models::uav::{
    convergence::MtowConfig,
    fixed_wing::PropellerMount,
    propulsion::{PropulsionConfig, PropulsionReferences},
    scenarios::ArmLayout,
    stability::StaticMarginBounds,
    structures::{
        FixedWingStructures,
        arms::{ArmMaterial, FrameReference},
    },
};

/// Sourcing switches and reference components of one propulsion system.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SystemConfig {
    pub flags: PropulsionConfig,
    pub references: PropulsionReferences,
}

/// Architecture, reference components and solver settings of a hybrid
/// VTOL.
#[derive(Debug, Clone, Copy)]
pub struct HybridConfig {
    /// Arms carrying the lift rotors.
    pub layout: ArmLayout,
    pub cruise_propeller_count: u32,
    pub mount: PropellerMount,
    pub lift: SystemConfig,
    pub cruise: SystemConfig,
    pub arm_material: ArmMaterial,
    /// Scales the arms; its body mass is unused.
    pub frame: FrameReference,
    pub structures: FixedWingStructures,
    pub static_margin: StaticMarginBounds,
    /// Drag coefficient of the airframe in axial flow.
    pub vertical_drag_coefficient: f64,
    /// Mass not carried by any discipline.
    pub misc_mass: Mass,
    pub mtow: MtowConfig,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            layout: ArmLayout::QUAD,
            cruise_propeller_count: 1,
            mount: PropellerMount::default(),
            lift: SystemConfig::default(),
            cruise: SystemConfig::default(),
            arm_material: ArmMaterial::default(),
            frame: FrameReference::default(),
            structures: FixedWingStructures::default(),
            static_margin: StaticMarginBounds::default(),
            vertical_drag_coefficient: 1.18,
            misc_mass: Mass::new::<kilogram>(0.0),
            mtow: MtowConfig::default(),
        }
    }
}
