use uom::si::{f64::Mass, mass::kilogram};

use crate::models::uav::{
    convergence::MtowConfig,
    propulsion::{PropulsionConfig, PropulsionReferences},
    stability::{PropulsionLayout, StaticMarginBounds},
    structures::FixedWingStructures,
};

/// Where the forward-flight propeller is mounted on the fuselage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PropellerMount {
    #[default]
    Tractor,
    Pusher,
}

impl From<PropellerMount> for PropulsionLayout {
    fn from(mount: PropellerMount) -> Self {
        match mount {
            PropellerMount::Tractor => PropulsionLayout::Tractor,
            PropellerMount::Pusher => PropulsionLayout::Pusher,
        }
    }
}

/// Architecture, reference components and solver settings of a fixed-wing
/// UAV.
#[derive(Debug, Clone, Copy)]
pub struct FixedWingConfig {
    pub propeller_count: u32,
    pub mount: PropellerMount,
    pub propulsion: PropulsionConfig,
    pub references: PropulsionReferences,
    pub structures: FixedWingStructures,
    pub static_margin: StaticMarginBounds,
    /// Mass not carried by any discipline.
    pub misc_mass: Mass,
    pub mtow: MtowConfig,
}

impl Default for FixedWingConfig {
    fn default() -> Self {
        Self {
            propeller_count: 1,
            mount: PropellerMount::default(),
            propulsion: PropulsionConfig::default(),
            references: PropulsionReferences::default(),
            structures: FixedWingStructures::default(),
            static_margin: StaticMarginBounds::default(),
            misc_mass: Mass::new::<kilogram>(0.0),
            mtow: MtowConfig::default(),
        }
    }
}
