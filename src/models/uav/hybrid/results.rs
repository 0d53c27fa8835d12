use crate::{
    models::uav::{
        aerodynamics::AerodynamicsResults,
        convergence::SizedVehicle,
        geometry::{AirframeConstraints, AirframeGeometry},
        margins::{Margins, collect_margins},
        mtow::MtowResults,
        performance::EnduranceResults,
        propulsion::{PropulsionId, PropulsionResults, wires::WiresResults},
        scenarios::{FixedWingConditions, ScenarioConditions},
        stability::{RotorSpan, StabilityResults},
        structures::{FixedWingStructuresResults, arms::ArmsResults},
    },
    support::variables::{Export, VariableError, VariableStore},
};

const SCENARIOS: &str = "scenarios";
const PROPULSION: &str = "propulsion";
const GEOMETRY: &str = "geometry";
const AERODYNAMICS: &str = "aerodynamics";
const STRUCTURES: &str = "structures";
const WEIGHT: &str = "weight";
const STABILITY: &str = "stability";
const PERFORMANCE: &str = "performance";

const LIFT: PropulsionId = PropulsionId::Multirotor;
const CRUISE: PropulsionId = PropulsionId::FixedWing;

/// Everything computed for one takeoff-weight guess.
#[derive(Debug, Clone, PartialEq)]
pub struct HybridResults {
    pub lift_scenarios: ScenarioConditions,
    pub cruise_scenarios: FixedWingConditions,
    pub geometry: AirframeGeometry,
    pub geometry_constraints: AirframeConstraints,
    /// Lift rotors, sized on hover.
    pub lift: PropulsionResults,
    /// Forward-flight propellers, sized on cruise.
    pub cruise: PropulsionResults,
    pub lift_wires: WiresResults,
    pub cruise_wires: WiresResults,
    pub arms: ArmsResults,
    pub rotors: RotorSpan,
    pub aerodynamics: AerodynamicsResults,
    pub structures: FixedWingStructuresResults,
    pub mtow: MtowResults,
    pub stability: StabilityResults,
    pub endurance: EnduranceResults,
}

impl HybridResults {
    fn margin_groups(&self) -> Vec<(String, &dyn Margins)> {
        let mut groups = vec![(
            format!("{SCENARIOS}:{CRUISE}"),
            &self.cruise_scenarios.wing_loading as &dyn Margins,
        )];
        groups.extend(self.lift.margin_groups(&format!("{PROPULSION}:{LIFT}")));
        groups.extend(self.cruise.margin_groups(&format!("{PROPULSION}:{CRUISE}")));
        groups.push((GEOMETRY.to_owned(), &self.geometry_constraints));
        groups.push((AERODYNAMICS.to_owned(), &self.aerodynamics.constraints));
        groups.extend(self.structures.margin_groups(STRUCTURES));
        groups.push((STABILITY.to_owned(), &self.stability.constraints));
        groups.push((WEIGHT.to_owned(), &self.mtow.constraints));
        groups
    }
}

impl SizedVehicle for HybridResults {
    fn mtow(&self) -> &MtowResults {
        &self.mtow
    }

    fn constraints(&self) -> Vec<(String, f64)> {
        collect_margins(&self.margin_groups())
    }
}

impl Export for HybridResults {
    /// Writes one scope per discipline under `prefix`, and one per
    /// propulsion system.
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        let lift = format!("{prefix}:{PROPULSION}:{LIFT}");
        let cruise = format!("{prefix}:{PROPULSION}:{CRUISE}");
        let geometry = format!("{prefix}:{GEOMETRY}");
        let structures = format!("{prefix}:{STRUCTURES}");

        self.lift_scenarios.export(&format!("{prefix}:{SCENARIOS}:{LIFT}"), store)?;
        self.cruise_scenarios.export(&format!("{prefix}:{SCENARIOS}:{CRUISE}"), store)?;
        self.lift.export(&lift, store)?;
        self.lift_wires.export(&format!("{lift}:wires"), store)?;
        self.cruise.export(&cruise, store)?;
        self.cruise_wires.export(&format!("{cruise}:wires"), store)?;
        self.geometry.export(&geometry, store)?;
        self.geometry_constraints.export(&geometry, store)?;
        store.put(format!("{geometry}:rotors:front:x"), self.rotors.front)?;
        store.put(format!("{geometry}:rotors:rear:x"), self.rotors.rear)?;
        self.aerodynamics.export(&format!("{prefix}:{AERODYNAMICS}"), store)?;
        self.structures.export(&structures, store)?;
        self.arms.export_arms(&structures, store)?;
        self.mtow.export(&format!("{prefix}:{WEIGHT}"), store)?;
        self.stability.export(&format!("{prefix}:{STABILITY}"), store)?;
        self.endurance.export(&format!("{prefix}:{PERFORMANCE}"), store)?;
        Ok(())
    }
}
