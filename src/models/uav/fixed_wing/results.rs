use crate::{
    models::uav::{
        aerodynamics::AerodynamicsResults,
        convergence::SizedVehicle,
        geometry::{AirframeConstraints, AirframeGeometry},
        margins::{Margins, collect_margins},
        mtow::MtowResults,
        performance::EnduranceResults,
        propulsion::{PropulsionId, PropulsionResults, wires::WiresResults},
        scenarios::FixedWingConditions,
        stability::StabilityResults,
        structures::FixedWingStructuresResults,
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

/// Everything computed for one takeoff-weight guess.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedWingResults {
    pub scenarios: FixedWingConditions,
    pub geometry: AirframeGeometry,
    pub geometry_constraints: AirframeConstraints,
    pub propulsion: PropulsionResults,
    pub wires: WiresResults,
    pub aerodynamics: AerodynamicsResults,
    pub structures: FixedWingStructuresResults,
    pub mtow: MtowResults,
    pub stability: StabilityResults,
    pub endurance: EnduranceResults,
}

impl FixedWingResults {
    fn margin_groups(&self) -> Vec<(String, &dyn Margins)> {
        let id = PropulsionId::FixedWing;
        let mut groups = vec![(
            format!("{SCENARIOS}:{id}"),
            &self.scenarios.wing_loading as &dyn Margins,
        )];
        groups.extend(self.propulsion.margin_groups(&format!("{PROPULSION}:{id}")));
        groups.push((GEOMETRY.to_owned(), &self.geometry_constraints));
        groups.push((AERODYNAMICS.to_owned(), &self.aerodynamics.constraints));
        groups.extend(self.structures.margin_groups(STRUCTURES));
        groups.push((STABILITY.to_owned(), &self.stability.constraints));
        groups.push((WEIGHT.to_owned(), &self.mtow.constraints));
        groups
    }
}

impl SizedVehicle for FixedWingResults {
    fn mtow(&self) -> &MtowResults {
        &self.mtow
    }

    fn constraints(&self) -> Vec<(String, f64)> {
        collect_margins(&self.margin_groups())
    }
}

impl Export for FixedWingResults {
    /// Writes one scope per discipline under `prefix`.
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        let id = PropulsionId::FixedWing;
        let propulsion = format!("{prefix}:{PROPULSION}:{id}");
        let geometry = format!("{prefix}:{GEOMETRY}");

        self.scenarios.export(&format!("{prefix}:{SCENARIOS}:{id}"), store)?;
        self.propulsion.export(&propulsion, store)?;
        self.wires.export(&format!("{propulsion}:wires"), store)?;
        self.geometry.export(&geometry, store)?;
        self.geometry_constraints.export(&geometry, store)?;
        self.aerodynamics.export(&format!("{prefix}:{AERODYNAMICS}"), store)?;
        self.structures.export(&format!("{prefix}:{STRUCTURES}"), store)?;
        self.mtow.export(&format!("{prefix}:{WEIGHT}"), store)?;
        self.stability.export(&format!("{prefix}:{STABILITY}"), store)?;
        self.endurance.export(&format!("{prefix}:{PERFORMANCE}"), store)?;
        Ok(())
    }
}
