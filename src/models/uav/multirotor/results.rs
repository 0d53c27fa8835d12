use crate::{
    models::uav::{
        convergence::SizedVehicle,
        margins::{Margins, collect_margins},
        mtow::MtowResults,
        performance::EnduranceResults,
        propulsion::{PropulsionId, PropulsionResults, wires::WiresResults},
        scenarios::ScenarioConditions,
        structures::arms::ArmsResults,
    },
    support::variables::{Export, VariableError, VariableStore},
};

const SCENARIOS: &str = "scenarios";
const PROPULSION: &str = "propulsion";
const STRUCTURES: &str = "structures";
const WEIGHT: &str = "weight";
const PERFORMANCE: &str = "performance";

const ID: PropulsionId = PropulsionId::Multirotor;

/// Everything computed for one takeoff-weight guess.
#[derive(Debug, Clone, PartialEq)]
pub struct MultirotorResults {
    pub scenarios: ScenarioConditions,
    pub propulsion: PropulsionResults,
    pub wires: WiresResults,
    pub arms: ArmsResults,
    pub mtow: MtowResults,
    pub endurance: EnduranceResults,
}

impl MultirotorResults {
    fn margin_groups(&self) -> Vec<(String, &dyn Margins)> {
        let mut groups = self.propulsion.margin_groups(&format!("{PROPULSION}:{ID}"));
        groups.push((WEIGHT.to_owned(), &self.mtow.constraints));
        groups
    }
}

impl SizedVehicle for MultirotorResults {
    fn mtow(&self) -> &MtowResults {
        &self.mtow
    }

    fn constraints(&self) -> Vec<(String, f64)> {
        collect_margins(&self.margin_groups())
    }
}

impl Export for MultirotorResults {
    /// Writes under `{prefix}:scenarios`, `{prefix}:propulsion`,
    /// `{prefix}:structures`, `{prefix}:weight` and `{prefix}:performance`.
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        let propulsion = format!("{prefix}:{PROPULSION}:{ID}");

        self.scenarios.export(&format!("{prefix}:{SCENARIOS}:{ID}"), store)?;
        self.propulsion.export(&propulsion, store)?;
        self.wires.export(&format!("{propulsion}:wires"), store)?;
        self.arms.export(&format!("{prefix}:{STRUCTURES}"), store)?;
        self.mtow.export(&format!("{prefix}:{WEIGHT}"), store)?;
        self.endurance.export(&format!("{prefix}:{PERFORMANCE}"), store)?;
        Ok(())
    }
}
