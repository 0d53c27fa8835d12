//! Sizing scenarios.
//!
//! Turns the mission requirements and a takeoff-weight estimate into the
//! flight condition seen by each propeller in every
//! [`Scenario`](crate::support::scenario::Scenario): required
//! thrust, air density, airspeed, and rotor disk angle of attack.
//!
//! [`SizingScenarios`] covers a multirotor. Hover and takeoff are static.
//! Climb is axial, with body drag on the top surface. Cruise trims the body
//! attitude so that thrust balances weight, body drag and body lift, which
//! needs a root-find on the attitude angle.
//! [`FixedWingScenarios`] derives thrust from a wing drag polar, and
//! [`VtolScenarios`] covers the lift rotors of a hybrid VTOL.

mod cruise;
mod fixed_wing;
mod vtol;

pub use cruise::{CruiseAttitudeConfig, CruiseAttitudeError};
pub use fixed_wing::{
    FixedWingConditions, FixedWingMission, FixedWingScenarios, FixedWingScenariosInput,
    WingLoading, WingLoadingDesign,
};
pub use vtol::{VtolScenarios, VtolScenariosInput};

use std::f64::consts::FRAC_PI_2;

use thiserror::Error;
use twine_core::Model;
use uom::si::{
    angle::radian,
    area::square_meter,
    f64::{
        Angle, Area, Force, Length, Mass, MassDensity, Power, TemperatureInterval, Velocity,
    },
    force::newton,
    mass::kilogram,
    pressure::pascal,
    velocity::meter_per_second,
};

use crate::support::{
    atmosphere::Atmosphere,
    constraint::{ConstraintError, InvalidInput, NonNegative, StrictlyPositive},
    scenario::PerScenario,
    units::GRAVITY,
    variables::{Export, VariableError, VariableStore},
};

use cruise::{CruiseBalance, cruise_attitude};

/// Mission requirements the vehicle is sized against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mission {
    pub payload_mass: Mass,
    /// Electrical power drawn by the payload in every scenario.
    pub payload_power: Power,
    /// Upper bound on the takeoff weight.
    pub mtow_requirement: Mass,
    pub takeoff_altitude: Length,
    /// Height gained during the climb; cruise happens at the top of it.
    pub climb_height: Length,
    /// Offset from the standard day temperature.
    pub delta_isa: TemperatureInterval,
    pub climb_speed: Velocity,
    pub cruise_speed: Velocity,
    /// Ratio of takeoff thrust to hover thrust.
    pub takeoff_thrust_ratio: f64,
}

impl Mission {
    /// Checks the mission for values that would break the sizing formulas.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        StrictlyPositive::new(self.payload_mass).map_err(|e| e.on("payload_mass"))?;
        NonNegative::new(self.payload_power).map_err(|e| e.on("payload_power"))?;
        StrictlyPositive::new(self.mtow_requirement).map_err(|e| e.on("mtow_requirement"))?;
        NonNegative::new(self.climb_height).map_err(|e| e.on("climb_height"))?;
        StrictlyPositive::new(self.climb_speed).map_err(|e| e.on("climb_speed"))?;
        StrictlyPositive::new(self.cruise_speed).map_err(|e| e.on("cruise_speed"))?;
        StrictlyPositive::new(self.takeoff_thrust_ratio)
            .map_err(|e| e.on("takeoff_thrust_ratio"))?;
        Ok(())
    }

    /// Altitude of the hover, climb and cruise scenarios.
    #[must_use]
    pub fn cruise_altitude(&self) -> Length {
        self.takeoff_altitude + self.climb_height
    }
}

/// Arm and rotor arrangement of a multirotor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmLayout {
    pub arms: u32,
    pub propellers_per_arm: u32,
}

impl ArmLayout {
    /// Quadrotor with one propeller per arm.
    pub const QUAD: Self = Self {
        arms: 4,
        propellers_per_arm: 1,
    };

    /// # Errors
    ///
    /// Fails if the count does not fit a `u32`.
    pub fn propeller_count(&self) -> Result<u32, InvalidInput> {
        self.arms
            .checked_mul(self.propellers_per_arm)
            .ok_or(ConstraintError::AboveMaximum.on("propellers_per_arm"))
    }

    /// # Errors
    ///
    /// Fails if either count is zero.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        StrictlyPositive::new(self.arms).map_err(|e| e.on("arms"))?;
        StrictlyPositive::new(self.propellers_per_arm).map_err(|e| e.on("propellers_per_arm"))?;
        Ok(())
    }
}

/// Body drag model, with surfaces scaled from a reference vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyAerodynamics {
    /// Top surface of the reference vehicle (seen in axial flow).
    pub top_surface: Area,
    /// Front surface of the reference vehicle (seen in level flow).
    pub front_surface: Area,
    /// Takeoff weight of the reference vehicle.
    pub reference_mass: Mass,
    pub drag_coefficient: f64,
    /// Body lift coefficient; positive values push the body down.
    pub lift_coefficient: f64,
}

impl Default for BodyAerodynamics {
    fn default() -> Self {
        Self {
            top_surface: Area::new::<square_meter>(0.09),
            front_surface: Area::new::<square_meter>(0.045),
            reference_mass: Mass::new::<kilogram>(2.0),
            drag_coefficient: 1.18,
            lift_coefficient: 0.0,
        }
    }
}

impl BodyAerodynamics {
    /// Scales both reference surfaces to a vehicle of mass `mtow`,
    /// returning `(top, front)`.
    #[must_use]
    pub fn surfaces(&self, mtow: Mass) -> (Area, Area) {
        let scale = (mtow.get::<kilogram>() / self.reference_mass.get::<kilogram>()).powf(2.0 / 3.0);
        (self.top_surface * scale, self.front_surface * scale)
    }
}

/// Input to [`SizingScenarios`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenariosInput {
    pub mission: Mission,
    pub layout: ArmLayout,
    pub body: BodyAerodynamics,
    /// Takeoff weight the scenarios are evaluated for.
    pub mtow: Mass,
}

/// What a single propeller sees in one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightCondition {
    /// Thrust required from each propeller.
    pub thrust: Force,
    pub density: MassDensity,
    pub airspeed: Velocity,
    /// Angle between the rotor disk and the free stream; π/2 in axial flow.
    pub angle_of_attack: Angle,
}

/// Output of [`SizingScenarios`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioConditions {
    pub propeller_count: u32,
    pub top_surface: Area,
    pub front_surface: Area,
    pub cruise_drag: Force,
    /// Body lift in cruise; negative when it pushes the body down.
    pub cruise_lift: Force,
    pub flight: PerScenario<FlightCondition>,
}

/// Errors raised while evaluating the sizing scenarios.
#[derive(Debug, Error)]
pub enum ScenariosError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("cruise attitude solve failed")]
    CruiseAttitude(#[from] CruiseAttitudeError),
}

/// Flight conditions for takeoff, hover, climb and cruise.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizingScenarios {
    pub cruise: CruiseAttitudeConfig,
}

impl Model for SizingScenarios {
    type Input = ScenariosInput;
    type Output = ScenarioConditions;
    type Error = ScenariosError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        input.mission.validate()?;
        input.layout.validate()?;
        StrictlyPositive::new(input.mtow).map_err(|e| e.on("mtow"))?;

        conditions(input, &self.cruise)
    }
}

fn conditions(
    input: &ScenariosInput,
    config: &CruiseAttitudeConfig,
) -> Result<ScenarioConditions, ScenariosError> {
    let ScenariosInput {
        mission,
        layout,
        body,
        mtow,
    } = input;

    let propeller_count = layout.propeller_count()?;
    let n_pro = f64::from(propeller_count);
    let (top_surface, front_surface) = body.surfaces(*mtow);

    let weight = mtow.get::<kilogram>() * GRAVITY;
    let vertical = vertical_flight(
        mission,
        n_pro,
        weight,
        body.drag_coefficient * top_surface.get::<square_meter>(),
    );

    let cruise_air = Atmosphere::isa(mission.cruise_altitude(), mission.delta_isa);
    let balance = CruiseBalance {
        weight,
        dynamic_pressure: cruise_air.dynamic_pressure(mission.cruise_speed).get::<pascal>(),
        drag_coefficient: body.drag_coefficient,
        lift_coefficient: body.lift_coefficient,
        top_surface: top_surface.get::<square_meter>(),
        front_surface: front_surface.get::<square_meter>(),
    };
    let cruise = cruise_attitude(&balance, config)?;
    let cruise_thrust = ((weight - cruise.lift).powi(2) + cruise.drag.powi(2)).sqrt() / n_pro;

    let flight = PerScenario {
        cruise: condition(
            cruise_thrust,
            &cruise_air,
            mission.cruise_speed,
            Angle::new::<radian>(cruise.angle),
        ),
        ..vertical
    };

    Ok(ScenarioConditions {
        propeller_count,
        top_surface,
        front_surface,
        cruise_drag: Force::new::<newton>(cruise.drag),
        cruise_lift: Force::new::<newton>(cruise.lift),
        flight,
    })
}

/// Takeoff, hover and climb of rotors lifting the whole vehicle, with
/// `drag_area` (drag coefficient times top surface) opposing the climb.
///
/// The cruise entry is left at rest and is for the caller to replace.
fn vertical_flight(
    mission: &Mission,
    n_pro: f64,
    weight: f64,
    drag_area: f64,
) -> PerScenario<FlightCondition> {
    let takeoff_air = Atmosphere::isa(mission.takeoff_altitude, mission.delta_isa);
    let cruise_air = Atmosphere::isa(mission.cruise_altitude(), mission.delta_isa);

    let hover_thrust = weight / n_pro;
    let takeoff_thrust = mission.takeoff_thrust_ratio * hover_thrust;

    let q_climb = cruise_air.dynamic_pressure(mission.climb_speed).get::<pascal>();
    let climb_thrust = (weight + q_climb * drag_area) / n_pro;

    let axial = Angle::new::<radian>(FRAC_PI_2);
    let at_rest = Velocity::new::<meter_per_second>(0.0);
    PerScenario {
        takeoff: condition(takeoff_thrust, &takeoff_air, at_rest, axial),
        hover: condition(hover_thrust, &cruise_air, at_rest, axial),
        climb: condition(climb_thrust, &cruise_air, mission.climb_speed, axial),
        cruise: condition(0.0, &cruise_air, at_rest, axial),
    }
}

fn condition(thrust: f64, air: &Atmosphere, airspeed: Velocity, angle: Angle) -> FlightCondition {
    FlightCondition {
        thrust: Force::new::<newton>(thrust),
        density: air.density,
        airspeed,
        angle_of_attack: angle,
    }
}

impl Export for ScenarioConditions {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        store.put(
            format!("{prefix}:propeller:number"),
            f64::from(self.propeller_count),
        )?;
        store.put(format!("{prefix}:body:surface:top"), self.top_surface)?;
        store.put(format!("{prefix}:body:surface:front"), self.front_surface)?;
        store.put(format!("{prefix}:drag:cruise"), self.cruise_drag)?;
        store.put(format!("{prefix}:lift:cruise"), self.cruise_lift)?;
        self.flight.export(prefix, store)
    }
}

impl Export for PerScenario<FlightCondition> {
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError> {
        for (scenario, flight) in self.iter() {
            let name = scenario.name();
            store.put(format!("{prefix}:thrust:{name}"), flight.thrust)?;
            store.put(format!("{prefix}:atmosphere:density:{name}"), flight.density)?;
            store.put(format!("{prefix}:airspeed:{name}"), flight.airspeed)?;
            store.put(format!("{prefix}:angle:{name}"), flight.angle_of_attack)?;
        }
        Ok(())
    }
}
