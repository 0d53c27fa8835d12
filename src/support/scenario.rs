//! Sizing scenarios and per-scenario values.
//!
//! Several disciplines evaluate the same performance formula once for each
//! flight scenario. [`PerScenario`] holds one value per [`Scenario`] so those
//! evaluations stay independent and addressable by a typed key.

use std::ops::{Index, IndexMut};

/// A flight scenario the vehicle is sized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scenario {
    /// Maximum thrust at takeoff altitude.
    Takeoff,
    /// Steady hover at cruise altitude.
    Hover,
    /// Vertical climb at the required rate.
    Climb,
    /// Forward flight at cruise speed.
    Cruise,
}

impl Scenario {
    /// All scenarios, in sizing order.
    pub const ALL: [Scenario; 4] = [
        Scenario::Takeoff,
        Scenario::Hover,
        Scenario::Climb,
        Scenario::Cruise,
    ];

    /// Lowercase name used in variable keys.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Scenario::Takeoff => "takeoff",
            Scenario::Hover => "hover",
            Scenario::Climb => "climb",
            Scenario::Cruise => "cruise",
        }
    }
}

/// One value per [`Scenario`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerScenario<T> {
    pub takeoff: T,
    pub hover: T,
    pub climb: T,
    pub cruise: T,
}

impl<T> PerScenario<T> {
    /// Builds a value for each scenario by calling `f` once per scenario.
    pub fn from_fn(mut f: impl FnMut(Scenario) -> T) -> Self {
        Self {
            takeoff: f(Scenario::Takeoff),
            hover: f(Scenario::Hover),
            climb: f(Scenario::Climb),
            cruise: f(Scenario::Cruise),
        }
    }

    /// Like [`PerScenario::from_fn`], stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_from_fn<E>(mut f: impl FnMut(Scenario) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            takeoff: f(Scenario::Takeoff)?,
            hover: f(Scenario::Hover)?,
            climb: f(Scenario::Climb)?,
            cruise: f(Scenario::Cruise)?,
        })
    }

    /// Applies `f` to every scenario's value.
    pub fn map<U>(&self, mut f: impl FnMut(Scenario, &T) -> U) -> PerScenario<U> {
        PerScenario::from_fn(|scenario| f(scenario, &self[scenario]))
    }

    /// Iterates over `(scenario, value)` pairs in [`Scenario::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Scenario, &T)> {
        Scenario::ALL.into_iter().map(move |scenario| (scenario, &self[scenario]))
    }
}

impl<T> Index<Scenario> for PerScenario<T> {
    type Output = T;

    fn index(&self, scenario: Scenario) -> &T {
        match scenario {
            Scenario::Takeoff => &self.takeoff,
            Scenario::Hover => &self.hover,
            Scenario::Climb => &self.climb,
            Scenario::Cruise => &self.cruise,
        }
    }
}

impl<T> IndexMut<Scenario> for PerScenario<T> {
    fn index_mut(&mut self, scenario: Scenario) -> &mut T {
        match scenario {
            Scenario::Takeoff => &mut self.takeoff,
            Scenario::Hover => &mut self.hover,
            Scenario::Climb => &mut self.climb,
            Scenario::Cruise => &mut self.cruise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_visits_each_scenario_once() {
        let mut seen = Vec::new();
        let names = PerScenario::from_fn(|s| {
            seen.push(s);
            s.name()
        });

        assert_eq!(seen, Scenario::ALL);
        assert_eq!(names.climb, "climb");
        assert_eq!(names[Scenario::Takeoff], "takeoff");
    }

    #[test]
    fn values_are_independent() {
        let mut values = PerScenario::<f64>::default();
        values[Scenario::Hover] = 2.0;

        let doubled = values.map(|_, v| v * 2.0);
        assert_eq!(doubled.hover, 4.0);
        assert_eq!(doubled.takeoff, 0.0);
        assert_eq!(doubled.cruise, 0.0);
    }

    #[test]
    fn try_from_fn_stops_at_first_error() {
        let result: Result<PerScenario<u8>, Scenario> = PerScenario::try_from_fn(|s| match s {
            Scenario::Climb => Err(s),
            _ => Ok(1),
        });
        assert_eq!(result, Err(Scenario::Climb));
    }

    #[test]
    fn iter_follows_sizing_order() {
        let values = PerScenario::from_fn(|s| s as u8);
        let order: Vec<_> = values.iter().map(|(s, _)| s).collect();
        assert_eq!(order, Scenario::ALL);
    }
}
