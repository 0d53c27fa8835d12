//! Named variable store.
//!
//! Sizing results are exchanged with the outside world (optimizers, reports,
//! other tools) as a flat map from colon-separated keys such as
//! `data:weight:propulsion:multirotor:battery:mass` to SI scalars, each tagged
//! with its unit.
//!
//! The store enforces two rules:
//!
//! - A key is produced exactly once. Inserting an existing key is an error.
//! - A key is always read back with the unit it was stored with.

mod tag;

pub use tag::{Tagged, UnitTag};

use std::collections::{BTreeMap, btree_map::Entry};

use thiserror::Error;

/// A scalar value with its unit tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    /// Value in the SI unit named by `unit`.
    pub value: f64,
    pub unit: UnitTag,
}

/// Errors raised by [`VariableStore`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VariableError {
    /// The key already has a producer.
    #[error("variable `{0}` is already defined")]
    Duplicate(String),

    /// No producer wrote the key.
    #[error("variable `{0}` is not defined")]
    Missing(String),

    /// The key was requested with a unit other than the stored one.
    #[error("variable `{key}` is stored in {stored} but was requested in {requested}")]
    UnitMismatch {
        key: String,
        stored: UnitTag,
        requested: UnitTag,
    },
}

/// Flat mapping from variable keys to unit-tagged scalars.
///
/// Keys iterate in lexical order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableStore {
    variables: BTreeMap<String, Variable>,
}

impl VariableStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw SI value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::Duplicate`] if `key` is already stored.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: f64,
        unit: UnitTag,
    ) -> Result<(), VariableError> {
        match self.variables.entry(key.into()) {
            Entry::Occupied(entry) => Err(VariableError::Duplicate(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(Variable { value, unit });
                Ok(())
            }
        }
    }

    /// Stores a quantity under `key`, tagged with its SI unit.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::Duplicate`] if `key` is already stored.
    pub fn put<Q: Tagged>(&mut self, key: impl Into<String>, quantity: Q) -> Result<(), VariableError> {
        self.insert(key, quantity.si_value(), Q::TAG)
    }

    /// Reads the raw SI value stored under `key`, checking its unit.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::Missing`] if the key is absent, or
    /// [`VariableError::UnitMismatch`] if it was stored with another unit.
    pub fn value(&self, key: &str, unit: UnitTag) -> Result<f64, VariableError> {
        let variable = self
            .variables
            .get(key)
            .ok_or_else(|| VariableError::Missing(key.to_owned()))?;

        if variable.unit != unit {
            return Err(VariableError::UnitMismatch {
                key: key.to_owned(),
                stored: variable.unit,
                requested: unit,
            });
        }

        Ok(variable.value)
    }

    /// Reads a quantity stored under `key`.
    ///
    /// # Errors
    ///
    /// See [`VariableStore::value`].
    pub fn get<Q: Tagged>(&self, key: &str) -> Result<Q, VariableError> {
        self.value(key, Q::TAG).map(Q::from_si)
    }

    /// Returns the variable stored under `key`, if any.
    #[must_use]
    pub fn variable(&self, key: &str) -> Option<&Variable> {
        self.variables.get(key)
    }

    /// Iterates over all keys in lexical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Iterates over all `(key, variable)` pairs in lexical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(key, var)| (key.as_str(), var))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// A result that can be written into a [`VariableStore`].
pub trait Export {
    /// Writes every output under `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`VariableError::Duplicate`] if any produced key already exists.
    fn export(&self, prefix: &str, store: &mut VariableStore) -> Result<(), VariableError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        electric_potential::volt,
        f64::{ElectricPotential, Mass},
        mass::{gram, kilogram},
    };

    #[test]
    fn stores_quantities_in_si() {
        let mut store = VariableStore::new();
        store
            .put("data:weight:battery:mass", Mass::new::<gram>(450.0))
            .unwrap();

        let var = store.variable("data:weight:battery:mass").unwrap();
        assert_eq!(var.unit, UnitTag::Kilogram);
        assert!((var.value - 0.45).abs() < 1e-12);

        let mass: Mass = store.get("data:weight:battery:mass").unwrap();
        assert!((mass.get::<kilogram>() - 0.45).abs() < 1e-12);
    }

    #[test]
    fn keys_have_a_single_producer() {
        let mut store = VariableStore::new();
        store.insert("data:motor:number", 4.0, UnitTag::Dimensionless).unwrap();

        let err = store
            .insert("data:motor:number", 6.0, UnitTag::Dimensionless)
            .unwrap_err();
        assert_eq!(err, VariableError::Duplicate("data:motor:number".into()));
        assert_eq!(store.value("data:motor:number", UnitTag::Dimensionless), Ok(4.0));
    }

    #[test]
    fn units_must_match_on_read() {
        let mut store = VariableStore::new();
        store
            .put("data:battery:voltage", ElectricPotential::new::<volt>(14.8))
            .unwrap();

        assert!(matches!(
            store.get::<Mass>("data:battery:voltage"),
            Err(VariableError::UnitMismatch {
                stored: UnitTag::Volt,
                requested: UnitTag::Kilogram,
                ..
            })
        ));
        assert_eq!(
            store.value("data:battery:capacity", UnitTag::AmpereSecond),
            Err(VariableError::Missing("data:battery:capacity".into()))
        );
    }

    #[test]
    fn keys_iterate_in_order() {
        let mut store = VariableStore::new();
        store.insert("b", 1.0, UnitTag::Meter).unwrap();
        store.insert("a", 2.0, UnitTag::Meter).unwrap();

        assert_eq!(store.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }
}
