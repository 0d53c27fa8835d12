//! Named design margins.
//!
//! Every discipline reports its constraints as normalized margins, feasible
//! when non-negative. A margin is exported as `{scope}:constraints:{name}`,
//! where `name` comes from the discipline's [`Margins`] list, so exporters
//! and constraint listings cannot drift apart.

use crate::support::variables::{VariableError, VariableStore};

/// A set of named margins.
pub trait Margins {
    /// Each margin with its key name, in export order.
    fn margins(&self) -> Vec<(&'static str, f64)>;
}

/// Key of margin `name` under `scope`.
#[must_use]
pub fn margin_key(scope: &str, name: &str) -> String {
    format!("{scope}:constraints:{name}")
}

/// Writes every margin of `margins` under `scope`.
///
/// # Errors
///
/// Propagates [`VariableError::Duplicate`] from the store.
pub fn export_margins(
    margins: &dyn Margins,
    scope: &str,
    store: &mut VariableStore,
) -> Result<(), VariableError> {
    for (name, value) in margins.margins() {
        store.put(margin_key(scope, name), value)?;
    }
    Ok(())
}

/// Flattens scoped margin sets into `(key, margin)` pairs.
#[must_use]
pub fn collect_margins(groups: &[(String, &dyn Margins)]) -> Vec<(String, f64)> {
    groups
        .iter()
        .flat_map(|(scope, margins)| {
            margins
                .margins()
                .into_iter()
                .map(move |(name, value)| (margin_key(scope, name), value))
        })
        .collect()
}
