//! Off-the-shelf component sourcing.
//!
//! Every propulsion component can be sized two ways: by scaling laws
//! (estimation) or by picking a real product close to the estimate
//! (catalogue). The selection itself is an external concern; this module
//! only defines the seam and the switch between the two.
//!
//! A catalogue receives the *estimated* characteristics of a component and
//! returns the characteristics of the product it picked, in the same type.
//! That keeps the downstream contract identical whichever way a component
//! was sourced.

use std::fmt;

use thiserror::Error;

/// A propulsion component that may be sourced off the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Propeller,
    Motor,
    Battery,
    Esc,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Component::Propeller => "propeller",
            Component::Motor => "motor",
            Component::Battery => "battery",
            Component::Esc => "ESC",
        })
    }
}

/// Errors raised while sourcing a component from a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// Off-the-shelf sourcing was requested but no catalogue was supplied.
    #[error("off-the-shelf {0} requested without a catalogue")]
    Missing(Component),

    /// The catalogue has no product suitable for the estimate.
    #[error("no suitable {component} in catalogue: {reason}")]
    NoMatch {
        component: Component,
        reason: String,
    },
}

/// A lookup from estimated to selected component characteristics.
///
/// Implemented for closures, so a catalogue can be as simple as:
///
/// ```
/// use uav_sizing::support::catalogue::{Catalogue, CatalogueError};
///
/// let snap_up = |estimated: &f64| -> Result<f64, CatalogueError> { Ok(estimated.ceil()) };
/// assert_eq!(snap_up.select(&2.3), Ok(3.0));
/// ```
pub trait Catalogue<T> {
    /// Picks a product for the estimated characteristics.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogueError`] if no product can be selected.
    fn select(&self, estimated: &T) -> Result<T, CatalogueError>;
}

impl<T, F> Catalogue<T> for F
where
    F: Fn(&T) -> Result<T, CatalogueError>,
{
    fn select(&self, estimated: &T) -> Result<T, CatalogueError> {
        self(estimated)
    }
}

/// How a discipline group sources its component.
pub enum Sourcing<'a, T> {
    /// Use the scaling-law estimate as is.
    Estimated,
    /// Replace the estimate with a catalogue product.
    OffTheShelf(&'a dyn Catalogue<T>),
}

impl<'a, T> Sourcing<'a, T> {
    /// Resolves an `off_the_shelf` flag against an optional catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Missing`] if `off_the_shelf` is set and no
    /// catalogue is given.
    pub fn from_flag(
        off_the_shelf: bool,
        component: Component,
        catalogue: Option<&'a dyn Catalogue<T>>,
    ) -> Result<Self, CatalogueError> {
        match (off_the_shelf, catalogue) {
            (false, _) => Ok(Sourcing::Estimated),
            (true, Some(catalogue)) => Ok(Sourcing::OffTheShelf(catalogue)),
            (true, None) => Err(CatalogueError::Missing(component)),
        }
    }

    /// Returns the characteristics the rest of the vehicle should see.
    ///
    /// # Errors
    ///
    /// Propagates the catalogue's selection error.
    pub fn resolve(&self, estimated: T) -> Result<T, CatalogueError> {
        match self {
            Sourcing::Estimated => Ok(estimated),
            Sourcing::OffTheShelf(catalogue) => catalogue.select(&estimated),
        }
    }

    #[must_use]
    pub fn is_off_the_shelf(&self) -> bool {
        matches!(self, Sourcing::OffTheShelf(_))
    }
}

impl<T> Clone for Sourcing<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Sourcing<'_, T> {}

impl<T> fmt::Debug for Sourcing<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sourcing::Estimated => f.write_str("Estimated"),
            Sourcing::OffTheShelf(_) => f.write_str("OffTheShelf(..)"),
        }
    }
}
