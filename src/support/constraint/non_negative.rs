use std::{cmp::Ordering, marker::PhantomData};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is non-negative (zero or greater).
///
/// Payload power draw, miscellaneous mass, and climb height may all be zero,
/// but never negative.
///
/// # Examples
///
/// ```
/// use uav_sizing::support::constraint::NonNegative;
/// use uom::si::{f64::Power, power::watt};
///
/// assert!(NonNegative::new(Power::new::<watt>(0.0)).is_ok());
/// assert!(NonNegative::new(Power::new::<watt>(-5.0)).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }

    /// Returns zero as a non-negative constrained value.
    #[must_use]
    pub fn zero<T: PartialOrd + Zero>() -> Constrained<T, NonNegative> {
        Constrained {
            value: T::zero(),
            _marker: PhantomData,
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Mass, mass::kilogram};

    #[test]
    fn floats() {
        assert!(NonNegative::new(0.0).is_ok());
        assert!(NonNegative::new(3.5).is_ok());
        assert_eq!(NonNegative::new(-0.1), Err(ConstraintError::Negative));
        assert_eq!(NonNegative::new(f64::NAN), Err(ConstraintError::NotANumber));
    }

    #[test]
    fn masses() {
        let misc = NonNegative::new(Mass::new::<kilogram>(0.25)).unwrap();
        assert_eq!(misc.as_ref().get::<kilogram>(), 0.25);

        assert!(NonNegative::new(Mass::new::<kilogram>(-1.0)).is_err());

        let zero = NonNegative::zero::<Mass>();
        assert_eq!(zero.into_inner().get::<kilogram>(), 0.0);
    }
}
