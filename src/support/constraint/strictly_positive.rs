use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// Most sizing inputs are divisors somewhere downstream (payload mass,
/// reference masses, propeller counts), so they carry this constraint.
///
/// # Examples
///
/// ```
/// use uav_sizing::support::constraint::{Constrained, StrictlyPositive};
///
/// let arms = Constrained::<u32, StrictlyPositive>::new(4).unwrap();
/// assert_eq!(arms.into_inner(), 4);
///
/// assert!(StrictlyPositive::new(0).is_err());
/// assert!(StrictlyPositive::new(-1.5).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Velocity, velocity::meter_per_second};

    #[test]
    fn counts() {
        assert_eq!(StrictlyPositive::new(6_u32).unwrap().into_inner(), 6);
        assert_eq!(StrictlyPositive::new(0_u32), Err(ConstraintError::Zero));
    }

    #[test]
    fn speeds() {
        let cruise = Velocity::new::<meter_per_second>(15.0);
        assert!(StrictlyPositive::new(cruise).is_ok());

        let hover = Velocity::new::<meter_per_second>(0.0);
        assert_eq!(StrictlyPositive::new(hover), Err(ConstraintError::Zero));

        let reverse = Velocity::new::<meter_per_second>(-2.0);
        assert_eq!(StrictlyPositive::new(reverse), Err(ConstraintError::Negative));
    }
}
