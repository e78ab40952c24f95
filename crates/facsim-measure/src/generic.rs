use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops,
};

use serde::{Deserialize, Serialize};

use crate::measure::hash_value;
use crate::{Dimensions, Domain, Family, Measure, MeasureError, Quantity};

/// A measure whose dimensions are only known at run time, typically the
/// product or quotient of two declared measures.
///
/// It obeys the same finiteness invariant as [`Measure`] but has no domain
/// constraint. Adding or subtracting it is checked at run time and fails with
/// [`MeasureError::DimensionMismatch`] when the dimensions differ.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawGeneric")]
pub struct GenericMeasure {
    value: f64,
    dimensions: Dimensions,
}

#[derive(Deserialize)]
struct RawGeneric {
    value: f64,
    dimensions: Dimensions,
}

impl TryFrom<RawGeneric> for GenericMeasure {
    type Error = MeasureError;
    fn try_from(raw: RawGeneric) -> Result<Self, Self::Error> {
        GenericMeasure::new(raw.value, raw.dimensions)
    }
}

impl GenericMeasure {
    pub fn new(value: f64, dimensions: Dimensions) -> Result<Self, MeasureError> {
        let value = Domain::Unbounded.validate("Generic", value)?;
        Ok(Self { value, dimensions })
    }

    pub fn unitless(value: f64) -> Result<Self, MeasureError> {
        Self::new(value, Dimensions::UNITLESS)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn is_unitless(&self) -> bool {
        self.dimensions.is_unitless()
    }

    pub fn scale(&self, factor: f64) -> Result<Self, MeasureError> {
        Self::new(self.value * factor, self.dimensions)
    }

    pub fn divide_by_scalar(&self, divisor: f64) -> Result<Self, MeasureError> {
        Self::new(self.value / divisor, self.dimensions)
    }

    fn check_same<Q: Quantity + ?Sized>(&self, other: &Q) -> Result<(), MeasureError> {
        if other.dimensions() != self.dimensions {
            return Err(MeasureError::mismatch(self.dimensions, other.dimensions()));
        }
        Ok(())
    }

    /// Reinterpret as a value of the declared family `F`.
    ///
    /// Arithmetic never does this on its own; callers ask for it explicitly.
    pub fn into_measure<F: Family>(self) -> Result<Measure<F>, MeasureError> {
        if self.dimensions != F::DIMENSIONS {
            return Err(MeasureError::mismatch(F::DIMENSIONS, self.dimensions));
        }
        Measure::new(self.value)
    }
}

impl Quantity for GenericMeasure {
    fn value(&self) -> f64 {
        self.value
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

impl<F: Family> From<Measure<F>> for GenericMeasure {
    fn from(measure: Measure<F>) -> Self {
        Self {
            value: measure.value(),
            dimensions: F::DIMENSIONS,
        }
    }
}

impl<F: Family> TryFrom<GenericMeasure> for Measure<F> {
    type Error = MeasureError;
    fn try_from(generic: GenericMeasure) -> Result<Self, Self::Error> {
        generic.into_measure()
    }
}

impl<Q: Quantity> ops::Add<Q> for GenericMeasure {
    type Output = Result<GenericMeasure, MeasureError>;
    fn add(self, rhs: Q) -> Self::Output {
        self.check_same(&rhs)?;
        GenericMeasure::new(self.value + rhs.value(), self.dimensions)
    }
}

impl<Q: Quantity> ops::Sub<Q> for GenericMeasure {
    type Output = Result<GenericMeasure, MeasureError>;
    fn sub(self, rhs: Q) -> Self::Output {
        self.check_same(&rhs)?;
        GenericMeasure::new(self.value - rhs.value(), self.dimensions)
    }
}

impl PartialEq for GenericMeasure {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions && self.value == other.value
    }
}

impl Eq for GenericMeasure {}

impl Hash for GenericMeasure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimensions.hash(state);
        hash_value(self.value, state);
    }
}

/// Only values of the same dimensions are ordered.
impl PartialOrd for GenericMeasure {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.dimensions != other.dimensions {
            return None;
        }
        self.value.partial_cmp(&other.value)
    }
}

impl fmt::Display for GenericMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dimensions.is_unitless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.dimensions)
        }
    }
}
