use std::fmt;

use crate::{Dimensions, InvalidReason, MeasureError, UnitOfMeasure};

/// Values a family admits beyond being finite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    Unbounded,
    NonNegative,
}

impl Domain {
    /// Accept `value` for the named family or explain why it is illegal.
    pub fn validate(self, family: &'static str, value: f64) -> Result<f64, MeasureError> {
        let reason = if !value.is_finite() {
            InvalidReason::NonFinite
        } else if self == Domain::NonNegative && value < 0.0 {
            InvalidReason::Negative
        } else {
            return Ok(value);
        };
        Err(MeasureError::InvalidValue {
            family,
            value,
            reason,
        })
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Unbounded => write!(f, "any"),
            Domain::NonNegative => write!(f, ">= 0"),
        }
    }
}

/// A declared measurement family: a marker type bound to one fixed dimension
/// vector, a value domain and a table of units.
///
/// The first entry of [`Family::units`] is the canonical unit and must use
/// [`Converter::Identity`](crate::Converter::Identity).
pub trait Family: Copy + fmt::Debug + Send + Sync + 'static {
    const NAME: &'static str;
    const DIMENSIONS: Dimensions;
    const DOMAIN: Domain = Domain::Unbounded;

    fn units() -> &'static [UnitOfMeasure];

    fn unit(symbol: &str) -> Option<&'static UnitOfMeasure> {
        Self::units().iter().find(|u| u.symbol() == symbol)
    }

    fn canonical_unit() -> Option<&'static UnitOfMeasure> {
        Self::units().first()
    }
}
