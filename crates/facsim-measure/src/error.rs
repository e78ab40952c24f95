use std::fmt;

use crate::Dimensions;

/// Why a candidate canonical value was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidReason {
    /// NaN or an infinity.
    NonFinite,
    /// Below zero for a family that only admits non-negative values.
    Negative,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::NonFinite => write!(f, "value is not finite"),
            InvalidReason::Negative => write!(f, "value is negative"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeasureError {
    #[error("Illegal {family} value {value}: {reason}")]
    InvalidValue {
        family: &'static str,
        value: f64,
        reason: InvalidReason,
    },
    #[error("Dimension mismatch: expected {}, got {}", fmt_dims(.expected), fmt_dims(.actual))]
    DimensionMismatch {
        expected: Dimensions,
        actual: Dimensions,
    },
    #[error("Invalid conversion factor {0}: must be finite and non-zero")]
    InvalidConversionFactor(f64),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl MeasureError {
    pub(crate) fn mismatch(expected: Dimensions, actual: Dimensions) -> Self {
        MeasureError::DimensionMismatch { expected, actual }
    }
}

fn fmt_dims(dims: &Dimensions) -> String {
    if dims.is_unitless() {
        "Dimensionless".to_string()
    } else {
        dims.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid quantity format '{0}'")]
    InvalidFormat(String),
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error("Unknown unit '{0}'")]
    UnknownUnit(String),
    #[error("Invalid dimensions '{0}'")]
    InvalidDimensions(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Families {existing} and {new} both declare dimensions {dimensions}")]
    DimensionCollision {
        existing: &'static str,
        new: &'static str,
        dimensions: Dimensions,
    },
    #[error("Unit symbol '{symbol}' is declared by both {first} and {second}")]
    DuplicateUnit {
        symbol: String,
        first: &'static str,
        second: &'static str,
    },
    #[error("Family {0} is registered twice")]
    DuplicateFamily(&'static str),
    #[error("Unknown measurement family '{0}'")]
    UnknownFamily(String),
}
