use std::{borrow::Cow, fmt};

use crate::{Dimensions, MeasureError};

/// Rule translating a raw value in some unit into the canonical (SI) value of
/// its dimension, and back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Converter {
    /// The unit is the canonical unit.
    Identity,
    /// One unit equals `factor` canonical units.
    LinearScale(f64),
}

impl Converter {
    /// Build a scale converter from a factor supplied at run time.
    pub fn linear(factor: f64) -> Result<Self, MeasureError> {
        if !factor.is_finite() || factor == 0.0 {
            return Err(MeasureError::InvalidConversionFactor(factor));
        }
        Ok(Converter::LinearScale(factor))
    }

    pub fn import_value(&self, raw: f64) -> f64 {
        match self {
            Converter::Identity => raw,
            Converter::LinearScale(factor) => raw * factor,
        }
    }

    pub fn export_value(&self, canonical: f64) -> f64 {
        match self {
            Converter::Identity => canonical,
            Converter::LinearScale(factor) => canonical / factor,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Converter::Identity)
    }

    /// Canonical units per unit.
    pub fn factor(&self) -> f64 {
        match self {
            Converter::Identity => 1.0,
            Converter::LinearScale(factor) => *factor,
        }
    }
}

/// One concrete unit of a measurement family: a converter plus the symbol it
/// is displayed with.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitOfMeasure {
    symbol: Cow<'static, str>,
    converter: Converter,
    dimensions: Dimensions,
}

impl UnitOfMeasure {
    pub const fn new(symbol: &'static str, converter: Converter, dimensions: Dimensions) -> Self {
        Self {
            symbol: Cow::Borrowed(symbol),
            converter,
            dimensions,
        }
    }

    /// A unit defined at run time, e.g. from a configuration file.
    pub fn custom(symbol: impl Into<String>, converter: Converter, dimensions: Dimensions) -> Self {
        Self {
            symbol: Cow::Owned(symbol.into()),
            converter,
            dimensions,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn converter(&self) -> Converter {
        self.converter
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn import_value(&self, raw: f64) -> f64 {
        self.converter.import_value(raw)
    }

    pub fn export_value(&self, canonical: f64) -> f64 {
        self.converter.export_value(canonical)
    }

    /// Render a canonical value in this unit, e.g. `90.0` seconds as `"1.5 min"`.
    pub fn format(&self, canonical: f64) -> String {
        let raw = self.export_value(canonical);
        if self.symbol.is_empty() {
            format!("{raw}")
        } else {
            format!("{raw} {}", self.symbol)
        }
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
