use std::collections::HashMap;
use std::sync::OnceLock;

use crate::kinds::{
    Angle, AngularVelocity, Area, Current, Length, LuminousIntensity, Mass, Temperature, Time,
    Velocity,
};
use crate::measure::split_quantity;
use crate::{
    Converter, Dimensions, Domain, Family, GenericMeasure, MeasureError, ParseError,
    RegistryError, UnitOfMeasure,
};

/// Everything the registry knows about one declared family.
#[derive(Clone, Debug, PartialEq)]
pub struct FamilyInfo {
    name: &'static str,
    dimensions: Dimensions,
    domain: Domain,
    units: Vec<UnitOfMeasure>,
}

impl FamilyInfo {
    pub fn of<F: Family>() -> Self {
        Self {
            name: F::NAME,
            dimensions: F::DIMENSIONS,
            domain: F::DOMAIN,
            units: F::units().to_vec(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn units(&self) -> &[UnitOfMeasure] {
        &self.units
    }

    pub fn unit(&self, symbol: &str) -> Option<&UnitOfMeasure> {
        self.units.iter().find(|u| u.symbol() == symbol)
    }

    /// Build a value of this family from a raw value in one of its units,
    /// enforcing the family domain.
    pub fn measure(&self, raw: f64, unit: &UnitOfMeasure) -> Result<GenericMeasure, MeasureError> {
        if unit.dimensions() != self.dimensions {
            return Err(MeasureError::mismatch(self.dimensions, unit.dimensions()));
        }
        let value = self.domain.validate(self.name, unit.import_value(raw))?;
        GenericMeasure::new(value, self.dimensions)
    }
}

/// Collects family declarations and checks them for collisions.
#[derive(Debug, Default)]
pub struct FamilyRegistryBuilder {
    families: Vec<FamilyInfo>,
}

impl FamilyRegistryBuilder {
    pub fn register<F: Family>(&mut self) -> &mut Self {
        self.families.push(FamilyInfo::of::<F>());
        self
    }

    /// Add a unit to an already registered family. The unit inherits the
    /// family dimensions.
    pub fn add_unit(
        &mut self,
        family: &str,
        symbol: impl Into<String>,
        converter: Converter,
    ) -> Result<&mut Self, RegistryError> {
        let info = self
            .families
            .iter_mut()
            .find(|f| f.name == family)
            .ok_or_else(|| RegistryError::UnknownFamily(family.to_string()))?;
        let unit = UnitOfMeasure::custom(symbol, converter, info.dimensions);
        log::debug!("Adding unit {} to family {}", unit, info.name);
        info.units.push(unit);
        Ok(self)
    }

    pub fn build(self) -> Result<FamilyRegistry, RegistryError> {
        let mut by_dimensions = HashMap::new();
        let mut by_name = HashMap::new();
        let mut by_symbol: HashMap<String, (usize, usize)> = HashMap::new();

        for (index, family) in self.families.iter().enumerate() {
            if by_name.insert(family.name, index).is_some() {
                return Err(RegistryError::DuplicateFamily(family.name));
            }
            if let Some(existing) = by_dimensions.insert(family.dimensions, index) {
                return Err(RegistryError::DimensionCollision {
                    existing: self.families[existing].name,
                    new: family.name,
                    dimensions: family.dimensions,
                });
            }
            for (unit_index, unit) in family.units.iter().enumerate() {
                if let Some((first, _)) =
                    by_symbol.insert(unit.symbol().to_string(), (index, unit_index))
                {
                    return Err(RegistryError::DuplicateUnit {
                        symbol: unit.symbol().to_string(),
                        first: self.families[first].name,
                        second: family.name,
                    });
                }
            }
            log::debug!(
                "Registered measurement family {} [{}] with {} units",
                family.name,
                family.dimensions,
                family.units.len()
            );
        }

        Ok(FamilyRegistry {
            families: self.families,
            by_dimensions,
            by_name,
            by_symbol,
        })
    }
}

/// Immutable table of declared families, keyed by dimensions, name and unit
/// symbol.
///
/// Arithmetic never consults it; it only labels and parses values.
#[derive(Debug)]
pub struct FamilyRegistry {
    families: Vec<FamilyInfo>,
    by_dimensions: HashMap<Dimensions, usize>,
    by_name: HashMap<&'static str, usize>,
    by_symbol: HashMap<String, (usize, usize)>,
}

impl FamilyRegistry {
    pub fn builder() -> FamilyRegistryBuilder {
        FamilyRegistryBuilder::default()
    }

    /// A builder pre-loaded with every built-in family.
    pub fn builtin() -> FamilyRegistryBuilder {
        let mut builder = Self::builder();
        builder
            .register::<Time>()
            .register::<Length>()
            .register::<Angle>()
            .register::<Mass>()
            .register::<Temperature>()
            .register::<Current>()
            .register::<LuminousIntensity>()
            .register::<Area>()
            .register::<Velocity>()
            .register::<AngularVelocity>();
        builder
    }

    /// The process-wide registry of built-in families, built on first use.
    pub fn global() -> &'static FamilyRegistry {
        static GLOBAL: OnceLock<FamilyRegistry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            Self::builtin()
                .build()
                .expect("built-in families have distinct dimensions and unit symbols")
        })
    }

    pub fn families(&self) -> &[FamilyInfo] {
        &self.families
    }

    pub fn family(&self, dimensions: Dimensions) -> Option<&FamilyInfo> {
        self.by_dimensions
            .get(&dimensions)
            .map(|&index| &self.families[index])
    }

    pub fn family_by_name(&self, name: &str) -> Option<&FamilyInfo> {
        self.by_name.get(name).map(|&index| &self.families[index])
    }

    pub fn find_unit(&self, symbol: &str) -> Option<(&FamilyInfo, &UnitOfMeasure)> {
        let &(family, unit) = self.by_symbol.get(symbol)?;
        let family = &self.families[family];
        Some((family, &family.units[unit]))
    }

    /// Human readable name of a dimension: the declared family name when one
    /// matches, otherwise the unit expression.
    pub fn describe(&self, dimensions: Dimensions) -> String {
        if let Some(family) = self.family(dimensions) {
            return family.name.to_string();
        }
        if dimensions.is_unitless() {
            return "Dimensionless".to_string();
        }
        dimensions.to_string()
    }

    /// Parse text like "1.5 min" using any unit known to the registry.
    /// A bare number is dimensionless.
    pub fn parse(&self, text: &str) -> Result<GenericMeasure, MeasureError> {
        log::trace!("Parsing quantity from {text:?}");
        let (number, symbol) = split_quantity(text)?;
        if symbol.is_empty() {
            return GenericMeasure::unitless(number);
        }
        let (family, unit) = self
            .find_unit(symbol)
            .ok_or_else(|| ParseError::UnknownUnit(symbol.to_string()))?;
        family.measure(number, unit)
    }
}
