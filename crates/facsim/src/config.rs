use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use facsim_measure::{Converter, FamilyRegistry};
use serde::Deserialize;

/// Looked up in the working directory when `--units` is not given.
pub const DEFAULT_CONFIG: &str = "facsim.toml";

/// Extra units declared in a TOML file:
///
/// ```toml
/// [[unit]]
/// family = "Time"
/// symbol = "fortnight"
/// factor = 1209600.0
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitsConfig {
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitEntry {
    /// Name of the family the unit belongs to, e.g. "Time"
    pub family: String,
    pub symbol: String,
    /// Canonical units per one of this unit
    pub factor: f64,
}

impl UnitsConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: UnitsConfig = toml::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        log::debug!("Loaded {} units from {}", config.units.len(), path.display());
        Ok(config)
    }

    /// The built-in families extended with the configured units.
    pub fn registry(&self) -> Result<FamilyRegistry> {
        let mut builder = FamilyRegistry::builtin();
        for entry in &self.units {
            let converter = Converter::linear(entry.factor)
                .with_context(|| format!("Invalid unit '{}'", entry.symbol))?;
            builder
                .add_unit(&entry.family, entry.symbol.as_str(), converter)
                .with_context(|| format!("Invalid unit '{}'", entry.symbol))?;
        }
        builder.build().context("Failed to build unit registry")
    }
}

/// Build the registry from `explicit`, or from the default file when it exists.
pub fn load_registry(explicit: Option<&Path>) -> Result<FamilyRegistry> {
    let config = match explicit {
        Some(path) => UnitsConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => {
            UnitsConfig::load(Path::new(DEFAULT_CONFIG))?
        }
        None => UnitsConfig::default(),
    };
    config.registry()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let config: UnitsConfig = toml::from_str(
            r#"
[[unit]]
family = "Time"
symbol = "fortnight"
factor = 1209600.0

[[unit]]
family = "Length"
symbol = "furlong"
factor = 201.168
"#,
        )
        .unwrap();
        assert_eq!(config.units.len(), 2);
        assert_eq!(config.units[1].symbol, "furlong");

        let registry = config.registry().unwrap();
        let (family, unit) = registry.find_unit("furlong").unwrap();
        assert_eq!(family.name(), "Length");
        assert_eq!(unit.import_value(1.0), 201.168);
    }

    #[test]
    fn test_empty_config() {
        let config: UnitsConfig = toml::from_str("").unwrap();
        assert!(config.units.is_empty());
        assert_eq!(config.registry().unwrap().families().len(), 10);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let result = toml::from_str::<UnitsConfig>(
            r#"
[[unit]]
family = "Time"
symbol = "jiffy"
factor = 0.01
offset = 3.0
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_entries() {
        let zero = UnitsConfig {
            units: vec![UnitEntry {
                family: "Time".to_string(),
                symbol: "never".to_string(),
                factor: 0.0,
            }],
        };
        let err = zero.registry().unwrap_err();
        assert_eq!(err.to_string(), "Invalid unit 'never'");

        let unknown = UnitsConfig {
            units: vec![UnitEntry {
                family: "Volume".to_string(),
                symbol: "l".to_string(),
                factor: 1e-3,
            }],
        };
        let err = unknown.registry().unwrap_err();
        assert_eq!(
            err.root_cause().to_string(),
            "Unknown measurement family 'Volume'"
        );

        let duplicate = UnitsConfig {
            units: vec![UnitEntry {
                family: "Length".to_string(),
                symbol: "h".to_string(),
                factor: 1.0,
            }],
        };
        let err = duplicate.registry().unwrap_err();
        assert_eq!(
            err.root_cause().to_string(),
            "Unit symbol 'h' is declared by both Time and Length"
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[unit]]\nfamily = \"Mass\"\nsymbol = \"stone\"\nfactor = 6.35029318"
        )
        .unwrap();

        let config = UnitsConfig::load(file.path()).unwrap();
        assert_eq!(config.units[0].family, "Mass");

        let missing = UnitsConfig::load(Path::new("/nonexistent/facsim.toml"));
        assert!(missing.unwrap_err().to_string().starts_with("Failed to read"));
    }
}
