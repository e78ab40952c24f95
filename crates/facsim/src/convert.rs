use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use facsim_measure::FamilyRegistry;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Quantity with a unit, e.g. "90 min"
    #[arg(allow_hyphen_values = true)]
    pub quantity: String,

    /// Symbol of the target unit, e.g. "h"
    pub unit: String,
}

pub fn execute<W: Write>(
    args: ConvertArgs,
    registry: &FamilyRegistry,
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "{}", convert(&args.quantity, &args.unit, registry)?)?;
    Ok(())
}

pub fn convert(quantity: &str, symbol: &str, registry: &FamilyRegistry) -> Result<String> {
    let value = registry
        .parse(quantity)
        .with_context(|| format!("Failed to parse '{quantity}'"))?;
    let (family, unit) = registry
        .find_unit(symbol)
        .ok_or_else(|| anyhow!("Unknown unit '{symbol}'"))?;

    if unit.dimensions() != value.dimensions() {
        bail!(
            "Cannot convert {} to {}: {} is not {}",
            quantity,
            symbol,
            registry.describe(value.dimensions()),
            family.name()
        );
    }
    log::debug!("Converting {value} to {unit}");
    Ok(unit.format(value.value()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert() {
        let registry = FamilyRegistry::global();
        assert_eq!(convert("90 min", "h", registry).unwrap(), "1.5 h");
        assert_eq!(convert("1 h", "s", registry).unwrap(), "3600 s");
        assert_eq!(convert("2 km", "m", registry).unwrap(), "2000 m");
        assert_eq!(convert("30 min", "h", registry).unwrap(), "0.5 h");
    }

    #[test]
    fn test_convert_errors() {
        let registry = FamilyRegistry::global();
        assert_eq!(
            convert("1 h", "m", registry).unwrap_err().to_string(),
            "Cannot convert 1 h to m: Time is not Length"
        );
        assert_eq!(
            convert("1 h", "parsec", registry).unwrap_err().to_string(),
            "Unknown unit 'parsec'"
        );

        let err = convert("-5 min", "s", registry).unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse '-5 min'");
        assert_eq!(
            err.root_cause().to_string(),
            "Illegal Time value -300: value is negative"
        );
    }
}
