use std::io::Write;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use facsim_measure::{Dimensions, FamilyRegistry, GenericMeasure, Quantity, Quotient};
use serde::Serialize;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Left operand, e.g. "10 m"
    #[arg(allow_hyphen_values = true)]
    pub lhs: String,

    /// Operator
    #[arg(value_enum, allow_hyphen_values = true)]
    pub op: Operator,

    /// Right operand, e.g. "2 s"
    #[arg(allow_hyphen_values = true)]
    pub rhs: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operator {
    #[value(name = "+")]
    Add,
    #[value(name = "-")]
    Sub,
    #[value(name = "*", alias = "x")]
    Mul,
    #[value(name = "/")]
    Div,
}

#[derive(Debug, Serialize)]
struct EvalOutput {
    value: f64,
    dimensions: Dimensions,
    label: String,
}

pub fn execute<W: Write>(
    args: EvalArgs,
    registry: &FamilyRegistry,
    writer: &mut W,
) -> Result<()> {
    let result = evaluate(&args.lhs, args.op, &args.rhs, registry)?;
    let label = registry.describe(result.dimensions());

    match args.format {
        OutputFormat::Human => writeln!(writer, "{result} [{label}]")?,
        OutputFormat::Json => {
            let output = EvalOutput {
                value: result.value(),
                dimensions: result.dimensions(),
                label,
            };
            writeln!(writer, "{}", serde_json::to_string(&output)?)?;
        }
    }
    Ok(())
}

pub fn evaluate(
    lhs: &str,
    op: Operator,
    rhs: &str,
    registry: &FamilyRegistry,
) -> Result<GenericMeasure> {
    let left = registry
        .parse(lhs)
        .with_context(|| format!("Failed to parse '{lhs}'"))?;
    let right = registry
        .parse(rhs)
        .with_context(|| format!("Failed to parse '{rhs}'"))?;
    log::debug!("Evaluating {left} {op:?} {right}");

    let result = match op {
        Operator::Add => (left + right)?,
        Operator::Sub => (left - right)?,
        Operator::Mul => left.multiply(&right)?,
        Operator::Div => match left.divide(&right)? {
            Quotient::Scalar(ratio) => GenericMeasure::unitless(ratio)?,
            Quotient::Generic(generic) => generic,
        },
    };

    // Sums stay within the family of their operands.
    if matches!(op, Operator::Add | Operator::Sub) {
        if let Some(family) = registry.family(result.dimensions()) {
            family.domain().validate(family.name(), result.value())?;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(lhs: &str, op: Operator, rhs: &str) -> Result<String> {
        let registry = FamilyRegistry::global();
        let result = evaluate(lhs, op, rhs, registry)?;
        Ok(format!("{result} [{}]", registry.describe(result.dimensions())))
    }

    #[test]
    fn test_operators() {
        assert_eq!(eval("10 m", Operator::Div, "2 s").unwrap(), "5 m/s [Velocity]");
        assert_eq!(eval("1 min", Operator::Add, "30 s").unwrap(), "90 s [Time]");
        assert_eq!(eval("3 m", Operator::Sub, "5 m").unwrap(), "-2 m [Length]");
        assert_eq!(eval("3 m", Operator::Mul, "4 m").unwrap(), "12 m^2 [Area]");
        assert_eq!(eval("6 h", Operator::Div, "2 h").unwrap(), "3 [Dimensionless]");
        assert_eq!(eval("2 kg", Operator::Mul, "3 m").unwrap(), "6 kg·m [kg·m]");
    }

    #[test]
    fn test_errors() {
        let err = eval("1 s", Operator::Add, "1 m").unwrap_err();
        assert_eq!(err.to_string(), "Dimension mismatch: expected s, got m");

        let err = eval("1 s", Operator::Sub, "2 s").unwrap_err();
        assert_eq!(err.to_string(), "Illegal Time value -1: value is negative");

        let err = eval("1 m", Operator::Div, "0 m").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Illegal Dimensionless value inf: value is not finite"
        );

        let err = eval("1 furlong", Operator::Add, "1 m").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse '1 furlong'");
    }

    #[test]
    fn test_json_output() {
        let args = EvalArgs {
            lhs: "36 km/h".to_string(),
            op: Operator::Mul,
            rhs: "10 s".to_string(),
            format: OutputFormat::Json,
        };
        let mut out = Vec::new();
        execute(args, FamilyRegistry::global(), &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["dimensions"], "m");
        assert_eq!(json["label"], "Length");
        assert!((json["value"].as_f64().unwrap() - 100.0).abs() < 1e-9);
    }
}
