use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use facsim_measure::{FamilyInfo, FamilyRegistry};
use serde::Serialize;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct FamiliesArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct FamilyOutput<'a> {
    name: &'a str,
    dimensions: String,
    domain: String,
    units: Vec<UnitOutput<'a>>,
}

#[derive(Debug, Serialize)]
struct UnitOutput<'a> {
    symbol: &'a str,
    factor: f64,
}

impl<'a> From<&'a FamilyInfo> for FamilyOutput<'a> {
    fn from(family: &'a FamilyInfo) -> Self {
        Self {
            name: family.name(),
            dimensions: family.dimensions().to_string(),
            domain: family.domain().to_string(),
            units: family
                .units()
                .iter()
                .map(|unit| UnitOutput {
                    symbol: unit.symbol(),
                    factor: unit.converter().factor(),
                })
                .collect(),
        }
    }
}

pub fn execute<W: Write>(
    args: FamiliesArgs,
    registry: &FamilyRegistry,
    writer: &mut W,
) -> Result<()> {
    match args.format {
        OutputFormat::Human => write_table(registry, writer)?,
        OutputFormat::Json => {
            let families: Vec<FamilyOutput> = registry.families().iter().map(Into::into).collect();
            writeln!(writer, "{}", serde_json::to_string_pretty(&families)?)?;
        }
    }
    Ok(())
}

fn write_table<W: Write>(registry: &FamilyRegistry, mut writer: W) -> io::Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        ["Family", "Dimensions", "Domain", "Units"]
            .into_iter()
            .map(|h| Cell::new(h.bold())),
    );

    for family in registry.families() {
        let units: Vec<&str> = family.units().iter().map(|u| u.symbol()).collect();
        table.add_row(vec![
            family.name().to_string(),
            family.dimensions().to_string(),
            family.domain().to_string(),
            units.join(", "),
        ]);
    }

    writeln!(writer, "{table}")
}
