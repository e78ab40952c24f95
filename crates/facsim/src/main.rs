use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod config;
mod convert;
mod eval;
mod families;

#[derive(Parser)]
#[command(name = "facsim")]
#[command(about = "Convert and combine physical quantities", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// TOML file with extra unit definitions (defaults to ./facsim.toml when present)
    #[arg(long = "units", global = true, value_name = "PATH")]
    units: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a quantity to another unit of the same family
    #[command(alias = "c")]
    Convert(convert::ConvertArgs),

    /// Add, subtract, multiply or divide two quantities
    #[command(alias = "e")]
    Eval(eval::EvalArgs),

    /// List the known measurement families and their units
    Families(families::FamiliesArgs),
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug, RUST_LOG overrides
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    let registry = config::load_registry(cli.units.as_deref())?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Convert(args) => convert::execute(args, &registry, &mut stdout),
        Commands::Eval(args) => eval::execute(args, &registry, &mut stdout),
        Commands::Families(args) => families::execute(args, &registry, &mut stdout),
    }
}
