//! Headless Unit Converter
//!
//! Reads source units as JSON, converts them against an equipment catalog,
//! and writes statblocks as JSON (or one summary line per unit).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};

use quickstrike::{CatalogError, Converter, ConverterConfig, EquipmentCatalog, SourceUnit, Statblock};

/// Headless Unit Converter - detailed units in, statblocks out
#[derive(Parser, Debug)]
#[command(name = "convert_units")]
#[command(about = "Convert detailed combat units into quick-play statblocks")]
struct Args {
    /// JSON file holding an array of source units
    units: PathBuf,

    /// Equipment catalog: a TOML file or a directory of them
    #[arg(long, default_value = "data/equipment.toml")]
    catalog: PathBuf,

    /// Optional converter config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log unknown equipment ids at error level
    #[arg(long)]
    strict: bool,
}

/// JSON output structure, one per input unit
#[derive(Serialize)]
struct ConversionRecord {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    statblock: Option<Statblock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn load_catalog(path: &PathBuf) -> Result<EquipmentCatalog, CatalogError> {
    let mut catalog = EquipmentCatalog::new();
    if path.is_dir() {
        catalog.load_directory(path)?;
    } else {
        catalog.load_file(path)?;
    }
    Ok(catalog)
}

fn load_config(path: Option<&PathBuf>) -> Result<ConverterConfig, CatalogError> {
    let Some(path) = path else {
        return Ok(ConverterConfig::default());
    };
    let content = std::fs::read_to_string(path)?;
    let config: ConverterConfig = toml::from_str(&content)
        .map_err(|e| CatalogError::Parse(format!("{}: {}", path.display(), e)))?;
    config.validate().map_err(CatalogError::Parse)?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), CatalogError> {
    let mut config = load_config(args.config.as_ref())?;
    config.strict_lookups |= args.strict;

    let catalog = load_catalog(&args.catalog)?;
    info!(
        weapons = catalog.weapon_count(),
        misc = catalog.misc_count(),
        "Loaded equipment catalog"
    );

    let content = std::fs::read_to_string(&args.units)?;
    let units: Vec<SourceUnit> = serde_json::from_str(&content)?;

    let converter = Converter::with_config(&catalog, config);
    let results = converter.convert_batch(&units);

    let records: Vec<ConversionRecord> = units
        .iter()
        .zip(results)
        .map(|(unit, result)| match result {
            Ok(statblock) => ConversionRecord {
                name: unit.name(),
                statblock: Some(statblock),
                error: None,
            },
            Err(e) => ConversionRecord {
                name: unit.name(),
                statblock: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    let converted = records.iter().filter(|r| r.statblock.is_some()).count();
    info!(units = units.len(), converted, "Conversion finished");

    match args.format.as_str() {
        "text" => {
            for record in &records {
                match (&record.statblock, &record.error) {
                    (Some(statblock), _) => println!("{}", statblock),
                    (None, Some(error)) => println!("{}: {}", record.name, error),
                    (None, None) => {}
                }
            }
        }
        _ => println!("{}", serde_json::to_string_pretty(&records)?),
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
