use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use evcharge_core::{
    DayOfWeek, DayType, DemandModel, EvChargeConfig, FEATURE_NAMES, FeatureVector, Hour,
    ModelLoader, Month, Narrative, PredictionService, RawInput, read_forest,
};
use ftui_runtime::{App, ScreenMode};
use serde::Serialize;
use tracing::error;

use crate::app::{ModelStatus, PredictorApp};
use crate::error::Result;
use crate::logging::{self, LogTarget};

/// Picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "evcharge.toml";

#[derive(Debug, Parser)]
#[command(
    name = "evcharge",
    about = "Predict hourly EV charging demand (kWh) from a pre-trained forest",
    version
)]
pub struct Cli {
    /// Model artifact (overrides the config file).
    #[arg(long, global = true)]
    pub artifact: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive prediction form (default).
    Tui,

    /// Predict once and print the result.
    Predict(PredictArgs),

    /// Validate the artifact and print a summary.
    Inspect,
}

#[derive(Debug, Clone, Args)]
pub struct PredictArgs {
    /// Hour of day, 0-23 (defaults to the configured slider start).
    #[arg(long, value_parser = parse_hour)]
    pub hour: Option<Hour>,

    /// Day of week, Monday..Sunday.
    #[arg(long)]
    pub day: DayOfWeek,

    /// Month, 1-12.
    #[arg(long, value_parser = parse_month)]
    pub month: Month,

    /// Weekday or Weekend.
    #[arg(long, default_value = "Weekday")]
    pub day_type: DayType,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

fn parse_hour(s: &str) -> std::result::Result<Hour, String> {
    let value: i64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    Hour::new(value).map_err(|e| e.to_string())
}

fn parse_month(s: &str) -> std::result::Result<Month, String> {
    let value: i64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    Month::new(value).map_err(|e| e.to_string())
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref(), cli.artifact)?;
    let stdout = std::io::stdout();

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            logging::init(&config.log, LogTarget::Interactive)?;
            run_tui(&config)
        }
        Commands::Predict(args) => {
            logging::init(&config.log, LogTarget::Stderr)?;
            run_predict(&args, &config, &mut stdout.lock())
        }
        Commands::Inspect => {
            logging::init(&config.log, LogTarget::Stderr)?;
            run_inspect(&config, &mut stdout.lock())
        }
    }
}

/// Defaults, then the config file, then `--artifact`.
pub fn resolve_config(path: Option<&Path>, artifact: Option<PathBuf>) -> Result<EvChargeConfig> {
    let mut config = match path {
        Some(path) => EvChargeConfig::from_toml_file(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
            EvChargeConfig::from_toml_file(DEFAULT_CONFIG_PATH)?
        }
        None => EvChargeConfig::default(),
    };
    if let Some(artifact) = artifact {
        config.artifact_path = artifact;
    }
    Ok(config)
}

/// Composition root for the interactive form.
pub fn run_tui(config: &EvChargeConfig) -> Result<()> {
    let loader = ModelLoader::new(&config.artifact_path);
    let status = ModelStatus::from(loader.load().map(PredictionService::new));
    if let ModelStatus::Unavailable(err) = &status {
        error!(error = %err, "starting without a model; predictions are disabled");
    }

    App::new(PredictorApp::new(status, config.default_hour()))
        .screen_mode(ScreenMode::AltScreen)
        .run()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct PredictionReport<'a> {
    input: RawInput,
    features: FeatureVector,
    demand_kwh: f64,
    formatted: String,
    narrative: Narrative,
    narrative_text: &'a str,
    model: String,
}

pub fn run_predict(
    args: &PredictArgs,
    config: &EvChargeConfig,
    out: &mut impl Write,
) -> Result<()> {
    let loader = ModelLoader::new(&config.artifact_path);
    let service = PredictionService::new(loader.load()?);

    let input = RawInput::new(
        args.hour.unwrap_or_else(|| config.default_hour()),
        args.day,
        args.month,
        args.day_type,
    );
    let prediction = service.predict(&input);

    if args.json {
        let report = PredictionReport {
            input,
            features: prediction.features,
            demand_kwh: prediction.demand_kwh,
            formatted: prediction.formatted_demand(),
            narrative: prediction.narrative,
            narrative_text: prediction.narrative.body(),
            model: service.model().describe(),
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        let fv = prediction.features;
        writeln!(
            out,
            "Predicted Charging Demand: {}",
            prediction.formatted_demand()
        )?;
        writeln!(
            out,
            "Features: ({}, {}, {}, {})",
            fv.hour, fv.day_of_week, fv.is_weekend, fv.month
        )?;
        writeln!(
            out,
            "{}: {}",
            prediction.narrative.title(),
            prediction.narrative.body()
        )?;
    }
    Ok(())
}

pub fn run_inspect(config: &EvChargeConfig, out: &mut impl Write) -> Result<()> {
    let forest = read_forest(&config.artifact_path)?;
    writeln!(out, "artifact: {}", config.artifact_path.display())?;
    writeln!(out, "features: {}", FEATURE_NAMES.join(", "))?;
    writeln!(out, "trees:    {}", forest.tree_count())?;
    writeln!(out, "nodes:    {}", forest.node_count())?;
    writeln!(out, "model:    {}", forest.describe())?;
    Ok(())
}
