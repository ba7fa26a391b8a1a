use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use levelog_config::LevelogConfig;
use levelog_core::{parse_threshold, record_fn, Arg, LevelLogger, Severity, WriterSink};
use levelog_telemetry::{init_tracing, MetricsRecorder};
use tracing::debug;

use crate::error::CliError;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Emit one message through a configured logger, printing what sinks receive
    Emit(EmitArgs),
    /// Parse a threshold the way configuration does
    Parse(ParseArgs),
    /// Print the effective configuration as YAML
    ShowConfig(ShowConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EmitArgs {
    /// Level of the message (error, warning, info, debug or 1-4)
    #[arg(short, long, default_value = "info", value_parser = parse_threshold)]
    pub level: Severity,
    /// Override the configured threshold
    #[arg(short, long, value_parser = parse_threshold)]
    pub threshold: Option<Severity>,
    /// Also print the structured record
    #[arg(long)]
    pub structured: bool,
    /// Configuration file (defaults to config/levelog.yaml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Message template, printf-style
    pub message: String,
    /// Substitution arguments
    pub args: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    pub raw: String,
}

#[derive(Args, Debug, Clone)]
pub struct ShowConfigArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<LevelogConfig, CliError> {
    Ok(match path {
        Some(path) => LevelogConfig::load_from_path(path)?,
        None => LevelogConfig::load()?,
    })
}

pub fn run_command(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Emit(args) => run_emit(args),
        Commands::Parse(args) => run_parse(args),
        Commands::ShowConfig(args) => run_show_config(args),
    }
}

/// Command-line arguments are untyped; give numbers and booleans their
/// natural type so `%d` and `%j` behave.
pub fn typed_arg(raw: &str) -> Arg {
    if let Ok(v) = raw.parse::<i64>() {
        Arg::Int(v)
    } else if let Ok(v) = raw.parse::<f64>() {
        Arg::Float(v)
    } else if let Ok(v) = raw.parse::<bool>() {
        Arg::Bool(v)
    } else {
        Arg::Str(raw.to_string())
    }
}

fn run_emit(args: EmitArgs) -> Result<(), CliError> {
    if args.level == Severity::None {
        return Err(CliError::UnnamedLevel);
    }

    let config = load_config(args.config.as_ref())?;
    init_tracing(&config.telemetry);

    let mut builder = config.logger_builder()?;
    if let Some(threshold) = args.threshold {
        builder = builder.threshold(threshold);
    }
    let recorder = if config.telemetry.metrics {
        let recorder = Arc::new(MetricsRecorder::new()?);
        builder = builder.metrics(recorder.clone());
        Some(recorder)
    } else {
        None
    };
    let logger: LevelLogger = builder.build();
    debug!(?logger, "logger configured");

    logger.subscribe_formatted(WriterSink::new(std::io::stdout()));
    if args.structured {
        logger.subscribe_structured(record_fn(|record| {
            let mut out = std::io::stdout().lock();
            writeln!(
                out,
                "level={} time={} location={:?} message={:?} args={:?}",
                record.level_name,
                record.timestamp.to_rfc3339(),
                record.location,
                record.message,
                record.args,
            )?;
            Ok(())
        }));
    }

    let values: Vec<Arg> = args.args.iter().map(|raw| typed_arg(raw)).collect();
    logger.emit(args.level, &args.message, &values)?;

    if let Some(recorder) = recorder {
        eprint!("{}", recorder.gather_metrics()?);
    }
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), CliError> {
    let level = parse_threshold(&args.raw)?;
    println!("{} ({})", level, level.value());
    Ok(())
}

fn run_show_config(args: ShowConfigArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_ref())?;
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}
