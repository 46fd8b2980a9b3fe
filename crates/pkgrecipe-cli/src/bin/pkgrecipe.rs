//! CLI for the pkgrecipe processor chaining framework

use clap::Parser;
use pkgrecipe_cli::{CliConfig, builtin, commands};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pkgrecipe")]
#[command(author, version, about = "Run packaging recipe processors", long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "PKGRECIPE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Config file path
    #[arg(short, long, env = "PKGRECIPE_CONFIG")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List registered processors and output handlers
    List,
    /// Print the manifest of a processor as JSON
    Manifest {
        /// Processor name
        processor: String,
    },
    /// Run a processor: environment on stdin, updated environment on stdout
    Run {
        /// Processor name
        processor: String,
        /// key=value arguments merged into the environment
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        arguments: Vec<String>,
    },
    /// Run an output handler: environment on stdin, updated environment on stdout
    Export {
        /// Output handler name
        output_handler: String,
        /// key=value arguments merged into the environment
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        arguments: Vec<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration before logging is up, report the outcome afterwards
    let (mut config, load_error) = match &cli.config_file {
        Some(path) => match CliConfig::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (CliConfig::default(), Some(e)),
        },
        None => (CliConfig::default(), None),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // stdout carries the environment document, so logs go to stderr
    let filter = format!("pkgrecipe={0},pkgrecipe_cli={0},pkgrecipe_core={0}", config.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match (&cli.config_file, load_error) {
        (Some(path), None) => info!("Configuration loaded from: {}", path.display()),
        (_, Some(e)) => warn!("Failed to load config file: {}. Using default configuration.", e),
        (None, None) => {}
    }

    let processors = builtin::processor_registry()?;
    let output_handlers = builtin::output_handler_registry()?;

    let status = match &cli.command {
        Commands::List => {
            commands::run_list(&processors, &output_handlers, &mut io::stdout().lock())?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Manifest { processor } => {
            commands::run_manifest(&processors, processor, &mut io::stdout().lock())?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Run {
            processor,
            arguments,
        } => commands::run_processor(
            &processors,
            processor,
            arguments,
            io::stdin().lock(),
            io::stdout().lock(),
            &mut io::stderr().lock(),
        )?,
        Commands::Export {
            output_handler,
            arguments,
        } => commands::run_export(
            &output_handlers,
            &config,
            output_handler,
            arguments,
            io::stdin().lock(),
            io::stdout().lock(),
            &mut io::stderr().lock(),
        )?,
    };

    Ok(status.into())
}
