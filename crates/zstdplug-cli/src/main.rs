//! zstdplug - reference host for the zstd compression module
//!
//! Starts the plugin module the way an application host would, discovers the registered
//! compression format through the feature registry, and uses it to compress or decompress
//! single files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use zstdplug_config::{CommandLine, ConfigBuilder, HostConfig};

mod host;
mod output;

use host::{compress_bytes, decompress_bytes, output_capacity, Host};
use output::{FormatInfo, TransferSummary};

/// Default configuration file looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "zstdplug.toml";

/// zstdplug - zstd block compression through a pluggable format module
#[derive(Parser, Debug)]
#[command(
    name = "zstdplug",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compress and decompress files through the zstd compression format module",
    long_about = "zstdplug starts the zstd compression format module, discovers the format\n\
                  through its feature registry and uses it on single files.\n\
                  Pass -ZstdLevel=<n> through --module-args to change the level."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Verbose mode - detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Extra arguments for the module, e.g. "-ZstdLevel=19"
    #[arg(long, global = true, allow_hyphen_values = true)]
    module_args: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compress a file into a single zstd frame
    Compress {
        /// Input file
        input: PathBuf,
        /// Output file
        output: PathBuf,
    },
    /// Decompress a single zstd frame
    Decompress {
        /// Input file
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// Decompressed size, when the frame does not record it
        #[arg(long)]
        size: Option<usize>,
    },
    /// Show the registered compression format
    Info {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    init_logging(&config, cli.debug, cli.quiet, cli.verbose)?;
    info!("zstdplug v{} starting", env!("CARGO_PKG_VERSION"));

    let mut command_line = CommandLine::new(config.module.args.clone());
    if let Some(extra) = &cli.module_args {
        command_line.append(extra);
    }

    match cli.command {
        Commands::Compress { input, output } => {
            let summary = compress_command(&command_line, &input, &output)?;
            if !cli.quiet {
                println!("{}", summary);
            }
        }
        Commands::Decompress {
            input,
            output,
            size,
        } => {
            let max_output_size = config.decompression.max_output_size;
            let summary =
                decompress_command(&command_line, &input, &output, size, max_output_size)?;
            if !cli.quiet {
                println!("{}", summary);
            }
        }
        Commands::Info { json } => info_command(&command_line, json)?,
        Commands::Config { default } => config_command(&config, default)?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<HostConfig> {
    let builder = match path {
        Some(path) => ConfigBuilder::new().add_required_file(path),
        None => ConfigBuilder::new().add_source_file(DEFAULT_CONFIG_FILE),
    };

    builder
        .with_default_env()
        .build()
        .context("Failed to load configuration")
}

fn init_logging(config: &HostConfig, debug: bool, quiet: bool, verbose: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        config.logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Invalid log filter")?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

fn compress_command(
    command_line: &CommandLine,
    input: &Path,
    output: &Path,
) -> Result<TransferSummary> {
    let data = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let host = Host::start(command_line)?;
    let format = host.compression_format()?;
    let frame = compress_bytes(format.as_ref(), &data)?;
    drop(format);
    host.stop()?;

    fs::write(output, &frame).with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(TransferSummary {
        operation: "compress".to_string(),
        input_bytes: data.len(),
        output_bytes: frame.len(),
    })
}

fn decompress_command(
    command_line: &CommandLine,
    input: &Path,
    output: &Path,
    size: Option<usize>,
    max_output_size: usize,
) -> Result<TransferSummary> {
    let frame = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let capacity = output_capacity(&frame, size, max_output_size)?;

    let host = Host::start(command_line)?;
    let format = host.compression_format()?;
    let data = decompress_bytes(format.as_ref(), &frame, capacity)?;
    drop(format);
    host.stop()?;

    fs::write(output, &data).with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(TransferSummary {
        operation: "decompress".to_string(),
        input_bytes: frame.len(),
        output_bytes: data.len(),
    })
}

fn info_command(command_line: &CommandLine, json: bool) -> Result<()> {
    let host = Host::start(command_line)?;
    let format = host.compression_format()?;
    let level = host.level().context("The zstd module is not active")?;
    let info = FormatInfo::new(format.as_ref(), level.get());
    drop(format);
    host.stop()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info);
    }
    Ok(())
}

fn config_command(config: &HostConfig, default: bool) -> Result<()> {
    let shown = if default {
        HostConfig::default()
    } else {
        config.clone()
    };
    println!("{}", toml::to_string_pretty(&shown)?);
    Ok(())
}
