//! bucketio-cli - Command-line interface for bucketio
//!
//! Puts and gets whole objects through the bucketio adapters:
//! - `put` uploads a file or stdin to an object URL
//! - `get` downloads an object to a file or stdout
//! - `config` shows, locates or initializes the configuration file

use anyhow::{Context, Result};
use bucketio::Config;
use bytes::Bytes;
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

mod object_handler;

/// bucketio - put and get objects in cloud storage
#[derive(Parser)]
#[command(name = "bucketio")]
#[command(author, version, about = "Put and get objects in cloud storage", long_about = None)]
struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true, env = "BUCKETIO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file (or stdin) as an object
    Put {
        /// Destination object URL, e.g. s3://bucket/path/to/key
        url: String,

        /// File to upload; reads stdin when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Download an object to a file (or stdout)
    Get {
        /// Source object URL, e.g. s3://bucket/path/to/key
        url: String,

        /// Output file; writes to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or initialize configuration
    Config {
        /// Show the effective configuration
        #[arg(long, conflicts_with_all = ["path", "init"])]
        show: bool,

        /// Show configuration file path
        #[arg(long, conflicts_with_all = ["show", "init"])]
        path: bool,

        /// Write the default configuration file
        #[arg(long, conflicts_with_all = ["show", "path"])]
        init: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool, level: &str) {
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_timer(ChronoLocal::new("%H:%M:%S%.3f".to_string()))
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        let filter = if quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() {
    match run() {
        Ok(_) => process::exit(0),
        Err(e) => {
            error!("Error: {:#}", e);

            let exit_code = map_error_to_exit_code(&e);
            process::exit(exit_code);
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(Config::load()?),
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref());
    let level = config
        .as_ref()
        .map(|config| config.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    setup_logging(cli.verbose, cli.quiet, &level);

    match cli.command {
        Commands::Put { url, file } => {
            let config = config?;
            let url = object_handler::parse_object_url(&url)?;

            let body = match file {
                Some(path) => std::fs::read(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut data = Vec::new();
                    std::io::stdin()
                        .read_to_end(&mut data)
                        .context("Failed to read stdin")?;
                    data
                }
            };

            object_handler::put_object(&url, &config.client, Bytes::from(body))?;
            info!("Upload complete");
        }

        Commands::Get { url, output } => {
            let config = config?;
            let url = object_handler::parse_object_url(&url)?;
            let data = object_handler::get_object(&url, &config.client)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &data)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Saved {} bytes to {}", data.len(), path.display());
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&data)?;
                    stdout.flush()?;
                }
            }
        }

        Commands::Config { show, path, init } => {
            let config_path = match cli.config {
                Some(path) => path,
                None => Config::config_path()?,
            };

            // --path and --init work before the file exists
            if show {
                println!("{}", toml::to_string_pretty(&config?)?);
            } else if path {
                println!("{}", config_path.display());
            } else if init {
                if config_path.exists() {
                    anyhow::bail!(
                        "Configuration file already exists: {}",
                        config_path.display()
                    );
                }
                if let Some(parent) = config_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&config_path, Config::default_config_content())?;
                info!("Wrote default configuration to {}", config_path.display());
            } else {
                eprintln!("Please specify --show, --path, or --init");
            }
        }
    }

    Ok(())
}

/// Map errors to exit codes:
/// - 0: Success
/// - 1: General error
/// - 2: IO error
/// - 3: Invalid arguments
/// - 4: Storage service failure
fn map_error_to_exit_code(err: &anyhow::Error) -> i32 {
    if let Some(bucketio_err) = err.downcast_ref::<bucketio::Error>() {
        match bucketio_err {
            bucketio::Error::Io(_) => 2,
            bucketio::Error::InvalidUrl(_) => 3,
            bucketio::Error::InvalidClient { .. } => 3,
            bucketio::Error::InvalidPayload { .. } => 3,
            bucketio::Error::Service(_) => 4,
            bucketio::Error::ReadFailed { .. } => 4,
            bucketio::Error::Config(_) => 1,
            bucketio::Error::Runtime(_) => 1,
        }
    } else if err.is::<std::io::Error>() {
        2
    } else {
        1
    }
}
