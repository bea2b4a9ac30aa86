//! Main entry point for the platter service.
//!
//! This binary serves the dish and order API over HTTP. State lives in an
//! in-memory store for the lifetime of the process; an optional seed file
//! provides initial records.

use clap::Parser;
use platter_config::Config;
use std::path::PathBuf;

mod seed;
mod server;

/// Command-line arguments for the platter service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the platter service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file, falling back to defaults
/// 4. Runs the HTTP server until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	// Create env filter with default from args
	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	let config = if args.config.exists() {
		let config = Config::from_file(&args.config)?;
		tracing::info!("Loaded configuration from {}", args.config.display());
		config
	} else {
		tracing::warn!(
			"Configuration file {} not found, using defaults",
			args.config.display()
		);
		Config::default()
	};

	server::start_server(config).await
}
