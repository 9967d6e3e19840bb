//! # Storefront Demo
//!
//! Runs a scripted set of orders against storefront-core and prints the
//! transcript to stdout. Logs go to stderr so the transcript stays clean.
//!
//! ## Module Organization
//! ```text
//! storefront_demo/
//! ├── lib.rs          ◄─── You are here (args, tracing, run)
//! ├── config.rs       ◄─── DemoConfig: defaults → TOML → env
//! ├── scenario.rs     ◄─── Catalog/customer/steps + runner
//! ├── transcript.rs   ◄─── Ordered stdout line sink
//! └── error.rs        ◄─── DemoError
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Parse command line flags
//! 3. Load config (file, environment) and validate the scenario
//! 4. Run the scenario, echoing each transcript line
//! 5. Optionally dump receipts as JSON

pub mod config;
pub mod error;
pub mod scenario;
pub mod transcript;

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::DemoConfig;
use error::{DemoError, DemoResult};
use transcript::Transcript;

const USAGE: &str = "\
Storefront Demo

Usage: storefront-demo [OPTIONS]

Options:
  -c, --config <PATH>    Scenario config file (TOML)
      --show-catalog     Print the catalog before and after the orders
      --receipts-json    Print all receipts as JSON after the transcript
  -h, --help             Show this help message";

/// Parsed command line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub show_catalog: bool,
    pub receipts_json: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parses flags, excluding the program name.
    pub fn parse<I>(args: I) -> DemoResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().ok_or_else(|| {
                        DemoError::InvalidArgument(format!("{} requires a path", arg))
                    })?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--show-catalog" => parsed.show_catalog = true,
                "--receipts-json" => parsed.receipts_json = true,
                "--help" | "-h" => parsed.help = true,
                other => return Err(DemoError::InvalidArgument(other.to_string())),
            }
        }

        Ok(parsed)
    }
}

/// Runs the demo with the given arguments (program name excluded).
pub fn run<I>(args: I) -> DemoResult<()>
where
    I: IntoIterator<Item = String>,
{
    init_tracing();

    let cli = CliArgs::parse(args)?;
    if cli.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut config = DemoConfig::load(cli.config)?;
    config.output.show_catalog |= cli.show_catalog;
    config.output.receipts_json |= cli.receipts_json;

    info!(
        products = config.scenario.products.len(),
        steps = config.scenario.steps.len(),
        "Starting storefront demo"
    );

    let transcript = Transcript::echoing();
    let outcome = scenario::run(&config.scenario, &transcript, config.output.show_catalog)?;

    if config.output.receipts_json {
        println!();
        println!("{}", serde_json::to_string_pretty(&outcome.receipts)?);
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `STOREFRONT_LOG=storefront_core=info` - Used when `RUST_LOG` is unset
/// - Default: WARN level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("STOREFRONT_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
