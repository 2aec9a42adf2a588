//! schema-lint CLI
//!
//! Entry point for the command-line tool.
//!
//! Exit codes:
//! - 0: No lints at or above the configured severity threshold
//! - 1: Lints at or above the threshold, or a linter over its lint threshold
//! - 2: Tool error (config error, unreadable catalog, I/O error, etc.)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use schema_lint::connection::Connection;
use schema_lint::output::reporter_for;
use schema_lint::{Catalog, Config, LintEngine, LinterId, LinterRegistry};

/// Default config file name used when --config is not explicitly provided.
const DEFAULT_CONFIG_FILE: &str = "schema-lint.toml";

#[derive(Parser, Debug)]
#[command(name = "schema-lint")]
#[command(about = "Static analyzer for crawled database schema catalogs", long_about = None)]
struct Args {
    /// Path to the catalog JSON file
    #[arg(long, env = "SCHEMA_LINT_CATALOG")]
    catalog: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database file for linters that query live data
    #[arg(long)]
    database: Option<PathBuf>,

    /// Override output format (text, json)
    #[arg(long)]
    format: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Explain a specific linter (e.g., --explain table-cycle)
    #[arg(long)]
    explain: Option<String>,

    /// List all linters with their default severity
    #[arg(long)]
    list: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    match run(args) {
        Ok(should_fail) => {
            if should_fail {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(2);
        }
    }
}

/// Log level comes from `-v`/`-q`, then `RUST_LOG`, then defaults to warn.
fn init_logging(verbose: u8, quiet: bool) {
    let filter = match (quiet, verbose) {
        (true, _) => EnvFilter::new("error"),
        (false, 0) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        (false, 1) => EnvFilter::new("schema_lint=debug"),
        (false, _) => EnvFilter::new("schema_lint=trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Run the lint pipeline.
///
/// Returns `Ok(true)` if the run should fail the build, `Ok(false)`
/// otherwise, or `Err` on tool errors.
fn run(args: Args) -> Result<bool> {
    let mut registry = LinterRegistry::new();
    registry.register_defaults();

    if args.list {
        list_linters(&registry);
        return Ok(false);
    }
    if let Some(id) = args.explain.as_deref() {
        explain_linter(&registry, id)?;
        return Ok(false);
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(format) = args.format {
        config.output.format = format;
    }
    let reporter = reporter_for(&config.output.format)
        .with_context(|| format!("Unknown output format '{}'", config.output.format))?;

    let catalog_path = args
        .catalog
        .context("No catalog given; pass --catalog <file>")?;
    let catalog = Catalog::from_file(&catalog_path).context("Failed to load catalog")?;
    info!(
        tables = catalog.tables().count(),
        "Loaded catalog {}",
        catalog_path.display()
    );

    let connection = open_connection(args.database.as_deref())?;

    let engine = LintEngine::new(&registry, &config);
    let run = engine.run(&catalog, connection.as_deref());
    debug!(lints = run.lints.len(), linters = run.outcomes.len(), "Run complete");

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            reporter
                .emit(&run, &mut out)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            reporter
                .emit(&run, &mut out)
                .context("Failed to write report")?;
            out.flush()?;
        }
    }

    Ok(run.should_fail(config.fail_on()))
}

/// Load configuration from file.
///
/// An explicit `--config` must exist. The default file is optional; when
/// it is missing every linter runs with default settings.
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Config::from_file(path).context("Failed to load configuration")
        }
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                Config::from_file(default_path).context("Failed to load configuration")
            } else {
                debug!("{} not found, using defaults", DEFAULT_CONFIG_FILE);
                Ok(Config::default())
            }
        }
    }
}

#[cfg(feature = "sqlite")]
fn open_connection(path: Option<&Path>) -> Result<Option<Box<dyn Connection>>> {
    use schema_lint::connection::SqliteConnection;

    let Some(path) = path else {
        return Ok(None);
    };
    let connection = SqliteConnection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    Ok(Some(Box::new(connection)))
}

#[cfg(not(feature = "sqlite"))]
fn open_connection(path: Option<&Path>) -> Result<Option<Box<dyn Connection>>> {
    if path.is_some() {
        tracing::warn!("Built without the sqlite feature; ignoring --database");
    }
    Ok(None)
}

fn list_linters(registry: &LinterRegistry) {
    for provider in registry.iter() {
        println!(
            "{:<40} {:<8} {}",
            provider.id().as_str(),
            provider.default_severity().as_str(),
            provider.description()
        );
    }
}

fn explain_linter(registry: &LinterRegistry, id: &str) -> Result<()> {
    let provider = id
        .parse::<LinterId>()
        .ok()
        .and_then(|id| registry.get(id))
        .with_context(|| format!("Unknown linter: {id}"))?;

    println!("Linter: {}", provider.id());
    println!("Severity: {}", provider.default_severity());
    println!("Description: {}", provider.description());
    println!();
    println!("{}", provider.explain());
    Ok(())
}
