#![forbid(unsafe_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use waypoint::{Catalog, TourConfig};

use crate::data;
use crate::error::{DemoError, Result};
use crate::script::{Action, Session};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "WAYPOINT_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "waypoint-demo",
    about = "Walk the sample health-coaching tour from the command line",
    version
)]
pub struct Cli {
    /// Route the host is on when the script starts.
    #[arg(long, default_value = data::DEFAULT_PATH)]
    pub path: String,

    /// Comma-separated actions: start, next, prev, end, goto:<path>.
    #[arg(long, value_delimiter = ',')]
    pub script: Vec<Action>,

    /// Print one JSON object per action and log as JSON.
    #[arg(long)]
    pub json: bool,

    /// Tour configuration file (`.json`, otherwise TOML).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Catalog file replacing the built-in tour (`.json`, otherwise TOML).
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}

/// Install the stderr subscriber. Filter comes from [`LOG_ENV`], default `info`.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    // A second init (tests) keeps the first subscriber.
    let _ = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
}

pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let catalog = match &cli.catalog {
        Some(path) => load_catalog(path)?,
        None => data::sample_catalog()?,
    };
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TourConfig::from_env(),
    };
    if !cli.path.starts_with('/') {
        return Err(DemoError::invalid(format!(
            "--path must be an absolute route, got `{}`",
            cli.path
        )));
    }

    let script = if cli.script.is_empty() {
        Action::default_script()
    } else {
        cli.script.clone()
    };
    info!(
        pages = catalog.page_count(),
        steps = catalog.total_steps(),
        actions = script.len(),
        "running tour script"
    );

    let mut session = Session::new(Arc::new(catalog), &cli.path, config);
    for action in &script {
        let turn = session.apply(action);
        if cli.json {
            writeln!(out, "{}", turn.to_json())?;
        } else {
            writeln!(out, "{turn}")?;
        }
    }
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let loaded = if is_json(path) {
        Catalog::from_json_file(path)
    } else {
        Catalog::from_toml_file(path)
    };
    loaded.map_err(|source| DemoError::CatalogFile {
        path: path.display().to_string(),
        source,
    })
}

fn load_config(path: &Path) -> Result<TourConfig> {
    let loaded = if is_json(path) {
        TourConfig::from_json_file(path)
    } else {
        TourConfig::from_toml_file(path)
    };
    loaded.map_err(|source| DemoError::Config {
        path: path.display().to_string(),
        source,
    })
}
