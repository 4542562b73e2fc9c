//! netmon CLI tool
//!
//! Reconciles a recorded cell snapshot and prints the result as YAML.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use netmon_common::{try_init_logging, LogLevel, NetmonConfig, SubscriptionId};
use netmon_core::{Cell, InMemoryStorage, NetworkTechnology, NrNsaState, ReconcileInput, Reconciler};

#[derive(Parser, Debug)]
#[command(name = "netmon")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Recorded snapshot (YAML)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Device and pipeline configuration (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also print the NR NSA state of each subscription
    #[arg(short = 'n', long = "nsa")]
    pub nsa: bool,

    /// Also print the detected network type of each subscription
    #[arg(short = 't', long = "network-type")]
    pub network_type: bool,

    /// Overrides the configured log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Serialize)]
struct Report {
    cells: Vec<Cell>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    nsa: BTreeMap<SubscriptionId, NrNsaState>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    network_types: BTreeMap<SubscriptionId, NetworkTechnology>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => NetmonConfig::default(),
    };

    let mut logging = config.logging.clone();
    if let Some(level) = args.log_level {
        logging.level = level;
        logging.filter = None;
    }
    try_init_logging(&logging).context("Failed to initialise logging")?;

    let input = ReconcileInput::from_yaml_file(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;

    let storage = Arc::new(InMemoryStorage::new(&config.device.build_fingerprint));
    let reconciler = Reconciler::from_config(&config, storage);
    info!(
        stages = reconciler.pipeline().stage_names().len(),
        legacy = input.legacy.len(),
        modern = input.modern.len(),
        "Reconciling snapshot"
    );

    let cells = reconciler.reconcile(&input);
    let nsa = if args.nsa {
        reconciler.nsa_states(&cells, &input.snapshot).into_iter().collect()
    } else {
        BTreeMap::new()
    };

    let network_types = if args.network_type {
        reconciler.network_types(&cells, &input.snapshot).into_iter().collect()
    } else {
        BTreeMap::new()
    };

    let report = Report { cells, nsa, network_types };
    let yaml = serde_yaml::to_string(&report).context("Failed to serialize result")?;
    print!("{yaml}");
    Ok(())
}

fn load_config(path: &Path) -> Result<NetmonConfig> {
    NetmonConfig::from_yaml_file(path)
        .with_context(|| format!("Failed to load configuration {}", path.display()))
}
