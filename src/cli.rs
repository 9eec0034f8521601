// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every process setting can also come from the environment, which is how
//! the sequencer is configured when it runs as a pod.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::loader::DEFAULT_CONFIG_PATH;
use crate::engine::SequencerOptions;

pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_STATUS_SERVER: &str = "127.0.0.1:8000";
pub const DEFAULT_SCENARIO_NAME: &str = "Test-image-processing";

/// Command-line arguments for `cascade`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cascade",
    version,
    about = "Run a multi-stage scenario as a sequence of Kubernetes jobs.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the scenario file (JSON array of stages).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Namespace the stage jobs are created in.
    #[arg(long, env = "POD_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Address of the status webhook (scheme optional).
    #[arg(long, env = "STATUS_SERVER", default_value = DEFAULT_STATUS_SERVER)]
    pub status_server: String,

    /// Scenario name used in status messages.
    #[arg(long, env = "SCENARIO_NAME", default_value = DEFAULT_SCENARIO_NAME)]
    pub scenario_name: String,

    /// Delay between two status queries, in milliseconds.
    #[arg(long, env = "POLL_INTERVAL_MS", default_value_t = 2000)]
    pub poll_interval_ms: u64,

    /// Give up on a status webhook request after this many milliseconds.
    #[arg(long, env = "WEBHOOK_TIMEOUT_MS", default_value_t = 10_000)]
    pub webhook_timeout_ms: u64,

    /// Abort the scenario if a stage is not finished after this many seconds.
    #[arg(long, env = "STAGE_TIMEOUT_SECS", value_name = "SECS")]
    pub stage_timeout_secs: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CASCADE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load and validate the scenario, print the jobs it would submit, and
    /// exit without contacting the cluster.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Resolved process settings.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub config_path: PathBuf,
    pub namespace: String,
    pub status_server: String,
    pub scenario_name: String,
    pub webhook_timeout: Duration,
    pub options: SequencerOptions,
}

impl RunSettings {
    /// Resolve settings from parsed arguments; blank values fall back to the
    /// documented defaults.
    pub fn from_args(args: &CliArgs) -> Self {
        Self {
            config_path: PathBuf::from(non_empty_or(&args.config, DEFAULT_CONFIG_PATH)),
            namespace: non_empty_or(&args.namespace, DEFAULT_NAMESPACE),
            status_server: non_empty_or(&args.status_server, DEFAULT_STATUS_SERVER),
            scenario_name: non_empty_or(&args.scenario_name, DEFAULT_SCENARIO_NAME),
            webhook_timeout: Duration::from_millis(args.webhook_timeout_ms.max(1)),
            options: SequencerOptions {
                poll_interval: Duration::from_millis(args.poll_interval_ms.max(1)),
                stage_timeout: args.stage_timeout_secs.map(Duration::from_secs),
            },
        }
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
