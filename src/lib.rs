// src/lib.rs

pub mod artifact;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod notify;

use tracing::info;

use crate::artifact::ArtifactPath;
use crate::cli::{CliArgs, RunSettings};
use crate::config::loader::load_and_validate;
use crate::config::model::ScenarioConfig;
use crate::engine::{ScenarioCore, ScenarioOutcome, Sequencer};
use crate::errors::Result;
use crate::exec::{stage_env, ClusterBackend, KubeBackend};
use crate::notify::{Notifier, WebhookNotifier};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings resolution and scenario loading
/// - the cluster connection
/// - the status webhook
/// - the sequencer
///
/// Returns `None` for `--dry-run`.
pub async fn run(args: CliArgs) -> Result<Option<ScenarioOutcome>> {
    let settings = RunSettings::from_args(&args);
    let scenario = load_and_validate(&settings.config_path)?;

    if args.dry_run {
        print_dry_run(&settings, &scenario);
        return Ok(None);
    }

    let cluster = KubeBackend::connect().await?;
    let notifier = WebhookNotifier::new(&settings.status_server, settings.webhook_timeout)?;
    info!(
        status_server = %notifier.url(),
        webhook_timeout_ms = settings.webhook_timeout.as_millis() as u64,
        namespace = %settings.namespace,
        scenario = %settings.scenario_name,
        "cascade configured"
    );

    let outcome = run_scenario(scenario, cluster, notifier, &settings).await?;
    Ok(Some(outcome))
}

/// Run a validated scenario against the given backends.
pub async fn run_scenario<B, N>(
    scenario: ScenarioConfig,
    cluster: B,
    notifier: N,
    settings: &RunSettings,
) -> Result<ScenarioOutcome>
where
    B: ClusterBackend,
    N: Notifier,
{
    let core = ScenarioCore::new(settings.scenario_name.clone(), scenario);
    let sequencer = Sequencer::new(
        core,
        cluster,
        notifier,
        settings.namespace.clone(),
        settings.options,
    );
    sequencer.run().await
}

/// Dry-run output: every job with the environment it would receive.
fn print_dry_run(settings: &RunSettings, scenario: &ScenarioConfig) {
    println!("cascade dry-run");
    println!("  scenario = {}", settings.scenario_name);
    println!("  namespace = {}", settings.namespace);
    println!("  status_server = {}", settings.status_server);
    println!();

    let stages = scenario.stages();
    let seed = stages
        .first()
        .and_then(|s| s.artifact_seed())
        .unwrap_or_default();
    let mut artifact = ArtifactPath::seed(seed, stages.len());

    println!("stages ({}):", stages.len());
    for (idx, stage) in stages.iter().enumerate() {
        if idx > 0 {
            artifact = artifact.advance(stages.len());
        }
        println!("  {}. {}", idx, stage.module_name);
        for var in stage_env(stage, &artifact) {
            println!("      {}={}", var.name, var.value.unwrap_or_default());
        }
        if let Some(limit) = stage.backoff_limit {
            println!("      backoffLimit: {limit}");
        }
        if let Some(deadline) = stage.active_deadline_seconds {
            println!("      activeDeadlineSeconds: {deadline}");
        }
        if let Some(ttl) = stage.ttl_seconds_after_finished {
            println!("      ttlSecondsAfterFinished: {ttl}");
        }
    }
    println!();
    println!("final artifact: {}", artifact.final_path());
}
