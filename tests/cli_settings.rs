// tests/cli_settings.rs

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use tempfile::NamedTempFile;

use cascade::cli::{CliArgs, RunSettings};
use cascade::run;

fn parse(args: &[&str]) -> CliArgs {
    let mut argv = vec!["cascade"];
    argv.extend_from_slice(args);
    CliArgs::try_parse_from(argv).expect("arguments should parse")
}

#[test]
fn explicit_flags_are_used() {
    let args = parse(&[
        "--config",
        "scenario.json",
        "--namespace",
        "batch",
        "--status-server",
        "status.svc:9000",
        "--scenario-name",
        "nightly",
        "--poll-interval-ms",
        "250",
        "--stage-timeout-secs",
        "900",
        "--webhook-timeout-ms",
        "1500",
    ]);
    let settings = RunSettings::from_args(&args);

    assert_eq!(settings.config_path.to_str(), Some("scenario.json"));
    assert_eq!(settings.namespace, "batch");
    assert_eq!(settings.status_server, "status.svc:9000");
    assert_eq!(settings.scenario_name, "nightly");
    assert_eq!(settings.options.poll_interval, Duration::from_millis(250));
    assert_eq!(settings.options.stage_timeout, Some(Duration::from_secs(900)));
    assert_eq!(settings.webhook_timeout, Duration::from_millis(1500));
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let args = parse(&[
        "--namespace",
        "",
        "--status-server",
        " ",
        "--scenario-name",
        "",
        "--poll-interval-ms",
        "0",
    ]);
    let settings = RunSettings::from_args(&args);

    assert_eq!(settings.namespace, "default");
    assert_eq!(settings.status_server, "127.0.0.1:8000");
    assert_eq!(settings.scenario_name, "Test-image-processing");
    assert_eq!(settings.options.poll_interval, Duration::from_millis(1));
    assert_eq!(settings.webhook_timeout, Duration::from_secs(10));
}

#[test]
fn log_level_is_parsed() {
    assert!(parse(&["--log-level", "debug"]).log_level.is_some());
    assert!(CliArgs::try_parse_from(["cascade", "--log-level", "loud"]).is_err());
}

#[tokio::test]
async fn dry_run_does_not_touch_the_cluster() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
  {{ "moduleName": "ingest", "configuration": {{ "s3path": "pkg.tgz" }},
     "template": {{ "spec": {{ "containers": [ {{ "name": "ingest" }} ] }} }} }},
  {{ "moduleName": "export",
     "template": {{ "spec": {{ "containers": [ {{ "name": "export" }} ] }} }} }}
]"#
    )
    .unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let args = parse(&["--config", &path, "--dry-run"]);

    let outcome = run(args).await.expect("dry run should succeed");
    assert!(outcome.is_none());
}
