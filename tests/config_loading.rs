// tests/config_loading.rs

use std::io::Write;

use tempfile::NamedTempFile;

use cascade::config::{load_and_validate, load_from_path};
use cascade::errors::CascadeError;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

const THREE_STAGES: &str = r#"
[
  {
    "moduleName": "ingest",
    "configuration": { "s3path": "bucket/pkg.tgz", "threads": "4" },
    "template": {
      "spec": {
        "containers": [ { "name": "ingest", "image": "ingest:1.0" } ],
        "restartPolicy": "Never"
      }
    },
    "ttlSecondsAfterFinished": 120,
    "backoffLimit": 0,
    "activeDeadlineSeconds": 600
  },
  {
    "moduleName": "transform",
    "template": { "spec": { "containers": [ { "name": "transform", "image": "transform:1.0" } ] } }
  },
  {
    "moduleName": "export",
    "ttlAfterFinished": 30,
    "template": { "spec": { "containers": [ { "name": "export", "image": "export:1.0" } ] } }
  }
]
"#;

#[test]
fn loads_stages_in_file_order() {
    let file = write_config(THREE_STAGES);
    let scenario = load_and_validate(file.path()).unwrap();

    let names: Vec<_> = scenario
        .stages()
        .iter()
        .map(|s| s.module_name.as_str())
        .collect();
    assert_eq!(names, vec!["ingest", "transform", "export"]);

    let first = &scenario.stages()[0];
    assert_eq!(first.artifact_seed(), Some("bucket/pkg.tgz"));
    assert_eq!(first.configuration.get("threads").map(String::as_str), Some("4"));
    assert_eq!(first.ttl_seconds_after_finished, Some(120));
    assert_eq!(first.backoff_limit, Some(0));
    assert_eq!(first.active_deadline_seconds, Some(600));

    let second = &scenario.stages()[1];
    assert!(second.configuration.is_empty());
    assert_eq!(second.backoff_limit, None);

    // Legacy field name.
    assert_eq!(scenario.stages()[2].ttl_seconds_after_finished, Some(30));
}

#[test]
fn empty_scenario_is_rejected() {
    let file = write_config("[]");
    match load_and_validate(file.path()) {
        Err(CascadeError::ConfigError(msg)) => assert!(msg.contains("at least one stage")),
        other => panic!("expected ConfigError, got {:?}", other),
    }
}

#[test]
fn duplicate_module_names_are_rejected() {
    let file = write_config(
        r#"[
  { "moduleName": "a", "template": { "spec": { "containers": [ { "name": "a" } ] } } },
  { "moduleName": "a", "template": { "spec": { "containers": [ { "name": "a" } ] } } }
]"#,
    );
    match load_and_validate(file.path()) {
        Err(CascadeError::ConfigError(msg)) => {
            assert!(msg.contains("duplicate"));
            assert!(msg.contains("'a'"));
        }
        other => panic!("expected ConfigError, got {:?}", other),
    }
}

#[test]
fn blank_module_name_is_rejected() {
    let file = write_config(
        r#"[ { "moduleName": " ", "template": { "spec": { "containers": [ { "name": "a" } ] } } } ]"#,
    );
    assert!(matches!(
        load_and_validate(file.path()),
        Err(CascadeError::ConfigError(_))
    ));
}

#[test]
fn template_without_containers_is_rejected() {
    let file = write_config(
        r#"[ { "moduleName": "a", "template": { "spec": { "containers": [] } } } ]"#,
    );
    match load_and_validate(file.path()) {
        Err(CascadeError::InvalidTemplate { module, .. }) => assert_eq!(module, "a"),
        other => panic!("expected InvalidTemplate, got {:?}", other),
    }
}

#[test]
fn malformed_json_is_a_json_error() {
    let file = write_config("{ not json");
    assert!(matches!(
        load_from_path(file.path()),
        Err(CascadeError::JsonError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        load_and_validate("/definitely/not/here.json"),
        Err(CascadeError::IoError(_))
    ));
}
