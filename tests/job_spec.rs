// tests/job_spec.rs

use cascade::artifact::ArtifactPath;
use cascade::errors::CascadeError;
use cascade::exec::job_spec::{build_job, job_labels, stage_env};
use cascade_test_utils::builders::StageConfigBuilder;
use k8s_openapi::api::core::v1::{EnvVar, PodTemplateSpec};

fn env_pairs(env: &[EnvVar]) -> Vec<(String, String)> {
    env.iter()
        .map(|v| (v.name.clone(), v.value.clone().unwrap_or_default()))
        .collect()
}

#[test]
fn stage_zero_env_is_configuration_only() {
    let stage = StageConfigBuilder::new("ingest")
        .s3path("pkg.tgz")
        .param("mode", "fast")
        .build();
    let artifact = ArtifactPath::seed("pkg.tgz", 3);

    let env = env_pairs(&stage_env(&stage, &artifact));
    assert_eq!(
        env,
        vec![
            ("mode".to_string(), "fast".to_string()),
            ("s3path".to_string(), "pkg.tgz".to_string()),
        ]
    );
}

#[test]
fn middle_stage_appends_derived_path() {
    let stage = StageConfigBuilder::new("transform").param("level", "9").build();
    let artifact = ArtifactPath::seed("pkg.tgz", 3).advance(3);

    let env = env_pairs(&stage_env(&stage, &artifact));
    assert_eq!(
        env,
        vec![
            ("level".to_string(), "9".to_string()),
            ("s3path".to_string(), "pkg-stage-1.tgz".to_string()),
        ]
    );
}

#[test]
fn last_stage_appends_final_marker() {
    let stage = StageConfigBuilder::new("export").build();
    let artifact = ArtifactPath::seed("pkg.tgz", 3).advance(3).advance(3);

    let env = env_pairs(&stage_env(&stage, &artifact));
    assert_eq!(
        env,
        vec![
            ("s3path".to_string(), "pkg-stage-2.tgz".to_string()),
            ("finalstage".to_string(), "true".to_string()),
        ]
    );
}

#[test]
fn injected_names_win_over_configuration() {
    let stage = StageConfigBuilder::new("transform")
        .s3path("stale.tgz")
        .build();
    let artifact = ArtifactPath::seed("pkg.tgz", 3).advance(3);

    let env = env_pairs(&stage_env(&stage, &artifact));
    let s3: Vec<_> = env.iter().filter(|(k, _)| k == "s3path").collect();
    assert_eq!(s3.len(), 1);
    assert_eq!(s3[0].1, "pkg-stage-1.tgz");
}

#[test]
fn job_carries_name_labels_namespace_and_policy() {
    let stage = StageConfigBuilder::new("ingest")
        .s3path("pkg.tgz")
        .ttl_seconds_after_finished(60)
        .backoff_limit(2)
        .active_deadline_seconds(3600)
        .build();
    let artifact = ArtifactPath::seed("pkg.tgz", 2);

    let job = build_job(&stage, &artifact, "batch").unwrap();

    assert_eq!(job.metadata.name.as_deref(), Some("ingest"));
    assert_eq!(job.metadata.namespace.as_deref(), Some("batch"));
    assert_eq!(job.metadata.labels, Some(job_labels(&stage)));

    let labels = job.metadata.labels.unwrap();
    assert_eq!(labels.get("app").map(String::as_str), Some("Cascade"));
    assert_eq!(labels.get("modulename").map(String::as_str), Some("ingest"));

    let spec = job.spec.unwrap();
    assert_eq!(spec.ttl_seconds_after_finished, Some(60));
    assert_eq!(spec.backoff_limit, Some(2));
    assert_eq!(spec.active_deadline_seconds, Some(3600));
}

#[test]
fn only_first_container_env_is_replaced() {
    let mut template: PodTemplateSpec =
        cascade_test_utils::builders::single_container_template("main");
    let pod = template.spec.as_mut().unwrap();
    let mut sidecar = pod.containers[0].clone();
    sidecar.name = "sidecar".to_string();
    pod.containers.push(sidecar);

    let stage = StageConfigBuilder::new("ingest")
        .template(template)
        .s3path("pkg.tgz")
        .build();
    let artifact = ArtifactPath::seed("pkg.tgz", 1);

    let job = build_job(&stage, &artifact, "default").unwrap();
    let pod = job.spec.unwrap().template.spec.unwrap();

    let main_env = env_pairs(pod.containers[0].env.as_ref().unwrap());
    assert!(!main_env.iter().any(|(k, _)| k == "PLACEHOLDER"));
    assert!(main_env.contains(&("finalstage".to_string(), "true".to_string())));

    let sidecar_env = env_pairs(pod.containers[1].env.as_ref().unwrap());
    assert_eq!(
        sidecar_env,
        vec![("PLACEHOLDER".to_string(), "from-template".to_string())]
    );

    // The rest of the template survives untouched.
    assert_eq!(pod.restart_policy.as_deref(), Some("Never"));
    assert_eq!(
        pod.containers[0].image.as_deref(),
        Some("registry.local/main:latest")
    );
}

#[test]
fn template_without_containers_is_rejected() {
    let stage = StageConfigBuilder::new("broken")
        .template(PodTemplateSpec::default())
        .build();
    let artifact = ArtifactPath::seed("pkg.tgz", 1);

    match build_job(&stage, &artifact, "default") {
        Err(CascadeError::InvalidTemplate { module, .. }) => assert_eq!(module, "broken"),
        other => panic!("expected InvalidTemplate, got {:?}", other),
    }
}
