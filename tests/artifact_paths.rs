// tests/artifact_paths.rs

use cascade::artifact::{ArtifactPath, ARTIFACT_ENV, FINAL_STAGE_ENV};

#[test]
fn stage_zero_has_no_derived_value() {
    let artifact = ArtifactPath::seed("pkg.tgz", 3);
    assert_eq!(artifact.stage_num(), 0);
    assert!(!artifact.is_last_stage());
    assert_eq!(artifact.stage_value(), None);
    assert!(artifact.injected_env().is_empty());
}

#[test]
fn later_stages_derive_from_seed() {
    let stage0 = ArtifactPath::seed("bucket/pkg.tgz", 3);
    let stage1 = stage0.advance(3);
    let stage2 = stage1.advance(3);

    assert_eq!(stage1.stage_value().as_deref(), Some("bucket/pkg-stage-1.tgz"));
    assert!(!stage1.is_last_stage());

    assert_eq!(stage2.stage_value().as_deref(), Some("bucket/pkg-stage-2.tgz"));
    assert!(stage2.is_last_stage());

    // The seed never changes while advancing.
    assert_eq!(stage2.path(), "bucket/pkg.tgz");
}

#[test]
fn last_stage_gets_final_marker() {
    let last = ArtifactPath::seed("pkg.tgz", 2).advance(2);
    assert_eq!(
        last.injected_env(),
        vec![
            (ARTIFACT_ENV, "pkg-stage-1.tgz".to_string()),
            (FINAL_STAGE_ENV, "true".to_string()),
        ]
    );
}

#[test]
fn single_stage_scenario_is_last_without_path() {
    let only = ArtifactPath::seed("pkg.tgz", 1);
    assert!(only.is_last_stage());
    assert_eq!(
        only.injected_env(),
        vec![(FINAL_STAGE_ENV, "true".to_string())]
    );
}

#[test]
fn final_path_replaces_suffix() {
    for stages in 1..5 {
        let mut artifact = ArtifactPath::seed("s3://bucket/run/pkg.tgz", stages);
        for _ in 1..stages {
            artifact = artifact.advance(stages);
        }
        assert_eq!(artifact.final_path(), "s3://bucket/run/pkg-final.tgz");
    }
}

#[test]
fn prefix_stops_at_first_marker() {
    let artifact = ArtifactPath::seed("a.tgz.tgz", 2);
    assert_eq!(artifact.prefix(), "a");
    assert_eq!(artifact.final_path(), "a-final.tgz");
}

#[test]
fn seed_without_marker_is_used_whole() {
    let artifact = ArtifactPath::seed("bucket/pkg", 2).advance(2);
    assert_eq!(artifact.stage_value().as_deref(), Some("bucket/pkg-stage-1.tgz"));
    assert_eq!(artifact.final_path(), "bucket/pkg-final.tgz");
}
