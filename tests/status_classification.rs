// tests/status_classification.rs

use cascade::exec::{JobCounters, JobStatus};
use k8s_openapi::api::batch::v1::{Job, JobStatus as K8sJobStatus};

#[test]
fn zero_counters_mean_not_started() {
    assert_eq!(
        JobStatus::classify(JobCounters::new(0, 0, 0)),
        JobStatus::NotStarted
    );
}

#[test]
fn active_only_means_running() {
    assert_eq!(
        JobStatus::classify(JobCounters::new(1, 0, 0)),
        JobStatus::Running
    );
}

#[test]
fn succeeded_wins_over_failed_and_active() {
    assert_eq!(
        JobStatus::classify(JobCounters::new(1, 1, 3)),
        JobStatus::Succeeded
    );
}

#[test]
fn failed_wins_over_active() {
    // A retrying job with one failed pod already counts as failed.
    assert_eq!(
        JobStatus::classify(JobCounters::new(1, 0, 1)),
        JobStatus::Failed
    );
}

#[test]
fn counters_from_job_default_to_zero() {
    let job = Job::default();
    assert_eq!(JobCounters::from_job(&job), JobCounters::default());

    let job = Job {
        status: Some(K8sJobStatus {
            active: Some(2),
            failed: None,
            succeeded: Some(1),
            ..K8sJobStatus::default()
        }),
        ..Job::default()
    };
    assert_eq!(JobCounters::from_job(&job), JobCounters::new(2, 1, 0));
}

#[test]
fn advance_never_moves_backwards() {
    use JobStatus::*;

    assert_eq!(NotStarted.advance(Running), Running);
    assert_eq!(Running.advance(NotStarted), Running);
    assert_eq!(Running.advance(Succeeded), Succeeded);
    assert_eq!(NotStarted.advance(Failed), Failed);
    assert_eq!(Succeeded.advance(Running), Succeeded);
    assert_eq!(Failed.advance(Succeeded), Failed);
}
