//! End-to-end adapter scenarios covering the PBS rerun/resubmit paths.

use rerun_adapters::{AdapterError, JobSubmissionError, PbsAdapter, WorkloadManager};
use rerun_channel::fake::FakeChannel;
use rerun_core::test_support::job_with_scheduler_id;

#[test]
fn queued_rerun_near_walltime_calls_qrerun() {
    let channel = FakeChannel::new();
    channel.on("qrerun 7013474", "", 0);
    let adapter = PbsAdapter::new();
    let job = job_with_scheduler_id("7013474");

    adapter.rerun_job(&channel, &job).unwrap();
    assert_eq!(channel.calls(), vec!["qrerun 7013474"]);
}

#[test]
fn killed_by_mem_falls_back_to_qsub_after_exit_159() {
    let channel = FakeChannel::new();
    channel.on_failure("qrerun 1000.pbs-7", "not authorized", 159);
    channel.on("qsub /p/job.pbs", "1001.pbs-7", 0);
    let adapter = PbsAdapter::new();
    let mut job = job_with_scheduler_id("1000.pbs-7");
    job.spec.jobscript_path = Some("/p/job.pbs".to_string());

    adapter.rerun_job(&channel, &job).unwrap();

    // Second rerun attempt must skip straight to qsub: qrerun_allowed flipped.
    channel.on("qsub /p/job.pbs", "1002.pbs-7", 0);
    let mut job2 = job_with_scheduler_id("1003.pbs-7");
    job2.spec.jobscript_path = Some("/p/job.pbs".to_string());
    adapter.rerun_job(&channel, &job2).unwrap();

    assert!(!channel.calls().iter().any(|c| c == "qrerun 1003.pbs-7"));
}

#[test]
fn queue_full_on_rerun_is_reported_as_queue_full() {
    let channel = FakeChannel::new();
    channel.on_failure("qrerun 2000.pbs-7", "", 38);
    let adapter = PbsAdapter::new();
    let job = job_with_scheduler_id("2000.pbs-7");

    let err = adapter.rerun_job(&channel, &job).unwrap_err();
    match err {
        AdapterError::Submission(JobSubmissionError::QueueFull) => {}
        other => panic!("expected QueueFull, got {other:?}"),
    }
}

#[test]
fn missing_jobscript_on_qsub_fallback_is_reported() {
    let channel = FakeChannel::new();
    channel.on_failure("qrerun 3000.pbs-7", "not authorized", 159);
    channel.on_failure("qsub /removed", "script file:: No such file or directory", 1);
    let adapter = PbsAdapter::new();
    let mut job = job_with_scheduler_id("3000.pbs-7");
    job.spec.jobscript_path = Some("/removed".to_string());

    let err = adapter.rerun_job(&channel, &job).unwrap_err();
    match err {
        AdapterError::Submission(JobSubmissionError::MissingJobScript(_)) => {}
        other => panic!("expected MissingJobScript, got {other:?}"),
    }
}

#[test]
fn was_killed_detects_mem_marker_in_error_tail() {
    let channel = FakeChannel::new();
    let job = job_with_scheduler_id("4000.pbs-7");
    channel.on(format!("tail -n 20 {}", job.error_path), "PBS: job killed: mem\n", 0);
    let adapter = PbsAdapter::new();

    assert!(adapter.was_killed(&channel, &job).unwrap());
}

#[test]
fn capability_probe_skips_exit_127_and_picks_first_match() {
    let channel = FakeChannel::new();
    channel.on_failure("jobhist", "not found", 127);
    channel.on("qstat -fF json", "{}", 0);

    let ucl = rerun_adapters::UclAdapter::new();
    let pbs = PbsAdapter::new();
    let candidates: Vec<&dyn WorkloadManager> = vec![&ucl, &pbs];
    let detected = rerun_adapters::detect(&channel, &candidates).unwrap();
    assert_eq!(detected.name(), "pbs");
}
