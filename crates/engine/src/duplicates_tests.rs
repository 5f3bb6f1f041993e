use super::*;
use rerun_adapters::PbsAdapter;
use rerun_channel::fake::FakeChannel;
use rerun_core::test_support::{job_from_spec, spec_with_id};
use rerun_core::State;

fn queued_job(scheduler_id: &str, jobscript_path: &str) -> Job {
    let mut spec = spec_with_id(JobId::new());
    spec.state = State::Queued;
    spec.jobscript_path = Some(jobscript_path.to_string());
    job_from_spec(spec, scheduler_id)
}

fn running_job(scheduler_id: &str, jobscript_path: &str) -> Job {
    let mut job = queued_job(scheduler_id, jobscript_path);
    job.spec.state = State::Running;
    job
}

#[test]
fn keeps_first_and_deletes_later_duplicates_by_jobscript_path() {
    let channel = FakeChannel::new();
    channel.on("qdel 1002.pbs-7", "", 0);
    channel.on("qdel 1003.pbs-7", "", 0);
    let adapter = PbsAdapter::new();

    let first = queued_job("1001.pbs-7", "/p/job.pbs");
    let dup1 = queued_job("1002.pbs-7", "/p/job.pbs");
    let dup2 = queued_job("1003.pbs-7", "/p/job.pbs");
    let live = Queue::from_vec(vec![first.clone(), dup1.clone(), dup2.clone()]);

    let deleted = delete_duplicates(&channel, &adapter, &live, false);

    assert_eq!(deleted, vec![dup1.spec.id, dup2.spec.id]);
    assert_eq!(channel.calls(), vec!["qdel 1002.pbs-7", "qdel 1003.pbs-7"]);
}

#[test]
fn distinct_jobscript_paths_are_never_duplicates() {
    let channel = FakeChannel::new();
    let adapter = PbsAdapter::new();

    let a = queued_job("2001.pbs-7", "/p/a.pbs");
    let b = queued_job("2002.pbs-7", "/p/b.pbs");
    let live = Queue::from_vec(vec![a, b]);

    let deleted = delete_duplicates(&channel, &adapter, &live, false);
    assert!(deleted.is_empty());
    assert!(channel.calls().is_empty());
}

#[test]
fn running_jobs_are_ignored_unless_count_running_is_set() {
    let channel = FakeChannel::new();
    let adapter = PbsAdapter::new();

    let queued = queued_job("3001.pbs-7", "/p/job.pbs");
    let running = running_job("3002.pbs-7", "/p/job.pbs");
    let live = Queue::from_vec(vec![queued.clone(), running.clone()]);

    let deleted = delete_duplicates(&channel, &adapter, &live, false);
    assert!(deleted.is_empty());

    channel.on("qdel 3002.pbs-7", "", 0);
    let deleted = delete_duplicates(&channel, &adapter, &live, true);
    assert_eq!(deleted, vec![running.spec.id]);
}

#[test]
fn a_failed_deletion_is_swallowed_and_does_not_stop_the_pass() {
    let channel = FakeChannel::new();
    channel.on_failure("qdel 4002.pbs-7", "permission denied", 1);
    channel.on("qdel 4003.pbs-7", "", 0);
    let adapter = PbsAdapter::new();

    let first = queued_job("4001.pbs-7", "/p/job.pbs");
    let dup1 = queued_job("4002.pbs-7", "/p/job.pbs");
    let dup2 = queued_job("4003.pbs-7", "/p/job.pbs");
    let live = Queue::from_vec(vec![first, dup1, dup2.clone()]);

    let deleted = delete_duplicates(&channel, &adapter, &live, false);
    assert_eq!(deleted, vec![dup2.spec.id]);
}
