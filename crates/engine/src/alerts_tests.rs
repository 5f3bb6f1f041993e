use super::*;
use rerun_adapters::PbsAdapter;
use rerun_channel::fake::FakeChannel;
use rerun_core::test_support::spec_with_id;
use rerun_core::{Clock, FakeClock, State};

fn store_with(spec: rerun_core::JobSpec) -> TrackingStore {
    let mut store = TrackingStore::open_in_memory().unwrap();
    store.upsert(&[spec], rerun_storage::OnConflict::Throw).unwrap();
    store
}

#[test]
fn queued_job_missing_from_live_is_flagged_alert() {
    let channel = FakeChannel::new();
    channel.on("qstat -fF json", r#"{"Jobs": {}}"#, 0);
    let adapter = PbsAdapter::new();
    let clock = FakeClock::new(chrono::Utc::now());

    let mut spec = spec_with_id(JobId::new());
    spec.state = State::Queued;
    let store = store_with(spec.clone());

    let flagged = run_missing_alerts(&channel, &adapter, &store, &clock).unwrap();
    assert_eq!(flagged, vec![spec.id]);

    let updated = store.get(spec.id).unwrap().unwrap();
    assert_eq!(updated.state, State::Alert);
    assert!(updated.comment.unwrap().contains(clock.now().to_rfc3339().as_str()));
}

#[test]
fn queued_job_present_in_live_is_left_alone() {
    let channel = FakeChannel::new();
    let job_id = JobId::new();
    let doc = format!(
        r#"{{"Jobs": {{"7013474.pbs-7": {{
            "job_state": "Q",
            "Variable_List": "JOB_ID={job_id},EXPERIMENT_PATH=/home/test/exp"
        }}}}}}"#
    );
    channel.on("qstat -fF json", doc, 0);
    let adapter = PbsAdapter::new();
    let clock = FakeClock::new(chrono::Utc::now());

    let mut spec = spec_with_id(job_id);
    spec.state = State::Queued;
    let store = store_with(spec.clone());

    let flagged = run_missing_alerts(&channel, &adapter, &store, &clock).unwrap();
    assert!(flagged.is_empty());

    let unchanged = store.get(spec.id).unwrap().unwrap();
    assert_eq!(unchanged.state, State::Queued);
}

#[test]
fn non_queued_tracked_jobs_are_never_considered() {
    let channel = FakeChannel::new();
    channel.on("qstat -fF json", r#"{"Jobs": {}}"#, 0);
    let adapter = PbsAdapter::new();
    let clock = FakeClock::new(chrono::Utc::now());

    let mut spec = spec_with_id(JobId::new());
    spec.state = State::Running;
    let store = store_with(spec.clone());

    let flagged = run_missing_alerts(&channel, &adapter, &store, &clock).unwrap();
    assert!(flagged.is_empty());
}
