use super::*;
use rerun_adapters::PbsAdapter;
use rerun_channel::fake::FakeChannel;
use rerun_core::{FakeClock, JobId};

/// Builds one `qstat -fF json` job entry body, in the same shape
/// `crates/adapters/src/qstat.rs` parses.
#[allow(clippy::too_many_arguments)]
fn job_entry(
    job_id: JobId,
    job_state: &str,
    error_path: &str,
    walltime: &str,
    used_walltime: Option<&str>,
    stime: Option<&str>,
    with_jobscript: bool,
) -> String {
    let variable_list = if with_jobscript {
        format!("JOB_ID={job_id},EXPERIMENT_PATH=/home/test/exp,PBS_O_WORKDIR=/p/job.pbs")
    } else {
        format!("JOB_ID={job_id},EXPERIMENT_PATH=/home/test/exp")
    };
    let resources_used = match used_walltime {
        Some(wt) => format!(r#","resources_used": {{"cput": "{wt}", "mem": "1gb", "vmem": "1gb", "ncpus": 1, "ngpus": 0, "walltime": "{wt}"}}"#),
        None => String::new(),
    };
    let stime_field = match stime {
        Some(s) => format!(r#","stime": "{s}""#),
        None => String::new(),
    };

    format!(
        r#"{{
            "Job_Name": "train",
            "Job_Owner": "jdoe@login1",
            "job_state": "{job_state}",
            "server": "pbs-7",
            "mtime": "Tue Mar  5 10:15:30 2024",
            "ctime": "Tue Mar  5 08:00:00 2024",
            "qtime": "Tue Mar  5 08:00:05 2024",
            "Checkpoint": "u",
            "Error_Path": "{error_path}",
            "Output_Path": "/home/jdoe/train.o1",
            "Priority": 0,
            "run_count": 1,
            "Variable_List": "{variable_list}",
            "Resource_List": {{
                "mem": "4gb", "ncpus": 4, "ngpus": 0, "nodect": 1,
                "place": "free", "select": "1:ncpus=4:mem=4gb", "walltime": "{walltime}"
            }}{resources_used}{stime_field}
        }}"#
    )
}

/// Wraps one job entry into a full `qstat -fF json` document.
#[allow(clippy::too_many_arguments)]
fn qstat_doc(
    scheduler_id: &str,
    job_id: JobId,
    job_state: &str,
    error_path: &str,
    walltime: &str,
    used_walltime: Option<&str>,
    stime: Option<&str>,
    with_jobscript: bool,
) -> String {
    qstat_doc_multi(&[(scheduler_id, job_id, job_state, error_path, walltime, used_walltime, stime, with_jobscript)])
}

/// Wraps several job entries into one `qstat -fF json` document.
#[allow(clippy::type_complexity)]
fn qstat_doc_multi(
    jobs: &[(&str, JobId, &str, &str, &str, Option<&str>, Option<&str>, bool)],
) -> String {
    let entries: Vec<String> = jobs
        .iter()
        .map(|(scheduler_id, job_id, job_state, error_path, walltime, used_walltime, stime, with_jobscript)| {
            format!(
                r#""{scheduler_id}": {}"#,
                job_entry(*job_id, job_state, error_path, walltime, *used_walltime, *stime, *with_jobscript)
            )
        })
        .collect();
    format!(r#"{{"Jobs": {{{}}}}}"#, entries.join(","))
}

fn empty_doc() -> &'static str {
    r#"{"Jobs": {}}"#
}

#[test]
fn near_walltime_live_job_that_was_never_tracked_is_rerun_in_place() {
    let channel = FakeChannel::new();
    let job_id = JobId::new();
    channel.on(
        "qstat -fF json",
        qstat_doc("7013474.pbs-7", job_id, "R", "/home/jdoe/train.e1", "72:00:00", Some("71:00:00"), None, false),
        0,
    );
    channel.on("qrerun 7013474.pbs-7", "", 0);

    let adapter = PbsAdapter::new();
    let store = TrackingStore::open_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let fallback = FallbackCache::new(dir.path().join("cache.json"));
    let clock = FakeClock::new(chrono::Utc::now());
    let mut engine = ReconcileEngine::new(&channel, &adapter, store, fallback, &clock);

    let report = engine.sweep(SweepConfig { threshold: 95.0, continue_on_rerun: false }).unwrap();

    assert_eq!(report.reran, vec![job_id]);
    assert!(!report.queue_full);
    // Never tracked to begin with, so no deletion of a "duplicate" and no
    // untracking — it stays tracked with exactly the one entry it merged in
    // at step 5, and that single-entry payload is what gets written out.
    assert!(!channel.calls().iter().any(|c| c.starts_with("qdel")));
    let tracked_rows = engine.store().all().unwrap();
    assert_eq!(tracked_rows.len(), 1);
    assert_eq!(tracked_rows[0].id, job_id);
    let attempted_mirror_write =
        channel.calls().into_iter().find(|c| c.starts_with("echo '") && c.contains("$HOME/.rerun-tracked.json"));
    let attempted_mirror_write = attempted_mirror_write.expect("sweep should attempt a mirror write");
    assert!(attempted_mirror_write.contains(&job_id.to_string()));
    assert_ne!(attempted_mirror_write, "echo '[]' > $HOME/.rerun-tracked.json");
}

#[test]
fn queue_full_on_first_rerun_stops_the_remaining_candidates() {
    let channel = FakeChannel::new();
    let job1 = JobId::new();
    let job2 = JobId::new();
    let doc = qstat_doc_multi(&[
        ("5001.pbs-7", job1, "R", "/home/jdoe/j1.e1", "72:00:00", Some("71:00:00"), None, false),
        ("5002.pbs-7", job2, "R", "/home/jdoe/j2.e1", "72:00:00", Some("71:00:00"), None, false),
    ]);
    channel.on("qstat -fF json", doc, 0);
    channel.on_failure("qrerun 5001.pbs-7", "", 38);

    let adapter = PbsAdapter::new();
    let store = TrackingStore::open_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let fallback_path = dir.path().join("cache.json");
    let fallback = FallbackCache::new(fallback_path.clone());
    let clock = FakeClock::new(chrono::Utc::now());
    let mut engine = ReconcileEngine::new(&channel, &adapter, store, fallback, &clock);

    let report = engine.sweep(SweepConfig { threshold: 95.0, continue_on_rerun: false }).unwrap();

    assert!(report.queue_full);
    assert!(report.reran.is_empty());
    assert!(!channel.calls().iter().any(|c| c == "qrerun 5002.pbs-7"));

    // Mirror push was never mocked, so it fails and the fallback cache
    // must hold both still-tracked jobs.
    assert!(report.mirror_write_failed);
    let cached = FallbackCache::new(fallback_path).read().unwrap();
    let cached_ids: Vec<_> = cached.iter().map(|s| s.id).collect();
    assert!(cached_ids.contains(&job1));
    assert!(cached_ids.contains(&job2));
}

#[test]
fn killed_tracked_job_that_vanished_from_live_is_rerun_via_history() {
    let channel = FakeChannel::new();
    let job_id = JobId::new();
    let scheduler_id = "7013474.pbs-7";

    // Sweep 1: job is live, running, far from the threshold. Populates
    // the engine's history cache so sweep 2 can classify it.
    channel.on(
        "qstat -fF json",
        qstat_doc(scheduler_id, job_id, "R", "/home/jdoe/train.e1", "72:00:00", None, None, false),
        0,
    );

    let adapter = PbsAdapter::new();
    let store = TrackingStore::open_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let fallback = FallbackCache::new(dir.path().join("cache.json"));
    let clock = FakeClock::new(chrono::Utc::now());
    let mut engine = ReconcileEngine::new(&channel, &adapter, store, fallback, &clock);

    let first = engine.sweep(SweepConfig { threshold: 95.0, continue_on_rerun: false }).unwrap();
    assert!(first.reran.is_empty());
    assert_eq!(engine.store().all().unwrap().len(), 1);

    // Sweep 2: job vanished from live. Its error tail shows a mem-kill
    // marker, so it should be rerun via qrerun and then untracked.
    channel.on("qstat -fF json", empty_doc(), 0);
    channel.on("tail -n 20 /home/jdoe/train.e1", "PBS: job killed: mem\n", 0);
    channel.on(&format!("qrerun {scheduler_id}"), "", 0);
    channel.on("echo '[]' > $HOME/.rerun-tracked.json", "", 0);

    let second = engine.sweep(SweepConfig { threshold: 95.0, continue_on_rerun: false }).unwrap();

    assert_eq!(second.reran, vec![job_id]);
    assert!(second.untracked_completed.is_empty());
    assert!(engine.store().all().unwrap().is_empty());
}

#[test]
fn job_that_vanished_while_running_past_walltime_and_not_killed_is_marked_completed() {
    let channel = FakeChannel::new();
    let job_id = JobId::new();
    let scheduler_id = "8013474.pbs-7";

    channel.on(
        "qstat -fF json",
        qstat_doc(
            scheduler_id,
            job_id,
            "R",
            "/home/jdoe/train.e2",
            "01:00:00",
            None,
            Some("Tue Mar  5 08:00:00 2024"),
            false,
        ),
        0,
    );

    let adapter = PbsAdapter::new();
    let store = TrackingStore::open_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let fallback = FallbackCache::new(dir.path().join("cache.json"));
    // Fixed clock, well after start_time (08:00) + walltime (1h) = 09:00.
    let clock = FakeClock::new(
        chrono::DateTime::parse_from_rfc3339("2024-03-05T10:00:00+00:00").unwrap().with_timezone(&chrono::Utc),
    );
    let mut engine = ReconcileEngine::new(&channel, &adapter, store, fallback, &clock);

    engine.sweep(SweepConfig { threshold: 95.0, continue_on_rerun: false }).unwrap();
    assert_eq!(engine.store().all().unwrap().len(), 1);

    channel.on("qstat -fF json", empty_doc(), 0);
    channel.on("tail -n 20 /home/jdoe/train.e2", "", 0);
    channel.on("echo '[]' > $HOME/.rerun-tracked.json", "", 0);

    let second = engine.sweep(SweepConfig { threshold: 95.0, continue_on_rerun: false }).unwrap();

    assert_eq!(second.untracked_completed, vec![job_id]);
    assert!(second.reran.is_empty());
    assert!(engine.store().all().unwrap().is_empty());
}

#[test]
fn killed_job_with_no_jobscript_to_fall_back_to_is_permanently_untracked() {
    let channel = FakeChannel::new();
    let job_id = JobId::new();
    let scheduler_id = "9013474.pbs-7";

    channel.on(
        "qstat -fF json",
        qstat_doc(scheduler_id, job_id, "R", "/home/jdoe/train.e3", "72:00:00", None, None, false),
        0,
    );

    let adapter = PbsAdapter::new();
    let store = TrackingStore::open_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let fallback = FallbackCache::new(dir.path().join("cache.json"));
    let clock = FakeClock::new(chrono::Utc::now());
    let mut engine = ReconcileEngine::new(&channel, &adapter, store, fallback, &clock);

    engine.sweep(SweepConfig { threshold: 95.0, continue_on_rerun: false }).unwrap();

    channel.on("qstat -fF json", empty_doc(), 0);
    channel.on("tail -n 20 /home/jdoe/train.e3", "PBS: job killed: walltime\n", 0);
    channel.on_failure(&format!("qrerun {scheduler_id}"), "not authorized", 159);
    channel.on("echo '[]' > $HOME/.rerun-tracked.json", "", 0);

    let second = engine.sweep(SweepConfig { threshold: 95.0, continue_on_rerun: false }).unwrap();

    assert_eq!(second.untracked_missing_script, vec![job_id]);
    assert!(second.reran.is_empty());
    assert!(engine.store().all().unwrap().is_empty());
}
