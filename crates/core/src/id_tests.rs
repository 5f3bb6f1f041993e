use super::*;

#[test]
fn job_id_roundtrips_through_string() {
    let id = JobId::new();
    let parsed = JobId::from_string(id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn job_id_rejects_garbage() {
    assert!(JobId::from_string("not-a-uuid").is_err());
}

#[test]
fn scheduler_id_is_opaque_string_not_number() {
    let id = SchedulerId::new("7013474.pbs-7");
    assert_eq!(id.as_str(), "7013474.pbs-7");
    assert_eq!(id.to_string(), "7013474.pbs-7");
}

#[test]
fn two_job_ids_are_distinct() {
    assert_ne!(JobId::new(), JobId::new());
}
