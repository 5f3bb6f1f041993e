//! Parses the JSON output of `qstat -fF json` into [`Job`] records.

use crate::error::AdapterError;
use crate::manager::parse_variable_list;
use rerun_core::{
    parse::{parse_datetime, parse_memory, parse_walltime},
    Cluster, Job, JobId, JobSpec, ResourceRequest, ResourceUsage, SchedulerId, State,
};
use serde_json::Value;

/// Parse the full `qstat -fF json` document, keyed by scheduler id under
/// the top-level `"Jobs"` object.
pub fn parse_qstat_json(raw: &str) -> Result<Vec<Job>, AdapterError> {
    let doc: Value = serde_json::from_str(raw)
        .map_err(|e| AdapterError::parse("qstat -fF json", e.to_string()))?;

    let Some(jobs) = doc.get("Jobs").and_then(Value::as_object) else {
        return Ok(Vec::new());
    };

    jobs.iter().map(|(scheduler_id, body)| job_from_json(scheduler_id, body)).collect()
}

fn job_from_json(scheduler_id: &str, body: &Value) -> Result<Job, AdapterError> {
    let get_str = |key: &str| body.get(key).and_then(Value::as_str).unwrap_or_default();

    let variables = parse_variable_list(get_str("Variable_List"));
    let job_id = variables
        .get("JOB_ID")
        .and_then(|s| JobId::from_string(s).ok())
        .unwrap_or_default();
    let experiment_path = variables.get("EXPERIMENT_PATH").cloned().unwrap_or_default();

    let job_state = State::parse_code(get_str("job_state"));
    let server = get_str("server").to_string();
    let cluster = Cluster::from_server(&server);

    let resource_list = body.get("Resource_List").cloned().unwrap_or(Value::Null);
    let resources_used = body.get("resources_used").cloned().unwrap_or(Value::Null);

    let spec = JobSpec {
        id: job_id,
        name: get_str("Job_Name").to_string(),
        experiment_path,
        cluster,
        state: job_state,
        modified_time: parse_datetime(get_str("mtime")).unwrap_or_else(|_| chrono::Utc::now()),
        comment: body.get("comment").and_then(Value::as_str).map(str::to_string),
        queue: body.get("queue").and_then(Value::as_str).map(str::to_string),
        project: body.get("project").and_then(Value::as_str).map(str::to_string),
        jobscript_path: variables.get("PBS_O_WORKDIR").cloned(),
    };

    Ok(Job {
        spec,
        scheduler_id: SchedulerId::new(scheduler_id),
        owner: get_str("Job_Owner").to_string(),
        resource_request: resource_request_from_json(&resource_list),
        resource_usage: resources_used_from_json(&resources_used),
        server,
        start_time: body.get("stime").and_then(Value::as_str).and_then(|s| parse_datetime(s).ok()),
        creation_time: parse_datetime(get_str("ctime")).unwrap_or_else(|_| chrono::Utc::now()),
        queue_time: parse_datetime(get_str("qtime")).unwrap_or_else(|_| chrono::Utc::now()),
        checkpoint: get_str("Checkpoint").to_string(),
        submit_arguments: body
            .get("Submit_arguments")
            .and_then(Value::as_str)
            .map(|s| s.split_whitespace().map(str::to_string).collect()),
        error_path: get_str("Error_Path").to_string(),
        output_path: get_str("Output_Path").to_string(),
        priority: body.get("Priority").and_then(Value::as_i64).unwrap_or(0) as i32,
        run_count: body.get("run_count").and_then(Value::as_u64).unwrap_or(0) as u32,
    })
}

fn resource_request_from_json(value: &Value) -> ResourceRequest {
    let get_str = |key: &str| value.get(key).and_then(Value::as_str).unwrap_or_default();

    ResourceRequest {
        mem_bytes: parse_memory(get_str("mem")).unwrap_or(0),
        ncpus: value.get("ncpus").and_then(Value::as_u64).unwrap_or(0) as u32,
        ngpus: value.get("ngpus").and_then(Value::as_u64).unwrap_or(0) as u32,
        node_count: value.get("nodect").and_then(Value::as_u64).unwrap_or(1) as u32,
        place: get_str("place").to_string(),
        priority: value.get("Priority").and_then(Value::as_i64).map(|p| p as i32),
        select_statement: get_str("select").to_string(),
        walltime: parse_walltime(get_str("walltime")).unwrap_or_else(|_| chrono::Duration::zero()),
    }
}

fn resources_used_from_json(value: &Value) -> Option<ResourceUsage> {
    if value.is_null() {
        return None;
    }
    let get_str = |key: &str| value.get(key).and_then(Value::as_str).unwrap_or_default();

    Some(ResourceUsage {
        cpu_percent: value.get("cpupercent").and_then(Value::as_u64).unwrap_or(0) as u32,
        cpu_time: parse_walltime(get_str("cput")).unwrap_or_else(|_| chrono::Duration::zero()),
        mem_bytes: parse_memory(get_str("mem")).unwrap_or(0),
        vmem_bytes: parse_memory(get_str("vmem")).unwrap_or(0),
        ncpus: value.get("ncpus").and_then(Value::as_u64).unwrap_or(0) as u32,
        ngpus: value.get("ngpus").and_then(Value::as_u64).unwrap_or(0) as u32,
        walltime: parse_walltime(get_str("walltime")).unwrap_or_else(|_| chrono::Duration::zero()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Jobs": {
            "7013474.pbs-7": {
                "Job_Name": "train",
                "Job_Owner": "jdoe@login1",
                "job_state": "R",
                "server": "pbs-7",
                "queue": "gpu72",
                "mtime": "Tue Mar  5 10:15:30 2024",
                "ctime": "Tue Mar  5 08:00:00 2024",
                "qtime": "Tue Mar  5 08:00:05 2024",
                "stime": "Tue Mar  5 09:00:00 2024",
                "Checkpoint": "u",
                "Error_Path": "/home/jdoe/train.e7013474",
                "Output_Path": "/home/jdoe/train.o7013474",
                "Priority": 0,
                "run_count": 1,
                "Variable_List": "JOB_ID=3fa85f64-5717-4562-b3fc-2c963f66afa6,EXPERIMENT_PATH=/home/jdoe/exp1",
                "Resource_List": {
                    "mem": "4gb",
                    "ncpus": 4,
                    "ngpus": 1,
                    "nodect": 1,
                    "place": "free",
                    "select": "1:ncpus=4:mem=4gb:ngpus=1",
                    "walltime": "72:00:00"
                },
                "resources_used": {
                    "cput": "60:00:00",
                    "mem": "2gb",
                    "vmem": "3gb",
                    "ncpus": 4,
                    "ngpus": 1,
                    "walltime": "71:00:00"
                }
            }
        }
    }"#;

    #[test]
    fn parses_sample_document() {
        let jobs = parse_qstat_json(SAMPLE).unwrap();
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.scheduler_id.as_str(), "7013474.pbs-7");
        assert_eq!(job.spec.experiment_path, "/home/jdoe/exp1");
        assert_eq!(job.spec.state, State::Running);
        assert_eq!(job.owner, "jdoe@login1");
        assert_eq!(job.resource_request.ncpus, 4);
        assert!(job.resource_usage.is_some());
        let pct = job.percent_completion();
        assert!((pct - 98.611).abs() < 0.01);
    }

    #[test]
    fn empty_jobs_object_yields_no_jobs() {
        let jobs = parse_qstat_json(r#"{"Jobs": {}}"#).unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn missing_jobs_key_yields_no_jobs() {
        let jobs = parse_qstat_json(r#"{}"#).unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(parse_qstat_json("not json").is_err());
    }
}
