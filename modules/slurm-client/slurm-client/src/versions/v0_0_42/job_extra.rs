//! Interactive allocations reuse the job descriptor.

use slurm_client_sdk::JobAllocateRequest;

use crate::convert::{noval_opt, opt, value};
use crate::wire::v0_0_42::{JobAllocReq, JobDescMsg};

#[must_use]
pub fn allocate_request(r: &JobAllocateRequest) -> JobAllocReq {
    JobAllocReq {
        job: Some(JobDescMsg {
            account: value::write(&r.account),
            cpus_per_task: opt::write(&r.cpus_per_task),
            current_working_directory: value::write(&r.working_directory),
            minimum_nodes: opt::write(&r.min_nodes),
            name: value::write(&r.name),
            partition: value::write(&r.partition),
            qos: value::write(&r.qos),
            tasks: opt::write(&r.tasks),
            time_limit: noval_opt::write(&r.time_limit),
            ..JobDescMsg::default()
        }),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn allocation_descriptor() {
        let req = allocate_request(&JobAllocateRequest {
            name: "interactive".to_owned(),
            min_nodes: Some(2),
            time_limit: Some(30),
            ..JobAllocateRequest::default()
        });
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["job"]["name"], "interactive");
        assert_eq!(body["job"]["minimum_nodes"], 2);
        assert_eq!(body["job"]["time_limit"]["number"], 30);
        assert!(body["job"].get("script").is_none());
    }
}
