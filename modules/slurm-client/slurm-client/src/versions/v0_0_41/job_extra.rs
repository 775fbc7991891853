//! The batch script still travels beside the descriptor.

use slurm_client_sdk::JobCreate;

use super::job;
use crate::convert::value;
use crate::wire::v0_0_41::JobSubmitReq;

#[must_use]
pub fn submit_request(c: &JobCreate) -> JobSubmitReq {
    JobSubmitReq {
        script: value::write(&c.script),
        job: Some(job::write_create(c)),
    }
}
