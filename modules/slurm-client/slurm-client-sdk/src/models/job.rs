use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::list::{ListQuery, Page, accepts, accepts_any};
use super::tres::TresMap;

slurm_enum! {
    /// Base and flag states a job can report.
    JobState {
        Pending => "PENDING",
        Running => "RUNNING",
        Suspended => "SUSPENDED",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
        Failed => "FAILED",
        Timeout => "TIMEOUT",
        NodeFail => "NODE_FAIL",
        Preempted => "PREEMPTED",
        BootFail => "BOOT_FAIL",
        Deadline => "DEADLINE",
        OutOfMemory => "OUT_OF_MEMORY",
        Completing => "COMPLETING",
        Configuring => "CONFIGURING",
        Resizing => "RESIZING",
        Requeued => "REQUEUED",
        RequeueFed => "REQUEUE_FED",
        RequeueHold => "REQUEUE_HOLD",
        SpecialExit => "SPECIAL_EXIT",
    }
}

impl JobState {
    /// The job will not run again without a requeue.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed
                | Self::Cancelled
                | Self::Failed
                | Self::Timeout
                | Self::NodeFail
                | Self::Preempted
                | Self::BootFail
                | Self::Deadline
                | Self::OutOfMemory
        )
    }
}

slurm_enum! {
    /// Events that trigger a job notification mail.
    MailType {
        None => "NONE",
        Begin => "BEGIN",
        End => "END",
        Fail => "FAIL",
        Requeue => "REQUEUE",
        All => "ALL",
        TimeLimit => "TIME_LIMIT",
        ArrayTasks => "ARRAY_TASKS",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: u32,
    pub name: String,
    pub user_name: String,
    pub account: String,
    pub partition: String,
    pub qos: String,
    pub state: Vec<JobState>,
    pub state_reason: String,
    pub priority: u32,
    pub nice: i32,
    /// Minutes; zero when unset.
    pub time_limit: u32,
    pub submit_time: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub node_count: u32,
    pub cpus: u32,
    pub nodes: String,
    pub working_directory: String,
    pub command: String,
    pub comment: String,
    pub array_job_id: u32,
    pub array_task_id: Option<u32>,
    pub exit_code: i32,
    pub standard_output: String,
    pub standard_error: String,
    pub tres_requested: TresMap,
}

impl Job {
    #[must_use]
    pub fn has_state(&self, state: JobState) -> bool {
        self.state.contains(&state)
    }
}

/// Batch job submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCreate {
    /// Batch script, starting with `#!`. Required.
    pub script: String,
    pub name: String,
    pub account: String,
    pub partition: String,
    pub qos: String,
    pub time_limit: Option<u32>,
    pub priority: Option<u32>,
    pub nice: Option<i32>,
    pub min_nodes: Option<u32>,
    pub max_nodes: Option<u32>,
    pub cpus_per_task: Option<u32>,
    pub tasks: Option<u32>,
    /// MiB
    pub memory_per_node: Option<u64>,
    pub working_directory: String,
    /// `NAME=value` pairs.
    pub environment: Vec<String>,
    pub standard_output: String,
    pub standard_error: String,
    pub comment: String,
    /// Array expression, e.g. `1-10%2`.
    pub array: String,
    /// Dependency expression, e.g. `afterok:12:13`.
    pub dependency: String,
    pub mail_type: Vec<MailType>,
    pub mail_user: String,
    pub hold: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobUpdate {
    pub name: Option<String>,
    pub account: Option<String>,
    pub partition: Option<String>,
    pub qos: Option<String>,
    pub time_limit: Option<u32>,
    pub priority: Option<u32>,
    pub nice: Option<i32>,
    pub comment: Option<String>,
    pub hold: Option<bool>,
    pub min_nodes: Option<u32>,
    pub max_nodes: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSubmitResponse {
    pub job_id: u32,
    pub step_id: String,
    pub message: String,
    pub warnings: Vec<String>,
}

/// Interactive allocation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAllocateRequest {
    pub name: String,
    pub account: String,
    pub partition: String,
    pub qos: String,
    pub time_limit: Option<u32>,
    /// Required.
    pub min_nodes: Option<u32>,
    pub cpus_per_task: Option<u32>,
    pub tasks: Option<u32>,
    pub working_directory: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAllocation {
    pub job_id: u32,
    pub message: String,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListOptions {
    pub ids: Vec<u32>,
    pub users: Vec<String>,
    pub accounts: Vec<String>,
    pub partitions: Vec<String>,
    pub states: Vec<JobState>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListQuery<Job> for JobListOptions {
    fn matches(&self, job: &Job) -> bool {
        accepts(&self.ids, &job.id)
            && accepts(&self.users, &job.user_name)
            && accepts(&self.accounts, &job.account)
            && accepts(&self.partitions, &job.partition)
            && accepts_any(&self.states, &job.state)
    }

    fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn state_keywords() {
        assert_eq!(JobState::parse("running"), JobState::Running);
        assert_eq!(JobState::from("OUT_OF_MEMORY"), JobState::OutOfMemory);
        assert_eq!(JobState::parse("LAUNCHED_SOMEWHERE"), JobState::Unknown);
        assert_eq!(JobState::NodeFail.to_string(), "NODE_FAIL");
        assert!(JobState::Timeout.is_terminal());
        assert!(!JobState::Pending.is_terminal());
    }

    #[test]
    fn state_serde_uses_wire_spelling() {
        let json = serde_json::to_string(&vec![JobState::Pending, JobState::RequeueHold]).unwrap();
        assert_eq!(json, r#"["PENDING","REQUEUE_HOLD"]"#);
        let back: Vec<JobState> = serde_json::from_str(r#"["COMPLETED","WHATEVER"]"#).unwrap();
        assert_eq!(back, vec![JobState::Completed, JobState::Unknown]);
    }

    #[test]
    fn list_filter_matches_state_and_user() {
        let job = Job {
            id: 7,
            user_name: "alice".to_owned(),
            state: vec![JobState::Running],
            ..Job::default()
        };
        let opts = JobListOptions {
            users: vec!["alice".to_owned()],
            states: vec![JobState::Running, JobState::Pending],
            ..JobListOptions::default()
        };
        assert!(opts.matches(&job));
        let opts = JobListOptions {
            ids: vec![8],
            ..JobListOptions::default()
        };
        assert!(!opts.matches(&job));
    }
}
