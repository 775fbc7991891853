// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.

use slurm_client_sdk::{
    AccountAssociationRequest, AccountCreate, AccountUpdate, AssociationCreate, AssociationUpdate,
    ClusterCreate, ClusterUpdate, JobAllocateRequest, JobCreate, JobUpdate, NodeUpdate,
    PartitionCreate, PartitionUpdate, QosCreate, QosUpdate, ReservationCreate, ReservationUpdate,
    TresCreate, UserAssociationRequest, UserCreate, UserUpdate, WckeyCreate, WckeyUpdate,
};

use super::{Validate, Violation, at_least_one, domain, require};

impl Validate for JobCreate {
    fn validate(&self) -> Result<(), Violation> {
        require("script", &self.script)?;
        domain::job_create(self)
    }
}

impl Validate for JobUpdate {
    fn validate(&self) -> Result<(), Violation> {
        at_least_one(&[
            ("name", self.name.is_some()),
            ("account", self.account.is_some()),
            ("partition", self.partition.is_some()),
            ("qos", self.qos.is_some()),
            ("time_limit", self.time_limit.is_some()),
            ("priority", self.priority.is_some()),
            ("nice", self.nice.is_some()),
            ("comment", self.comment.is_some()),
            ("hold", self.hold.is_some()),
            ("min_nodes", self.min_nodes.is_some()),
            ("max_nodes", self.max_nodes.is_some()),
        ])?;
        domain::job_update(self)
    }
}

impl Validate for JobAllocateRequest {
    fn validate(&self) -> Result<(), Violation> {
        require("min_nodes", &self.min_nodes)?;
        domain::job_allocate(self)
    }
}

impl Validate for NodeUpdate {
    fn validate(&self) -> Result<(), Violation> {
        at_least_one(&[
            ("state", self.state.is_some()),
            ("reason", self.reason.is_some()),
            ("features", self.features.is_some()),
            ("weight", self.weight.is_some()),
        ])
    }
}

impl Validate for PartitionCreate {
    fn validate(&self) -> Result<(), Violation> {
        require("name", &self.name)
    }
}

impl Validate for PartitionUpdate {
    fn validate(&self) -> Result<(), Violation> {
        at_least_one(&[
            ("nodes", self.nodes.is_some()),
            ("max_time", self.max_time.is_some()),
            ("state", self.state.is_some()),
        ])
    }
}

impl Validate for AccountCreate {
    fn validate(&self) -> Result<(), Violation> {
        require("name", &self.name)?;
        domain::account_create(self)
    }
}

impl Validate for AccountUpdate {
    fn validate(&self) -> Result<(), Violation> {
        at_least_one(&[
            ("description", self.description.is_some()),
            ("organization", self.organization.is_some()),
            ("coordinators", self.coordinators.is_some()),
        ])
    }
}

impl Validate for AccountAssociationRequest {
    fn validate(&self) -> Result<(), Violation> {
        require("accounts", &self.accounts)?;
        domain::account_association(self)
    }
}

impl Validate for UserCreate {
    fn validate(&self) -> Result<(), Violation> {
        require("name", &self.name)
    }
}

impl Validate for UserUpdate {
    fn validate(&self) -> Result<(), Violation> {
        at_least_one(&[
            ("default_account", self.default_account.is_some()),
            ("default_wckey", self.default_wckey.is_some()),
            ("admin_level", self.admin_level.is_some()),
        ])
    }
}

impl Validate for UserAssociationRequest {
    fn validate(&self) -> Result<(), Violation> {
        require("users", &self.users)?;
        require("accounts", &self.accounts)
    }
}

impl Validate for AssociationCreate {
    fn validate(&self) -> Result<(), Violation> {
        require("account", &self.account)?;
        require("cluster", &self.cluster)?;
        domain::association_create(self)
    }
}

impl Validate for AssociationUpdate {
    fn validate(&self) -> Result<(), Violation> {
        at_least_one(&[
            ("parent_account", self.parent_account.is_some()),
            ("is_default", self.is_default.is_some()),
            ("default_qos", self.default_qos.is_some()),
            ("qos_list", self.qos_list.is_some()),
            ("fairshare", self.fairshare.is_some()),
            ("priority", self.priority.is_some()),
            ("max_jobs", self.max_jobs.is_some()),
            ("max_submit_jobs", self.max_submit_jobs.is_some()),
            ("grp_jobs", self.grp_jobs.is_some()),
            ("max_wall_time", self.max_wall_time.is_some()),
            ("max_tres", self.max_tres.is_some()),
            ("grp_tres", self.grp_tres.is_some()),
        ])?;
        domain::association_update(self)
    }
}

impl Validate for QosCreate {
    fn validate(&self) -> Result<(), Violation> {
        require("name", &self.name)?;
        domain::qos_create(self)
    }
}

impl Validate for QosUpdate {
    fn validate(&self) -> Result<(), Violation> {
        at_least_one(&[
            ("description", self.description.is_some()),
            ("priority", self.priority.is_some()),
            ("preempt_mode", self.preempt_mode.is_some()),
            ("preempt_list", self.preempt_list.is_some()),
            ("grace_time", self.grace_time.is_some()),
            ("max_jobs_per_user", self.max_jobs_per_user.is_some()),
            ("max_jobs_per_account", self.max_jobs_per_account.is_some()),
            ("max_submit_jobs_per_user", self.max_submit_jobs_per_user.is_some()),
            ("max_wall_time_per_job", self.max_wall_time_per_job.is_some()),
            ("max_tres_per_user", self.max_tres_per_user.is_some()),
            ("max_tres_per_job", self.max_tres_per_job.is_some()),
            ("usage_factor", self.usage_factor.is_some()),
            ("usage_threshold", self.usage_threshold.is_some()),
            ("flags", self.flags.is_some()),
        ])?;
        domain::qos_update(self)
    }
}

impl Validate for ReservationCreate {
    fn validate(&self) -> Result<(), Violation> {
        require("name", &self.name)?;
        require("start_time", &self.start_time)?;
        domain::reservation_create(self)
    }
}

impl Validate for ReservationUpdate {
    fn validate(&self) -> Result<(), Violation> {
        at_least_one(&[
            ("accounts", self.accounts.is_some()),
            ("users", self.users.is_some()),
            ("node_list", self.node_list.is_some()),
            ("node_count", self.node_count.is_some()),
            ("start_time", self.start_time.is_some()),
            ("end_time", self.end_time.is_some()),
            ("duration", self.duration.is_some()),
            ("flags", self.flags.is_some()),
        ])?;
        domain::reservation_update(self)
    }
}

impl Validate for ClusterCreate {
    fn validate(&self) -> Result<(), Violation> {
        require("name", &self.name)
    }
}

impl Validate for ClusterUpdate {
    fn validate(&self) -> Result<(), Violation> {
        at_least_one(&[
            ("nodes", self.nodes.is_some()),
            ("flags", self.flags.is_some()),
        ])
    }
}

impl Validate for WckeyCreate {
    fn validate(&self) -> Result<(), Violation> {
        require("name", &self.name)?;
        require("user", &self.user)?;
        require("cluster", &self.cluster)
    }
}

impl Validate for WckeyUpdate {
    fn validate(&self) -> Result<(), Violation> {
        at_least_one(&[
            ("flags", self.flags.is_some()),
        ])
    }
}

impl Validate for TresCreate {
    fn validate(&self) -> Result<(), Violation> {
        require("kind", &self.kind)
    }
}
