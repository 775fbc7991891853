//! Fully populated entities for conversion tests. Every field is non-zero and
//! every keyword is known, so a lossless conversion must reproduce them.

use chrono::{DateTime, Utc};
use slurm_client_sdk::{
    Account, AccountFlag, AdminLevel, Association, Cluster, ClusterFlag, Job, JobState, Node,
    NodeState, Partition, PartitionState, PreemptMode, Qos, QosFlag, Reservation,
    ReservationFlag, TresMap, User, Wckey, WckeyFlag,
};

fn at(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

fn tres(entries: &[(&str, i64)]) -> TresMap {
    entries.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect()
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

pub fn job() -> Job {
    Job {
        id: 4242,
        name: "train-resnet".to_owned(),
        user_name: "alice".to_owned(),
        account: "physics".to_owned(),
        partition: "gpu".to_owned(),
        qos: "normal".to_owned(),
        state: vec![JobState::Running, JobState::Configuring],
        state_reason: "None".to_owned(),
        priority: 1200,
        nice: 10,
        time_limit: 90,
        submit_time: at(1_700_000_000),
        start_time: at(1_700_000_060),
        end_time: at(1_700_005_460),
        node_count: 2,
        cpus: 16,
        nodes: "gpu[01-02]".to_owned(),
        working_directory: "/home/alice".to_owned(),
        command: "/home/alice/train.sh".to_owned(),
        comment: "nightly".to_owned(),
        array_job_id: 4200,
        array_task_id: Some(3),
        exit_code: 2,
        standard_output: "/home/alice/out.log".to_owned(),
        standard_error: "/home/alice/err.log".to_owned(),
        tres_requested: tres(&[("cpu", 16), ("gres/gpu", 2)]),
    }
}

pub fn node() -> Node {
    Node {
        name: "gpu01".to_owned(),
        hostname: "gpu01.cluster".to_owned(),
        address: "10.0.0.11".to_owned(),
        state: vec![NodeState::Mixed, NodeState::Drain],
        reason: "bad dimm".to_owned(),
        cpus: 64,
        alloc_cpus: 16,
        real_memory: 512_000,
        free_memory: 100_000,
        partitions: names(&["gpu", "debug"]),
        features: names(&["a100", "nvlink"]),
        gres: "gpu:a100:4".to_owned(),
        architecture: "x86_64".to_owned(),
        os: "Linux 6.1".to_owned(),
        boot_time: at(1_699_000_000),
        last_busy: at(1_700_000_000),
        weight: 5,
        tres: tres(&[("cpu", 64), ("gres/gpu", 4)]),
    }
}

pub fn partition() -> Partition {
    Partition {
        name: "gpu".to_owned(),
        state: vec![PartitionState::Up],
        nodes: "gpu[01-08]".to_owned(),
        total_nodes: 8,
        total_cpus: 512,
        default_time: 60,
        max_time: 2880,
        max_nodes: 4,
        priority_tier: 10,
        qos: "gpu-qos".to_owned(),
        allowed_accounts: names(&["physics", "chemistry"]),
    }
}

pub fn account() -> Account {
    Account {
        name: "physics".to_owned(),
        description: "Physics department".to_owned(),
        organization: "science".to_owned(),
        coordinators: names(&["alice", "bob"]),
        flags: vec![AccountFlag::UsersAreCoords],
    }
}

pub fn user() -> User {
    User {
        name: "alice".to_owned(),
        default_account: "physics".to_owned(),
        default_wckey: "ml".to_owned(),
        admin_level: AdminLevel::Operator,
        coordinators: names(&["physics"]),
    }
}

pub fn association() -> Association {
    Association {
        id: 17,
        account: "physics".to_owned(),
        user: "alice".to_owned(),
        cluster: "hpc".to_owned(),
        partition: "gpu".to_owned(),
        parent_account: "science".to_owned(),
        is_default: true,
        default_qos: "normal".to_owned(),
        qos_list: names(&["normal", "high"]),
        fairshare: 100,
        priority: 5,
        max_jobs: 50,
        max_submit_jobs: 200,
        grp_jobs: 400,
        max_wall_time: 1440,
        max_tres: tres(&[("cpu", 128), ("gres/gpu", 8)]),
        grp_tres: tres(&[("cpu", 1024)]),
    }
}

pub fn qos() -> Qos {
    Qos {
        id: 3,
        name: "high".to_owned(),
        description: "High priority".to_owned(),
        priority: 1000,
        preempt_mode: vec![PreemptMode::Requeue],
        preempt_list: names(&["normal"]),
        grace_time: 120,
        max_jobs_per_user: 10,
        max_jobs_per_account: 100,
        max_submit_jobs_per_user: 20,
        max_wall_time_per_job: 720,
        max_tres_per_user: tres(&[("cpu", 256)]),
        max_tres_per_job: tres(&[("cpu", 64), ("gres/gpu", 4)]),
        usage_factor: 1.5,
        usage_threshold: 0.25,
        flags: vec![QosFlag::DenyLimit, QosFlag::NoDecay],
    }
}

pub fn reservation() -> Reservation {
    Reservation {
        name: "maint-window".to_owned(),
        accounts: names(&["physics", "chemistry"]),
        users: names(&["alice"]),
        partition: "gpu".to_owned(),
        node_list: "gpu[01-04]".to_owned(),
        node_count: 4,
        core_count: 256,
        start_time: at(1_701_000_000),
        end_time: at(1_701_007_200),
        duration: 120,
        flags: vec![ReservationFlag::Maintenance, ReservationFlag::Ignore],
        features: "a100".to_owned(),
        tres: tres(&[("cpu", 256)]),
    }
}

pub fn cluster() -> Cluster {
    Cluster {
        name: "hpc".to_owned(),
        nodes: "node[001-128]".to_owned(),
        controller_host: "slurmctld.hpc".to_owned(),
        controller_port: 6817,
        rpc_version: 10240,
        select_plugin: "select/cons_tres".to_owned(),
        flags: vec![ClusterFlag::Federation],
        tres: tres(&[("cpu", 8192), ("node", 128)]),
    }
}

pub fn wckey() -> Wckey {
    Wckey {
        id: 9,
        name: "ml".to_owned(),
        user: "alice".to_owned(),
        cluster: "hpc".to_owned(),
        flags: vec![WckeyFlag::Deleted],
    }
}
