// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.

use slurm_client_sdk::{Job, JobCreate, JobUpdate};

use crate::convert::{
    converter, custom, flags, no_hooks, noval, noval_opt, noval_time, opt, tres_str, value,
};
use crate::wire::v0_0_44::{JobDescMsg, JobInfo};

converter! {
    entity Job from JobInfo {
        account => account: value,
        array_job_id => array_job_id: noval,
        array_task_id => array_task_id: noval_opt,
        command => command: value,
        comment => comment: value,
        cpus => cpus: noval,
        current_working_directory => working_directory: value,
        end_time => end_time: noval_time,
        exit_code => exit_code: custom::exit_code,
        job_id => id: value,
        job_state => state: flags,
        name => name: value,
        nice => nice: value,
        node_count => node_count: noval,
        nodes => nodes: value,
        partition => partition: value,
        priority => priority: noval,
        qos => qos: value,
        standard_error => standard_error: value,
        standard_output => standard_output: value,
        start_time => start_time: noval_time,
        state_reason => state_reason: value,
        submit_time => submit_time: noval_time,
        time_limit => time_limit: noval,
        tres_req_str => tres_requested: tres_str,
        user_name => user_name: value,
        // dropped: batch_host
        // dropped: stdout_expanded
        // dropped: submit_line
    }
    create JobCreate into JobDescMsg {
        account <= account: value,
        array <= array: value,
        comment <= comment: value,
        cpus_per_task <= cpus_per_task: opt,
        current_working_directory <= working_directory: value,
        dependency <= dependency: value,
        environment <= environment: value,
        hold <= hold: value,
        mail_type <= mail_type: flags,
        mail_user <= mail_user: value,
        maximum_nodes <= max_nodes: opt,
        memory_per_node <= memory_per_node: noval_opt,
        minimum_nodes <= min_nodes: opt,
        name <= name: value,
        nice <= nice: opt,
        partition <= partition: value,
        priority <= priority: noval_opt,
        qos <= qos: value,
        script <= script: value,
        standard_error <= standard_error: value,
        standard_output <= standard_output: value,
        tasks <= tasks: opt,
        time_limit <= time_limit: noval_opt,
    }
    update JobUpdate into JobDescMsg {
        account <= account: opt,
        comment <= comment: opt,
        hold <= hold: opt,
        maximum_nodes <= max_nodes: opt,
        minimum_nodes <= min_nodes: opt,
        name <= name: opt,
        nice <= nice: opt,
        partition <= partition: opt,
        priority <= priority: noval_opt,
        qos <= qos: opt,
        time_limit <= time_limit: noval_opt,
        // dropped: array
        // dropped: cpus_per_task
        // dropped: current_working_directory
        // dropped: dependency
        // dropped: environment
        // dropped: mail_type
        // dropped: mail_user
        // dropped: memory_per_node
        // dropped: script
        // dropped: standard_error
        // dropped: standard_output
        // dropped: tasks
    }
    hooks = no_hooks;
}
