// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.

use slurm_client_sdk::{Node, NodeUpdate};

use crate::convert::{
    converter, flags, flags_opt, no_hooks, noval, noval_opt, noval_time, opt, tres_str, value,
};
use crate::wire::v0_0_44::{Node as WireNode, UpdateNodeMsg};

converter! {
    entity Node from WireNode {
        address => address: value,
        alloc_cpus => alloc_cpus: value,
        architecture => architecture: value,
        boot_time => boot_time: noval_time,
        cpus => cpus: value,
        features => features: value,
        free_mem => free_memory: noval,
        gres => gres: value,
        hostname => hostname: value,
        last_busy => last_busy: noval_time,
        name => name: value,
        operating_system => os: value,
        partitions => partitions: value,
        real_memory => real_memory: value,
        reason => reason: value,
        state => state: flags,
        tres => tres: tres_str,
        weight => weight: value,
        // dropped: topology
    }
    update NodeUpdate into UpdateNodeMsg {
        features <= features: opt,
        reason <= reason: opt,
        state <= state: flags_opt,
        weight <= weight: noval_opt,
    }
    hooks = no_hooks;
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::versions::samples;

    #[test]
    fn round_trip_keeps_carried_fields() {
        let node = samples::node();
        assert_eq!(read(&write(&node)), retained(&node));
    }

    #[test]
    fn empty_update_writes_nothing() {
        assert_eq!(write_update(&NodeUpdate::default()), UpdateNodeMsg::default());
    }
}
