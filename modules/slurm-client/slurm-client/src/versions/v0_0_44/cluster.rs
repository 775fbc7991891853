// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.

use slurm_client_sdk::{Cluster, ClusterCreate};

use super::cluster_extra;
use crate::convert::{converter, flags, tres, value};
use crate::wire::v0_0_44::ClusterRec;

converter! {
    entity Cluster from ClusterRec {
        flags => flags: flags,
        name => name: value,
        nodes => nodes: value,
        rpc_version => rpc_version: value,
        select_plugin => select_plugin: value,
        tres => tres: tres,
    }
    create ClusterCreate into ClusterRec {
        flags <= flags: flags,
        name <= name: value,
        nodes <= nodes: value,
        // dropped: rpc_version
        // dropped: select_plugin
        // dropped: tres
    }
    hooks = cluster_extra;
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::versions::samples;

    #[test]
    fn round_trip_keeps_carried_fields() {
        let cluster = samples::cluster();
        assert_eq!(read(&write(&cluster)), retained(&cluster));
    }
}
