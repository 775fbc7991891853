// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.

use slurm_client_sdk::Partition;

use super::partition_extra;
use crate::convert::{converter, value};
use crate::wire::v0_0_40::PartitionInfo;

converter! {
    entity Partition from PartitionInfo {
        name => name: value,
    }
    hooks = partition_extra;
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::versions::samples;

    #[test]
    fn round_trip_keeps_carried_fields() {
        let partition = samples::partition();
        assert_eq!(read(&write(&partition)), retained(&partition));
    }
}
