// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.

use slurm_client_sdk::{Qos, QosCreate, QosUpdate};

use super::qos_extra;
use crate::convert::{converter, flags, flags_opt, noval, noval_opt, opt, value};
use crate::wire::v0_0_42::Qos as WireQos;

converter! {
    entity Qos from WireQos {
        description => description: value,
        flags => flags: flags,
        id => id: value,
        name => name: value,
        priority => priority: noval,
        usage_factor => usage_factor: noval,
        usage_threshold => usage_threshold: noval,
    }
    create QosCreate into WireQos {
        description <= description: value,
        flags <= flags: flags,
        name <= name: value,
        priority <= priority: noval_opt,
        usage_factor <= usage_factor: noval_opt,
        usage_threshold <= usage_threshold: noval_opt,
        // dropped: id
    }
    update QosUpdate into WireQos {
        description <= description: opt,
        flags <= flags: flags_opt,
        priority <= priority: noval_opt,
        usage_factor <= usage_factor: noval_opt,
        usage_threshold <= usage_threshold: noval_opt,
        // dropped: id
        // dropped: name
    }
    hooks = qos_extra;
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::versions::samples;

    #[test]
    fn round_trip_keeps_carried_fields() {
        let qos = samples::qos();
        assert_eq!(read(&write(&qos)), retained(&qos));
    }

    #[test]
    fn empty_update_writes_nothing() {
        assert_eq!(write_update(&QosUpdate::default()), WireQos::default());
    }
}
