// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.

use slurm_client_sdk::{Reservation, ReservationCreate, ReservationUpdate};

use crate::convert::{
    converter, csv, flags, flags_opt, no_hooks, noval, noval_opt, noval_time, opt, tres_str, value,
};
use crate::wire::v0_0_43::{ReservationDescMsg, ReservationInfo};

converter! {
    entity Reservation from ReservationInfo {
        accounts => accounts: csv,
        core_count => core_count: value,
        duration => duration: noval,
        end_time => end_time: noval_time,
        features => features: value,
        flags => flags: flags,
        name => name: value,
        node_count => node_count: value,
        node_list => node_list: value,
        partition => partition: value,
        start_time => start_time: noval_time,
        tres => tres: tres_str,
        users => users: csv,
    }
    create ReservationCreate into ReservationDescMsg {
        accounts <= accounts: value,
        duration <= duration: noval_opt,
        end_time <= end_time: noval_time,
        features <= features: value,
        flags <= flags: flags,
        groups <= groups: value,
        name <= name: value,
        node_count <= node_count: noval_opt,
        node_list <= node_list: value,
        partition <= partition: value,
        start_time <= start_time: noval_time,
        users <= users: value,
    }
    update ReservationUpdate into ReservationDescMsg {
        accounts <= accounts: opt,
        duration <= duration: noval_opt,
        end_time <= end_time: noval_time,
        flags <= flags: flags_opt,
        node_count <= node_count: noval_opt,
        node_list <= node_list: opt,
        start_time <= start_time: noval_time,
        users <= users: opt,
        // dropped: features
        // dropped: groups
        // dropped: name
        // dropped: partition
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
        let reservation = samples::reservation();
        assert_eq!(read(&write(&reservation)), retained(&reservation));
    }

    #[test]
    fn empty_update_writes_nothing() {
        assert_eq!(write_update(&ReservationUpdate::default()), ReservationDescMsg::default());
    }
}
