// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.

use slurm_client_sdk::Reservation;

use crate::convert::{converter, csv, flags, no_hooks, noval, noval_time, tres_str, value};
use crate::wire::v0_0_40::ReservationInfo;

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
    hooks = no_hooks;
}
