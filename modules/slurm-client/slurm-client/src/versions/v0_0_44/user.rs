// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.

use slurm_client_sdk::{User, UserCreate, UserUpdate};

use super::user_extra;
use crate::convert::{converter, custom, value};
use crate::wire::v0_0_44::User as WireUser;

converter! {
    entity User from WireUser {
        administrator_level => admin_level: custom::admin_level,
        coordinators => coordinators: custom::coordinators,
        name => name: value,
    }
    create UserCreate into WireUser {
        administrator_level <= admin_level: custom::admin_level,
        name <= name: value,
        // dropped: coordinators
    }
    update UserUpdate into WireUser {
        administrator_level <= admin_level: custom::admin_level_opt,
        // dropped: coordinators
        // dropped: name
    }
    hooks = user_extra;
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::versions::samples;

    #[test]
    fn round_trip_keeps_carried_fields() {
        let user = samples::user();
        assert_eq!(read(&write(&user)), retained(&user));
    }

    #[test]
    fn empty_update_writes_nothing() {
        assert_eq!(write_update(&UserUpdate::default()), WireUser::default());
    }
}
