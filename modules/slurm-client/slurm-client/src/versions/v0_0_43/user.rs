// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.

use slurm_client_sdk::{User, UserCreate, UserUpdate};

use super::user_extra;
use crate::convert::{converter, custom, value};
use crate::wire::v0_0_43::User as WireUser;

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
