// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.

use slurm_client_sdk::{Account, AccountUpdate};

use crate::convert::{converter, custom, flags, no_hooks, opt, value};
use crate::wire::v0_0_42::Account as WireAccount;

converter! {
    entity Account from WireAccount {
        coordinators => coordinators: custom::coordinators,
        description => description: value,
        flags => flags: flags,
        name => name: value,
        organization => organization: value,
    }
    update AccountUpdate into WireAccount {
        coordinators <= coordinators: custom::coordinators_opt,
        description <= description: opt,
        organization <= organization: opt,
        // dropped: flags
        // dropped: name
    }
    hooks = no_hooks;
}
