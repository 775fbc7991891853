// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.

use slurm_client_sdk::{Wckey, WckeyCreate};

use crate::convert::{converter, flags, no_hooks, value};
use crate::wire::v0_0_40::Wckey as WireWckey;

converter! {
    entity Wckey from WireWckey {
        cluster => cluster: value,
        flags => flags: flags,
        id => id: value,
        name => name: value,
        user => user: value,
    }
    create WckeyCreate into WireWckey {
        cluster <= cluster: value,
        name <= name: value,
        user <= user: value,
        // dropped: flags
        // dropped: id
    }
    hooks = no_hooks;
}
