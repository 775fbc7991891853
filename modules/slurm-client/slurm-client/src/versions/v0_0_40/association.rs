// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.

use slurm_client_sdk::{Association, AssociationCreate, AssociationUpdate};

use super::association_extra;
use crate::convert::{converter, noval, noval_opt, opt, value};
use crate::wire::v0_0_40::Association as WireAssociation;

converter! {
    entity Association from WireAssociation {
        account => account: value,
        cluster => cluster: value,
        id => id: value,
        is_default => is_default: value,
        parent_account => parent_account: value,
        partition => partition: value,
        priority => priority: noval,
        qos => qos_list: value,
        shares_raw => fairshare: value,
        user => user: value,
    }
    create AssociationCreate into WireAssociation {
        account <= account: value,
        cluster <= cluster: value,
        is_default <= is_default: value,
        parent_account <= parent_account: value,
        partition <= partition: value,
        priority <= priority: noval_opt,
        qos <= qos_list: value,
        shares_raw <= fairshare: opt,
        user <= user: value,
        // dropped: id
    }
    update AssociationUpdate into WireAssociation {
        is_default <= is_default: opt,
        parent_account <= parent_account: opt,
        priority <= priority: noval_opt,
        qos <= qos_list: opt,
        shares_raw <= fairshare: opt,
        // dropped: account
        // dropped: cluster
        // dropped: id
        // dropped: partition
        // dropped: user
    }
    hooks = association_extra;
}
