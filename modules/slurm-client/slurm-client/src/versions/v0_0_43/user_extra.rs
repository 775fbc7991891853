//! Users gain a bulk association endpoint in this revision.

use slurm_client_sdk::UserAssociationRequest;

use crate::convert::value;
use crate::wire::v0_0_43::{AssocRecSet, UserShort, UsersAddCond, UsersAssociationReq};

pub use crate::versions::v0_0_40::user_extra::{read, write, write_create, write_update};

#[cfg(test)]
pub use crate::versions::v0_0_40::user_extra::retain;

#[must_use]
pub fn association_request(r: &UserAssociationRequest) -> UsersAssociationReq {
    let single = |s: &str| (!s.is_empty()).then(|| vec![s.to_owned()]);
    UsersAssociationReq {
        association_condition: Some(UsersAddCond {
            accounts: Some(r.accounts.clone()),
            association: Some(AssocRecSet {
                defaultqos: value::write(&r.default_qos),
                qoslevel: value::write(&r.qos_list),
                ..AssocRecSet::default()
            }),
            clusters: single(&r.cluster),
            partitions: single(&r.partition),
            users: Some(r.users.clone()),
        }),
        user: Some(UserShort {
            defaultaccount: value::write(&r.default_account),
            ..UserShort::default()
        }),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn bulk_request_shape() {
        let req = association_request(&UserAssociationRequest {
            users: vec!["alice".to_owned(), "bob".to_owned()],
            accounts: vec!["physics".to_owned()],
            cluster: "hpc".to_owned(),
            default_account: "physics".to_owned(),
            ..UserAssociationRequest::default()
        });
        let body = serde_json::to_value(&req).unwrap();
        let cond = &body["association_condition"];
        assert_eq!(cond["users"][1], "bob");
        assert_eq!(cond["clusters"][0], "hpc");
        assert!(cond.get("partitions").is_none());
        assert_eq!(body["user"]["defaultaccount"], "physics");
    }
}
