//! Accounts are created through the account association endpoint, which
//! carries the account record and its first association together.

use slurm_client_sdk::{AccountAssociationRequest, AccountCreate};

use crate::convert::{noval_opt, opt, tres, value};
use crate::wire::v0_0_42::{AccountShort, AccountsAddCond, AccountsAssociationReq, AssocRecSet};

#[must_use]
pub fn create_request(c: &AccountCreate) -> AccountsAssociationReq {
    let mut max_tres = c.max_tres.clone();
    if let Some(cpus) = c.max_cpus {
        max_tres.entry("cpu".to_owned()).or_insert(i64::from(cpus));
    }
    AccountsAssociationReq {
        account: Some(AccountShort {
            description: value::write(&c.description),
            organization: value::write(&c.organization),
        }),
        association_condition: Some(AccountsAddCond {
            accounts: Some(vec![c.name.clone()]),
            association: Some(AssocRecSet {
                defaultqos: value::write(&c.default_qos),
                fairshare: opt::write(&c.fairshare),
                grpjobs: noval_opt::write(&c.grp_jobs),
                grptres: tres::write(&c.grp_tres),
                maxjobs: noval_opt::write(&c.max_jobs),
                maxsubmitjobs: noval_opt::write(&c.max_submit_jobs),
                maxtresperjob: tres::write(&max_tres),
                maxwalldurationperjob: noval_opt::write(&c.max_wall_time),
                parent: value::write(&c.parent_account),
                priority: noval_opt::write(&c.priority),
                qoslevel: value::write(&c.qos_list),
            }),
            clusters: clusters(&c.cluster),
        }),
    }
}

#[must_use]
pub fn association_request(r: &AccountAssociationRequest) -> AccountsAssociationReq {
    AccountsAssociationReq {
        account: Some(AccountShort {
            description: value::write(&r.description),
            organization: value::write(&r.organization),
        }),
        association_condition: Some(AccountsAddCond {
            accounts: Some(r.accounts.clone()),
            association: Some(AssocRecSet {
                defaultqos: value::write(&r.default_qos),
                fairshare: opt::write(&r.fairshare),
                parent: value::write(&r.parent_account),
                qoslevel: value::write(&r.qos_list),
                ..AssocRecSet::default()
            }),
            clusters: clusters(&r.cluster),
        }),
    }
}

fn clusters(cluster: &str) -> Option<Vec<String>> {
    (!cluster.is_empty()).then(|| vec![cluster.to_owned()])
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use slurm_client_sdk::TresMap;

    #[test]
    fn create_carries_limits_in_the_association() {
        let req = create_request(&AccountCreate {
            name: "physics".to_owned(),
            description: "Physics dept".to_owned(),
            cluster: "hpc".to_owned(),
            parent_account: "root".to_owned(),
            max_jobs: Some(50),
            max_cpus: Some(128),
            ..AccountCreate::default()
        });
        let body = serde_json::to_value(&req).unwrap();
        let cond = &body["association_condition"];
        assert_eq!(cond["accounts"][0], "physics");
        assert_eq!(cond["clusters"][0], "hpc");
        assert_eq!(cond["association"]["parent"], "root");
        assert_eq!(cond["association"]["maxjobs"]["number"], 50);
        assert_eq!(cond["association"]["maxtresperjob"][0]["type"], "cpu");
        assert_eq!(cond["association"]["maxtresperjob"][0]["count"], 128);
        assert_eq!(body["account"]["description"], "Physics dept");
    }

    #[test]
    fn explicit_cpu_tres_wins_over_max_cpus() {
        let mut max_tres = TresMap::new();
        max_tres.insert("cpu".to_owned(), 64);
        let req = create_request(&AccountCreate {
            name: "chem".to_owned(),
            max_cpus: Some(128),
            max_tres,
            ..AccountCreate::default()
        });
        let set = req.association_condition.unwrap().association.unwrap();
        assert_eq!(set.maxtresperjob.unwrap()[0].count, Some(64));
    }

    #[test]
    fn association_request_lists_every_account() {
        let req = association_request(&AccountAssociationRequest {
            accounts: vec!["a".to_owned(), "b".to_owned()],
            cluster: String::new(),
            ..AccountAssociationRequest::default()
        });
        let cond = req.association_condition.unwrap();
        assert_eq!(cond.accounts.unwrap().len(), 2);
        assert!(cond.clusters.is_none());
    }
}
