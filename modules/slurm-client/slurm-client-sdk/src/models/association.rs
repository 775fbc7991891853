use serde::{Deserialize, Serialize};

use super::list::{ListQuery, Page, accepts};
use super::tres::TresMap;

/// An account/user/cluster/partition tuple with its limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub id: u32,
    pub account: String,
    pub user: String,
    pub cluster: String,
    pub partition: String,
    pub parent_account: String,
    pub is_default: bool,
    pub default_qos: String,
    pub qos_list: Vec<String>,
    pub fairshare: u32,
    pub priority: u32,
    pub max_jobs: u32,
    pub max_submit_jobs: u32,
    pub grp_jobs: u32,
    /// Minutes
    pub max_wall_time: u32,
    pub max_tres: TresMap,
    pub grp_tres: TresMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationCreate {
    pub account: String,
    pub user: String,
    pub cluster: String,
    pub partition: String,
    pub parent_account: String,
    pub is_default: bool,
    pub default_qos: String,
    pub qos_list: Vec<String>,
    pub fairshare: Option<u32>,
    pub priority: Option<u32>,
    pub max_jobs: Option<u32>,
    pub max_submit_jobs: Option<u32>,
    pub grp_jobs: Option<u32>,
    pub max_wall_time: Option<u32>,
    pub max_tres: TresMap,
    pub grp_tres: TresMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationUpdate {
    pub parent_account: Option<String>,
    pub is_default: Option<bool>,
    pub default_qos: Option<String>,
    pub qos_list: Option<Vec<String>>,
    pub fairshare: Option<u32>,
    pub priority: Option<u32>,
    pub max_jobs: Option<u32>,
    pub max_submit_jobs: Option<u32>,
    pub grp_jobs: Option<u32>,
    pub max_wall_time: Option<u32>,
    pub max_tres: Option<TresMap>,
    pub grp_tres: Option<TresMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationListOptions {
    pub ids: Vec<u32>,
    pub accounts: Vec<String>,
    pub users: Vec<String>,
    pub clusters: Vec<String>,
    pub partitions: Vec<String>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListQuery<Association> for AssociationListOptions {
    fn matches(&self, a: &Association) -> bool {
        accepts(&self.ids, &a.id)
            && accepts(&self.accounts, &a.account)
            && accepts(&self.users, &a.user)
            && accepts(&self.clusters, &a.cluster)
            && accepts(&self.partitions, &a.partition)
    }

    fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
