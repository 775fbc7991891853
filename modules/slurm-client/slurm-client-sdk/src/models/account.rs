use serde::{Deserialize, Serialize};

use super::list::{ListQuery, Page, accepts};
use super::tres::TresMap;

slurm_enum! {
    AccountFlag {
        Deleted => "DELETED",
        WithAssociations => "WITH_ASSOCIATIONS",
        WithCoordinators => "WITH_COORDINATORS",
        NoUsersAreCoords => "NO_USERS_ARE_COORDS",
        UsersAreCoords => "USERS_ARE_COORDS",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub description: String,
    pub organization: String,
    /// User names that coordinate this account.
    pub coordinators: Vec<String>,
    pub flags: Vec<AccountFlag>,
}

/// New account. Limit fields are applied to the account's root association
/// on revisions that accept them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreate {
    pub name: String,
    pub description: String,
    pub organization: String,
    pub coordinators: Vec<String>,
    pub cluster: String,
    pub parent_account: String,
    pub default_qos: String,
    pub qos_list: Vec<String>,
    pub fairshare: Option<u32>,
    pub priority: Option<u32>,
    pub max_jobs: Option<u32>,
    pub max_jobs_per_user: Option<u32>,
    pub max_submit_jobs: Option<u32>,
    pub grp_jobs: Option<u32>,
    /// Minutes
    pub max_wall_time: Option<u32>,
    pub max_cpus: Option<u32>,
    pub max_tres: TresMap,
    pub grp_tres: TresMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub description: Option<String>,
    pub organization: Option<String>,
    pub coordinators: Option<Vec<String>>,
}

/// Associate existing accounts with a cluster (and optionally a parent).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAssociationRequest {
    /// Required, non-empty.
    pub accounts: Vec<String>,
    pub cluster: String,
    pub parent_account: String,
    pub description: String,
    pub organization: String,
    pub default_qos: String,
    pub qos_list: Vec<String>,
    pub fairshare: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountListOptions {
    pub names: Vec<String>,
    pub organizations: Vec<String>,
    pub with_deleted: bool,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListQuery<Account> for AccountListOptions {
    fn matches(&self, a: &Account) -> bool {
        accepts(&self.names, &a.name)
            && accepts(&self.organizations, &a.organization)
            && (self.with_deleted || !a.flags.contains(&AccountFlag::Deleted))
    }

    fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
