use serde::{Deserialize, Serialize};

use super::list::{ListQuery, Page, accepts};

slurm_enum! {
    AdminLevel {
        None => "None",
        Operator => "Operator",
        Administrator => "Administrator",
    }
}

impl Default for AdminLevel {
    fn default() -> Self {
        Self::None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub default_account: String,
    pub default_wckey: String,
    pub admin_level: AdminLevel,
    /// Accounts this user coordinates.
    pub coordinators: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub default_account: String,
    pub default_wckey: String,
    pub admin_level: AdminLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub default_account: Option<String>,
    pub default_wckey: Option<String>,
    pub admin_level: Option<AdminLevel>,
}

/// Associate existing users with accounts on a cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAssociationRequest {
    /// Required, non-empty.
    pub users: Vec<String>,
    /// Required, non-empty.
    pub accounts: Vec<String>,
    pub cluster: String,
    pub partition: String,
    pub default_account: String,
    pub default_qos: String,
    pub qos_list: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListOptions {
    pub names: Vec<String>,
    pub default_accounts: Vec<String>,
    pub admin_levels: Vec<AdminLevel>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListQuery<User> for UserListOptions {
    fn matches(&self, u: &User) -> bool {
        accepts(&self.names, &u.name)
            && accepts(&self.default_accounts, &u.default_account)
            && accepts(&self.admin_levels, &u.admin_level)
    }

    fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
