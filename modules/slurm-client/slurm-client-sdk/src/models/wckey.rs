use serde::{Deserialize, Serialize};

use super::list::{ListQuery, Page, accepts};

slurm_enum! {
    WckeyFlag {
        Deleted => "DELETED",
    }
}

/// Workload characterization key: a user-chosen charge label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wckey {
    pub id: u32,
    pub name: String,
    pub user: String,
    pub cluster: String,
    pub flags: Vec<WckeyFlag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WckeyCreate {
    pub name: String,
    pub user: String,
    pub cluster: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WckeyUpdate {
    pub flags: Option<Vec<WckeyFlag>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WckeyListOptions {
    pub names: Vec<String>,
    pub users: Vec<String>,
    pub clusters: Vec<String>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListQuery<Wckey> for WckeyListOptions {
    fn matches(&self, w: &Wckey) -> bool {
        accepts(&self.names, &w.name)
            && accepts(&self.users, &w.user)
            && accepts(&self.clusters, &w.cluster)
    }

    fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
