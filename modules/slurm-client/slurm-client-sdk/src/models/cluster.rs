use serde::{Deserialize, Serialize};

use super::list::{ListQuery, Page, accepts};
use super::tres::TresMap;

slurm_enum! {
    ClusterFlag {
        Registering => "REGISTERING",
        MultipleSlurmd => "MULTIPLE_SLURMD",
        FrontEnd => "FRONT_END",
        Federation => "FEDERATION",
        External => "EXTERNAL",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub name: String,
    pub nodes: String,
    pub controller_host: String,
    pub controller_port: u16,
    pub rpc_version: u32,
    pub select_plugin: String,
    pub flags: Vec<ClusterFlag>,
    pub tres: TresMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterCreate {
    pub name: String,
    pub nodes: String,
    pub controller_host: String,
    pub controller_port: Option<u16>,
    pub flags: Vec<ClusterFlag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterUpdate {
    pub nodes: Option<String>,
    pub flags: Option<Vec<ClusterFlag>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterListOptions {
    pub names: Vec<String>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListQuery<Cluster> for ClusterListOptions {
    fn matches(&self, c: &Cluster) -> bool {
        accepts(&self.names, &c.name)
    }

    fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
