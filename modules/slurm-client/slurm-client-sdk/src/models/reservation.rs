use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::list::{ListQuery, Page, accepts, accepts_any};
use super::tres::TresMap;

slurm_enum! {
    ReservationFlag {
        Maintenance => "MAINT",
        Ignore => "IGNORE_JOBS",
        Overlap => "OVERLAP",
        Daily => "DAILY",
        Weekly => "WEEKLY",
        Weekday => "WEEKDAY",
        Weekend => "WEEKEND",
        Flex => "FLEX",
        AnyNodes => "ANY_NODES",
        StaticNodes => "STATIC",
        PartitionNodes => "PART_NODES",
        NoHoldJobs => "NO_HOLD_JOBS_AFTER_END",
        Magnetic => "MAGNETIC",
        Purge => "PURGE_COMP",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub name: String,
    pub accounts: Vec<String>,
    pub users: Vec<String>,
    pub partition: String,
    pub node_list: String,
    pub node_count: u32,
    pub core_count: u32,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Minutes
    pub duration: u32,
    pub flags: Vec<ReservationFlag>,
    pub features: String,
    pub tres: TresMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub name: String,
    pub accounts: Vec<String>,
    pub users: Vec<String>,
    pub groups: Vec<String>,
    pub partition: String,
    pub node_list: String,
    pub node_count: Option<u32>,
    /// Required.
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Minutes
    pub duration: Option<u32>,
    pub flags: Vec<ReservationFlag>,
    pub features: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub accounts: Option<Vec<String>>,
    pub users: Option<Vec<String>>,
    pub node_list: Option<String>,
    pub node_count: Option<u32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<u32>,
    pub flags: Option<Vec<ReservationFlag>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationListOptions {
    pub names: Vec<String>,
    pub accounts: Vec<String>,
    pub users: Vec<String>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListQuery<Reservation> for ReservationListOptions {
    fn matches(&self, r: &Reservation) -> bool {
        accepts(&self.names, &r.name)
            && accepts_any(&self.accounts, &r.accounts)
            && accepts_any(&self.users, &r.users)
    }

    fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
