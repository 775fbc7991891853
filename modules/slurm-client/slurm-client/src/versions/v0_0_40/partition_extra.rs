//! Partition fields live in nested records that no strategy covers.

use slurm_client_sdk::{Partition, PartitionState};

use crate::convert::{csv, flags, noval, value};
use crate::wire::v0_0_40::{
    PartitionAccounts, PartitionCpus, PartitionDefaults, PartitionInfo, PartitionMaximums,
    PartitionNodes, PartitionPriority, PartitionQos, PartitionStatus,
};

pub fn read(w: &PartitionInfo, e: &mut Partition) {
    if let Some(status) = &w.partition {
        e.state = flags::read(&status.state);
    }
    if let Some(nodes) = &w.nodes {
        e.nodes = value::read(&nodes.configured);
        e.total_nodes = value::read(&nodes.total);
    }
    if let Some(cpus) = &w.cpus {
        e.total_cpus = value::read(&cpus.total);
    }
    if let Some(defaults) = &w.defaults {
        e.default_time = noval::read(&defaults.time);
    }
    if let Some(maximums) = &w.maximums {
        e.max_time = noval::read(&maximums.time);
        e.max_nodes = noval::read(&maximums.nodes);
    }
    if let Some(priority) = &w.priority {
        e.priority_tier = value::read(&priority.tier);
    }
    if let Some(qos) = &w.qos {
        e.qos = value::read(&qos.assigned);
    }
    if let Some(accounts) = &w.accounts {
        e.allowed_accounts = csv::read(&accounts.allowed);
    }
}

pub fn write(e: &Partition, w: &mut PartitionInfo) {
    w.partition = Some(PartitionStatus {
        state: flags::write::<PartitionState, _>(&e.state),
    });
    w.nodes = Some(PartitionNodes {
        configured: value::write(&e.nodes),
        total: value::write(&e.total_nodes),
    });
    w.cpus = Some(PartitionCpus {
        total: value::write(&e.total_cpus),
    });
    w.defaults = Some(PartitionDefaults {
        time: noval::write(&e.default_time),
    });
    w.maximums = Some(PartitionMaximums {
        nodes: noval::write(&e.max_nodes),
        time: noval::write(&e.max_time),
    });
    w.priority = Some(PartitionPriority {
        tier: value::write(&e.priority_tier),
    });
    w.qos = Some(PartitionQos {
        assigned: value::write(&e.qos),
    });
    w.accounts = Some(PartitionAccounts {
        allowed: csv::write(&e.allowed_accounts),
    });
}

#[cfg(test)]
pub fn retain(e: &Partition, r: &mut Partition) {
    r.state.clone_from(&e.state);
    r.nodes.clone_from(&e.nodes);
    r.total_nodes = e.total_nodes;
    r.total_cpus = e.total_cpus;
    r.default_time = e.default_time;
    r.max_time = e.max_time;
    r.max_nodes = e.max_nodes;
    r.priority_tier = e.priority_tier;
    r.qos.clone_from(&e.qos);
    r.allowed_accounts.clone_from(&e.allowed_accounts);
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::noval::NoVal;

    #[test]
    fn missing_records_read_as_zero() {
        let mut e = Partition::default();
        read(&PartitionInfo::default(), &mut e);
        assert_eq!(e, Partition::default());
    }

    #[test]
    fn unlimited_max_time_reads_as_zero() {
        let w = PartitionInfo {
            maximums: Some(PartitionMaximums {
                nodes: Some(NoVal::set(16)),
                time: Some(NoVal::infinite()),
            }),
            ..PartitionInfo::default()
        };
        let mut e = Partition::default();
        read(&w, &mut e);
        assert_eq!(e.max_nodes, 16);
        assert_eq!(e.max_time, 0);
    }
}
