//! The controller address sits in a nested `controller` record.

use slurm_client_sdk::{Cluster, ClusterCreate};

use crate::convert::{opt, value};
use crate::wire::v0_0_40::{ClusterController, ClusterRec};

pub fn read(w: &ClusterRec, e: &mut Cluster) {
    if let Some(controller) = &w.controller {
        e.controller_host = value::read(&controller.host);
        e.controller_port = value::read(&controller.port);
    }
}

pub fn write(e: &Cluster, w: &mut ClusterRec) {
    controller(w, value::write(&e.controller_host), value::write(&e.controller_port));
}

pub fn write_create(c: &ClusterCreate, w: &mut ClusterRec) {
    controller(w, value::write(&c.controller_host), opt::write(&c.controller_port));
}

fn controller(w: &mut ClusterRec, host: Option<String>, port: Option<u16>) {
    if host.is_some() || port.is_some() {
        w.controller = Some(ClusterController { host, port });
    }
}

#[cfg(test)]
pub fn retain(e: &Cluster, r: &mut Cluster) {
    r.controller_host.clone_from(&e.controller_host);
    r.controller_port = e.controller_port;
}
