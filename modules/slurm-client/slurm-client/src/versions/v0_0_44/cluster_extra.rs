//! Unchanged since v0.0.40.

pub use crate::versions::v0_0_40::cluster_extra::{read, write, write_create};

#[cfg(test)]
pub use crate::versions::v0_0_40::cluster_extra::retain;
