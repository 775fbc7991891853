//! Unchanged since v0.0.40.

pub use crate::versions::v0_0_40::partition_extra::{read, write};

#[cfg(test)]
pub use crate::versions::v0_0_40::partition_extra::retain;
