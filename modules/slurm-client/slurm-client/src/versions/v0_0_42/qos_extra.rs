//! Unchanged since v0.0.41.

pub use crate::versions::v0_0_41::qos_extra::{read, write, write_create, write_update};

#[cfg(test)]
pub use crate::versions::v0_0_41::qos_extra::retain;
