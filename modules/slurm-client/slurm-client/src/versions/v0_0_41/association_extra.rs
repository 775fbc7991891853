//! Unchanged since v0.0.40.

pub use crate::versions::v0_0_40::association_extra::{read, write, write_create, write_update};

#[cfg(test)]
pub use crate::versions::v0_0_40::association_extra::retain;
