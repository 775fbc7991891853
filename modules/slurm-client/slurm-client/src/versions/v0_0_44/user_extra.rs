//! Unchanged since v0.0.43.

pub use crate::versions::v0_0_43::user_extra::{
    association_request, read, write, write_create, write_update,
};

#[cfg(test)]
pub use crate::versions::v0_0_43::user_extra::retain;
