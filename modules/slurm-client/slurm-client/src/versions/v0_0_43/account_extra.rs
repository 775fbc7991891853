//! Unchanged since v0.0.42.

pub use crate::versions::v0_0_42::account_extra::{association_request, create_request};
