//! Wire schemas for each supported REST revision.
//!
//! Every field is optional on the wire; absent fields are skipped when
//! serializing. A revision re-exports the previous revision's type when the
//! schema did not change.

/// Declares wire structs whose fields are all `Option<_>`, defaulted when
/// missing and omitted from JSON when `None`.
macro_rules! wire_model {
    ($(
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $ty:ty
            ),* $(,)?
        }
    )*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: $ty,
            )*
        }
    )*};
}

pub mod common;
pub mod v0_0_40;
pub mod v0_0_41;
pub mod v0_0_42;
pub mod v0_0_43;
pub mod v0_0_44;
