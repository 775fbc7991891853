//! Slurm's `{set, infinite, number}` encoding for optional numbers.
//!
//! A wrapper that is absent, has `set = false`, is `infinite`, or carries no
//! number decodes to the common zero value. Timestamps additionally treat `0`
//! as unset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct NoVal<T> {
    #[serde(default)]
    pub set: bool,
    #[serde(default)]
    pub infinite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<T>,
}

impl<T: Copy> NoVal<T> {
    /// A present value.
    #[must_use]
    pub const fn set(number: T) -> Self {
        Self {
            set: true,
            infinite: false,
            number: Some(number),
        }
    }

    /// "No limit".
    #[must_use]
    pub const fn infinite() -> Self {
        Self {
            set: true,
            infinite: true,
            number: None,
        }
    }

    /// The carried number, if the wrapper is set and finite.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        if self.set && !self.infinite {
            self.number
        } else {
            None
        }
    }
}

/// Decode to the zero value when unset.
pub fn decode<T: Copy + Default>(w: Option<&NoVal<T>>) -> T {
    decode_opt(w).unwrap_or_default()
}

/// Decode, keeping "unset" distinguishable.
pub fn decode_opt<T: Copy>(w: Option<&NoVal<T>>) -> Option<T> {
    w.and_then(NoVal::value)
}

/// Decode epoch seconds; `0` and unset both mean "no timestamp".
pub fn decode_time(w: Option<&NoVal<i64>>) -> Option<DateTime<Utc>> {
    decode_opt(w)
        .filter(|secs| *secs != 0)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

/// Encode a present value with `set = true`.
pub fn encode<T: Copy>(v: T) -> Option<NoVal<T>> {
    Some(NoVal::set(v))
}

/// Encode only caller-provided values; `None` is omitted from the payload.
pub fn encode_opt<T: Copy>(v: Option<T>) -> Option<NoVal<T>> {
    v.map(NoVal::set)
}

pub fn encode_time(v: Option<DateTime<Utc>>) -> Option<NoVal<i64>> {
    v.map(|t| NoVal::set(t.timestamp()))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn absent_or_unset_decodes_to_zero() {
        assert_eq!(decode::<u32>(None), 0);
        let unset = NoVal {
            set: false,
            infinite: false,
            number: Some(5u32),
        };
        assert_eq!(decode(Some(&unset)), 0);
        let no_number = NoVal::<u32> {
            set: true,
            infinite: false,
            number: None,
        };
        assert_eq!(decode(Some(&no_number)), 0);
        assert_eq!(decode(Some(&NoVal::<u32>::infinite())), 0);
    }

    #[test]
    fn set_value_decodes() {
        assert_eq!(decode(Some(&NoVal::set(42u32))), 42);
        assert_eq!(decode_opt(Some(&NoVal::set(0u32))), Some(0));
    }

    #[test]
    fn timestamp_zero_is_none() {
        assert_eq!(decode_time(Some(&NoVal::set(0))), None);
        let t = decode_time(Some(&NoVal::set(1_700_000_000))).unwrap();
        assert_eq!(t.timestamp(), 1_700_000_000);
    }

    #[test]
    fn explicit_zero_is_encoded() {
        assert_eq!(encode_opt(Some(0u32)), Some(NoVal::set(0)));
        assert_eq!(encode_opt::<u32>(None), None);
    }

    #[test]
    fn wire_json_shapes() {
        let w: NoVal<u32> =
            serde_json::from_str(r#"{"set":true,"infinite":false,"number":7}"#).unwrap();
        assert_eq!(w.value(), Some(7));
        let w: NoVal<u32> = serde_json::from_str(r#"{"set":false}"#).unwrap();
        assert_eq!(w.value(), None);
        let json = serde_json::to_string(&NoVal::set(3u32)).unwrap();
        assert_eq!(json, r#"{"set":true,"infinite":false,"number":3}"#);
    }
}
