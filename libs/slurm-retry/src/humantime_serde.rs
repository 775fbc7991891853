//! Serde adapter for `Duration` values written in humantime notation (`"250ms"`, `"30s"`).
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use std::time::Duration;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Backoff {
//!     #[serde(with = "slurm_retry::humantime_serde")]
//!     min_wait: Duration,
//! }
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserializer, Serializer, de};

/// Deserializes a `Duration` from a humantime string.
///
/// # Errors
/// Returns a deserializer error when the input is not a string or not a valid duration.
pub fn deserialize<'de, D>(d: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct HumanDuration;

    impl de::Visitor<'_> for HumanDuration {
        type Value = Duration;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a duration")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Duration, E> {
            humantime::parse_duration(v)
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    d.deserialize_str(HumanDuration)
}

/// Serializes a `Duration` as a humantime string.
///
/// # Errors
/// Propagates serializer errors.
pub fn serialize<S>(d: &Duration, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.collect_str(&humantime::format_duration(*d))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Interval {
        #[serde(with = "super")]
        every: Duration,
    }

    #[test]
    fn parses_and_formats_humantime() {
        let json = r#"{"every": "15 seconds"}"#;
        let interval = serde_json::from_str::<Interval>(json).unwrap();
        assert_eq!(interval.every, Duration::from_secs(15));
        let reverse = serde_json::to_string(&interval).unwrap();
        assert_eq!(reverse, r#"{"every":"15s"}"#);
    }

    #[test]
    fn rejects_garbage() {
        let json = r#"{"every": "soon"}"#;
        assert!(serde_json::from_str::<Interval>(json).is_err());
    }
}
