//! Trackable resources (TRES): `cpu=4,mem=8G,gres/gpu=2`.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resource limits keyed by `type` or `type/name` (`cpu`, `mem`, `gres/gpu`).
pub type TresMap = BTreeMap<String, i64>;

/// One trackable resource and its amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tres {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub count: i64,
}

impl Tres {
    #[must_use]
    pub fn new(kind: impl Into<String>, count: i64) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            count,
        }
    }

    #[must_use]
    pub fn named(kind: impl Into<String>, name: impl Into<String>, count: i64) -> Self {
        Self {
            kind: kind.into(),
            name: Some(name.into()),
            count,
        }
    }

    /// `type` or `type/name`; the identity used for merging and maps.
    #[must_use]
    pub fn key(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => format!("{}/{name}", self.kind),
            _ => self.kind.clone(),
        }
    }

    fn from_key(key: &str, count: i64) -> Self {
        match key.split_once('/') {
            Some((kind, name)) => Self::named(kind, name, count),
            None => Self::new(key, count),
        }
    }
}

impl fmt::Display for Tres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key(), self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TresError {
    #[error("invalid TRES entry '{0}': expected type=count")]
    Malformed(String),
    #[error("invalid TRES count in '{0}'")]
    InvalidCount(String),
    #[error("TRES type is required")]
    MissingType,
    #[error("TRES {key} has negative count {count}")]
    Negative { key: String, count: i64 },
    #[error("duplicate TRES {0}")]
    Duplicate(String),
}

/// Parse a TRES string. Counts may carry a 1024-based `K`, `M`, `G` or `T` suffix
/// (`mem=8G` is 8 GiB in bytes).
///
/// # Errors
/// Returns [`TresError`] for entries without `=` or with a non-numeric count.
pub fn parse_tres(s: &str) -> Result<Vec<Tres>, TresError> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| TresError::Malformed(part.to_owned()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(TresError::MissingType);
            }
            let count =
                parse_count(value.trim()).ok_or_else(|| TresError::InvalidCount(part.to_owned()))?;
            Ok(Tres::from_key(key, count))
        })
        .collect()
}

fn parse_count(value: &str) -> Option<i64> {
    let (digits, multiplier) = match value.chars().last()? {
        'K' | 'k' => (&value[..value.len() - 1], 1 << 10),
        'M' | 'm' => (&value[..value.len() - 1], 1 << 20),
        'G' | 'g' => (&value[..value.len() - 1], 1 << 30),
        'T' | 't' => (&value[..value.len() - 1], 1_i64 << 40),
        _ => (value, 1),
    };
    let base: i64 = digits.parse().ok()?;
    base.checked_mul(multiplier)
}

/// Render TRES entries as `type[/name]=count`, comma separated, in input order.
#[must_use]
pub fn format_tres(list: &[Tres]) -> String {
    list.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Check every entry has a type, a non-negative count, and a unique key.
///
/// # Errors
/// Returns the first violation found.
pub fn validate_tres(list: &[Tres]) -> Result<(), TresError> {
    let mut seen = std::collections::BTreeSet::new();
    for tres in list {
        if tres.kind.trim().is_empty() {
            return Err(TresError::MissingType);
        }
        if tres.count < 0 {
            return Err(TresError::Negative {
                key: tres.key(),
                count: tres.count,
            });
        }
        if !seen.insert(tres.key()) {
            return Err(TresError::Duplicate(tres.key()));
        }
    }
    Ok(())
}

/// Merge `overlay` into `base`: entries with an existing key are replaced in
/// place, the rest are appended.
#[must_use]
pub fn merge_tres(base: &[Tres], overlay: &[Tres]) -> Vec<Tres> {
    let mut merged = base.to_vec();
    for tres in overlay {
        match merged.iter_mut().find(|t| t.key() == tres.key()) {
            Some(existing) => existing.count = tres.count,
            None => merged.push(tres.clone()),
        }
    }
    merged
}

#[must_use]
pub fn tres_to_map(list: &[Tres]) -> TresMap {
    let mut map = TresMap::new();
    for tres in list {
        match map.entry(tres.key()) {
            Entry::Occupied(mut e) => *e.get_mut() = tres.count,
            Entry::Vacant(e) => {
                e.insert(tres.count);
            }
        }
    }
    map
}

#[must_use]
pub fn map_to_tres(map: &TresMap) -> Vec<Tres> {
    map.iter()
        .map(|(key, count)| Tres::from_key(key, *count))
        .collect()
}
