//! Field-level conversion between wire schemas and the common model.
//!
//! Each strategy module exposes `read` (wire to common) and `write` (common to
//! wire). Both take the field by reference so that the [`converter!`] macro can
//! call every strategy the same way.

#![allow(
    clippy::ref_option,
    clippy::trivially_copy_pass_by_ref,
    reason = "strategies receive struct fields by reference uniformly"
)]

pub mod custom;

/// Generates `read`, `write`, and optionally `write_create`/`write_update`
/// for one entity in one API version.
///
/// Fields not listed keep their default and are handled by the `hooks`
/// module, which must provide `read`, `write`, and `retain`, plus
/// `write_create`/`write_update` when those sections are present. Unused
/// hooks can be re-exported from [`no_hooks`].
///
/// In tests, `retained(&entity)` returns the entity reduced to the fields
/// this version carries, which is what a write/read round trip preserves.
macro_rules! converter {
    (
        entity $entity:ident from $wire:ident {
            $($wf:ident => $ef:ident : $($es:ident)::+),* $(,)?
        }
        $(create $create:ident into $cwire:ident {
            $($cwf:ident <= $ccf:ident : $($cs:ident)::+),* $(,)?
        })?
        $(update $update:ident into $uwire:ident {
            $($uwf:ident <= $ucf:ident : $($us:ident)::+),* $(,)?
        })?
        hooks = $hooks:ident;
    ) => {
        #[must_use]
        #[allow(clippy::needless_update)]
        pub fn read(w: &$wire) -> $entity {
            let mut e = $entity {
                $($ef: $($es)::+::read(&w.$wf),)*
                ..$entity::default()
            };
            $hooks::read(w, &mut e);
            e
        }

        #[must_use]
        #[allow(clippy::needless_update)]
        pub fn write(e: &$entity) -> $wire {
            let mut w = $wire {
                $($wf: $($es)::+::write(&e.$ef),)*
                ..$wire::default()
            };
            $hooks::write(e, &mut w);
            w
        }

        $(
            #[must_use]
            #[allow(clippy::needless_update)]
            pub fn write_create(c: &$create) -> $cwire {
                let mut w = $cwire {
                    $($cwf: $($cs)::+::write(&c.$ccf),)*
                    ..$cwire::default()
                };
                $hooks::write_create(c, &mut w);
                w
            }
        )?

        $(
            #[must_use]
            #[allow(clippy::needless_update)]
            pub fn write_update(u: &$update) -> $uwire {
                let mut w = $uwire {
                    $($uwf: $($us)::+::write(&u.$ucf),)*
                    ..$uwire::default()
                };
                $hooks::write_update(u, &mut w);
                w
            }
        )?

        #[cfg(test)]
        #[must_use]
        #[allow(clippy::needless_update, clippy::clone_on_copy)]
        pub fn retained(e: &$entity) -> $entity {
            let mut r = $entity {
                $($ef: e.$ef.clone(),)*
                ..$entity::default()
            };
            $hooks::retain(e, &mut r);
            r
        }
    };
}

pub(crate) use converter;

/// No-op hooks for entities whose fields all map one to one.
pub mod no_hooks {
    pub fn read<W, E>(_wire: &W, _entity: &mut E) {}

    pub fn write<E, W>(_entity: &E, _wire: &mut W) {}

    pub fn write_create<C, W>(_create: &C, _wire: &mut W) {}

    pub fn write_update<U, W>(_update: &U, _wire: &mut W) {}

    pub fn retain<E>(_entity: &E, _retained: &mut E) {}
}

/// Slurm keyword enums of the common model.
pub trait Keyword: Copy + PartialEq {
    fn parse(s: &str) -> Self;

    fn keyword(self) -> &'static str;

    fn is_unknown(self) -> bool;
}

macro_rules! keyword {
    ($($ty:ident),+ $(,)?) => {$(
        impl Keyword for slurm_client_sdk::$ty {
            fn parse(s: &str) -> Self {
                Self::parse(s)
            }

            fn keyword(self) -> &'static str {
                self.as_str()
            }

            fn is_unknown(self) -> bool {
                self == Self::Unknown
            }
        }
    )+};
}

keyword!(
    AccountFlag,
    ClusterFlag,
    JobState,
    MailType,
    NodeState,
    PartitionState,
    PreemptMode,
    QosFlag,
    ReservationFlag,
    WckeyFlag,
);

/// Wire shapes that carry a keyword set: a comma-joined string or a list.
pub trait FlagSource {
    fn keywords(&self) -> Vec<&str>;

    fn from_keywords(words: Vec<&'static str>) -> Self;
}

impl FlagSource for String {
    fn keywords(&self) -> Vec<&str> {
        self.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
    }

    fn from_keywords(words: Vec<&'static str>) -> Self {
        words.join(",")
    }
}

impl FlagSource for Vec<String> {
    fn keywords(&self) -> Vec<&str> {
        self.iter().map(String::as_str).collect()
    }

    fn from_keywords(words: Vec<&'static str>) -> Self {
        words.into_iter().map(str::to_owned).collect()
    }
}

fn parse_keywords<K: Keyword, S: FlagSource>(source: &S) -> Vec<K> {
    source.keywords().into_iter().map(K::parse).collect()
}

fn known_keywords<K: Keyword>(flags: &[K]) -> Vec<&'static str> {
    flags
        .iter()
        .filter(|k| !k.is_unknown())
        .map(|k| k.keyword())
        .collect()
}

/// A nested wire record, or `None` when nothing inside it is set.
#[must_use]
pub fn nonempty<T: Default + PartialEq>(record: T) -> Option<T> {
    (record != T::default()).then_some(record)
}

/// `Option<T>` on the wire, `T` in the model; the default value is omitted.
pub mod value {
    #[must_use]
    pub fn read<T: Clone + Default>(w: &Option<T>) -> T {
        w.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn write<T: Clone + Default + PartialEq>(v: &T) -> Option<T> {
        (*v != T::default()).then(|| v.clone())
    }
}

/// `Option<T>` on both sides.
pub mod opt {
    #[must_use]
    pub fn read<T: Clone>(w: &Option<T>) -> Option<T> {
        w.clone()
    }

    #[must_use]
    pub fn write<T: Clone>(v: &Option<T>) -> Option<T> {
        v.clone()
    }
}

/// No-value wrapper on the wire, plain number in the model.
pub mod noval {
    use crate::noval::{NoVal, decode, encode};

    #[must_use]
    pub fn read<T: Copy + Default>(w: &Option<NoVal<T>>) -> T {
        decode(w.as_ref())
    }

    #[must_use]
    pub fn write<T: Copy>(v: &T) -> Option<NoVal<T>> {
        encode(*v)
    }
}

/// No-value wrapper on the wire, `Option` in the model.
pub mod noval_opt {
    use crate::noval::{NoVal, decode_opt, encode_opt};

    #[must_use]
    pub fn read<T: Copy>(w: &Option<NoVal<T>>) -> Option<T> {
        decode_opt(w.as_ref())
    }

    #[must_use]
    pub fn write<T: Copy>(v: &Option<T>) -> Option<NoVal<T>> {
        encode_opt(*v)
    }
}

/// Epoch seconds in a no-value wrapper.
pub mod noval_time {
    use chrono::{DateTime, Utc};

    use crate::noval::{NoVal, decode_time, encode_time};

    #[must_use]
    pub fn read(w: &Option<NoVal<i64>>) -> Option<DateTime<Utc>> {
        decode_time(w.as_ref())
    }

    #[must_use]
    pub fn write(v: &Option<DateTime<Utc>>) -> Option<NoVal<i64>> {
        encode_time(*v)
    }
}

/// Plain epoch seconds; `0` means unset.
pub mod time {
    use chrono::{DateTime, Utc};

    #[must_use]
    pub fn read(w: &Option<i64>) -> Option<DateTime<Utc>> {
        w.filter(|secs| *secs != 0)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    #[must_use]
    pub fn write(v: &Option<DateTime<Utc>>) -> Option<i64> {
        v.map(|t| t.timestamp())
    }
}

/// Keyword set; unknown keywords read as `Unknown` and are never written.
pub mod flags {
    use super::{FlagSource, Keyword, known_keywords, parse_keywords};

    #[must_use]
    pub fn read<K: Keyword, S: FlagSource>(w: &Option<S>) -> Vec<K> {
        w.as_ref().map(parse_keywords).unwrap_or_default()
    }

    #[must_use]
    pub fn write<K: Keyword, S: FlagSource>(v: &[K]) -> Option<S> {
        let words = known_keywords(v);
        (!words.is_empty()).then(|| S::from_keywords(words))
    }
}

/// Keyword set in an update: `Some(vec![])` clears the set.
pub mod flags_opt {
    use super::{FlagSource, Keyword, known_keywords, parse_keywords};

    #[must_use]
    pub fn read<K: Keyword, S: FlagSource>(w: &Option<S>) -> Option<Vec<K>> {
        w.as_ref().map(parse_keywords)
    }

    #[must_use]
    pub fn write<K: Keyword, S: FlagSource>(v: &Option<Vec<K>>) -> Option<S> {
        v.as_deref().map(|flags| S::from_keywords(known_keywords(flags)))
    }
}

/// Comma-joined names on the wire, a list in the model.
pub mod csv {
    #[must_use]
    pub fn read(w: &Option<String>) -> Vec<String> {
        w.as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn write(v: &[String]) -> Option<String> {
        (!v.is_empty()).then(|| v.join(","))
    }
}

/// TRES records on the wire, a `type[/name] -> count` map in the model.
pub mod tres {
    use slurm_client_sdk::{TresMap, map_to_tres, tres_to_map};

    use crate::wire::common::Tres;

    #[must_use]
    pub fn read(w: &Option<Vec<Tres>>) -> TresMap {
        let list: Vec<slurm_client_sdk::Tres> = w
            .iter()
            .flatten()
            .filter_map(|t| {
                let kind = t.kind.clone().filter(|k| !k.is_empty())?;
                Some(slurm_client_sdk::Tres {
                    kind,
                    name: t.name.clone().filter(|n| !n.is_empty()),
                    count: t.count.unwrap_or_default(),
                })
            })
            .collect();
        tres_to_map(&list)
    }

    #[must_use]
    pub fn write(v: &TresMap) -> Option<Vec<Tres>> {
        if v.is_empty() {
            return None;
        }
        Some(
            map_to_tres(v)
                .into_iter()
                .map(|t| Tres {
                    kind: Some(t.kind),
                    name: t.name,
                    id: None,
                    count: Some(t.count),
                })
                .collect(),
        )
    }
}

/// TRES records in an update: `Some(empty)` clears the limits.
pub mod tres_opt {
    use slurm_client_sdk::TresMap;

    use crate::wire::common::Tres;

    #[must_use]
    pub fn read(w: &Option<Vec<Tres>>) -> Option<TresMap> {
        w.as_ref().map(|_| super::tres::read(w))
    }

    #[must_use]
    pub fn write(v: &Option<TresMap>) -> Option<Vec<Tres>> {
        v.as_ref()
            .map(|map| super::tres::write(map).unwrap_or_default())
    }
}

/// TRES in `cpu=4,mem=8G` form. Unparseable strings read as an empty map.
pub mod tres_str {
    use slurm_client_sdk::{TresMap, format_tres, map_to_tres, parse_tres, tres_to_map};

    #[must_use]
    pub fn read(w: &Option<String>) -> TresMap {
        w.as_deref()
            .and_then(|s| parse_tres(s).ok())
            .map(|list| tres_to_map(&list))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn write(v: &TresMap) -> Option<String> {
        (!v.is_empty()).then(|| format_tres(&map_to_tres(v)))
    }
}
