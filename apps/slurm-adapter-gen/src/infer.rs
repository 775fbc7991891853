//! Field pairing and conversion strategy inference.

use anyhow::bail;

use crate::config::Entity;
use crate::source::{Fields, Sources};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Read,
    Create,
    Update,
}

/// One converter line: wire field, model field, strategy module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub wire: String,
    pub common: String,
    pub strategy: String,
}

/// `Outer<Inner>` -> `Inner`.
fn generic<'a>(ty: &'a str, outer: &str) -> Option<&'a str> {
    ty.strip_prefix(outer)?.strip_prefix('<')?.strip_suffix('>')
}

/// Strategy converting a wire field of type `wire` to a model field of type
/// `common`, when the pair of types decides it.
pub fn infer(
    wire: &str,
    common: &str,
    is_keyword: &dyn Fn(&str) -> bool,
) -> Option<&'static str> {
    if let Some(number) = generic(wire, "Option").and_then(|t| generic(t, "NoVal")) {
        if number == "i64" && common == "Option<DateTime<Utc>>" {
            return Some("noval_time");
        }
        if generic(common, "Option") == Some(number) {
            return Some("noval_opt");
        }
        return (common == number).then_some("noval");
    }
    match (wire, common) {
        ("Option<i64>", "Option<DateTime<Utc>>") => return Some("time"),
        ("Option<Vec<Tres>>", "TresMap") => return Some("tres"),
        ("Option<Vec<Tres>>", "Option<TresMap>") => return Some("tres_opt"),
        ("Option<Vec<Tres>>", _) => return None,
        ("Option<String>", "TresMap") => return Some("tres_str"),
        ("Option<String>", "Vec<String>") => return Some("csv"),
        _ => {}
    }
    if matches!(wire, "Option<String>" | "Option<Vec<String>>") {
        if generic(common, "Vec").is_some_and(is_keyword) {
            return Some("flags");
        }
        if generic(common, "Option")
            .and_then(|t| generic(t, "Vec"))
            .is_some_and(is_keyword)
        {
            return Some("flags_opt");
        }
    }
    let inner = generic(wire, "Option")?;
    if common == wire {
        Some("opt")
    } else if common == inner {
        Some("value")
    } else {
        None
    }
}

/// Converter lines of one section, plus the wire fields no model field takes.
#[derive(Debug, Default)]
pub struct Paired {
    pub pairs: Vec<Pair>,
    pub dropped: Vec<String>,
}

/// Field name compared case-insensitively and without underscores.
fn loose(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Pair the fields of `wire_fields` with model struct `model` in wire order.
///
/// Hooked fields are skipped; wire fields without a model counterpart are
/// reported as dropped. A pair the inference cannot decide falls back to the
/// entity's `custom` table for `section`.
pub fn pairs(
    entity: &Entity,
    section: Section,
    wire_fields: &Fields,
    model: &str,
    sources: &Sources,
) -> anyhow::Result<Paired> {
    let common = sources.model(model)?;
    let custom = match section {
        Section::Read => &entity.custom.read,
        Section::Create => &entity.custom.create,
        Section::Update => &entity.custom.update,
    };
    let mut out = Paired::default();
    for (wire_field, wire_ty) in wire_fields {
        if entity.hooked.contains(wire_field) {
            continue;
        }
        let target = match entity.renames.get(wire_field) {
            Some(renamed) => common.iter().find(|(name, _)| name == renamed),
            None => {
                let wanted = loose(wire_field);
                common.iter().find(|(name, _)| loose(name) == wanted)
            }
        };
        let Some((common_field, common_ty)) = target else {
            out.dropped.push(wire_field.clone());
            continue;
        };
        let strategy = match infer(wire_ty, common_ty, &|t| sources.is_keyword(t)) {
            Some(s) => s.to_owned(),
            None => match custom.get(common_field) {
                Some(s) => s.clone(),
                None => {
                    bail!("no strategy for {model}.{common_field}: {wire_ty} -> {common_ty}")
                }
            },
        };
        out.pairs.push(Pair {
            wire: wire_field.clone(),
            common: common_field.clone(),
            strategy,
        });
    }
    Ok(out)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn keyword(t: &str) -> bool {
        t == "JobState"
    }

    #[test]
    fn noval_variants() {
        let time = infer("Option<NoVal<i64>>", "Option<DateTime<Utc>>", &keyword);
        assert_eq!(time, Some("noval_time"));
        assert_eq!(infer("Option<NoVal<u32>>", "Option<u32>", &keyword), Some("noval_opt"));
        assert_eq!(infer("Option<NoVal<u32>>", "u32", &keyword), Some("noval"));
        assert_eq!(infer("Option<NoVal<u32>>", "String", &keyword), None);
    }

    #[test]
    fn strings_become_lists_and_flags() {
        assert_eq!(infer("Option<String>", "Vec<String>", &keyword), Some("csv"));
        assert_eq!(infer("Option<String>", "TresMap", &keyword), Some("tres_str"));
        assert_eq!(infer("Option<String>", "Vec<JobState>", &keyword), Some("flags"));
        let list = infer("Option<Vec<String>>", "Option<Vec<JobState>>", &keyword);
        assert_eq!(list, Some("flags_opt"));
    }

    #[test]
    fn loose_names_ignore_case_and_underscores() {
        assert_eq!(loose("default_qos"), loose("defaultQos"));
        assert_eq!(loose("adminlevel"), loose("admin_level"));
        assert_ne!(loose("max_jobs"), loose("max_job"));
    }

    #[test]
    fn unmatched_wire_fields_are_reported_as_dropped() {
        let model = tempfile::tempdir().unwrap();
        let wire = tempfile::tempdir().unwrap();
        std::fs::write(
            model.path().join("qos.rs"),
            "pub struct Qos {\n    pub name: String,\n    pub usage_factor: f64,\n}\n",
        )
        .unwrap();
        std::fs::write(
            wire.path().join("v0_0_41.rs"),
            "wire_model! {\n    pub struct Qos {\n        pub name: Option<String>,\n        \
             pub usagefactor: Option<f64>,\n        pub limits: Option<QosLimits>,\n        \
             pub preempt: Option<QosPreempt>,\n    }\n}\n",
        )
        .unwrap();
        let sources = Sources::load(model.path(), wire.path()).unwrap();
        let entity: Entity = serde_saphyr::from_str(
            "kind: Qos\nmanager: qos\nkey: { type: name, field: name }\nentity: Qos\n\
             update: QosUpdate\nquery: QosQuery\ncollection: qos\nhooked: [preempt]\n\
             routes: {}\n",
        )
        .unwrap();
        let fields = sources.wire("v0_0_41", "Qos").unwrap();

        let paired = pairs(&entity, Section::Read, fields, "Qos", &sources).unwrap();

        let common: Vec<&str> = paired.pairs.iter().map(|p| p.common.as_str()).collect();
        assert_eq!(common, ["name", "usage_factor"]);
        assert_eq!(paired.dropped, ["limits"]);
    }

    #[test]
    fn plain_options() {
        assert_eq!(infer("Option<String>", "String", &keyword), Some("value"));
        assert_eq!(infer("Option<u32>", "Option<u32>", &keyword), Some("opt"));
        assert_eq!(infer("Option<i64>", "Option<DateTime<Utc>>", &keyword), Some("time"));
        assert_eq!(infer("Option<Vec<Tres>>", "TresMap", &keyword), Some("tres"));
        assert_eq!(infer("Option<Vec<Tres>>", "String", &keyword), None);
        assert_eq!(infer("u32", "u32", &keyword), None);
    }
}
