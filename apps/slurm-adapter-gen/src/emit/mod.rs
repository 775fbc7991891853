//! Rendering of the generated sources.
//!
//! Output is laid out the way rustfmt would lay it out at a width of 100, so
//! regenerating never produces formatting-only diffs.

mod bindings;
mod converter;
mod rules;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use heck::ToShoutySnakeCase;

use crate::config::AdapterConfig;
use crate::source::Sources;

pub const HEADER: &str =
    "// @generated by slurm-adapter-gen from codegen/adapters.yaml. Do not edit.";

const MAX_WIDTH: usize = 100;

/// One generated file, relative to the workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub path: PathBuf,
    pub content: String,
}

/// Render every converter, binding table and the validation rules.
pub fn generate(root: &Path, config: &AdapterConfig) -> anyhow::Result<Vec<Output>> {
    let sources = Sources::load(&root.join(&config.paths.model), &root.join(&config.paths.wire))?;
    let mut outputs = Vec::new();
    for (version, entries) in config.versions.iter() {
        let module = module_name(version);
        let dir = config.paths.versions.join(&module);
        for (name, entry) in entries.iter() {
            let content = converter::emit(config, name, entry, &module, &sources)
                .with_context(|| format!("{version} {name}"))?;
            outputs.push(Output {
                path: dir.join(format!("{name}.rs")),
                content,
            });
        }
        let extras: BTreeSet<&str> = config
            .entities
            .keys()
            .filter(|name| entries.contains(name))
            .filter(|name| root.join(&dir).join(format!("{name}_extra.rs")).exists())
            .collect();
        let content = bindings::emit(config, version, entries, &extras)
            .with_context(|| format!("{version} bindings"))?;
        outputs.push(Output {
            path: dir.join("mod.rs"),
            content,
        });
    }
    outputs.push(Output {
        path: config.paths.rules.clone(),
        content: rules::emit(&config.validation),
    });
    Ok(outputs)
}

/// `v0.0.42` -> `v0_0_42`.
pub fn module_name(version: &str) -> String {
    version.replace('.', "_")
}

/// `v0.0.42` -> `V0_0_42`.
pub fn version_const(version: &str) -> String {
    module_name(version).to_shouty_snake_case()
}

/// A `use` declaration importing `items` from `prefix`, sorted and wrapped.
pub fn use_line<I, S>(prefix: &str, items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let items: BTreeSet<String> = items.into_iter().map(Into::into).collect();
    let items: Vec<String> = items.into_iter().collect();
    if let [only] = items.as_slice() {
        return format!("use {prefix}::{only};");
    }
    let one = format!("use {prefix}::{{{}}};", items.join(", "));
    if one.len() <= MAX_WIDTH {
        return one;
    }
    let mut lines = Vec::new();
    let mut current = "   ".to_owned();
    for item in &items {
        let piece = format!(" {item},");
        if current.len() + piece.len() > MAX_WIDTH {
            lines.push(std::mem::replace(&mut current, "   ".to_owned()));
        }
        current.push_str(&piece);
    }
    lines.push(current);
    format!("use {prefix}::{{\n{}\n}};", lines.join("\n"))
}

/// Local name of a wire type; wire types named like a model entity are
/// imported as `Wire<Name>`.
pub fn wire_alias(name: &str, config: &AdapterConfig) -> String {
    if config.entities.iter().any(|(_, e)| e.entity == name) {
        format!("Wire{name}")
    } else {
        name.to_owned()
    }
}

/// Import item for a wire type under its local name.
pub fn wire_import(name: &str, config: &AdapterConfig) -> String {
    let alias = wire_alias(name, config);
    if alias == name {
        alias
    } else {
        format!("{name} as {alias}")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn short_use_stays_on_one_line() {
        assert_eq!(use_line("a::b", ["Z", "A"]), "use a::b::{A, Z};");
        assert_eq!(use_line("a::b", ["Only"]), "use a::b::Only;");
    }

    #[test]
    fn long_use_wraps_at_width() {
        let items: Vec<String> = (0..20).map(|i| format!("LongTypeName{i:02}")).collect();
        let text = use_line("slurm_client_sdk", items);
        assert!(text.starts_with("use slurm_client_sdk::{\n    LongTypeName00,"));
        assert!(text.ends_with("\n};"));
        assert!(text.lines().all(|l| l.len() <= MAX_WIDTH));
    }

    #[test]
    fn version_names() {
        assert_eq!(module_name("v0.0.42"), "v0_0_42");
        assert_eq!(version_const("v0.0.42"), "V0_0_42");
    }
}
