//! `versions/<rev>/<entity>.rs`: the `converter!` invocation for one binding.

use std::collections::BTreeSet;

use anyhow::Context;

use super::{HEADER, use_line, wire_alias, wire_import};
use crate::config::{AdapterConfig, VersionEntry};
use crate::infer::{Paired, Section, pairs};
use crate::source::Sources;

/// Sections a binding converts, given its wire types and verbs.
pub struct Shape {
    pub create: Option<String>,
    pub update: Option<String>,
}

impl Shape {
    pub fn of(entry: &VersionEntry) -> Self {
        let create = entry
            .create
            .clone()
            .filter(|_| entry.serves("create") || entry.serves("submit"));
        let update = entry.update.clone().filter(|_| entry.serves("update"));
        Self { create, update }
    }
}

pub fn emit(
    config: &AdapterConfig,
    name: &str,
    entry: &VersionEntry,
    module: &str,
    sources: &Sources,
) -> anyhow::Result<String> {
    let entity = config.entity(name)?;
    let mut sdk = BTreeSet::from([entity.entity.clone()]);
    let mut wire = BTreeSet::new();
    let mut strategies = BTreeSet::new();
    let mut body = Vec::new();

    let read_fields = sources.wire(module, &entry.read)?;
    let read = pairs(entity, Section::Read, read_fields, &entity.entity, sources)?;
    body.push(format!(
        "    entity {} from {} {{",
        entity.entity,
        local(&entry.read, config, &mut wire)
    ));
    push_pairs(&mut body, &read, "=>", &mut strategies);

    let shape = Shape::of(entry);
    if let Some(wire_create) = &shape.create {
        let model = entity
            .create
            .as_deref()
            .context("create wire type without a create model")?;
        let fields = pairs(
            entity,
            Section::Create,
            sources.wire(module, wire_create)?,
            model,
            sources,
        )?;
        sdk.insert(model.to_owned());
        body.push(format!(
            "    create {model} into {} {{",
            local(wire_create, config, &mut wire)
        ));
        push_pairs(&mut body, &fields, "<=", &mut strategies);
    }
    let mut blank_update = None;
    if let Some(wire_update) = &shape.update {
        let fields = pairs(
            entity,
            Section::Update,
            sources.wire(module, wire_update)?,
            &entity.update,
            sources,
        )?;
        sdk.insert(entity.update.clone());
        let alias = local(wire_update, config, &mut wire);
        body.push(format!("    update {} into {alias} {{", entity.update));
        blank_update = Some(alias);
        push_pairs(&mut body, &fields, "<=", &mut strategies);
    }

    let hooks = if entity.hooked.is_empty() {
        strategies.insert("no_hooks".to_owned());
        "no_hooks".to_owned()
    } else {
        format!("{name}_extra")
    };
    body.push(format!("    hooks = {hooks};"));
    strategies.insert("converter".to_owned());

    let mut lines = vec![HEADER.to_owned(), String::new()];
    lines.push(use_line("slurm_client_sdk", sdk));
    lines.push(String::new());
    if hooks != "no_hooks" {
        lines.push(format!("use super::{hooks};"));
    }
    lines.push(use_line("crate::convert", strategies));
    lines.push(use_line(&format!("crate::wire::{module}"), wire));
    lines.push(String::new());
    lines.push("converter! {".to_owned());
    lines.extend(body);
    lines.push("}".to_owned());
    lines.push(String::new());
    lines.extend(
        [
            "#[cfg(test)]",
            "#[cfg_attr(coverage_nightly, coverage(off))]",
            "mod tests {",
            "    use super::*;",
            "    use crate::versions::samples;",
            "",
            "    #[test]",
            "    fn round_trip_keeps_carried_fields() {",
        ]
        .map(str::to_owned),
    );
    lines.push(format!("        let {name} = samples::{name}();"));
    lines.push(format!(
        "        assert_eq!(read(&write(&{name})), retained(&{name}));"
    ));
    lines.push("    }".to_owned());
    if let Some(alias) = blank_update {
        lines.extend(
            [
                "",
                "    #[test]",
                "    fn empty_update_writes_nothing() {",
            ]
            .map(str::to_owned),
        );
        lines.push(format!(
            "        assert_eq!(write_update(&{}::default()), {alias}::default());",
            entity.update
        ));
        lines.push("    }".to_owned());
    }
    lines.extend(["}", ""].map(str::to_owned));
    Ok(lines.join("\n"))
}

/// Section lines; dropped wire fields are listed as comments at the end.
fn push_pairs(body: &mut Vec<String>, paired: &Paired, arrow: &str, used: &mut BTreeSet<String>) {
    for pair in &paired.pairs {
        body.push(format!(
            "        {} {arrow} {}: {},",
            pair.wire, pair.common, pair.strategy
        ));
        let module = pair.strategy.split("::").next().unwrap_or(&pair.strategy);
        used.insert(module.to_owned());
    }
    body.extend(
        paired
            .dropped
            .iter()
            .map(|field| format!("        // dropped: {field}")),
    );
    body.push("    }".to_owned());
}

/// Local name of `wire_type`, recording its import.
fn local(wire_type: &str, config: &AdapterConfig, imports: &mut BTreeSet<String>) -> String {
    imports.insert(wire_import(wire_type, config));
    wire_alias(wire_type, config)
}
