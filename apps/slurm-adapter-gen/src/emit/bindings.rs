//! `versions/<rev>/mod.rs`: capabilities, bindings and the managers table.

use std::collections::BTreeSet;

use anyhow::Context;
use heck::ToUpperCamelCase;

use super::{HEADER, MAX_WIDTH, module_name, use_line, version_const, wire_alias, wire_import};
use crate::config::{AdapterConfig, BodySpec, Entity, Ordered, VersionEntry, body_spec, route};

/// `Endpoint` constructor for a `METHOD /path?k=v` route.
fn endpoint_expr(route: &str, version: &str) -> anyhow::Result<String> {
    let (method, target) = route
        .split_once(' ')
        .with_context(|| format!("route '{route}' is not 'METHOD /path'"))?;
    let target = target.replace("{version}", version);
    let (path, query) = target.split_once('?').unwrap_or((&target, ""));
    let mut expr = format!("Endpoint::{}(\"{path}\")", method.to_lowercase());
    if !query.is_empty() {
        let pairs = query
            .split('&')
            .map(|pair| {
                let (k, v) = pair
                    .split_once('=')
                    .with_context(|| format!("bad query '{pair}' in route '{route}'"))?;
                Ok(format!("(\"{k}\", \"{v}\")"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        expr.push_str(&format!(".with_query(&[{}])", pairs.join(", ")));
    }
    Ok(expr)
}

/// One `(Operation, Endpoint)` row of the capability table.
fn cap_entry(kind: &str, verb: &str, expr: &str) -> Vec<String> {
    let one = format!("        (Operation::new(EntityKind::{kind}, Verb::{verb}), {expr}),");
    if one.len() <= MAX_WIDTH {
        return vec![one];
    }
    let mut out = vec![
        "        (".to_owned(),
        format!("            Operation::new(EntityKind::{kind}, Verb::{verb}),"),
    ];
    let split = expr.split_once(".with_query");
    match split {
        Some((head, tail)) if format!("            {expr},").len() > MAX_WIDTH => {
            out.push(format!("            {head}"));
            out.push(format!("                .with_query{tail},"));
        }
        _ => out.push(format!("            {expr},")),
    }
    out.push("        ),".to_owned());
    out
}

/// Statements computing a request body from `arg` through the converter
/// function `produce`.
fn body_fn(
    name: &str,
    spec: &BodySpec,
    arg: &str,
    produce: Option<&str>,
    key_expr: &str,
) -> anyhow::Result<Vec<String>> {
    let converted = || -> anyhow::Result<String> {
        let produce = produce.with_context(|| format!("'{name}' body needs a hook"))?;
        Ok(format!("{name}::{produce}({arg})"))
    };
    Ok(match spec {
        BodySpec::Hook(hook) => vec![format!("serde_json::to_value({name}_extra::{hook}({arg}))")],
        BodySpec::Wrap(wrap) => vec![
            format!("serde_json::to_value({wrap} {{"),
            format!("    job: Some({}),", converted()?),
            "})".to_owned(),
        ],
        BodySpec::Record {
            collection,
            key: Some(key),
        } => {
            let mut out = vec![
                format!("let mut record = {};", converted()?),
                format!("record.{key} = Some({key_expr});"),
            ];
            out.push(match collection {
                Some(c) => format!("collection(\"{c}\", &record)"),
                None => "serde_json::to_value(record)".to_owned(),
            });
            out
        }
        BodySpec::Record {
            collection,
            key: None,
        } => vec![match collection {
            Some(c) => format!("collection(\"{c}\", &{})", converted()?),
            None => format!("serde_json::to_value({})", converted()?),
        }],
    })
}

/// Lines of one `impl` block; methods are separated by a blank line.
struct Block(Vec<String>);

impl Block {
    fn method(&mut self, signature: &str, body: Vec<String>) {
        if !self.0.last().is_some_and(|l| l.ends_with('{')) {
            self.0.push(String::new());
        }
        self.0.push(format!("    {signature} {{"));
        self.0.extend(body.into_iter().map(|l| format!("        {l}")));
        self.0.push("    }".to_owned());
    }

    fn line(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }
}

/// Imports accumulated while rendering the bindings of one revision.
#[derive(Default)]
struct Imports {
    sdk: BTreeSet<String>,
    sup: BTreeSet<String>,
    wire: BTreeSet<String>,
    value: bool,
}

/// The `Binding` impl up to and including `decode_list`.
fn binding_head(name: &str, entity: &Entity, alias: &str) -> Block {
    let kind = &entity.kind;
    let key_ty = &entity.key.ty;
    let create_ty = entity.create.as_deref().unwrap_or("()");
    let clone = if key_ty == "String" { ".clone()" } else { "" };
    let mut b = Block(vec![
        format!("pub struct {kind}Binding;"),
        String::new(),
        format!("impl Binding for {kind}Binding {{"),
        format!("    const ENTITY: EntityKind = EntityKind::{kind};"),
        String::new(),
        format!("    type Key = {key_ty};"),
        format!("    type Entity = {};", entity.entity),
        format!("    type Create = {create_ty};"),
        format!("    type Update = {};", entity.update),
        format!("    type Query = {};", entity.query),
        String::new(),
        "    fn capabilities() -> &'static Capabilities {".to_owned(),
        "        &CAPABILITIES".to_owned(),
        "    }".to_owned(),
        String::new(),
        format!("    fn key(entity: &{}) -> {key_ty} {{", entity.entity),
        format!("        entity.{}{clone}", entity.key.field),
        "    }".to_owned(),
    ]);
    b.method(
        &format!(
            "fn decode_list(body: &[u8]) -> Result<Vec<{}>, serde_json::Error>",
            entity.entity
        ),
        vec![
            format!(
                "let records = take_collection::<{alias}>(body, \"{}\")?;",
                entity.collection
            ),
            format!("Ok(records.iter().map({name}::read).collect())"),
        ],
    );
    b
}

fn binding(
    config: &AdapterConfig,
    version: &str,
    name: &str,
    entry: &VersionEntry,
    imports: &mut Imports,
    caps: &mut Vec<String>,
) -> anyhow::Result<String> {
    let entity = config.entity(name)?;
    let kind = &entity.kind;
    for verb in &entry.verbs {
        let expr = endpoint_expr(route(entity, entry, verb)?, version)?;
        caps.extend(cap_entry(kind, &verb.to_upper_camel_case(), &expr));
        // Watchers poll the list endpoint.
        if verb == "list" && entity.watch {
            caps.extend(cap_entry(kind, "Watch", &expr));
        }
    }

    let key_ty = &entity.key.ty;
    let create_ty = entity.create.as_deref().unwrap_or("()");
    for ty in [&entity.entity, create_ty, &entity.update, &entity.query] {
        if ty != "()" {
            imports.sdk.insert(ty.to_owned());
        }
    }
    let alias = wire_alias(&entry.read, config);
    imports.wire.insert(wire_import(&entry.read, config));

    let binding = format!("{kind}Binding");
    let mut b = binding_head(name, entity, &alias);

    if entry.serves("create") && name != "job" {
        let spec = body(entity, entry, "create", imports)?;
        b.method(
            &format!("fn create_body(create: &{create_ty}) -> Result<Value, serde_json::Error>"),
            body_fn(name, spec, "create", Some("write_create"), "")?,
        );
        imports.value = true;
    }
    if entry.serves("update") {
        let spec = body(entity, entry, "update", imports)?;
        let keyed = matches!(spec, BodySpec::Record { key: Some(_), .. });
        let key_expr = if key_ty == "u32" { "*key" } else { "key.clone()" };
        let key_arg = if keyed { "key" } else { "_key" };
        b.method(
            &format!(
                "fn update_body({key_arg}: &{key_ty}, update: &{}) \
                 -> Result<Value, serde_json::Error>",
                entity.update
            ),
            body_fn(name, spec, "update", Some("write_update"), key_expr)?,
        );
        imports.value = true;
    }
    if let Some(field) = &entity.create_key {
        b.method(
            &format!("fn create_key(create: &{create_ty}) -> Option<String>"),
            vec![format!("Some(create.{field}.clone())")],
        );
    }
    b.line("}");

    if name == "job" {
        job_verbs(name, entity, entry, &binding, imports, &mut b)?;
    }
    if let Some(roles) = match name {
        "account" => Some(("AccountAssociations", "AccountAssociationRequest")),
        "user" => Some(("UserAssociations", "UserAssociationRequest")),
        _ => None,
    } {
        associations(name, entity, entry, roles, imports, &mut b)?;
    }
    Ok(b.0.join("\n"))
}

/// Body spec for `key`, importing `collection` when it is used.
fn body<'a>(
    entity: &'a Entity,
    entry: &'a VersionEntry,
    key: &str,
    imports: &mut Imports,
) -> anyhow::Result<&'a BodySpec> {
    let spec = body_spec(entity, entry, key)?;
    if matches!(spec, BodySpec::Record { collection: Some(_), .. }) {
        imports.sup.insert("collection".to_owned());
    }
    Ok(spec)
}

/// `AccountAssociations` or `UserAssociations`; empty when the revision has
/// no association endpoint.
fn associations(
    name: &str,
    entity: &Entity,
    entry: &VersionEntry,
    (role, request): (&str, &str),
    imports: &mut Imports,
    b: &mut Block,
) -> anyhow::Result<()> {
    let binding = format!("{}Binding", entity.kind);
    imports.sup.insert(role.to_owned());
    b.line("");
    if !entry.serves("create_association") {
        b.line(format!("impl {role} for {binding} {{}}"));
        return Ok(());
    }
    imports.sdk.insert(request.to_owned());
    b.line(format!("impl {role} for {binding} {{"));
    let spec = body_spec(entity, entry, "association")?;
    b.method(
        &format!("fn association_body(request: &{request}) -> Result<Value, serde_json::Error>"),
        body_fn(name, spec, "request", None, "")?,
    );
    b.line("}");
    Ok(())
}

fn job_verbs(
    name: &str,
    entity: &Entity,
    entry: &VersionEntry,
    binding: &str,
    imports: &mut Imports,
    b: &mut Block,
) -> anyhow::Result<()> {
    imports.sup.insert("JobVerbs".to_owned());
    b.line("");
    b.line(format!("impl JobVerbs for {binding} {{"));
    let spec = body_spec(entity, entry, "submit")?;
    if let BodySpec::Wrap(wrap) = spec {
        imports.wire.insert(wrap.clone());
    }
    b.method(
        "fn submit_body(create: &JobCreate) -> Result<Value, serde_json::Error>",
        body_fn(name, spec, "create", Some("write_create"), "")?,
    );
    if entry.serves("allocate") {
        imports.sdk.insert("JobAllocateRequest".to_owned());
        b.method(
            "fn allocate_body(request: &JobAllocateRequest) -> Result<Value, serde_json::Error>",
            body_fn(name, body_spec(entity, entry, "allocate")?, "request", None, "")?,
        );
    }
    b.line("}");
    imports.value = true;
    Ok(())
}

pub fn emit(
    config: &AdapterConfig,
    version: &str,
    entries: &Ordered<VersionEntry>,
    extras: &BTreeSet<&str>,
) -> anyhow::Result<String> {
    let module = module_name(version);
    let present: Vec<&str> = config.entities.keys().filter(|n| entries.contains(n)).collect();
    let mut imports = Imports {
        sdk: ["ApiVersion", "EntityKind", "Operation", "Verb"].map(str::to_owned).into(),
        sup: ["Binding", "Capabilities", "Endpoint", "Managers"].map(str::to_owned).into(),
        ..Imports::default()
    };
    let mut caps = Vec::new();
    let mut bindings = Vec::new();
    for name in &present {
        let entry = entries
            .get(name)
            .with_context(|| format!("'{name}' has no {version} binding"))?;
        bindings.push(binding(config, version, name, entry, &mut imports, &mut caps)?);
    }
    for (_, service) in config.services.iter() {
        for verb in service.verbs(version) {
            let expr = endpoint_expr(service.route(version, verb)?, version)?;
            caps.extend(cap_entry(&service.kind, &verb.to_upper_camel_case(), &expr));
        }
    }

    let mut lines = vec![
        HEADER.to_owned(),
        format!("//! `{version}` bindings."),
        String::new(),
        "use std::sync::Arc;".to_owned(),
        String::new(),
    ];
    if imports.value {
        lines.push("use serde_json::Value;".to_owned());
    }
    lines.push(use_line("slurm_client_sdk", imports.sdk));
    lines.push(String::new());
    lines.push(use_line("super", imports.sup));
    lines.extend(
        [
            "use crate::adapter::{EntityAdapter, InfoAdapter, StandaloneAdapter};",
            "use crate::transport::WireClient;",
            "use crate::watch::WatchConfig;",
            "use crate::wire::common::take_collection;",
        ]
        .map(str::to_owned),
    );
    lines.push(use_line(&format!("crate::wire::{module}"), imports.wire));
    lines.push(String::new());
    let mut sorted = present.clone();
    sorted.sort_unstable();
    lines.extend(sorted.iter().map(|n| format!("pub mod {n};")));
    lines.push(String::new());
    lines.extend(extras.iter().map(|n| format!("pub(crate) mod {n}_extra;")));
    lines.push(String::new());

    let kinds: Vec<&str> = present
        .iter()
        .map(|n| config.entity(n).map(|e| e.kind.as_str()))
        .collect::<anyhow::Result<_>>()?;
    lines.push("pub static CAPABILITIES: Capabilities = Capabilities {".to_owned());
    lines.push(format!("    version: ApiVersion::{},", version_const(version)));
    let one = format!(
        "    entities: &[{}],",
        kinds.iter().map(|k| format!("EntityKind::{k}")).collect::<Vec<_>>().join(", ")
    );
    if one.len() <= MAX_WIDTH {
        lines.push(one);
    } else {
        lines.push("    entities: &[".to_owned());
        lines.extend(kinds.iter().map(|k| format!("        EntityKind::{k},")));
        lines.push("    ],".to_owned());
    }
    lines.push("    endpoints: &[".to_owned());
    lines.extend(caps);
    lines.extend(["    ],", "};", ""].map(str::to_owned));
    lines.push(bindings.join("\n\n"));
    lines.push(String::new());
    lines.extend(managers(config, entries));
    lines.push(String::new());
    Ok(lines.join("\n"))
}

fn managers(config: &AdapterConfig, entries: &Ordered<VersionEntry>) -> Vec<String> {
    let mut lines = vec![
        "#[must_use]".to_owned(),
        "pub fn managers(client: Option<Arc<dyn WireClient>>, watch: &WatchConfig) -> Managers {"
            .to_owned(),
        "    Managers {".to_owned(),
    ];
    for (name, entity) in config.entities.iter() {
        let field = &entity.manager;
        if !entries.contains(name) {
            lines.push(format!("        {field}: None,"));
            continue;
        }
        let adapter = format!("EntityAdapter::<{}Binding>::new", entity.kind);
        let one = format!("        {field}: Some(Arc::new({adapter}(client.clone(), watch))),");
        if one.len() <= MAX_WIDTH {
            lines.push(one);
        } else {
            lines.push(format!("        {field}: Some(Arc::new({adapter}("));
            lines.push("            client.clone(),".to_owned());
            lines.push("            watch,".to_owned());
            lines.push("        ))),".to_owned());
        }
    }
    lines.extend(
        [
            "        info: Arc::new(InfoAdapter::<NodeBinding>::new(client.clone(), watch)),",
            "        standalone: Arc::new(StandaloneAdapter::new(client, &CAPABILITIES)),",
            "    }",
            "}",
        ]
        .map(str::to_owned),
    );
    lines
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn endpoints_carry_version_and_query() {
        let route = "DELETE /slurm/{version}/job/{id}?flags=X&a=b";
        let expr = endpoint_expr(route, "v0.0.42").unwrap();
        assert_eq!(
            expr,
            "Endpoint::delete(\"/slurm/v0.0.42/job/{id}\")\
             .with_query(&[(\"flags\", \"X\"), (\"a\", \"b\")])"
        );
        assert!(endpoint_expr("nopath", "v0.0.42").is_err());
    }

    #[test]
    fn long_capability_rows_wrap() {
        let short = cap_entry("Job", "List", "Endpoint::get(\"/slurm/v0.0.42/jobs/\")");
        assert_eq!(short.len(), 1);
        let expr = "Endpoint::delete(\"/slurm/v0.0.42/job/{id}\")\
                    .with_query(&[(\"flags\", \"FEDERATION_REQUEUE\")])";
        let long = cap_entry("Job", "Requeue", expr);
        assert_eq!(long[2], "            Endpoint::delete(\"/slurm/v0.0.42/job/{id}\")");
        assert!(long[3].starts_with("                .with_query"));
        assert!(long.iter().all(|l| l.len() <= MAX_WIDTH));
    }

    #[test]
    fn record_bodies() {
        let keyed = BodySpec::Record {
            collection: Some("accounts".to_owned()),
            key: Some("name".to_owned()),
        };
        let lines = body_fn("account", &keyed, "update", Some("write_update"), "key.clone()");
        assert_eq!(
            lines.unwrap(),
            vec![
                "let mut record = account::write_update(update);",
                "record.name = Some(key.clone());",
                "collection(\"accounts\", &record)",
            ]
        );
        let direct = BodySpec::Record {
            collection: None,
            key: None,
        };
        let lines = body_fn("node", &direct, "update", Some("write_update"), "").unwrap();
        assert_eq!(lines, vec!["serde_json::to_value(node::write_update(update))"]);
    }

    #[test]
    fn hook_and_wrap_bodies() {
        let hook = BodySpec::Hook("allocate_request".to_owned());
        let lines = body_fn("job", &hook, "request", None, "").unwrap();
        assert_eq!(lines, vec!["serde_json::to_value(job_extra::allocate_request(request))"]);
        let wrap = BodySpec::Wrap("JobSubmitReq".to_owned());
        let lines = body_fn("job", &wrap, "create", Some("write_create"), "").unwrap();
        assert_eq!(lines[1], "    job: Some(job::write_create(create)),");
        assert!(body_fn("job", &wrap, "request", None, "").is_err());
    }
}
