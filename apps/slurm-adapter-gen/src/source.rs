//! Struct definitions read from the model and wire sources.
//!
//! Types are kept as token strings without whitespace
//! (`Option<NoVal<i64>>`), which is all the strategy inference compares.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use proc_macro2::{TokenStream, TokenTree};
use quote::ToTokens;
use syn::parse::{Parse, ParseStream};
use syn::{Item, ItemStruct, UseTree};

/// Named fields of one struct, in declaration order.
pub type Fields = Vec<(String, String)>;

#[derive(Debug, Default)]
struct WireModule {
    structs: HashMap<String, Fields>,
    /// Re-exported name -> sibling module defining it.
    reexports: HashMap<String, String>,
}

#[derive(Debug, Default)]
pub struct Sources {
    models: HashMap<String, Fields>,
    keywords: BTreeSet<String>,
    wire: HashMap<String, WireModule>,
}

impl Sources {
    pub fn load(model_dir: &Path, wire_dir: &Path) -> anyhow::Result<Self> {
        let mut sources = Self::default();
        for path in rust_files(model_dir)? {
            let file = parse(&path)?;
            for item in &file.items {
                match item {
                    Item::Struct(s) => sources.add_model(s),
                    Item::Macro(m) if m.mac.path.is_ident("slurm_enum") => {
                        if let Some(name) = first_ident(m.mac.tokens.clone()) {
                            sources.keywords.insert(name);
                        }
                    }
                    _ => {}
                }
            }
        }
        // Admin levels are a single value, not a keyword list.
        sources.keywords.remove("AdminLevel");

        for path in rust_files(wire_dir)? {
            let Some(module) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if module == "mod" {
                continue;
            }
            let file = parse(&path)?;
            sources
                .wire
                .insert(module.to_owned(), wire_module(&path, &file)?);
        }
        Ok(sources)
    }

    fn add_model(&mut self, item: &ItemStruct) {
        if let Some(fields) = named_fields(item) {
            self.models.insert(item.ident.to_string(), fields);
        }
    }

    pub fn model(&self, name: &str) -> anyhow::Result<&Fields> {
        self.models
            .get(name)
            .with_context(|| format!("no model struct '{name}'"))
    }

    /// Fields of wire struct `name` as seen from `module`, following
    /// re-exports.
    pub fn wire(&self, module: &str, name: &str) -> anyhow::Result<&Fields> {
        let mut current = module;
        for _ in 0..=self.wire.len() {
            let wire = self
                .wire
                .get(current)
                .with_context(|| format!("no wire module '{current}'"))?;
            if let Some(fields) = wire.structs.get(name) {
                return Ok(fields);
            }
            current = wire
                .reexports
                .get(name)
                .with_context(|| format!("wire module '{current}' has no struct '{name}'"))?;
        }
        bail!("re-export cycle resolving '{name}' from '{module}'")
    }

    /// Model enums serialized as Slurm flag lists.
    pub fn is_keyword(&self, name: &str) -> bool {
        self.keywords.contains(name)
    }
}

fn rust_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("cannot list {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn parse(path: &Path) -> anyhow::Result<syn::File> {
    let content =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    syn::parse_file(&content).with_context(|| format!("cannot parse {}", path.display()))
}

fn named_fields(item: &ItemStruct) -> Option<Fields> {
    let syn::Fields::Named(named) = &item.fields else {
        return None;
    };
    Some(
        named
            .named
            .iter()
            .filter_map(|f| {
                let ident = f.ident.as_ref()?;
                Some((ident.to_string(), type_string(&f.ty)))
            })
            .collect(),
    )
}

fn type_string(ty: &syn::Type) -> String {
    ty.to_token_stream().to_string().replace(' ', "")
}

/// The enum name of a `slurm_enum!` body: the first identifier after the
/// doc attributes.
fn first_ident(tokens: TokenStream) -> Option<String> {
    tokens.into_iter().find_map(|tt| match tt {
        TokenTree::Ident(ident) => Some(ident.to_string()),
        _ => None,
    })
}

/// Struct items of a `wire_model!` body.
struct WireStructs(Vec<ItemStruct>);

impl Parse for WireStructs {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let mut items = Vec::new();
        while !input.is_empty() {
            items.push(input.parse()?);
        }
        Ok(Self(items))
    }
}

fn wire_module(path: &Path, file: &syn::File) -> anyhow::Result<WireModule> {
    let mut module = WireModule::default();
    for item in &file.items {
        match item {
            Item::Struct(s) => {
                if let Some(fields) = named_fields(s) {
                    module.structs.insert(s.ident.to_string(), fields);
                }
            }
            Item::Macro(m) if m.mac.path.is_ident("wire_model") => {
                let WireStructs(items) = m
                    .mac
                    .parse_body()
                    .with_context(|| format!("bad wire_model! in {}", path.display()))?;
                for s in &items {
                    if let Some(fields) = named_fields(s) {
                        module.structs.insert(s.ident.to_string(), fields);
                    }
                }
            }
            Item::Use(u) if matches!(u.vis, syn::Visibility::Public(_)) => {
                collect_reexports(&u.tree, None, &mut module.reexports);
            }
            _ => {}
        }
    }
    Ok(module)
}

/// Record `pub use super::<module>::{A, B}` names against `<module>`.
fn collect_reexports(tree: &UseTree, module: Option<&str>, out: &mut HashMap<String, String>) {
    match tree {
        UseTree::Path(p) if p.ident == "super" && module.is_none() => {
            if let UseTree::Path(inner) = &*p.tree {
                let sibling = inner.ident.to_string();
                collect_reexports(&inner.tree, Some(&sibling), out);
            }
        }
        UseTree::Name(n) => {
            if let Some(m) = module {
                out.insert(n.ident.to_string(), m.to_owned());
            }
        }
        UseTree::Group(g) => {
            for item in &g.items {
                collect_reexports(item, module, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn reads_models_keywords_and_reexports() {
        let model = tempfile::tempdir().unwrap();
        let wire = tempfile::tempdir().unwrap();
        write(
            model.path(),
            "job.rs",
            "slurm_enum! {\n    /// States.\n    JobState { Pending => \"PENDING\" }\n}\n\
             slurm_enum! { AdminLevel { None => \"None\" } }\n\
             pub struct Job {\n    pub id: u32,\n    pub submit_time: Option<DateTime<Utc>>,\n}\n",
        );
        write(
            wire.path(),
            "v0_0_40.rs",
            "wire_model! {\n    pub struct JobInfo {\n        pub job_id: Option<u32>,\n        \
             pub end_time: Option<NoVal<i64>>,\n    }\n}\n",
        );
        write(
            wire.path(),
            "v0_0_41.rs",
            "pub use super::v0_0_40::{JobInfo};\n",
        );
        write(wire.path(), "mod.rs", "pub mod v0_0_40;\n");

        let sources = Sources::load(model.path(), wire.path()).unwrap();
        assert!(sources.is_keyword("JobState"));
        assert!(!sources.is_keyword("AdminLevel"));
        assert_eq!(
            sources.model("Job").unwrap()[1],
            ("submit_time".to_owned(), "Option<DateTime<Utc>>".to_owned())
        );
        let fields = sources.wire("v0_0_41", "JobInfo").unwrap();
        assert_eq!(fields[1].1, "Option<NoVal<i64>>");
        assert!(sources.wire("v0_0_41", "Missing").is_err());
    }
}
