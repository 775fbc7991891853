//! Schema of `codegen/adapters.yaml`.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterConfig {
    pub paths: Paths,
    pub entities: Ordered<Entity>,
    /// Operations outside the entity bindings, such as `info`.
    pub services: Ordered<Service>,
    /// Revision -> entity name -> binding.
    pub versions: Ordered<Ordered<VersionEntry>>,
    /// Input type -> rules.
    pub validation: Ordered<Rules>,
}

impl AdapterConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_saphyr::from_str(&content).with_context(|| format!("invalid {}", path.display()))
    }

    pub fn entity(&self, name: &str) -> anyhow::Result<&Entity> {
        self.entities
            .get(name)
            .with_context(|| format!("unknown entity '{name}'"))
    }
}

/// Locations relative to the workspace root.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Paths {
    pub model: PathBuf,
    pub wire: PathBuf,
    pub versions: PathBuf,
    pub rules: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entity {
    /// `EntityKind` variant.
    pub kind: String,
    /// Field of `Managers` holding the adapter.
    pub manager: String,
    pub key: Key,
    pub entity: String,
    pub create: Option<String>,
    pub update: String,
    pub query: String,
    /// Response field holding the record list.
    pub collection: String,
    /// `list` also serves `watch`.
    #[serde(default)]
    pub watch: bool,
    /// Create input field reported back as the new key.
    pub create_key: Option<String>,
    /// Wire field -> model field, where the names differ.
    #[serde(default)]
    pub renames: BTreeMap<String, String>,
    /// Wire fields converted by the hand-written `<entity>_extra` hooks.
    #[serde(default)]
    pub hooked: Vec<String>,
    #[serde(default)]
    pub custom: Custom,
    /// Verb -> `METHOD /path` with `{version}` and `{id}` placeholders.
    pub routes: BTreeMap<String, String>,
    #[serde(default)]
    pub bodies: BTreeMap<String, BodySpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Key {
    #[serde(rename = "type")]
    pub ty: String,
    pub field: String,
}

/// Strategies the inference cannot decide, per section and model field.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Custom {
    pub read: BTreeMap<String, String>,
    pub create: BTreeMap<String, String>,
    pub update: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    /// `EntityKind` variant.
    pub kind: String,
    /// Verb -> `METHOD /path`.
    pub routes: BTreeMap<String, String>,
    /// Revision -> verbs it serves.
    pub serves: Ordered<Vec<String>>,
    /// Revision -> verb -> route replacing the shared one.
    #[serde(default)]
    pub overrides: BTreeMap<String, BTreeMap<String, String>>,
}

impl Service {
    /// Verbs `version` serves, in YAML order; none when it is not listed.
    pub fn verbs(&self, version: &str) -> &[String] {
        self.serves.get(version).map_or(&[], Vec::as_slice)
    }

    pub fn route(&self, version: &str, verb: &str) -> anyhow::Result<&str> {
        self.overrides
            .get(version)
            .and_then(|routes| routes.get(verb))
            .or_else(|| self.routes.get(verb))
            .map(String::as_str)
            .with_context(|| format!("service '{}' has no route for '{verb}'", self.kind))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionEntry {
    pub read: String,
    pub create: Option<String>,
    pub update: Option<String>,
    pub verbs: Vec<String>,
    #[serde(default)]
    pub routes: BTreeMap<String, String>,
    #[serde(default)]
    pub bodies: BTreeMap<String, BodySpec>,
}

impl VersionEntry {
    pub fn serves(&self, verb: &str) -> bool {
        self.verbs.iter().any(|v| v == verb)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    pub require: Vec<String>,
    pub at_least_one: Vec<String>,
    pub domain: Option<String>,
}

/// How a request body is built from the converter output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawBody")]
pub enum BodySpec {
    /// The converted record, optionally keyed and wrapped in a one-element
    /// collection. `direct` is the record as is.
    Record {
        collection: Option<String>,
        key: Option<String>,
    },
    /// A function of the entity's `_extra` module.
    Hook(String),
    /// The converted record as the `job` field of the named wire type.
    Wrap(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBody {
    Keyword(String),
    Shape {
        collection: Option<String>,
        key: Option<String>,
        hook: Option<String>,
        wrap: Option<String>,
    },
}

impl TryFrom<RawBody> for BodySpec {
    type Error = String;

    fn try_from(raw: RawBody) -> Result<Self, Self::Error> {
        match raw {
            RawBody::Keyword(word) if word == "direct" => Ok(Self::Record {
                collection: None,
                key: None,
            }),
            RawBody::Keyword(word) => Err(format!("unknown body '{word}'")),
            RawBody::Shape {
                hook: Some(hook),
                collection: None,
                key: None,
                wrap: None,
            } => Ok(Self::Hook(hook)),
            RawBody::Shape {
                wrap: Some(wrap),
                collection: None,
                key: None,
                hook: None,
            } => Ok(Self::Wrap(wrap)),
            RawBody::Shape {
                collection,
                key,
                hook: None,
                wrap: None,
            } => Ok(Self::Record { collection, key }),
            RawBody::Shape { .. } => Err("hook and wrap bodies take no other keys".to_owned()),
        }
    }
}

/// A YAML mapping that keeps its key order.
#[derive(Debug)]
pub struct Ordered<T>(Vec<(String, T)>);

impl<T> Ordered<T> {
    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Ordered<T> {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedVisitor<T> {
            type Value = Ordered<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, T)> = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, T>()? {
                    if entries.iter().any(|(k, _)| *k == key) {
                        return Err(serde::de::Error::custom(format!("duplicate key '{key}'")));
                    }
                    entries.push((key, value));
                }
                Ok(Ordered(entries))
            }
        }

        de.deserialize_map(OrderedVisitor(PhantomData))
    }
}

/// Entity-level body merged with the revision's override.
pub fn body_spec<'a>(
    entity: &'a Entity,
    version: &'a VersionEntry,
    key: &str,
) -> anyhow::Result<&'a BodySpec> {
    match version.bodies.get(key).or_else(|| entity.bodies.get(key)) {
        Some(spec) => Ok(spec),
        None => bail!("entity '{}' has no '{key}' body", entity.entity),
    }
}

/// Entity-level route merged with the revision's override.
pub fn route<'a>(
    entity: &'a Entity,
    version: &'a VersionEntry,
    verb: &str,
) -> anyhow::Result<&'a str> {
    version
        .routes
        .get(verb)
        .or_else(|| entity.routes.get(verb))
        .map(String::as_str)
        .with_context(|| format!("entity '{}' has no route for '{verb}'", entity.entity))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn ordered_keeps_yaml_order() {
        let map: Ordered<u32> = serde_saphyr::from_str("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(map.get("alpha"), Some(&2));
    }

    #[test]
    fn service_routes_take_revision_overrides() {
        let service: Service = serde_saphyr::from_str(
            "kind: Info\n\
             routes:\n  ping: GET /slurm/{version}/ping/\n  db: GET /slurmdb/{version}/config\n\
             serves:\n  v0.0.43: [ping, db]\n\
             overrides:\n  v0.0.43:\n    db: GET /slurmdb/{version}/ping/\n",
        )
        .unwrap();
        assert_eq!(service.verbs("v0.0.43"), ["ping", "db"]);
        assert!(service.verbs("v0.0.40").is_empty());
        assert_eq!(service.route("v0.0.43", "db").unwrap(), "GET /slurmdb/{version}/ping/");
        assert_eq!(service.route("v0.0.42", "db").unwrap(), "GET /slurmdb/{version}/config");
        assert!(service.route("v0.0.43", "stats").is_err());
    }

    #[test]
    fn ordered_rejects_duplicates() {
        assert!(serde_saphyr::from_str::<Ordered<u32>>("a: 1\na: 2\n").is_err());
    }

    #[test]
    fn body_specs_parse() {
        let bodies: BTreeMap<String, BodySpec> = serde_saphyr::from_str(
            "a: direct\nb: { collection: accounts, key: name }\n\
             c: { hook: submit_request }\nd: { wrap: JobSubmitReq }\n",
        )
        .unwrap();
        assert_eq!(
            bodies["a"],
            BodySpec::Record {
                collection: None,
                key: None
            }
        );
        assert_eq!(
            bodies["b"],
            BodySpec::Record {
                collection: Some("accounts".to_owned()),
                key: Some("name".to_owned())
            }
        );
        assert_eq!(bodies["c"], BodySpec::Hook("submit_request".to_owned()));
        assert_eq!(bodies["d"], BodySpec::Wrap("JobSubmitReq".to_owned()));
    }

    #[test]
    fn mixed_body_is_rejected() {
        let parsed: Result<BodySpec, _> = serde_saphyr::from_str("{ hook: f, collection: x }");
        assert!(parsed.is_err());
    }
}
