use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A TMLoader profile document.
///
/// Stored as one YAML file per profile under the loader's
/// `database/TmForever/profiles/` directory; the file base name is the
/// profile's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderProfile {
    pub program: ProfileProgram,

    /// Enabled mods, in load order.
    pub mods: Vec<ModEntry>,

    pub description: String,

    /// Extra arguments passed to the game; omitted from the document when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
}

/// The program a profile is bound to (`TmForever` for this toolkit).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileProgram {
    pub id: String,
}

/// A single enabled mod inside a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModEntry {
    pub id: String,
}

/// TMLoader's shared `config.yaml`.
///
/// Only `servers` is edited by the toolkit; every other top-level field rides
/// along in `extra` so a read-modify-write cycle never drops it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub servers: Vec<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml_ng::Value>,
}

/// Product settings TMLoader keeps next to a database entry
/// (`database/TmForever/products/TmForever/settings.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSettings {
    pub install: String,
}
