//! TMLoader profile documents and the shared loader configuration.
//!
//! Profiles live as individual YAML files under the loader's
//! `database/TmForever/profiles/` directory. Creation is last-writer-wins:
//! an existing document of the same name is overwritten without a merge.
//! Listing parses every `.yaml`/`.yml` entry and aborts on the first
//! malformed document.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::fs;
use thiserror::Error;

use crate::models::{LoaderConfig, LoaderProfile, ModEntry, ProfileProgram};

/// TMLoader binds every profile written by this toolkit to this program id.
pub const PROGRAM_ID: &str = "TmForever";

/// Errors raised while reading profile documents
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to parse profile {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// Store of named TMLoader profiles, one YAML document per profile.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profiles_dir: Utf8PathBuf,
}

impl ProfileStore {
    pub fn new<P: AsRef<Utf8Path>>(profiles_dir: P) -> Self {
        Self {
            profiles_dir: profiles_dir.as_ref().to_path_buf(),
        }
    }

    pub fn profiles_dir(&self) -> &Utf8Path {
        &self.profiles_dir
    }

    /// Write profile `<name>.yaml`, unconditionally overwriting any existing
    /// document of that name. The storage directory is created on demand.
    ///
    /// # Arguments
    /// * `name` - Profile identity, becomes the file base name
    /// * `mods` - Mod ids, preserved in the given order
    /// * `args` - Extra game arguments; omitted from the document when `None`
    /// * `description` - Free-form description shown by the loader
    pub fn create(
        &self,
        name: &str,
        mods: &[&str],
        args: Option<&str>,
        description: &str,
    ) -> Result<Utf8PathBuf> {
        let profile = LoaderProfile {
            program: ProfileProgram {
                id: PROGRAM_ID.to_string(),
            },
            mods: mods
                .iter()
                .map(|m| ModEntry { id: m.to_string() })
                .collect(),
            description: description.to_string(),
            args: args.map(str::to_string),
        };

        fs::create_dir_all(&self.profiles_dir).with_context(|| {
            format!("Failed to create profiles directory: {}", self.profiles_dir)
        })?;

        let path = self.profiles_dir.join(format!("{name}.yaml"));
        let yaml =
            serde_yaml_ng::to_string(&profile).context("Failed to serialize profile to YAML")?;
        fs::write(&path, yaml).with_context(|| format!("Failed to write profile: {}", path))?;

        tracing::info!("Wrote profile {}", path);
        Ok(path)
    }

    /// List every profile document in the storage directory, keyed by file
    /// name.
    ///
    /// A document that fails to parse aborts the whole listing with
    /// [`ProfileError::Parse`].
    pub fn list(&self) -> Result<IndexMap<String, LoaderProfile>> {
        let entries = fs::read_dir(&self.profiles_dir).with_context(|| {
            format!("Failed to read profiles directory: {}", self.profiles_dir)
        })?;

        let mut profiles = IndexMap::new();
        for entry in entries {
            let entry = entry.with_context(|| {
                format!("Failed to enumerate profiles in {}", self.profiles_dir)
            })?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !(file_name.ends_with(".yaml") || file_name.ends_with(".yml")) {
                continue;
            }

            let path = self.profiles_dir.join(&file_name);
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read profile: {}", path))?;
            let profile: LoaderProfile = serde_yaml_ng::from_str(&contents)
                .map_err(|source| ProfileError::Parse {
                    path: path.clone(),
                    source,
                })?;

            profiles.insert(file_name, profile);
        }

        tracing::debug!(
            "Listed {} profiles in {}",
            profiles.len(),
            self.profiles_dir
        );
        Ok(profiles)
    }
}

/// Append `server_url` to the `servers` list of a TMLoader config document,
/// rewriting the file in place; a URL already present leaves the file
/// untouched. Unrelated fields survive the rewrite.
///
/// Returns whether the URL was added.
pub fn add_server_if_absent(config_path: &Utf8Path, server_url: &str) -> Result<bool> {
    let contents = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read loader config: {}", config_path))?;
    let mut config: LoaderConfig = serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("Failed to parse loader config: {}", config_path))?;

    if config.servers.iter().any(|s| s == server_url) {
        tracing::debug!("Repository {} already present in {}", server_url, config_path);
        return Ok(false);
    }

    config.servers.push(server_url.to_string());
    let yaml =
        serde_yaml_ng::to_string(&config).context("Failed to serialize loader config to YAML")?;
    fs::write(config_path, yaml)
        .with_context(|| format!("Failed to write loader config: {}", config_path))?;

    tracing::info!("Added repository {} to {}", server_url, config_path);
    Ok(true)
}
