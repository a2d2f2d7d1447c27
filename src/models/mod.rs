//! Data models for the toolkit.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Installation`]: The located game installation inside the Wine prefix
//! - [`LoaderProfile`]: A TMLoader profile document (one YAML file per profile)
//! - [`LoaderConfig`]: TMLoader's shared `config.yaml` with its repository list
//! - [`ToolkitSettings`]: The toolkit's own settings loaded from `tmtoolkit.yaml`
//!
//! # Architecture Note
//!
//! The models are designed to be:
//! - **Serializable**: All on-disk documents derive `Serialize`/`Deserialize` for YAML persistence
//! - **Immutable where it matters**: [`Installation`] is created once by detection and never mutated

pub mod config;
pub mod install;
pub mod profile;

pub use config::{GeneralSettings, ToolkitSettings};
pub use install::{GameEdition, Installation};
pub use profile::{LoaderConfig, LoaderProfile, ModEntry, ProductSettings, ProfileProgram};
