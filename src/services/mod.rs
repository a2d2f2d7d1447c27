//! Services module - Core business logic of the toolkit.
//!
//! The services are **framework-agnostic** and have no dependencies on the
//! CLI layer, making them testable and reusable.
//!
//! # Components
//!
//! - [`registry`]: Line-oriented scan of Wine's text registry hives
//! - [`paths`]: Translation of Windows registry paths into host paths
//! - [`game_detection`]: Locating the installed TrackMania Forever edition
//! - [`profiles`]: TMLoader profile documents and the shared loader config
//! - [`launcher`]: Wine environment resolution and subprocess execution
//! - [`downloads`]: HTTP downloads and zip extraction
//! - [`content`]: Planning of track/skin/texture-mod downloads
//!
//! # Design Philosophy
//!
//! - **Pure**: No side effects beyond file I/O and subprocess execution
//! - **Explicit**: All inputs are parameters; no hidden global state
//! - **Two-tier errors**: Absence (a missing registry value, an absent
//!   loader directory) is `None`; structural impossibility (no game, a
//!   malformed profile, an unconfigured Wine environment) is a typed error

pub mod content;
pub mod downloads;
pub mod game_detection;
pub mod launcher;
pub mod paths;
pub mod profiles;
pub mod registry;

pub use content::{ContentRequest, DownloadPlan};
pub use downloads::{DownloadClient, extract_zip};
pub use game_detection::{GameNotFoundError, locate_installation};
pub use launcher::{WineError, WineRunner};
pub use profiles::{ProfileError, ProfileStore, add_server_if_absent};
pub use registry::{find_registry_value, find_system_value, find_uninstall_value};
