//! Detection of the installed TrackMania Forever edition inside a Wine prefix.
//!
//! Both editions register an uninstall entry in the prefix's `system.reg`;
//! the entry's `InstallLocation` value is the Windows path of the game
//! directory. United is checked first and always wins when both entries are
//! present, so the result is deterministic for prefixes carrying both.

use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::models::{GameEdition, Installation};
use crate::services::paths::{prefix_home, windows_to_host};
use crate::services::registry::find_uninstall_value;

const UNITED_UNINSTALL_KEY: &str = "TmUnitedForever_is1";
const NATIONS_UNINSTALL_KEY: &str = "TmNationsForever_is1";
const INSTALL_LOCATION_VALUE: &str = "InstallLocation";

/// Raised when neither edition's uninstall entry resolves. Fatal to session
/// construction; there is no fallback heuristic.
#[derive(Error, Debug)]
#[error("neither TmNations Forever nor TmUnited Forever was found in this prefix")]
pub struct GameNotFoundError;

/// Host path of the United install directory, if registered.
pub fn united_install_dir(prefix: &Utf8Path) -> Result<Option<Utf8PathBuf>> {
    let value = find_uninstall_value(prefix, UNITED_UNINSTALL_KEY, INSTALL_LOCATION_VALUE)?;
    Ok(windows_to_host(value.as_deref(), prefix))
}

/// Host path of the Nations install directory, if registered.
pub fn nations_install_dir(prefix: &Utf8Path) -> Result<Option<Utf8PathBuf>> {
    let value = find_uninstall_value(prefix, NATIONS_UNINSTALL_KEY, INSTALL_LOCATION_VALUE)?;
    Ok(windows_to_host(value.as_deref(), prefix))
}

/// Locate the installed edition, preferring United.
///
/// # Errors
///
/// Returns [`GameNotFoundError`] when neither edition is registered in the
/// prefix. Hive read failures propagate as-is.
pub fn locate_installation(prefix: &Utf8Path, user: &str) -> Result<Installation> {
    let documents_dir = prefix_home(prefix, user).join("Documents/TmForever");

    if let Some(install_dir) = united_install_dir(prefix)? {
        tracing::info!("Detected {} at {}", GameEdition::United.name(), install_dir);
        return Ok(Installation {
            edition: GameEdition::United,
            install_dir,
            documents_dir,
        });
    }

    if let Some(install_dir) = nations_install_dir(prefix)? {
        tracing::info!("Detected {} at {}", GameEdition::Nations.name(), install_dir);
        return Ok(Installation {
            edition: GameEdition::Nations,
            install_dir,
            documents_dir,
        });
    }

    tracing::debug!("No TrackMania Forever uninstall entry in {}", prefix);
    Err(GameNotFoundError.into())
}
