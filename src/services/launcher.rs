//! Wine environment resolution and subprocess execution.
//!
//! The toolkit never talks to Windows binaries directly; everything runs
//! through the Wine executable named by the `WINE` environment variable,
//! against the prefix named by `WINEPREFIX`.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::time::Instant;
use thiserror::Error;
use tokio::process::Command;

use crate::services::paths::prefix_home;

/// Errors raised while resolving or using the Wine environment
#[derive(Error, Debug)]
pub enum WineError {
    #[error("WINE environment variable is not set or does not point to a Wine binary")]
    WineNotConfigured,

    #[error("WINEPREFIX environment variable is not set or the prefix does not exist")]
    PrefixNotFound,
}

/// The Wine environment a session runs Windows executables under.
#[derive(Debug, Clone)]
pub struct WineRunner {
    wine_exe: Utf8PathBuf,
    prefix: Utf8PathBuf,
    user: String,
}

impl WineRunner {
    /// Resolve the Wine binary, prefix and user from the process environment.
    ///
    /// # Errors
    ///
    /// [`WineError::WineNotConfigured`] when `WINE` is unset or not a file;
    /// [`WineError::PrefixNotFound`] when `WINEPREFIX` is unset or missing.
    /// A missing `USER` resolves to an empty user name (best effort).
    pub fn from_env() -> Result<Self> {
        let wine_exe = std::env::var("WINE")
            .ok()
            .map(Utf8PathBuf::from)
            .filter(|p| p.is_file())
            .ok_or(WineError::WineNotConfigured)?;

        let prefix = std::env::var("WINEPREFIX")
            .ok()
            .map(Utf8PathBuf::from)
            .filter(|p| p.exists())
            .ok_or(WineError::PrefixNotFound)?;

        let user = std::env::var("USER").unwrap_or_default();

        Ok(Self::new(wine_exe, prefix, user))
    }

    /// Build a runner from explicit paths. Used by tests and embedders.
    pub fn new(wine_exe: Utf8PathBuf, prefix: Utf8PathBuf, user: String) -> Self {
        Self {
            wine_exe,
            prefix,
            user,
        }
    }

    pub fn wine_exe(&self) -> &Utf8Path {
        &self.wine_exe
    }

    pub fn prefix(&self) -> &Utf8Path {
        &self.prefix
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// The user's home directory inside the prefix.
    pub fn home_dir(&self) -> Utf8PathBuf {
        prefix_home(&self.prefix, &self.user)
    }

    /// Run a Windows executable under Wine and wait for it to exit.
    ///
    /// The working directory is the executable's own directory, matching how
    /// the game expects to be started. Returns the process exit code.
    pub async fn run(&self, exe: &Utf8Path, args: &[&str]) -> Result<i32> {
        if !self.prefix.exists() {
            return Err(WineError::PrefixNotFound.into());
        }

        tracing::info!("Running {} under Wine (args: {:?})", exe, args);
        let start = Instant::now();

        let mut cmd = Command::new(&self.wine_exe);
        cmd.arg(exe.as_str())
            .args(args)
            .env("WINEPREFIX", &self.prefix);
        if let Some(dir) = exe.parent() {
            cmd.current_dir(dir);
        }

        let status = cmd
            .status()
            .await
            .with_context(|| format!("Failed to spawn {} under Wine", exe))?;
        let exit_code = status.code().unwrap_or(-1);

        tracing::info!(
            "{} exited after {:.2}s with code {}",
            exe.file_name().unwrap_or(exe.as_str()),
            start.elapsed().as_secs_f32(),
            exit_code
        );

        Ok(exit_code)
    }
}
