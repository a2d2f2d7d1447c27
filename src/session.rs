//! The per-run game session.
//!
//! A [`GameSession`] is constructed once, owns the located installation and
//! derived state (loader presence, optional UVME uninstaller), and exposes
//! every operation the toolkit performs against the prefix. It is an
//! explicit value passed to whatever consumes it; there is no module-level
//! instance.

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::fs;

use crate::models::{GameEdition, Installation, LoaderProfile, ProductSettings};
use crate::services::content::ContentRequest;
use crate::services::downloads::{DownloadClient, extract_zip};
use crate::services::game_detection::locate_installation;
use crate::services::launcher::WineRunner;
use crate::services::paths::windows_to_host;
use crate::services::profiles::{ProfileStore, add_server_if_absent};
use crate::services::registry::find_uninstall_value;

/// TMLoader release installed by [`GameSession::install_modloader`].
const TMLOADER_URL: &str =
    "https://tomashu.pages.dev/modloader/modloader/TMLoader-1.0.1-win32.zip";

/// Install location TMLoader records for the game product.
const TMLOADER_PRODUCT_INSTALL: &str = "C:/Program Files (x86)/TmUnitedForever";

/// Loader directory relative to the prefix.
const TMLOADER_DIR: &str = "drive_c/Program Files/TMLoader";

const UVME_NATIONS_URL: &str =
    "https://github.com/AroPix/TrackManiaAssets/releases/download/1.0.0/TmNationsForever_UVME_v3.1.exe";
const UVME_UNITED_URL: &str =
    "https://github.com/AroPix/TrackManiaAssets/releases/download/1.0.0/TmUnitedForever_UVME_v3.1.exe";
const UVME_UNINSTALL_KEY: &str = "TmNationsForever - UVME_is1";

const TWINKIE_FONT_URL: &str =
    "https://github.com/TwinkieTweaks/TwinkieNSIS/raw/refs/heads/main/Twinkie.ttf";
const MANIAICONS_FONT_URL: &str =
    "https://github.com/TwinkieTweaks/TwinkieNSIS/raw/refs/heads/main/ManiaIcons.ttf";
const TWINKIE_REPOSITORY_URL: &str = "https://twinkietweaks.github.io/tmloader/";

/// A located installation plus everything the toolkit does with it.
pub struct GameSession {
    wine: WineRunner,
    install: Installation,
    downloads: DownloadClient,
    loader_dir: Option<Utf8PathBuf>,
    uvme_uninstaller: Option<Utf8PathBuf>,
}

impl GameSession {
    /// Build a session from the process environment.
    ///
    /// Construction fails when the Wine environment is unresolved or when no
    /// supported edition is installed in the prefix; a session cannot exist
    /// without a located installation.
    pub fn new() -> Result<Self> {
        Self::with_runner(WineRunner::from_env()?)
    }

    /// Build a session for an explicit Wine environment.
    pub fn with_runner(wine: WineRunner) -> Result<Self> {
        let install = locate_installation(wine.prefix(), wine.user())?;

        let mut session = Self {
            wine,
            install,
            downloads: DownloadClient::new(),
            loader_dir: None,
            uvme_uninstaller: None,
        };
        session.refresh_loader();
        session.refresh_uvme()?;
        Ok(session)
    }

    fn refresh_loader(&mut self) {
        let dir = self.wine.prefix().join(TMLOADER_DIR);
        self.loader_dir = dir.exists().then_some(dir);
    }

    fn refresh_uvme(&mut self) -> Result<()> {
        let value = find_uninstall_value(self.wine.prefix(), UVME_UNINSTALL_KEY, "UninstallString")?;
        self.uvme_uninstaller = windows_to_host(value.as_deref(), self.wine.prefix());
        Ok(())
    }

    pub fn edition(&self) -> GameEdition {
        self.install.edition
    }

    pub fn install_dir(&self) -> &Utf8Path {
        &self.install.install_dir
    }

    pub fn documents_dir(&self) -> &Utf8Path {
        &self.install.documents_dir
    }

    pub fn wine(&self) -> &WineRunner {
        &self.wine
    }

    pub fn loader_installed(&self) -> bool {
        self.loader_dir.is_some()
    }

    pub fn uvme_installed(&self) -> bool {
        self.uvme_uninstaller.is_some()
    }

    pub fn uvme_uninstaller(&self) -> Option<&Utf8Path> {
        self.uvme_uninstaller.as_deref()
    }

    fn loader_dir_checked(&self) -> Result<&Utf8Path> {
        match &self.loader_dir {
            Some(dir) => Ok(dir),
            None => bail!("TMLoader is not installed in this prefix"),
        }
    }

    /// The profile store of the installed loader.
    pub fn profile_store(&self) -> Result<ProfileStore> {
        Ok(ProfileStore::new(
            self.loader_dir_checked()?.join("database/TmForever/profiles"),
        ))
    }

    pub fn profiles(&self) -> Result<IndexMap<String, LoaderProfile>> {
        self.profile_store()?.list()
    }

    pub fn create_profile(
        &self,
        name: &str,
        mods: &[&str],
        args: Option<&str>,
        description: &str,
    ) -> Result<Utf8PathBuf> {
        self.profile_store()?.create(name, mods, args, description)
    }

    /// Download and install TMLoader into the prefix.
    ///
    /// Extracts the release archive, records the product install location,
    /// creates the stock profiles and swaps the game binary for TMLoader's
    /// shim; the vanilla executable stays behind as `TmForever.bak.exe`.
    pub async fn install_modloader(&mut self) -> Result<()> {
        let archive = self
            .downloads
            .fetch_to_dir(TMLOADER_URL, self.wine.prefix())
            .await?;

        let loader_dir = self.wine.prefix().join(TMLOADER_DIR);
        extract_zip(&archive, &loader_dir)?;

        let products_dir = loader_dir.join("database/TmForever/products/TmForever");
        fs::create_dir_all(&products_dir)
            .with_context(|| format!("Failed to create products directory: {}", products_dir))?;
        let settings = ProductSettings {
            install: TMLOADER_PRODUCT_INSTALL.to_string(),
        };
        let yaml = serde_yaml_ng::to_string(&settings)
            .context("Failed to serialize product settings to YAML")?;
        fs::write(products_dir.join("settings.yaml"), yaml)
            .with_context(|| format!("Failed to write product settings in {}", products_dir))?;

        fs::remove_file(&archive)
            .with_context(|| format!("Failed to remove downloaded archive: {}", archive))?;

        let store = ProfileStore::new(loader_dir.join("database/TmForever/profiles"));
        store.create(
            "default",
            &["TMUnlimiter", "Competition Patch", "CoreMod"],
            None,
            "Default (TMUnlimiter, Competition Patch",
        )?;
        store.create(
            "comp",
            &["Competition Patch", "CoreMod"],
            None,
            "Competition Patch (No TMUnlimiter",
        )?;
        store.create(
            "tminterface",
            &["TMUnlimiter", "TMInterface", "CoreMod"],
            None,
            "TwinkieTweaks (+TMUnlimiter, Competition Patch, Coremod)",
        )?;

        let game_exe = self.install.install_dir.join("TmForever.exe");
        let backup_exe = self.install.install_dir.join("TmForever.bak.exe");
        fs::rename(&game_exe, &backup_exe)
            .with_context(|| format!("Failed to back up game binary: {}", game_exe))?;
        fs::copy(loader_dir.join("ShimRun.exe"), &game_exe)
            .with_context(|| format!("Failed to install loader shim as {}", game_exe))?;

        self.loader_dir = Some(loader_dir);
        tracing::info!("TMLoader installed into {}", self.wine.prefix());
        Ok(())
    }

    pub async fn start_game(&self) -> Result<i32> {
        self.wine
            .run(&self.install.install_dir.join("TmForever.exe"), &[])
            .await
    }

    /// Start the original game binary backed up by the loader install.
    pub async fn start_vanilla(&self) -> Result<i32> {
        self.wine
            .run(&self.install.install_dir.join("TmForever.bak.exe"), &[])
            .await
    }

    pub async fn start_launcher(&self) -> Result<i32> {
        self.wine
            .run(&self.install.install_dir.join("TmForeverLauncher.exe"), &[])
            .await
    }

    pub async fn start_loader(&self, args: &[&str]) -> Result<i32> {
        let loader_exe = self.loader_dir_checked()?.join("TMLoader.exe");
        self.wine.run(&loader_exe, args).await
    }

    pub async fn start_loader_profile(&self, profile: &str) -> Result<i32> {
        self.start_loader(&["run", "TmForever", profile]).await
    }

    /// Download a track, skin or texture mod into the documents tree and
    /// write the optional locator file next to it.
    pub async fn download_content(&self, request: &ContentRequest) -> Result<Utf8PathBuf> {
        let plan = request.plan(&self.install.documents_dir);
        let downloaded = self.downloads.fetch_to_dir(&plan.url, &plan.dest_dir).await?;

        if let Some(source) = &plan.locator_source {
            let locator_path = Utf8PathBuf::from(format!("{downloaded}.loc"));
            fs::write(&locator_path, source)
                .with_context(|| format!("Failed to write locator: {}", locator_path))?;
            tracing::debug!("Wrote locator {}", locator_path);
        }

        Ok(downloaded)
    }

    /// Install the TwinkieTweaks fonts, repository and profile, then start
    /// the loader once so it picks up the new repository.
    pub async fn install_twinkie_tweaks(&self) -> Result<()> {
        let fonts_dir = self.wine.home_dir().join("Documents/Twinkie/Fonts");
        if fonts_dir.join("Twinkie.ttf").exists() && fonts_dir.join("ManiaIcons.ttf").exists() {
            tracing::info!("TwinkieTweaks fonts already installed");
        } else {
            self.downloads.fetch_to_dir(TWINKIE_FONT_URL, &fonts_dir).await?;
            self.downloads
                .fetch_to_dir(MANIAICONS_FONT_URL, &fonts_dir)
                .await?;
        }

        let config_path = self.loader_dir_checked()?.join("config.yaml");
        if !add_server_if_absent(&config_path, TWINKIE_REPOSITORY_URL)? {
            tracing::info!("TwinkieTweaks repository already configured");
        }

        self.create_profile(
            "twinkietweaks",
            &["TMUnlimiter", "Twinkie", "Competition Patch", "CoreMod"],
            None,
            "TwinkieTweaks (+TMUnlimiter, Competition Patch, Coremod)",
        )?;

        self.start_loader(&[]).await?;
        Ok(())
    }

    /// Download and run the UVME installer for the detected edition, then
    /// re-probe the uninstaller entry.
    pub async fn download_uvme(&mut self) -> Result<()> {
        let url = if self.install.edition.is_united() {
            UVME_UNITED_URL
        } else {
            UVME_NATIONS_URL
        };

        let installer = self
            .downloads
            .fetch_to_dir(url, &self.wine.prefix().join("drive_c"))
            .await?;
        self.wine.run(&installer, &[]).await?;
        fs::remove_file(&installer)
            .with_context(|| format!("Failed to remove installer: {}", installer))?;

        self.refresh_uvme()?;
        Ok(())
    }

    /// Silently run the UVME uninstaller. A missing uninstaller entry is a
    /// no-op, not an error.
    pub async fn uninstall_uvme(&self) -> Result<()> {
        match &self.uvme_uninstaller {
            Some(uninstaller) => {
                self.wine.run(uninstaller, &["/SILENT"]).await?;
            }
            None => tracing::info!("UVME is not installed; nothing to uninstall"),
        }
        Ok(())
    }
}
