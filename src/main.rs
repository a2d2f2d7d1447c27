//! tmtoolkit - TrackMania Forever toolkit for Wine
//!
//! Main entry point for the CLI. It initializes:
//! - Logging infrastructure (daily file rotation + console output)
//! - Tokio async runtime (for Wine subprocesses and downloads)
//! - Configuration loading ([`ConfigManager`])
//! - The [`GameSession`] every command runs against
//!
//! # Execution Flow
//!
//! 1. Parse the command line
//! 2. Initialize logging → logs/tmtoolkit.<date>
//! 3. Load `tmtoolkit.yaml` from the configuration directory
//! 4. Create the tokio runtime and build the session (Wine env + game
//!    detection); a prefix without a supported installation aborts here
//! 5. Dispatch the subcommand
//! 6. Shutdown the runtime with a 5s timeout

use anyhow::Result;
use clap::Parser;

use tmtoolkit::cli::{Cli, Commands, UvmeCommands};
use tmtoolkit::models::ToolkitSettings;
use tmtoolkit::services::content::ContentRequest;
use tmtoolkit::{APP_NAME, ConfigManager, GameSession, VERSION};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = tmtoolkit::logging::setup_logging("logs", "tmtoolkit", cli.verbose, true)?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let config_manager = ConfigManager::new(cli.config_dir.as_deref().unwrap_or("tmtoolkit Data"))?;
    let settings = config_manager.load_settings()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(4)
        .thread_name("tmtoolkit-worker")
        .build()?;

    let result = runtime.block_on(run(cli, settings));

    runtime.shutdown_timeout(std::time::Duration::from_secs(5));
    result
}

async fn run(cli: Cli, settings: ToolkitSettings) -> Result<()> {
    let mut session = GameSession::new()?;

    match cli.command {
        Commands::Info => {
            println!("Edition:       {}", session.edition().name());
            println!("Install dir:   {}", session.install_dir());
            println!("Documents dir: {}", session.documents_dir());
            println!(
                "TMLoader:      {}",
                if session.loader_installed() {
                    "installed"
                } else {
                    "not installed"
                }
            );
            println!(
                "UVME:          {}",
                if session.uvme_installed() {
                    "installed"
                } else {
                    "not installed"
                }
            );
        }

        Commands::Launch { profile, vanilla } => {
            if vanilla {
                session.start_vanilla().await?;
            } else if session.loader_installed() {
                let profile = profile.unwrap_or(settings.general.profile);
                session.start_loader_profile(&profile).await?;
            } else {
                session.start_game().await?;
            }
        }

        Commands::Launcher => {
            session.start_launcher().await?;
        }

        Commands::Profiles => {
            for (file_name, profile) in session.profiles()? {
                println!(
                    "{file_name}: {} mods - {}",
                    profile.mods.len(),
                    profile.description
                );
            }
        }

        Commands::CreateProfile {
            name,
            mods,
            args,
            description,
        } => {
            let mods: Vec<&str> = mods.iter().map(String::as_str).collect();
            let path = session.create_profile(&name, &mods, args.as_deref(), &description)?;
            println!("Wrote {path}");
        }

        Commands::InstallLoader => {
            session.install_modloader().await?;
            println!("TMLoader installed");
        }

        Commands::InstallTwinkie => {
            session.install_twinkie_tweaks().await?;
        }

        Commands::DownloadTrack { id, united } => {
            let saved = session
                .download_content(&ContentRequest::Track {
                    exchange_id: id,
                    united_exchange: united,
                })
                .await?;
            println!("Saved {saved}");
        }

        Commands::DownloadSkin {
            url,
            vehicle,
            no_locator,
        } => {
            let saved = session
                .download_content(&ContentRequest::Skin {
                    url,
                    vehicle,
                    locator: !no_locator,
                })
                .await?;
            println!("Saved {saved}");
        }

        Commands::DownloadMod {
            url,
            environment,
            no_locator,
        } => {
            let saved = session
                .download_content(&ContentRequest::TextureMod {
                    url,
                    environment,
                    locator: !no_locator,
                })
                .await?;
            println!("Saved {saved}");
        }

        Commands::Uvme { action } => match action {
            UvmeCommands::Install => session.download_uvme().await?,
            UvmeCommands::Uninstall => session.uninstall_uvme().await?,
        },
    }

    Ok(())
}
