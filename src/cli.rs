//! Command-line surface of the toolkit.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tmtoolkit",
    author,
    version,
    about = "TrackMania Forever toolkit for Wine",
    long_about = "Locates a TrackMania Forever installation inside a Wine prefix, launches \
                  the game and TMLoader, and installs mods, skins, tracks and fonts into \
                  the right folders"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Directory for toolkit configuration")]
    pub config_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the detected installation")]
    Info,

    #[command(about = "Launch the game, through TMLoader when it is installed")]
    Launch {
        #[arg(long, help = "Profile to run (defaults to the configured one)")]
        profile: Option<String>,

        #[arg(long, help = "Launch the vanilla binary instead of a loader profile")]
        vanilla: bool,
    },

    #[command(about = "Launch the game's own launcher")]
    Launcher,

    #[command(about = "List TMLoader profiles")]
    Profiles,

    #[command(about = "Create or overwrite a TMLoader profile")]
    CreateProfile {
        #[arg(help = "Profile name")]
        name: String,

        #[arg(long, value_delimiter = ',', help = "Mod ids, in load order")]
        mods: Vec<String>,

        #[arg(long, help = "Extra arguments passed to the game")]
        args: Option<String>,

        #[arg(long, default_value = "", help = "Profile description")]
        description: String,
    },

    #[command(about = "Download and install TMLoader")]
    InstallLoader,

    #[command(about = "Install the TwinkieTweaks fonts, repository and profile")]
    InstallTwinkie,

    #[command(about = "Download a track from TrackMania Exchange")]
    DownloadTrack {
        #[arg(help = "Exchange track id")]
        id: String,

        #[arg(long, help = "Use the United Forever exchange")]
        united: bool,
    },

    #[command(about = "Download a car skin from a direct link")]
    DownloadSkin {
        #[arg(help = "Direct link to the skin file")]
        url: String,

        #[arg(long, default_value = "CarCommon", help = "Vehicle class folder")]
        vehicle: String,

        #[arg(long, help = "Skip writing the .loc locator file")]
        no_locator: bool,
    },

    #[command(about = "Download an environment texture mod from a direct link")]
    DownloadMod {
        #[arg(help = "Direct link to the texture mod file")]
        url: String,

        #[arg(long, default_value = "Stadium", help = "Environment folder")]
        environment: String,

        #[arg(long, help = "Skip writing the .loc locator file")]
        no_locator: bool,
    },

    #[command(about = "Install or remove the UVME voice mod")]
    Uvme {
        #[command(subcommand)]
        action: UvmeCommands,
    },
}

#[derive(Subcommand)]
pub enum UvmeCommands {
    #[command(about = "Download and run the UVME installer")]
    Install,

    #[command(about = "Silently run the UVME uninstaller")]
    Uninstall,
}
