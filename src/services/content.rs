//! Planning of content downloads: tracks, car skins and texture mods.
//!
//! Each request variant carries its own inputs and maps onto the game's
//! documents tree via [`ContentRequest::plan`]; a single session handler
//! performs the download and writes the optional locator file. Locators let
//! other players fetch the same skin or mod, and reference the plain-http
//! mirror of the original URL.

use camino::{Utf8Path, Utf8PathBuf};

/// Vehicle classes accepted for car skins.
pub const VEHICLE_CLASSES: &[&str] = &[
    "CarCommon",
    "StadiumCar",
    "DesertCar",
    "RallyCar",
    "BayCar",
    "CoastCar",
    "IslandCar",
    "SnowCar",
];

/// Environments accepted for texture mods.
pub const TEXTURE_ENVIRONMENTS: &[&str] = &[
    "Stadium", "Alpine", "Bay", "Island", "Rally", "Speed", "Coast",
];

const NATIONS_EXCHANGE_TRACK_URL: &str = "https://nations.tm-exchange.com/trackgbx/";
const UNITED_EXCHANGE_TRACK_URL: &str = "https://tmuf.exchange/trackgbx/";

/// A single downloadable piece of game content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRequest {
    /// A track from TrackMania Exchange, by exchange id.
    Track {
        exchange_id: String,
        /// Fetch from the United Forever exchange instead of Nations.
        united_exchange: bool,
    },

    /// A car skin from a direct link.
    Skin {
        url: String,
        vehicle: String,
        /// Write a `.loc` locator next to the download.
        locator: bool,
    },

    /// An environment texture mod from a direct link.
    TextureMod {
        url: String,
        environment: String,
        locator: bool,
    },
}

/// Where a piece of content goes and how to fetch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPlan {
    pub url: String,
    pub dest_dir: Utf8PathBuf,

    /// Body of the `.loc` locator file to write next to the download, if any.
    pub locator_source: Option<String>,
}

impl ContentRequest {
    /// Map the request onto the documents tree of an installation.
    pub fn plan(&self, documents_dir: &Utf8Path) -> DownloadPlan {
        match self {
            ContentRequest::Track {
                exchange_id,
                united_exchange,
            } => {
                let base = if *united_exchange {
                    UNITED_EXCHANGE_TRACK_URL
                } else {
                    NATIONS_EXCHANGE_TRACK_URL
                };
                DownloadPlan {
                    url: format!("{base}{exchange_id}"),
                    dest_dir: documents_dir.join("Tracks/Challenges/Downloaded"),
                    locator_source: None,
                }
            }

            ContentRequest::Skin {
                url,
                vehicle,
                locator,
            } => DownloadPlan {
                url: url.clone(),
                dest_dir: documents_dir.join("Skins/Vehicles").join(vehicle),
                locator_source: locator.then(|| locator_body(url)),
            },

            ContentRequest::TextureMod {
                url,
                environment,
                locator,
            } => DownloadPlan {
                url: url.clone(),
                dest_dir: documents_dir.join("Skins").join(environment).join("Mod"),
                locator_source: locator.then(|| locator_body(url)),
            },
        }
    }
}

fn locator_body(url: &str) -> String {
    url.replace("https", "http")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_plan_nations() {
        let request = ContentRequest::Track {
            exchange_id: "12345".to_string(),
            united_exchange: false,
        };
        let plan = request.plan(Utf8Path::new("/docs"));

        assert_eq!(plan.url, "https://nations.tm-exchange.com/trackgbx/12345");
        assert_eq!(
            plan.dest_dir,
            Utf8PathBuf::from("/docs/Tracks/Challenges/Downloaded")
        );
        assert_eq!(plan.locator_source, None);
    }

    #[test]
    fn test_track_plan_united() {
        let request = ContentRequest::Track {
            exchange_id: "777".to_string(),
            united_exchange: true,
        };
        let plan = request.plan(Utf8Path::new("/docs"));

        assert_eq!(plan.url, "https://tmuf.exchange/trackgbx/777");
    }

    #[test]
    fn test_skin_plan() {
        let request = ContentRequest::Skin {
            url: "https://maniapark.example/skin.zip".to_string(),
            vehicle: "StadiumCar".to_string(),
            locator: true,
        };
        let plan = request.plan(Utf8Path::new("/docs"));

        assert_eq!(
            plan.dest_dir,
            Utf8PathBuf::from("/docs/Skins/Vehicles/StadiumCar")
        );
        assert_eq!(
            plan.locator_source,
            Some("http://maniapark.example/skin.zip".to_string())
        );
    }

    #[test]
    fn test_texture_mod_plan_without_locator() {
        let request = ContentRequest::TextureMod {
            url: "https://maniapark.example/mod.zip".to_string(),
            environment: "Stadium".to_string(),
            locator: false,
        };
        let plan = request.plan(Utf8Path::new("/docs"));

        assert_eq!(plan.dest_dir, Utf8PathBuf::from("/docs/Skins/Stadium/Mod"));
        assert_eq!(plan.locator_source, None);
    }

    #[test]
    fn test_known_folder_names() {
        assert!(VEHICLE_CLASSES.contains(&"CarCommon"));
        assert!(TEXTURE_ENVIRONMENTS.contains(&"Stadium"));
        // Vehicle folders and texture environments are distinct vocabularies.
        assert!(!TEXTURE_ENVIRONMENTS.contains(&"StadiumCar"));
    }
}
