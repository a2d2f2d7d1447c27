use serde::{Deserialize, Serialize};

/// Toolkit settings from `tmtoolkit.yaml`
///
/// Successor of the old `config.ini`; holds the user's launch preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolkitSettings {
    #[serde(rename = "General", default)]
    pub general: GeneralSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// TMLoader profile launched when none is given on the command line.
    #[serde(default = "default_profile")]
    pub profile: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            profile: default_profile(),
        }
    }
}

impl Default for ToolkitSettings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}
