use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, WellnessError};

/// Top-level configuration for the wellness assistant.
///
/// Loaded from `~/.wellness/config.toml` by default. Each section corresponds
/// to one concern of the dialog engine or its collaborators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AssistantConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AssistantConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| WellnessError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// A named emergency phone contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub label: String,
    pub phone: String,
}

/// Contact details rendered into bot messages and used for dial actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Main wellness services phone number, as displayed.
    pub wellness_phone: String,
    /// Number passed to the telephony collaborator for `call_wellness`.
    pub wellness_dial: String,
    pub location: String,
    pub website: String,
    pub emergency_contacts: Vec<EmergencyContact>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            wellness_phone: "660.562.1348".to_string(),
            wellness_dial: "6605621348".to_string(),
            location: "800 University Drive, Maryville, MO".to_string(),
            website: "nwmissouri.edu/wellness".to_string(),
            emergency_contacts: vec![
                EmergencyContact {
                    label: "University Police".to_string(),
                    phone: "660.562.1254".to_string(),
                },
                EmergencyContact {
                    label: "Mosaic Medical Center".to_string(),
                    phone: "660.562.2600".to_string(),
                },
                EmergencyContact {
                    label: "Crisis Lifeline".to_string(),
                    phone: "988".to_string(),
                },
                EmergencyContact {
                    label: "Emergencies".to_string(),
                    phone: "911".to_string(),
                },
            ],
        }
    }
}

/// AI text service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Model identifier passed through to the AI text service.
    pub model: String,
    /// Timeout for a single completion request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-pro".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Dialog engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum accepted free-text input length in characters.
    pub max_message_length: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_length: 500,
        }
    }
}
