//! @acp:module "Configuration"
//! @acp:summary "Project configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::export::SinkKind;

/// Default config file name in the working directory
pub const CONFIG_FILE: &str = ".schooldesk.config.json";

fn default_version() -> String {
    "1.0.0".to_string()
}

/// @acp:summary "Main SchoolDesk configuration structure"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Config format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Letterhead used on exported papers
    #[serde(default)]
    pub institution: InstitutionConfig,

    /// Content-generation service settings
    #[serde(default)]
    pub collaborator: CollaboratorConfig,

    /// Export destinations and defaults
    #[serde(default)]
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            institution: InstitutionConfig::default(),
            collaborator: CollaboratorConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Load from the working directory, then the home directory, else defaults"
    pub fn load_or_default() -> Self {
        if let Ok(config) = Self::load(CONFIG_FILE) {
            return config;
        }
        global_config_path()
            .and_then(|path| Self::load(path).ok())
            .unwrap_or_default()
    }
}

/// `~/.schooldesk/config.json`, when a home directory exists
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".schooldesk").join("config.json"))
}

/// Letterhead details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionConfig {
    /// Printed at the top of every paper
    #[serde(default)]
    pub name: String,

    /// Logo image path or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    /// Default medium of instruction
    #[serde(default = "default_medium")]
    pub medium: String,
}

fn default_medium() -> String {
    "English".to_string()
}

/// Content-generation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorConfig {
    /// Base URL of the generative language API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model for papers, quizzes and grading
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model for video generation
    #[serde(default = "default_video_model")]
    pub video_model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_video_model() -> String {
    "veo-3.1-fast-generate-preview".to_string()
}

fn default_api_key_env() -> String {
    "SCHOOLDESK_API_KEY".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            text_model: default_text_model(),
            video_model: default_video_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Export destinations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// Directory receiving Word exports and saved raw text
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Sinks used by `generate` when none are given on the command line
    #[serde(default = "default_sinks")]
    pub default_sinks: Vec<SinkKind>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("papers")
}

fn default_sinks() -> Vec<SinkKind> {
    vec![SinkKind::Preview]
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_sinks: default_sinks(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"institution": {"name": "Springfield High"}}"#).unwrap();
        assert_eq!(config.institution.name, "Springfield High");
        assert_eq!(config.institution.medium, "English");
        assert_eq!(config.collaborator.api_key_env, "SCHOOLDESK_API_KEY");
        assert_eq!(config.export.default_sinks, vec![SinkKind::Preview]);
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.collaborator.timeout_secs = 30;
        config.export.default_sinks = vec![SinkKind::Word, SinkKind::Print];
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.collaborator.timeout_secs, 30);
        assert_eq!(loaded.export.default_sinks, vec![SinkKind::Word, SinkKind::Print]);
    }
}
