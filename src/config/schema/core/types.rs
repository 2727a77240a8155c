use super::super::{
    GatewayConfig, ImageConfig, LinkConfig, LlmConfig, PersistenceConfig, SearchConfig,
};
use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workspace directory - computed from home, not serialized
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Text-generation credential (Gemini). Also used for image generation.
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_temperature")]
    pub default_temperature: f64,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub links: LinkConfig,

    #[serde(default)]
    pub image: ImageConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub persistence: PersistenceConfig,
}

fn default_model() -> String {
    "gemini-2.0-flash".into()
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
        let router_dir = home.join(".content-router");

        Self {
            workspace_dir: router_dir.join("workspace"),
            config_path: router_dir.join("config.toml"),
            api_key: None,
            default_model: default_model(),
            default_temperature: default_temperature(),
            llm: LlmConfig::default(),
            search: SearchConfig::default(),
            links: LinkConfig::default(),
            image: ImageConfig::default(),
            gateway: GatewayConfig::default(),
            persistence: PersistenceConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.default_temperature) {
            return Err(ConfigError::Validation(format!(
                "default_temperature must be within 0.0..=2.0 (got {})",
                self.default_temperature
            )));
        }

        if self.default_model.trim().is_empty() {
            return Err(ConfigError::Validation(
                "default_model must not be empty".into(),
            ));
        }

        if self.image.enabled && self.image.candidate_models.is_empty() {
            return Err(ConfigError::Validation(
                "image.candidate_models must list at least one model when image generation is enabled"
                    .into(),
            ));
        }

        Ok(())
    }

    /// Copy of the config with every credential masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.api_key = copy.api_key.as_deref().map(mask_secret);
        copy.search.api_key = copy.search.api_key.as_deref().map(mask_secret);
        copy
    }
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}
