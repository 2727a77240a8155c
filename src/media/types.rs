use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Try image generation before scraping the page.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Tried in order until one returns an image.
    #[serde(default = "default_candidate_models")]
    pub candidate_models: Vec<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
    #[serde(default = "default_aspect_ratio")]
    pub default_aspect_ratio: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_candidate_models() -> Vec<String> {
    vec![
        "imagen-3.0-fast-generate-001".into(),
        "imagen-3.0-generate-002".into(),
    ]
}

fn default_output_dir() -> String {
    "static/generated".into()
}

fn default_max_file_size_mb() -> u64 {
    25
}

fn default_aspect_ratio() -> String {
    "16:9".into()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}

fn default_timeout_secs() -> u64 {
    90
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            candidate_models: default_candidate_models(),
            output_dir: default_output_dir(),
            max_file_size_mb: default_max_file_size_mb(),
            default_aspect_ratio: default_aspect_ratio(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ImageSourceKind {
    Generated,
    OpenGraph,
    ScrapedInline,
    None,
}

/// Outcome of the image fallback chain. `reference` is a local path for
/// generated images, a remote URL for scraped ones, and `None` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResolution {
    pub source_kind: ImageSourceKind,
    pub reference: Option<String>,
}

impl ImageResolution {
    pub fn none() -> Self {
        Self {
            source_kind: ImageSourceKind::None,
            reference: None,
        }
    }

    pub fn found(source_kind: ImageSourceKind, reference: String) -> Self {
        Self {
            source_kind,
            reference: Some(reference),
        }
    }
}
