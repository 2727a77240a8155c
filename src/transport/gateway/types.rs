use crate::media::ImageSourceKind;
use serde::{Deserialize, Serialize};

fn default_aspect_ratio() -> String {
    "16:9".into()
}

/// `POST /generate-content` body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateContentRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "contentType")]
    pub content_type: String,
}

/// `POST /generate-content-with-image` body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateContentWithImageRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "contentType")]
    pub content_type: String,
    #[serde(default, alias = "imagePromptOverride")]
    pub image_prompt_override: Option<String>,
    #[serde(default = "default_aspect_ratio", alias = "aspectRatio")]
    pub aspect_ratio: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentResponse {
    pub url: String,
    pub content_type: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentWithImageResponse {
    pub url: String,
    pub content_type: String,
    /// Local path for generated images, remote URL for scraped ones.
    pub image_url: Option<String>,
    pub image_source: ImageSourceKind,
    pub content: String,
}
