use super::types::ImageConfig;
use crate::core::providers::{api_error, build_provider_client_with_timeout, scrub_secret_patterns};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Image-generation collaborator: prompt in, encoded image bytes out.
/// Response-shape handling stays inside implementations.
pub trait ImageGenerator: Send + Sync {
    fn name(&self) -> &str;

    fn generate<'a>(
        &'a self,
        model: &'a str,
        prompt: &'a str,
        aspect_ratio: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Vec<u8>>> + Send + 'a>>;
}

/// Aspect ratios the Imagen `predict` endpoint accepts.
const SUPPORTED_ASPECT_RATIOS: [&str; 5] = ["1:1", "3:4", "4:3", "9:16", "16:9"];

#[derive(Serialize)]
struct PredictRequest<'a> {
    instances: [PredictInstance<'a>; 1],
    parameters: PredictParameters<'a>,
}

#[derive(Serialize)]
struct PredictInstance<'a> {
    prompt: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters<'a> {
    sample_count: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<&'a str>,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
}

/// Google Imagen over the Generative Language REST API.
pub struct ImagenGenerator {
    api_key: String,
    base_url: String,
    client: Client,
}

impl ImagenGenerator {
    pub fn new(api_key: &str, config: &ImageConfig) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: build_provider_client_with_timeout(config.timeout_secs),
        }
    }

    async fn predict(
        &self,
        model: &str,
        prompt: &str,
        aspect_ratio: &str,
    ) -> anyhow::Result<Vec<u8>> {
        let request = PredictRequest {
            instances: [PredictInstance { prompt }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: SUPPORTED_ASPECT_RATIOS
                    .contains(&aspect_ratio)
                    .then_some(aspect_ratio),
            },
        };

        let response = self
            .client
            .post(format!("{}/v1beta/models/{model}:predict", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "Imagen request failed: {}",
                    scrub_secret_patterns(&e.without_url().to_string())
                )
            })?;

        if !response.status().is_success() {
            return Err(api_error("Imagen", response).await);
        }

        let parsed: PredictResponse = response.json().await?;
        let encoded = parsed
            .predictions
            .into_iter()
            .find_map(|p| p.bytes_base64_encoded)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| anyhow::anyhow!("Imagen returned no image for model {model}"))?;

        Ok(STANDARD.decode(encoded.as_bytes())?)
    }
}

impl ImageGenerator for ImagenGenerator {
    fn name(&self) -> &str {
        "imagen"
    }

    fn generate<'a>(
        &'a self,
        model: &'a str,
        prompt: &'a str,
        aspect_ratio: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(self.predict(model, prompt, aspect_ratio))
    }
}
