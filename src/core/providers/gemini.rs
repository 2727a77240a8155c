//! Google Gemini text generation over the public REST API.

use crate::config::LlmConfig;
use crate::core::providers::{
    api_error, build_provider_client_with_timeout, scrub_secret_patterns, traits::Provider,
};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

use super::gemini_types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};

pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    max_output_tokens: u32,
    client: Client,
}

impl GeminiProvider {
    pub fn new(api_key: &str, config: &LlmConfig) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_output_tokens: config.max_output_tokens,
            client: build_provider_client_with_timeout(config.timeout_secs),
        }
    }

    fn build_request(
        &self,
        system_prompt: Option<&str>,
        message: &str,
        temperature: f64,
    ) -> GenerateContentRequest {
        let system_instruction = system_prompt.map(|sys| Content {
            role: None,
            parts: vec![Part {
                text: sys.to_string(),
            }],
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: message.to_string(),
                }],
            }],
            system_instruction,
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens: self.max_output_tokens,
            },
        }
    }

    fn model_name(model: &str) -> String {
        let model = model.strip_prefix("gemini/").unwrap_or(model);
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn extract_text(result: &GenerateContentResponse) -> anyhow::Result<String> {
        if let Some(reason) = result
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            anyhow::bail!("Gemini blocked the prompt ({reason})");
        }

        let candidate = result
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .ok_or_else(|| anyhow::anyhow!("No response from Gemini"))?;

        let text = candidate
            .content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            anyhow::bail!("Gemini returned an empty response (finish reason: {reason})");
        }

        Ok(text)
    }

    async fn call_api(
        &self,
        system_prompt: Option<&str>,
        message: &str,
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<String> {
        let request = self.build_request(system_prompt, message, temperature);
        let url = format!(
            "{}/v1beta/{}:generateContent",
            self.base_url,
            Self::model_name(model)
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "Gemini request failed: {}",
                    scrub_secret_patterns(&e.without_url().to_string())
                )
            })?;

        if !response.status().is_success() {
            return Err(api_error("Gemini", response).await);
        }

        let result: GenerateContentResponse = response.json().await?;

        if let Some(err) = result.error.as_ref() {
            anyhow::bail!("Gemini API error: {}", scrub_secret_patterns(&err.message));
        }

        Self::extract_text(&result)
    }
}

impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn chat_with_system<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(self.call_api(system_prompt, message, model, temperature))
    }
}
