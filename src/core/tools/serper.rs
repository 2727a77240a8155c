use super::traits::{SearchHit, SearchTool};
use crate::config::SearchConfig;
use crate::core::providers::{api_error, build_provider_client_with_timeout, scrub_secret_patterns};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Google search through serper.dev.
pub struct SerperSearch {
    api_key: String,
    base_url: String,
    num_results: usize,
    client: Client,
}

#[derive(Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SearchHit>,
}

impl SerperSearch {
    pub fn new(api_key: &str, config: &SearchConfig) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            num_results: config.num_results,
            client: build_provider_client_with_timeout(config.timeout_secs),
        }
    }

    /// `None` when no search credential is configured; researchers then work
    /// from the page text alone.
    pub fn from_config(config: &SearchConfig) -> Option<Self> {
        config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|key| Self::new(key, config))
    }

    async fn run(&self, query: &str) -> anyhow::Result<Vec<SearchHit>> {
        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("X-API-KEY", &self.api_key)
            .json(&SerperRequest {
                q: query,
                num: self.num_results,
            })
            .send()
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "Serper request failed: {}",
                    scrub_secret_patterns(&e.to_string())
                )
            })?;

        if !response.status().is_success() {
            return Err(api_error("Serper", response).await);
        }

        let parsed: SerperResponse = response.json().await?;
        Ok(parsed
            .organic
            .into_iter()
            .take(self.num_results)
            .collect())
    }
}

impl SearchTool for SerperSearch {
    fn name(&self) -> &str {
        "serper_search"
    }

    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Vec<SearchHit>>> + Send + 'a>> {
        Box::pin(self.run(query))
    }
}
