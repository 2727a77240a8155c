use super::types::LinkConfig;
use crate::core::providers::http_client::build_page_client;
use crate::error::FetchError;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use url::Url;

/// HTTP fetch half of the fetch + parse collaborator. Parsing stays in
/// synchronous helpers because `scraper::Html` is not `Send`.
pub trait PageFetcher: Send + Sync {
    fn fetch_html<'a>(
        &'a self,
        url: &'a Url,
    ) -> Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>>;
}

/// Parse caller input into an absolute http(s) URL.
pub fn parse_page_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|_| FetchError::InvalidUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(FetchError::InvalidUrl(raw.to_string())),
    }
}

pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(config: &LinkConfig) -> Self {
        Self {
            client: build_page_client(config.timeout_secs, &config.user_agent),
        }
    }

    async fn get(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(FetchError::Empty(url.to_string()));
        }
        Ok(body)
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch_html<'a>(
        &'a self,
        url: &'a Url,
    ) -> Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>> {
        Box::pin(self.get(url))
    }
}
