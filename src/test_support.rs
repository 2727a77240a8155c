//! Deterministic collaborator stubs shared by unit tests.

use crate::core::providers::Provider;
use crate::core::tools::{SearchHit, SearchTool};
use crate::error::FetchError;
use crate::links::PageFetcher;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub message: String,
    pub model: String,
}

/// Replies `"<role title> output"` and records every call in order. Calls
/// whose system prompt names `fail_on` return an error instead.
#[derive(Default)]
pub struct RecordingProvider {
    pub calls: Mutex<Vec<RecordedCall>>,
    fail_on: Option<String>,
    empty_on: Option<String>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(role_title: &str) -> Self {
        Self {
            fail_on: Some(role_title.to_string()),
            ..Self::default()
        }
    }

    pub fn empty_on(role_title: &str) -> Self {
        Self {
            empty_on: Some(role_title.to_string()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Role titles in call order, taken from "You are <title>." prompts.
    pub fn role_order(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| {
                c.system_prompt
                    .strip_prefix("You are ")
                    .and_then(|rest| rest.split_once('.'))
                    .map(|(title, _)| title.to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}

impl Provider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    fn chat_with_system<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        _temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let system_prompt = system_prompt.unwrap_or_default().to_string();
            self.calls.lock().unwrap().push(RecordedCall {
                system_prompt: system_prompt.clone(),
                message: message.to_string(),
                model: model.to_string(),
            });

            let title = system_prompt
                .strip_prefix("You are ")
                .and_then(|rest| rest.split_once('.'))
                .map(|(title, _)| title.to_string())
                .unwrap_or_default();

            if self.fail_on.as_deref() == Some(title.as_str()) {
                anyhow::bail!("quota exceeded for {title}");
            }
            if self.empty_on.as_deref() == Some(title.as_str()) {
                return Ok("   ".to_string());
            }
            Ok(format!("{title} output"))
        })
    }
}

#[derive(Default)]
pub struct StaticSearch {
    pub queries: Mutex<Vec<String>>,
    pub fail: bool,
}

impl SearchTool for StaticSearch {
    fn name(&self) -> &str {
        "static_search"
    }

    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Vec<SearchHit>>> + Send + 'a>> {
        Box::pin(async move {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail {
                anyhow::bail!("search unavailable");
            }
            Ok(vec![SearchHit {
                title: "Related coverage".into(),
                link: "https://news.example.com/related".into(),
                snippet: "Background on the topic".into(),
            }])
        })
    }
}

/// Serves canned HTML per URL; unknown URLs fail with a 404 status error.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    pub fetches: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl PageFetcher for StaticFetcher {
    fn fetch_html<'a>(
        &'a self,
        url: &'a Url,
    ) -> Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(url.as_str())
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        })
    }
}
