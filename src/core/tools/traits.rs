use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// One organic web-search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

/// Web-search collaborator available to researcher roles.
pub trait SearchTool: Send + Sync {
    /// Tool name as shown to the model
    fn name(&self) -> &str;

    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Vec<SearchHit>>> + Send + 'a>>;
}

/// Render hits as a compact numbered list for a prompt.
pub fn format_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            if hit.snippet.is_empty() {
                format!("{}. {} ({})", i + 1, hit.title, hit.link)
            } else {
                format!("{}. {} ({})\n   {}", i + 1, hit.title, hit.link, hit.snippet)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
