use serde::{Deserialize, Serialize};

/// Readable text pulled from a fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub url: String,
    pub title: Option<String>,
    pub text: String,
}

/// Image references found on a page, before URL normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageImages {
    pub og_image: Option<String>,
    pub first_inline: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Upper bound on page text handed to researchers.
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_content_chars() -> usize {
    2000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; content-router/0.1)".into()
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_content_chars: default_max_content_chars(),
            user_agent: default_user_agent(),
        }
    }
}
