use serde::{Deserialize, Serialize};

/// Web-search collaborator (Serper) used by researcher roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_num_results")]
    pub num_results: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://google.serper.dev".into()
}

fn default_num_results() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    20
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            num_results: default_num_results(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
