use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway port (default: 8000)
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    /// Gateway host (default: 127.0.0.1)
    #[serde(default = "default_gateway_host")]
    pub host: String,
    /// Allow binding to a non-loopback address (default: false)
    #[serde(default)]
    pub allow_public_bind: bool,
    /// Allowed CORS origins. Empty or `"*"` means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Whole-request timeout. Pipelines make several model calls, so this is
    /// deliberately generous.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_gateway_port() -> u16 {
    8000
}

fn default_gateway_host() -> String {
    "127.0.0.1".into()
}

fn default_request_timeout_secs() -> u64 {
    600
}

fn default_max_body_size() -> usize {
    65_536
}

impl GatewayConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o.trim() == "*")
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_gateway_port(),
            host: default_gateway_host(),
            allow_public_bind: false,
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout_secs(),
            max_body_size: default_max_body_size(),
        }
    }
}
