use super::Config;
use std::path::PathBuf;

fn non_empty_env(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        std::env::var(key)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = non_empty_env(&["GOOGLE_API_KEY", "GEMINI_API_KEY"]) {
            self.api_key = Some(key);
        }

        if let Some(key) = non_empty_env(&["SERPER_API_KEY", "SerperKey"]) {
            self.search.api_key = Some(key);
        }

        if let Some(model) = non_empty_env(&["CONTENT_ROUTER_MODEL"]) {
            self.default_model = model;
        }

        if let Some(workspace) = non_empty_env(&["CONTENT_ROUTER_WORKSPACE"]) {
            self.workspace_dir = PathBuf::from(workspace);
        }

        if let Some(port_str) = non_empty_env(&["CONTENT_ROUTER_GATEWAY_PORT", "PORT"])
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Some(host) = non_empty_env(&["CONTENT_ROUTER_GATEWAY_HOST", "HOST"]) {
            self.gateway.host = host;
        }

        if let Some(temp_str) = non_empty_env(&["CONTENT_ROUTER_TEMPERATURE"])
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.default_temperature = temp;
        }
    }
}
