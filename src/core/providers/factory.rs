use super::gemini::GeminiProvider;
use super::traits::Provider;
use crate::config::Config;
use std::sync::Arc;

/// Explicit key wins; blank strings count as absent. Environment variables
/// are folded into `Config` at load time, so this never reads the environment.
fn resolve_api_key(explicit_api_key: Option<&str>) -> Option<String> {
    explicit_api_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
}

/// Create the configured text-generation provider.
///
/// Fails when the credential is missing so the gateway can report the
/// collaborator as not initialized instead of failing each request.
pub fn create_provider(config: &Config) -> anyhow::Result<Arc<dyn Provider>> {
    match config.llm.provider.trim().to_ascii_lowercase().as_str() {
        "gemini" | "google" => {
            let Some(key) = resolve_api_key(config.api_key.as_deref()) else {
                anyhow::bail!(
                    "Gemini API key not found. Set GOOGLE_API_KEY (or GEMINI_API_KEY) \
                     or `api_key` in config.toml"
                );
            };
            Ok(Arc::new(GeminiProvider::new(&key, &config.llm)))
        }
        other => anyhow::bail!("Unknown provider: {other}. Supported: gemini"),
    }
}
