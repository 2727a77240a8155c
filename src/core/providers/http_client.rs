use reqwest::Client;
use std::time::Duration;

pub fn build_provider_client() -> Client {
    build_provider_client_with_timeout(120)
}

pub fn build_provider_client_with_timeout(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Client for fetching third-party pages. Identifies itself with a browser-ish
/// user agent since many sites refuse bare library clients.
pub fn build_page_client(timeout_secs: u64, user_agent: &str) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()
        .unwrap_or_else(|_| Client::new())
}
