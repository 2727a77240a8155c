use content_router::config::{Config, PersistenceBackend};
use content_router::transport::gateway::run_gateway_with_listener;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PAGE_HTML: &str = r#"<html>
<head>
  <title>Rust in Production</title>
  <meta property="og:image" content="https://cdn.example.com/og.jpg">
</head>
<body>
  <article><h1>Rust in Production</h1><p>Teams ship faster with fewer crashes.</p></article>
  <img src="/images/hero.png">
</body>
</html>"#;

/// Upstream collaborators (Gemini, Serper, Imagen, the source page) behind
/// one mock server.
pub struct Upstream {
    pub server: MockServer,
}

impl Upstream {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn page_url(&self) -> String {
        format!("{}/post", self.server.uri())
    }

    pub async fn serve_page(&self, html: &str) {
        Mock::given(method("GET"))
            .and(path("/post"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=utf-8")
                    .set_body_string(html),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn serve_search(&self) {
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic": [
                    {"title": "Rust adoption survey", "link": "https://example.org/survey", "snippet": "Usage keeps growing."}
                ]
            })))
            .mount(&self.server)
            .await;
    }

    /// Reply `text` to every generateContent call whose body mentions `role`.
    pub async fn reply_as(&self, role: &str, text: &str) {
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .and(body_string_contains(role))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"parts": [{"text": text}], "role": "model"},
                    "finishReason": "STOP"
                }]
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn fail_generation(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": {"code": status, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn received_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect()
    }
}

pub fn test_config(upstream: &Upstream, workspace: &TempDir, api_key: Option<&str>) -> Config {
    let mut config = Config {
        workspace_dir: workspace.path().join("workspace"),
        config_path: workspace.path().join("config.toml"),
        api_key: api_key.map(str::to_string),
        ..Config::default()
    };
    config.llm.base_url = upstream.server.uri();
    config.search.base_url = upstream.server.uri();
    config.search.api_key = Some("serper-key".into());
    config.image.base_url = upstream.server.uri();
    config.image.output_dir = workspace
        .path()
        .join("generated")
        .to_string_lossy()
        .into_owned();
    config.persistence.backend = PersistenceBackend::Sqlite;
    config
}

pub struct GatewayTestServer {
    port: u16,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
    _workspace: TempDir,
}

impl GatewayTestServer {
    pub async fn start(config: Config, workspace: TempDir) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral gateway listener should bind");
        let port = listener
            .local_addr()
            .expect("ephemeral gateway listener should expose local address")
            .port();

        let host = "127.0.0.1".to_string();
        let config = Arc::new(config);
        let handle =
            tokio::spawn(async move { run_gateway_with_listener(&host, listener, config).await });

        wait_until_gateway_ready(port).await;

        Self {
            port,
            handle,
            _workspace: workspace,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("gateway request should complete");
        let status = response.status();
        let body = response
            .json()
            .await
            .expect("gateway response should be json");
        (status, body)
    }
}

impl Drop for GatewayTestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn wait_until_gateway_ready(port: u16) {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .expect("reqwest client should be built");

    for _ in 0..80 {
        let health = client
            .get(format!("http://127.0.0.1:{port}/health"))
            .send()
            .await;
        if matches!(health, Ok(resp) if resp.status() == StatusCode::OK) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("gateway did not become ready on port {port}");
}
