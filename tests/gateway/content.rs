use super::support::{GatewayTestServer, PAGE_HTML, Upstream, test_config};
use reqwest::StatusCode;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn generate_content_runs_research_then_write() {
    let upstream = Upstream::start().await;
    upstream.serve_page(PAGE_HTML).await;
    upstream.serve_search().await;
    upstream
        .reply_as("Blog Content Researcher", "Research: memory safety wins.")
        .await;
    upstream
        .reply_as("Blog Content Writer", "# Rust in Production\n\nFinal blog post.")
        .await;

    let workspace = TempDir::new().unwrap();
    let config = test_config(&upstream, &workspace, Some("test-key"));
    let db_path = config.workspace_dir.join("workflows.db");
    let server = GatewayTestServer::start(config, workspace).await;

    let (status, body) = server
        .post(
            "/generate-content",
            json!({"url": upstream.page_url(), "content_type": "Blog"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], upstream.page_url());
    assert_eq!(body["content_type"], "Blog");
    assert_eq!(body["content"], "# Rust in Production\n\nFinal blog post.");

    let generate_calls: Vec<String> = upstream
        .received_paths()
        .await
        .into_iter()
        .filter(|p| p.ends_with(":generateContent"))
        .collect();
    assert_eq!(generate_calls.len(), 2);
    assert!(db_path.exists());
}

#[tokio::test]
async fn writer_sees_research_output_as_context() {
    let upstream = Upstream::start().await;
    upstream.serve_page(PAGE_HTML).await;
    upstream.serve_search().await;
    upstream
        .reply_as("LinkedIn Content Researcher", "UNIQUE-RESEARCH-MARKER")
        .await;
    upstream
        .reply_as("LinkedIn Content Writer", "LinkedIn post body")
        .await;

    let workspace = TempDir::new().unwrap();
    let config = test_config(&upstream, &workspace, Some("test-key"));
    let server = GatewayTestServer::start(config, workspace).await;

    let (status, body) = server
        .post(
            "/generate-content",
            json!({"url": upstream.page_url(), "contentType": "linkedin"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "LinkedIn post body");

    let requests = upstream.server.received_requests().await.unwrap();
    let writer_request = requests
        .iter()
        .filter(|r| r.url.path().ends_with(":generateContent"))
        .map(|r| String::from_utf8_lossy(&r.body).into_owned())
        .find(|b| b.contains("LinkedIn Content Writer"))
        .expect("writer call should be recorded");
    assert!(writer_request.contains("UNIQUE-RESEARCH-MARKER"));
}

#[tokio::test]
async fn unsupported_content_type_is_rejected_before_any_upstream_call() {
    let upstream = Upstream::start().await;
    let workspace = TempDir::new().unwrap();
    let config = test_config(&upstream, &workspace, Some("test-key"));
    let server = GatewayTestServer::start(config, workspace).await;

    let (status, body) = server
        .post(
            "/generate-content",
            json!({"url": "https://example.com", "content_type": "podcast"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("Unsupported content type"));
    assert!(upstream.received_paths().await.is_empty());
}

#[tokio::test]
async fn missing_api_key_returns_service_unavailable() {
    let upstream = Upstream::start().await;
    let workspace = TempDir::new().unwrap();
    let config = test_config(&upstream, &workspace, None);
    let server = GatewayTestServer::start(config, workspace).await;

    let health: serde_json::Value = reqwest::get(server.url("/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["llm_ready"], false);

    let (status, body) = server
        .post(
            "/generate-content",
            json!({"url": "https://example.com", "content_type": "blog"}),
        )
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["detail"], "LLM not initialized. Check API keys.");
}

#[tokio::test]
async fn upstream_failure_is_internal_error_without_leaking_key() {
    let upstream = Upstream::start().await;
    upstream.serve_page(PAGE_HTML).await;
    upstream.serve_search().await;
    upstream.fail_generation(429).await;

    let workspace = TempDir::new().unwrap();
    let config = test_config(&upstream, &workspace, Some("test-key"));
    let server = GatewayTestServer::start(config, workspace).await;

    let (status, body) = server
        .post(
            "/generate-content",
            json!({"url": upstream.page_url(), "content_type": "newsletter"}),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("Resource has been exhausted"));
    assert!(!detail.contains("test-key"));
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let upstream = Upstream::start().await;
    let workspace = TempDir::new().unwrap();
    let config = test_config(&upstream, &workspace, Some("test-key"));
    let server = GatewayTestServer::start(config, workspace).await;

    let response = reqwest::Client::new()
        .post(server.url("/generate-content"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["detail"].is_string());
}
