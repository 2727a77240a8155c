use super::support::{GatewayTestServer, PAGE_HTML, Upstream, test_config};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const PNG_BYTES: [u8; 16] = [
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

async fn serve_blog_pipeline(upstream: &Upstream) {
    upstream.serve_page(PAGE_HTML).await;
    upstream.serve_search().await;
    upstream.reply_as("Blog Content Researcher", "notes").await;
    upstream.reply_as("Blog Content Writer", "blog post").await;
}

#[tokio::test]
async fn generated_image_is_stored_and_served() {
    let upstream = Upstream::start().await;
    serve_blog_pipeline(&upstream).await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/imagen-3.0-fast-generate-001:predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{"bytesBase64Encoded": STANDARD.encode(PNG_BYTES), "mimeType": "image/png"}]
        })))
        .mount(&upstream.server)
        .await;

    let workspace = TempDir::new().unwrap();
    let config = test_config(&upstream, &workspace, Some("test-key"));
    let server = GatewayTestServer::start(config, workspace).await;

    let (status, body) = server
        .post(
            "/generate-content-with-image",
            json!({
                "url": upstream.page_url(),
                "content_type": "blog",
                "image_prompt_override": "A lighthouse made of gears"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "blog post");
    assert_eq!(body["image_source"], "generated");
    let image_path = body["image_url"].as_str().unwrap().to_string();
    assert!(image_path.ends_with(".png"));
    assert_eq!(std::fs::read(&image_path).unwrap(), PNG_BYTES);

    let file_name = std::path::Path::new(&image_path)
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    let served = reqwest::get(server.url(&format!("/static/generated/{file_name}")))
        .await
        .unwrap();
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.bytes().await.unwrap().as_ref(), PNG_BYTES);
}

#[tokio::test]
async fn failed_generation_falls_back_to_open_graph_image() {
    let upstream = Upstream::start().await;
    serve_blog_pipeline(&upstream).await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/imagen-3.0-fast-generate-001:predict"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/imagen-3.0-generate-002:predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"predictions": []})))
        .mount(&upstream.server)
        .await;

    let workspace = TempDir::new().unwrap();
    let config = test_config(&upstream, &workspace, Some("test-key"));
    let server = GatewayTestServer::start(config, workspace).await;

    let (status, body) = server
        .post(
            "/generate-content-with-image",
            json!({"url": upstream.page_url(), "contentType": "blog", "aspectRatio": "1:1"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["image_source"], "open_graph");
    assert_eq!(body["image_url"], "https://cdn.example.com/og.jpg");

    let predict_calls = upstream
        .received_paths()
        .await
        .into_iter()
        .filter(|p| p.ends_with(":predict"))
        .count();
    assert_eq!(predict_calls, 2);
}

#[tokio::test]
async fn disabled_generation_uses_first_inline_image() {
    let upstream = Upstream::start().await;
    upstream
        .serve_page(r#"<html><head><title>T</title></head><body><p>x</p><img src="/images/hero.png"></body></html>"#)
        .await;
    upstream.serve_search().await;
    upstream.reply_as("Blog Content Researcher", "notes").await;
    upstream.reply_as("Blog Content Writer", "blog post").await;

    let workspace = TempDir::new().unwrap();
    let mut config = test_config(&upstream, &workspace, Some("test-key"));
    config.image.enabled = false;
    let server = GatewayTestServer::start(config, workspace).await;

    let (status, body) = server
        .post(
            "/generate-content-with-image",
            json!({"url": upstream.page_url(), "content_type": "blog"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["image_source"], "scraped_inline");
    assert_eq!(
        body["image_url"],
        format!("{}/images/hero.png", upstream.server.uri())
    );
    assert!(
        !upstream
            .received_paths()
            .await
            .iter()
            .any(|p| p.ends_with(":predict"))
    );
}
