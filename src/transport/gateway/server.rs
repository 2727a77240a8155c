use super::AppState;
use super::handlers::{handle_generate_content, handle_generate_content_with_image, handle_health};

use crate::config::{Config, GatewayConfig};
use crate::core::services::Services;
use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, StatusCode},
    routing::{get, post},
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

/// Returns true when the bind address is not a loopback address.
fn is_public_bind(host: &str) -> bool {
    !matches!(
        host,
        "127.0.0.1" | "localhost" | "::1" | "[::1]" | "0:0:0:0:0:0:0:1"
    )
}

/// Run the HTTP gateway on `host:port`.
pub async fn run_gateway(host: &str, port: u16, config: Arc<Config>) -> Result<()> {
    if is_public_bind(host) && !config.gateway.allow_public_bind {
        anyhow::bail!(
            "Refusing to bind to {host}: the gateway has no authentication.\n\
             Fix: use --host 127.0.0.1 (default), or set\n\
             [gateway] allow_public_bind = true in config.toml."
        );
    }

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("parse gateway bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind gateway socket")?;

    run_gateway_with_listener(host, listener, config).await
}

/// Run the HTTP gateway from a pre-bound listener.
pub async fn run_gateway_with_listener(
    host: &str,
    listener: tokio::net::TcpListener,
    config: Arc<Config>,
) -> Result<()> {
    let actual_port = listener
        .local_addr()
        .context("get gateway listener local address")?
        .port();
    let display_addr = format!("{host}:{actual_port}");

    let services = Services::from_config(&config).await;
    print_gateway_banner(&display_addr, &services);

    let state = AppState {
        config: Arc::clone(&config),
        services,
    };
    let app = build_app(state, &config.gateway, Path::new(&config.image.output_dir));
    axum::serve(listener, app)
        .await
        .context("serve HTTP gateway")?;

    Ok(())
}

fn print_gateway_banner(display_addr: &str, services: &Services) {
    println!("Gateway listening on {display_addr}");
    println!("  POST /generate-content");
    println!("  POST /generate-content-with-image");
    println!("  GET  /static/generated/<file>");
    println!("  GET  /health");
    if !services.llm_ready() {
        println!();
        println!("  Text generation not initialized: set GOOGLE_API_KEY");
    }
}

/// Assemble the router with body limit, timeout and CORS layers.
pub fn build_app(state: AppState, gateway: &GatewayConfig, generated_dir: &Path) -> Router {
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/generate-content", post(handle_generate_content))
        .route(
            "/generate-content-with-image",
            post(handle_generate_content_with_image),
        )
        .nest_service("/static/generated", ServeDir::new(generated_dir))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(gateway.max_body_size))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(gateway.request_timeout_secs),
        ));

    app.layer(cors_layer(&gateway.cors_origins, gateway.allows_any_origin()))
}

fn cors_layer(origins: &[String], any_origin: bool) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if any_origin {
        return layer.allow_origin(Any);
    }
    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    layer.allow_origin(parsed)
}
