//! Axum-based HTTP boundary for the content router.
//!
//! - `POST /generate-content` runs one workflow and returns the text
//! - `POST /generate-content-with-image` also resolves a cover image
//! - `GET /health` reports which collaborators are initialized
//! - `GET /static/generated/*` serves generated images read-only
//!
//! Body size and request time are bounded by `[gateway]` config.

mod handlers;
mod server;
mod types;

pub use server::{build_app, run_gateway, run_gateway_with_listener};
pub use types::{
    ContentResponse, ContentWithImageResponse, GenerateContentRequest,
    GenerateContentWithImageRequest,
};

use crate::config::Config;
use crate::core::services::Services;
use std::sync::Arc;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub services: Services,
}
