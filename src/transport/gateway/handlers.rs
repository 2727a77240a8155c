use super::AppState;
use super::types::{
    ContentResponse, ContentWithImageResponse, GenerateContentRequest,
    GenerateContentWithImageRequest,
};
use crate::core::workflow::{ContentRouterFlow, WorkflowState};
use crate::error::WorkflowError;
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

const LLM_NOT_INITIALIZED: &str = "LLM not initialized. Check API keys.";

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "detail": message.into() })),
    )
        .into_response()
}

fn workflow_error_response(error: &WorkflowError) -> Response {
    let status = if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    detail(status, error.to_string())
}

fn rejection_response(rejection: &JsonRejection) -> Response {
    detail(rejection.status(), rejection.body_text())
}

fn flow_or_unavailable(state: &AppState) -> Result<Arc<ContentRouterFlow>, Response> {
    state.services.flow.clone().ok_or_else(|| {
        tracing::warn!("content request refused: text generation not initialized");
        detail(StatusCode::SERVICE_UNAVAILABLE, LLM_NOT_INITIALIZED)
    })
}

/// Run the workflow on its own task so a long pipeline never stalls the
/// connection-handling task.
async fn run_workflow(
    flow: Arc<ContentRouterFlow>,
    state: WorkflowState,
) -> Result<String, Response> {
    let handle = tokio::spawn(async move { flow.execute(state).await });
    match handle.await {
        Ok(Ok(done)) => Ok(done.into_final_content()),
        Ok(Err(failure)) => Err(workflow_error_response(&failure.error)),
        Err(join_error) => {
            tracing::error!(error = %join_error, "workflow task aborted");
            Err(detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("workflow task aborted: {join_error}"),
            ))
        }
    }
}

/// GET /health
pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "llm_ready": state.services.llm_ready(),
        "image_generation": state.services.image_resolver.generation_enabled(),
    }))
}

/// POST /generate-content
pub(super) async fn handle_generate_content(
    State(state): State<AppState>,
    body: Result<Json<GenerateContentRequest>, JsonRejection>,
) -> Response {
    let flow = match flow_or_unavailable(&state) {
        Ok(flow) => flow,
        Err(response) => return response,
    };
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(&rejection),
    };

    let workflow = WorkflowState::new(request.url.clone(), request.content_type.clone());
    match run_workflow(flow, workflow).await {
        Ok(content) => Json(ContentResponse {
            url: request.url,
            content_type: request.content_type,
            content,
        })
        .into_response(),
        Err(response) => response,
    }
}

/// POST /generate-content-with-image
///
/// Content is produced first; the image chain only runs once the workflow
/// has succeeded and never fails the request.
pub(super) async fn handle_generate_content_with_image(
    State(state): State<AppState>,
    body: Result<Json<GenerateContentWithImageRequest>, JsonRejection>,
) -> Response {
    let flow = match flow_or_unavailable(&state) {
        Ok(flow) => flow,
        Err(response) => return response,
    };
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(&rejection),
    };

    let workflow = WorkflowState::new(request.url.clone(), request.content_type.clone());
    let content = match run_workflow(flow, workflow).await {
        Ok(content) => content,
        Err(response) => return response,
    };

    let aspect_ratio = match request.aspect_ratio.trim() {
        "" => state.config.image.default_aspect_ratio.as_str(),
        ratio => ratio,
    };
    let image = state
        .services
        .image_resolver
        .resolve(
            &request.url,
            request.image_prompt_override.as_deref(),
            aspect_ratio,
        )
        .await;
    tracing::info!(
        url = %request.url,
        image_source = %image.source_kind,
        "image resolved"
    );

    Json(ContentWithImageResponse {
        url: request.url,
        content_type: request.content_type,
        image_url: image.reference,
        image_source: image.source_kind,
        content,
    })
    .into_response()
}
