use crate::core::content::ContentType;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the content router.
///
/// Each subsystem defines its own error variant. The HTTP boundary matches on
/// these to pick a status code; collaborator adapters keep using
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum RouterError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Workflow ────────────────────────────────────────────────────────
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    // ── Page fetch / parse ──────────────────────────────────────────────
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Workflow errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Missing or malformed caller input. Raised before any collaborator runs.
    #[error("{0}")]
    Validation(String),

    /// A recognized content type has no pipeline registered.
    #[error("no content pipeline registered for content type '{0}'")]
    Unroutable(ContentType),

    #[error("pipeline execution failed: {0}")]
    PipelineExecution(#[from] PipelineError),

    /// The workflow was asked to run from a stage other than `Start`.
    #[error("workflow cannot start from stage '{0}'")]
    InvalidStage(String),
}

impl WorkflowError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Caller-side mistakes; everything else is a server fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// ─── Pipeline errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{role} failed on task '{task}': {message}")]
    Llm {
        task: String,
        role: String,
        message: String,
    },

    #[error("task '{task}' needs output of '{dependency}' which has not run yet")]
    MissingContext { task: String, dependency: String },

    #[error("pipeline '{pipeline}' produced no content")]
    EmptyOutput { pipeline: String },
}

// ─── Fetch errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url '{0}'")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("no usable content: {0}")]
    Empty(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, RouterError>;
