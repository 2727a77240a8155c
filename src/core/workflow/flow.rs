use super::router::PipelineRegistry;
use super::state::WorkflowState;
use super::store::{NoopWorkflowStore, WorkflowStore};
use crate::core::content::PipelineFactory;
use crate::error::WorkflowError;
use std::sync::Arc;
use tracing::{error, info, warn};

/// A failed run: the terminal `Failed` state plus the error that caused it.
#[derive(Debug)]
pub struct WorkflowFailure {
    pub state: WorkflowState,
    pub error: WorkflowError,
}

/// Drives a [`WorkflowState`] through validate, route, execute and complete.
pub struct ContentRouterFlow {
    registry: PipelineRegistry,
    factory: PipelineFactory,
    store: Arc<dyn WorkflowStore>,
}

impl ContentRouterFlow {
    pub fn new(factory: PipelineFactory) -> Self {
        Self {
            registry: PipelineRegistry::standard(),
            factory,
            store: Arc::new(NoopWorkflowStore),
        }
    }

    pub fn with_registry(mut self, registry: PipelineRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn WorkflowStore>) -> Self {
        self.store = store;
        self
    }

    pub fn store(&self) -> &Arc<dyn WorkflowStore> {
        &self.store
    }

    /// Run one workflow to a terminal stage.
    ///
    /// Returns the `Completed` state with non-empty content, or the `Failed`
    /// state with the originating error. Input validation happens before any
    /// collaborator is called.
    pub async fn execute(&self, mut state: WorkflowState) -> Result<WorkflowState, WorkflowFailure> {
        state.record("workflow_id", state.id.to_string());
        state.record_now("started_at");

        let content_type = match state.validate() {
            Ok(ct) => ct,
            Err(e) => return Err(self.fail(state, e).await),
        };
        self.persist(&state).await;

        if let Err(e) = self
            .registry
            .route(content_type)
            .and_then(|_| state.mark_routed(content_type))
        {
            return Err(self.fail(state, e).await);
        }
        info!(workflow_id = %state.id, content_type = %content_type, "pipeline routed");

        match self.run_pipeline(&mut state).await {
            Ok(()) => {
                info!(
                    workflow_id = %state.id,
                    content_type = %content_type,
                    content_chars = state.final_content().chars().count(),
                    "workflow completed"
                );
                self.persist(&state).await;
                Ok(state)
            }
            Err(e) => Err(self.fail(state, e).await),
        }
    }

    async fn run_pipeline(&self, state: &mut WorkflowState) -> Result<(), WorkflowError> {
        let content_type = state.mark_executing()?;
        let profile = self.registry.route(content_type)?;

        let pipeline = self
            .factory
            .build(profile, &state.url, state.image_url_hint.as_deref());
        let output = pipeline.kickoff().await?;

        state.record("research_chars", output.research.chars().count());
        state.complete(output.content)
    }

    async fn fail(&self, mut state: WorkflowState, error: WorkflowError) -> WorkflowFailure {
        if error.is_client_error() {
            warn!(workflow_id = %state.id, error = %error, "workflow rejected");
        } else {
            error!(workflow_id = %state.id, error = %error, "workflow failed");
        }
        state.fail(&error);
        self.persist(&state).await;
        WorkflowFailure { state, error }
    }

    async fn persist(&self, state: &WorkflowState) {
        if let Err(e) = self.store.save(state).await {
            warn!(
                workflow_id = %state.id,
                store = self.store.name(),
                error = %format!("{e:#}"),
                "failed to persist workflow snapshot"
            );
        }
    }
}
