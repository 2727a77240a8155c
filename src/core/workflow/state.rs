use crate::core::content::ContentType;
use crate::error::{PipelineError, WorkflowError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::Display;
use uuid::Uuid;

/// Workflow stage. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case", tag = "stage", content = "content_type")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Start,
    Routed(ContentType),
    Executing(ContentType),
    Completed,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Per-request workflow record. Created fresh for each request and moved
/// through the stages by [`super::ContentRouterFlow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub id: Uuid,
    pub url: String,
    /// Raw caller input; parsed during validation.
    pub content_type: String,
    /// Optional image URL the writer may reference.
    pub image_url_hint: Option<String>,
    final_content: String,
    pub metadata: Map<String, Value>,
    stage: Stage,
}

impl WorkflowState {
    pub fn new(url: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            content_type: content_type.into(),
            image_url_hint: None,
            final_content: String::new(),
            metadata: Map::new(),
            stage: Stage::Start,
        }
    }

    pub fn with_image_url_hint(mut self, hint: Option<String>) -> Self {
        self.image_url_hint = hint;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Empty unless the workflow completed.
    pub fn final_content(&self) -> &str {
        &self.final_content
    }

    pub fn into_final_content(self) -> String {
        self.final_content
    }

    /// The routed content type, once past `Start`.
    pub fn routed_type(&self) -> Option<ContentType> {
        match self.stage {
            Stage::Routed(ct) | Stage::Executing(ct) => Some(ct),
            _ => None,
        }
    }

    pub fn record(&mut self, key: &str, value: impl Into<Value>) {
        self.metadata.insert(key.to_string(), value.into());
    }

    pub fn record_now(&mut self, key: &str) {
        self.record(key, Utc::now().to_rfc3339());
    }

    /// Check caller input. Valid only in `Start`.
    pub fn validate(&self) -> Result<ContentType, WorkflowError> {
        self.expect_stage(Stage::Start)?;
        if self.url.trim().is_empty() {
            return Err(WorkflowError::validation("URL is required"));
        }
        ContentType::parse(&self.content_type)
    }

    pub fn mark_routed(&mut self, content_type: ContentType) -> Result<(), WorkflowError> {
        self.expect_stage(Stage::Start)?;
        self.stage = Stage::Routed(content_type);
        self.record("pipeline", content_type.to_string());
        Ok(())
    }

    pub fn mark_executing(&mut self) -> Result<ContentType, WorkflowError> {
        let Stage::Routed(content_type) = self.stage else {
            return Err(WorkflowError::InvalidStage(self.stage.to_string()));
        };
        self.stage = Stage::Executing(content_type);
        Ok(content_type)
    }

    /// Store the pipeline result. Only an executing workflow with non-empty
    /// content can complete.
    pub fn complete(&mut self, content: String) -> Result<(), WorkflowError> {
        let Stage::Executing(content_type) = self.stage else {
            return Err(WorkflowError::InvalidStage(self.stage.to_string()));
        };
        if content.trim().is_empty() {
            return Err(PipelineError::EmptyOutput {
                pipeline: content_type.to_string(),
            }
            .into());
        }
        self.record("content_chars", content.chars().count());
        self.final_content = content;
        self.stage = Stage::Completed;
        self.record_now("completed_at");
        Ok(())
    }

    /// Move to `Failed` from any stage, dropping any content.
    pub fn fail(&mut self, error: &WorkflowError) {
        self.final_content.clear();
        self.stage = Stage::Failed;
        self.record("error", error.to_string());
        self.record_now("failed_at");
    }

    fn expect_stage(&self, expected: Stage) -> Result<(), WorkflowError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(WorkflowError::InvalidStage(self.stage.to_string()))
        }
    }
}
