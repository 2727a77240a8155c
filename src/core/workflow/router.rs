use crate::core::content::{ContentType, PROFILES, PlatformProfile};
use crate::error::WorkflowError;
use std::collections::HashMap;

/// Dispatch table from content type to its pipeline profile.
#[derive(Debug, Clone, Default)]
pub struct PipelineRegistry {
    routes: HashMap<ContentType, &'static PlatformProfile>,
}

impl PipelineRegistry {
    /// Registry with every built-in platform.
    pub fn standard() -> Self {
        let mut registry = Self::default();
        for profile in PROFILES {
            registry.register(profile);
        }
        registry
    }

    pub fn register(&mut self, profile: &'static PlatformProfile) {
        self.routes.insert(profile.content_type, profile);
    }

    pub fn remove(&mut self, content_type: ContentType) {
        self.routes.remove(&content_type);
    }

    pub fn route(&self, content_type: ContentType) -> Result<&'static PlatformProfile, WorkflowError> {
        self.routes
            .get(&content_type)
            .copied()
            .ok_or(WorkflowError::Unroutable(content_type))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
