pub mod pipeline;
pub mod tasks;
pub mod templates;
pub mod types;

pub use pipeline::{Agent, ContentPipeline, PipelineFactory, PipelineOutput};
pub use tasks::{ContentTask, PipelineTasks, build_tasks};
pub use templates::{LengthEnvelope, PROFILES, PlatformProfile};
pub use types::{ContentType, Role, RoleKind};
