pub mod flow;
pub mod router;
pub mod state;
pub mod store;

pub use flow::{ContentRouterFlow, WorkflowFailure};
pub use router::PipelineRegistry;
pub use state::{Stage, WorkflowState};
pub use store::{NoopWorkflowStore, SqliteWorkflowStore, WorkflowStore};
