mod core;
mod gateway;
mod llm;
mod persistence;
mod search;

pub use crate::links::types::LinkConfig;
pub use crate::media::types::ImageConfig;
pub use core::Config;
pub use gateway::GatewayConfig;
pub use llm::LlmConfig;
pub use persistence::{PersistenceBackend, PersistenceConfig};
pub use search::SearchConfig;
