pub mod schema;

pub use schema::{Config, GatewayConfig, LlmConfig, PersistenceBackend, PersistenceConfig, SearchConfig};
