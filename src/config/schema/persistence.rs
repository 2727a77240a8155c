use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PersistenceBackend {
    #[default]
    Sqlite,
    None,
}

/// Where workflow snapshots go. The SQLite file lives under the workspace dir.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default)]
    pub backend: PersistenceBackend,
    #[serde(default = "default_db_file")]
    pub db_file: String,
}

fn default_db_file() -> String {
    "workflows.db".into()
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: PersistenceBackend::default(),
            db_file: default_db_file(),
        }
    }
}
