use super::state::WorkflowState;
use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use uuid::Uuid;

/// Snapshot sink for workflow state. Saves upsert by workflow id.
pub trait WorkflowStore: Send + Sync {
    fn name(&self) -> &str;

    fn save<'a>(
        &'a self,
        state: &'a WorkflowState,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

    fn load<'a>(
        &'a self,
        id: Uuid,
    ) -> Pin<Box<dyn Future<Output = Result<Option<WorkflowState>>> + Send + 'a>>;
}

pub struct NoopWorkflowStore;

impl WorkflowStore for NoopWorkflowStore {
    fn name(&self) -> &str {
        "none"
    }

    fn save<'a>(
        &'a self,
        _state: &'a WorkflowState,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async { Ok(()) })
    }

    fn load<'a>(
        &'a self,
        _id: Uuid,
    ) -> Pin<Box<dyn Future<Output = Result<Option<WorkflowState>>> + Send + 'a>> {
        Box::pin(async { Ok(None) })
    }
}

pub struct SqliteWorkflowStore {
    pool: SqlitePool,
}

impl SqliteWorkflowStore {
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create workflow directory: {}", parent.display())
            })?;
        }

        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&url)
            .await
            .with_context(|| format!("Failed to open workflow DB: {}", db_path.display()))?;

        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    async fn upsert(&self, state: &WorkflowState) -> Result<()> {
        let snapshot = serde_json::to_string(state).context("Failed to serialize workflow")?;

        sqlx::query(
            "INSERT INTO workflows (id, url, content_type, stage, snapshot, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                stage = excluded.stage,
                snapshot = excluded.snapshot,
                updated_at = excluded.updated_at",
        )
        .bind(state.id.to_string())
        .bind(&state.url)
        .bind(&state.content_type)
        .bind(state.stage().to_string())
        .bind(snapshot)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save workflow snapshot")?;

        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<WorkflowState>> {
        let row = sqlx::query("SELECT snapshot FROM workflows WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load workflow snapshot")?;

        row.map(|row| {
            let snapshot: String = row.get("snapshot");
            serde_json::from_str(&snapshot).context("Corrupt workflow snapshot")
        })
        .transpose()
    }
}

async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS workflows (
            id           TEXT PRIMARY KEY,
            url          TEXT NOT NULL,
            content_type TEXT NOT NULL,
            stage        TEXT NOT NULL,
            snapshot     TEXT NOT NULL,
            updated_at   TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create workflows table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_workflows_updated_at ON workflows(updated_at)")
        .execute(pool)
        .await
        .context("Failed to create workflows index")?;

    Ok(())
}

impl WorkflowStore for SqliteWorkflowStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn save<'a>(
        &'a self,
        state: &'a WorkflowState,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(self.upsert(state))
    }

    fn load<'a>(
        &'a self,
        id: Uuid,
    ) -> Pin<Box<dyn Future<Output = Result<Option<WorkflowState>>> + Send + 'a>> {
        Box::pin(self.fetch(id))
    }
}
