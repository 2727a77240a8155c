use crate::config::{Config, PersistenceBackend};
use crate::core::content::PipelineFactory;
use crate::core::providers::create_provider;
use crate::core::tools::SerperSearch;
use crate::core::workflow::{
    ContentRouterFlow, NoopWorkflowStore, SqliteWorkflowStore, WorkflowStore,
};
use crate::links::{HttpPageFetcher, PageFetcher};
use crate::media::{GeneratedImageStore, ImageResolver, ImagenGenerator};
use std::sync::Arc;
use tracing::{info, warn};

/// Collaborators shared by the HTTP gateway and the CLI.
///
/// `flow` is `None` when the text-generation provider could not be created
/// (typically a missing API key). Callers report that as "not initialized"
/// instead of failing at startup.
#[derive(Clone)]
pub struct Services {
    pub flow: Option<Arc<ContentRouterFlow>>,
    pub image_resolver: Arc<ImageResolver>,
}

impl Services {
    pub async fn from_config(config: &Config) -> Self {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpPageFetcher::new(&config.links));

        let flow = match create_provider(config) {
            Ok(provider) => {
                let mut factory = PipelineFactory::new(
                    provider,
                    config.default_model.clone(),
                    config.default_temperature,
                )
                .with_fetcher(Arc::clone(&fetcher), config.links.max_content_chars);
                match SerperSearch::from_config(&config.search) {
                    Some(search) => factory = factory.with_search(Arc::new(search)),
                    None => warn!("search API key not set; researchers run without web search"),
                }
                let store = open_store(config).await;
                Some(Arc::new(ContentRouterFlow::new(factory).with_store(store)))
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "text generation unavailable");
                None
            }
        };

        Self {
            flow,
            image_resolver: Arc::new(build_image_resolver(config, fetcher)),
        }
    }

    pub fn llm_ready(&self) -> bool {
        self.flow.is_some()
    }
}

fn build_image_resolver(config: &Config, fetcher: Arc<dyn PageFetcher>) -> ImageResolver {
    let resolver = ImageResolver::new(fetcher, GeneratedImageStore::new(&config.image));
    let key = config
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty());

    match key {
        Some(key) if config.image.enabled => resolver.with_generator(
            Arc::new(ImagenGenerator::new(key, &config.image)),
            config.image.candidate_models.clone(),
        ),
        _ => {
            info!("image generation disabled; covers come from page scraping only");
            resolver
        }
    }
}

/// Workflow snapshot store for the configured backend. A store that fails to
/// open degrades to the no-op store.
pub async fn open_store(config: &Config) -> Arc<dyn WorkflowStore> {
    match config.persistence.backend {
        PersistenceBackend::None => Arc::new(NoopWorkflowStore),
        PersistenceBackend::Sqlite => {
            let path = config.workspace_dir.join(&config.persistence.db_file);
            match SqliteWorkflowStore::open(&path).await {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %format!("{e:#}"),
                        "workflow store unavailable; snapshots disabled"
                    );
                    Arc::new(NoopWorkflowStore)
                }
            }
        }
    }
}
