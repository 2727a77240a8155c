use super::generator::ImageGenerator;
use super::prompt::build_prompt;
use super::storage::GeneratedImageStore;
use super::types::{ImageResolution, ImageSourceKind};
use crate::error::FetchError;
use crate::links::{PageFetcher, PageImages, normalize_image_src, page_images, parse_page_url};
use std::sync::Arc;
use tracing::{debug, info};

/// Ordered image fallback chain: generate, Open Graph, first inline image,
/// none. Never fails; every step's error is logged and skipped.
pub struct ImageResolver {
    fetcher: Arc<dyn PageFetcher>,
    generator: Option<Arc<dyn ImageGenerator>>,
    candidate_models: Vec<String>,
    sink: GeneratedImageStore,
}

impl ImageResolver {
    pub fn new(fetcher: Arc<dyn PageFetcher>, sink: GeneratedImageStore) -> Self {
        Self {
            fetcher,
            generator: None,
            candidate_models: Vec::new(),
            sink,
        }
    }

    pub fn with_generator(
        mut self,
        generator: Arc<dyn ImageGenerator>,
        candidate_models: Vec<String>,
    ) -> Self {
        self.generator = Some(generator);
        self.candidate_models = candidate_models;
        self
    }

    pub fn generation_enabled(&self) -> bool {
        self.generator.is_some() && !self.candidate_models.is_empty()
    }

    pub async fn resolve(
        &self,
        url: &str,
        prompt_override: Option<&str>,
        aspect_ratio: &str,
    ) -> ImageResolution {
        if let Some(path) = self.try_generate(url, prompt_override, aspect_ratio).await {
            info!(url, path = %path, "using generated cover image");
            return ImageResolution::found(ImageSourceKind::Generated, path);
        }

        // One fetch serves both scrape steps.
        let images = match self.scrape(url).await {
            Ok(images) => images,
            Err(e) => {
                debug!(url, error = %e, "page scrape failed; no image");
                return ImageResolution::none();
            }
        };

        if let Some(og) = images.og_image {
            return ImageResolution::found(ImageSourceKind::OpenGraph, og);
        }
        if let Some(src) = images.first_inline {
            return ImageResolution::found(ImageSourceKind::ScrapedInline, src);
        }

        debug!(url, "no image found on page");
        ImageResolution::none()
    }

    /// Candidates are tried one at a time; the first stored image wins.
    async fn try_generate(
        &self,
        url: &str,
        prompt_override: Option<&str>,
        aspect_ratio: &str,
    ) -> Option<String> {
        let generator = self.generator.as_ref()?;
        if self.candidate_models.is_empty() {
            return None;
        }

        let prompt = build_prompt(self.fetcher.as_ref(), url, prompt_override, aspect_ratio).await;

        for model in &self.candidate_models {
            let bytes = match generator.generate(model, &prompt, aspect_ratio).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    debug!(model = %model, error = %format!("{e:#}"), "image generation failed");
                    continue;
                }
            };
            match self.sink.store(&bytes).await {
                Ok(path) => return Some(path.to_string_lossy().into_owned()),
                Err(e) => {
                    debug!(model = %model, error = %format!("{e:#}"), "generated image rejected");
                }
            }
        }
        None
    }

    /// Fetch the page and pull absolute OG / inline image URLs from it.
    async fn scrape(&self, url: &str) -> Result<PageImages, FetchError> {
        let page_url = parse_page_url(url)?;
        let html = self.fetcher.fetch_html(&page_url).await?;
        let raw = page_images(&html);
        Ok(PageImages {
            og_image: raw.og_image,
            first_inline: raw
                .first_inline
                .map(|src| normalize_image_src(&page_url, &src)),
        })
    }
}
