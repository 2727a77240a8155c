use crate::links::{PageFetcher, page_title, parse_page_url};
use tracing::debug;

/// Topic label for `url`: the page `<title>` when it can be fetched,
/// otherwise the URL without scheme and surrounding slashes.
pub async fn topic_label(fetcher: &dyn PageFetcher, url: &str) -> String {
    let title = match parse_page_url(url) {
        Ok(parsed) => match fetcher.fetch_html(&parsed).await {
            Ok(html) => page_title(&html),
            Err(e) => {
                debug!(url, error = %e, "title fetch failed; using URL as topic");
                None
            }
        },
        Err(e) => {
            debug!(url, error = %e, "unparseable URL; using it as topic");
            None
        }
    };
    title.unwrap_or_else(|| url_label(url))
}

/// `https://example.com/post/` -> `example.com/post`
pub fn url_label(url: &str) -> String {
    let trimmed = url.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_matches('/').to_string()
}

/// Compose the image prompt from a descriptive core. Pure.
pub fn compose_prompt(core: &str, aspect_ratio: &str) -> String {
    format!(
        "{core} Aspect ratio: {aspect_ratio}. Render photorealistic OR vector-illustrative \
         depending on topic; avoid text on image."
    )
}

/// Descriptive core for a topic when no override is given.
pub fn cover_core(topic: &str) -> String {
    format!(
        "Design a 16:9 editorial-style cover illustration that visually represents: '{topic}'. \
         Style: clean, modern, high-contrast focal subject, subtle gradients, soft depth, \
         no text on image, appropriate for a blog/social header, coherent color palette."
    )
}

/// Build the image-generation prompt for `url`.
///
/// A non-blank override is used (trimmed) as the core; otherwise the page
/// title (or URL label) is embedded in the cover template.
pub async fn build_prompt(
    fetcher: &dyn PageFetcher,
    url: &str,
    override_text: Option<&str>,
    aspect_ratio: &str,
) -> String {
    let core = match override_text.map(str::trim).filter(|o| !o.is_empty()) {
        Some(text) => text.to_string(),
        None => cover_core(&topic_label(fetcher, url).await),
    };
    compose_prompt(&core, aspect_ratio)
}
