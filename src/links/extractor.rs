use super::fetcher::PageFetcher;
use super::types::{ExtractedContent, PageImages};
use crate::error::FetchError;
use scraper::{Html, Selector};
use url::Url;

/// Fetch a page and extract its readable text.
pub async fn extract_content(
    fetcher: &dyn PageFetcher,
    url: &Url,
    max_chars: usize,
) -> Result<ExtractedContent, FetchError> {
    let html = fetcher.fetch_html(url).await?;
    Ok(extract_from_html(url.as_str(), &html, max_chars))
}

/// Title plus readable text (article, then main, then body).
pub fn extract_from_html(url: &str, html: &str, max_chars: usize) -> ExtractedContent {
    let document = Html::parse_document(html);

    let content = extract_element_text(&document, "article")
        .or_else(|| extract_element_text(&document, "main"))
        .or_else(|| extract_element_text(&document, "body"))
        .unwrap_or_default();

    ExtractedContent {
        url: url.to_string(),
        title: title_of(&document),
        text: truncate_text(&content, max_chars),
    }
}

/// `<title>` text with whitespace collapsed, if non-empty.
pub fn page_title(html: &str) -> Option<String> {
    title_of(&Html::parse_document(html))
}

/// Open Graph image and first inline `img[src]`, raw as they appear.
pub fn page_images(html: &str) -> PageImages {
    let document = Html::parse_document(html);

    let og_image = Selector::parse(r#"meta[property="og:image"]"#)
        .ok()
        .and_then(|sel| {
            document
                .select(&sel)
                .filter_map(|el| el.value().attr("content"))
                .map(str::trim)
                .find(|content| !content.is_empty())
                .map(String::from)
        });

    let first_inline = Selector::parse("img[src]").ok().and_then(|sel| {
        document
            .select(&sel)
            .filter_map(|el| el.value().attr("src"))
            .map(str::trim)
            .find(|src| !src.is_empty())
            .map(String::from)
    });

    PageImages {
        og_image,
        first_inline,
    }
}

fn title_of(document: &Html) -> Option<String> {
    let sel = Selector::parse("title").ok()?;
    let raw: String = document.select(&sel).next()?.text().collect();
    let collapsed = collapse_whitespace(&raw);
    (!collapsed.is_empty()).then_some(collapsed)
}

fn extract_element_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let element = document.select(&sel).next()?;
    let text: String = element.text().collect::<Vec<_>>().join(" ");
    let normalized = collapse_whitespace(&text);
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
