pub mod extractor;
pub mod fetcher;
pub mod resolve;
pub mod types;

pub use extractor::{extract_content, extract_from_html, page_images, page_title};
pub use fetcher::{HttpPageFetcher, PageFetcher, parse_page_url};
pub use resolve::normalize_image_src;
pub use types::{ExtractedContent, LinkConfig, PageImages};
