use url::Url;

/// Turn an `img src` / `og:image` value into an absolute URL.
///
/// Protocol-relative sources take `https:`; anything else is joined against
/// the page URL. Values that cannot be joined are returned unchanged.
pub fn normalize_image_src(page: &Url, src: &str) -> String {
    let src = src.trim();
    if let Some(rest) = src.strip_prefix("//") {
        return format!("https://{rest}");
    }
    page.join(src)
        .map_or_else(|_| src.to_string(), |resolved| resolved.to_string())
}
