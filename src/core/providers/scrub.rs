use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 300;
const REDACTED: &str = "[REDACTED]";

/// Key prefixes issued by the collaborators this service talks to.
const PREFIX_PATTERNS: [&str; 4] = ["AIza", "ya29.", "sk-", "eyJ"];

/// Places a credential shows up in URLs, headers and JSON bodies.
const MARKER_PATTERNS: [&str; 8] = [
    "api_key=",
    "key=",
    "access_token=",
    "X-API-KEY: ",
    "x-api-key: ",
    "\"api_key\":\"",
    "\"apiKey\":\"",
    "Authorization: Bearer ",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|(_, c)| !is_secret_char(*c))
        .map_or(input.len(), |(i, _)| from + i)
}

/// Replace `marker` plus the token following it. `keep_marker` leaves the
/// marker in place so the redacted text still shows which field was hit.
fn scrub_after_marker(scrubbed: &mut String, marker: &str, keep_marker: bool) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = token_end(scrubbed, content_start);

        // Bare marker, or one whose value was already redacted.
        if end == content_start {
            search_from = content_start;
            continue;
        }

        let replace_from = if keep_marker { content_start } else { start };
        scrubbed.replace_range(replace_from..end, REDACTED);
        search_from = replace_from + REDACTED.len();
    }
}

/// Scrub credential-shaped tokens from collaborator error text.
///
/// Gemini takes its key as a `?key=` query parameter, so transport errors
/// that echo the request URL would otherwise leak it.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    let hit = PREFIX_PATTERNS
        .iter()
        .chain(MARKER_PATTERNS.iter())
        .any(|pattern| input.contains(pattern));
    if !hit {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for prefix in PREFIX_PATTERNS {
        scrub_after_marker(&mut scrubbed, prefix, false);
    }
    for marker in MARKER_PATTERNS {
        scrub_after_marker(&mut scrubbed, marker, true);
    }
    Cow::Owned(scrubbed)
}

/// Sanitize API error text by scrubbing secrets and truncating length.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);

    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.into_owned();
    }

    let truncated: String = scrubbed.chars().take(MAX_API_ERROR_CHARS).collect();
    format!("{truncated}...")
}

/// Build a sanitized collaborator error from a failed HTTP response.
pub async fn api_error(collaborator: &str, response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());
    let sanitized = sanitize_api_error(&body);
    anyhow::anyhow!("{collaborator} API error ({status}): {sanitized}")
}
