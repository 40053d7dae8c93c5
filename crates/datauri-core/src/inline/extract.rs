//! `url(...)` extraction and candidate filtering.

use regex::Regex;
use std::sync::OnceLock;

use super::InlineOptions;

/// `url(` + optional quote + lazy capture + optional quote + `)`.
fn url_func() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"url\(["']?(.*?)["']?\)"#).expect("url() pattern is valid"))
}

/// Raw URIs of every non-overlapping `url(...)` in document order.
pub fn url_references(content: &str) -> Vec<&str> {
    url_func()
        .captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Drops repeats, keeping the first occurrence of each URI.
pub fn unique<'a>(uris: &[&'a str]) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::with_capacity(uris.len());
    for uri in uris {
        if !out.contains(uri) {
            out.push(uri);
        }
    }
    out
}

/// Already inlined or remote.
pub fn is_external(uri: &str) -> bool {
    uri.contains("data:") || uri.contains("http")
}

/// Matches the extension override regex when configured, else any `.<ext>` substring.
pub fn is_image(uri: &str, options: &InlineOptions) -> bool {
    if let Some(re) = &options.extension_regex {
        return re.is_match(uri);
    }
    options
        .image_extensions
        .iter()
        .any(|ext| uri.contains(&format!(".{ext}")))
}
