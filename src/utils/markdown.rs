//! Inline markdown link handling

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `[label](http(s)://...)`; the URL stops at whitespace or `)`.
static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").expect("link pattern is valid")
});

/// An inline link found in markdown text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownLink<'a> {
    pub label: &'a str,
    pub url: &'a str,
}

/// Iterate over the inline links of `markdown`, left to right
pub fn links(markdown: &str) -> impl Iterator<Item = MarkdownLink<'_>> {
    LINK_PATTERN.captures_iter(markdown).filter_map(|cap| {
        Some(MarkdownLink {
            label: cap.get(1)?.as_str(),
            url: cap.get(2)?.as_str(),
        })
    })
}

/// Extract the URLs referenced by inline links, in order of appearance.
/// Duplicates are kept.
pub fn extract_links(markdown: &str) -> Vec<String> {
    links(markdown).map(|link| link.url.to_string()).collect()
}

/// Rewrite every inline link with `replace`. Returning `None` keeps the
/// original link text.
pub fn replace_links<F>(markdown: &str, mut replace: F) -> String
where
    F: FnMut(MarkdownLink<'_>) -> Option<String>,
{
    LINK_PATTERN
        .replace_all(markdown, |cap: &Captures<'_>| {
            let original = cap[0].to_string();
            match (cap.get(1), cap.get(2)) {
                (Some(label), Some(url)) => replace(MarkdownLink {
                    label: label.as_str(),
                    url: url.as_str(),
                })
                .unwrap_or(original),
                _ => original,
            }
        })
        .into_owned()
}
