// src/extract/html.rs
// =============================================================================
// This module extracts followable links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// And the `url` crate to resolve relative links against the page URL.
//
// What counts as a followable link:
// - <a href> and <area href>
// - resolved against <base href> when the page declares one
// - http/https only, fragment removed
// - not pointing at an obvious binary file (images, archives, media...)
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use super::LinkExtractor;

// File extensions we never bother following
//
// These would come back as binary bodies anyway, which the crawler drops.
const IGNORED_EXTENSIONS: &[&str] = &[
    // images
    "mng", "pct", "bmp", "gif", "jpg", "jpeg", "png", "pst", "psp", "tif", "tiff", "ai", "drw",
    "dxf", "eps", "ps", "svg", "cdr", "ico", "webp",
    // audio
    "mp3", "wma", "ogg", "wav", "ra", "aac", "mid", "au", "aiff",
    // video
    "3gp", "asf", "asx", "avi", "mov", "mp4", "mpg", "qt", "rm", "swf", "wmv", "m4a", "m4v",
    "flv", "webm",
    // office suites
    "xls", "xlsx", "ppt", "pptx", "pps", "doc", "docx", "odt", "ods", "odg", "odp",
    // other
    "css", "pdf", "exe", "bin", "rss", "dmg", "iso", "apk", "jar", "zip", "rar", "gz", "tar",
    "tgz", "bz2", "7z", "xz",
];

#[derive(Debug)]
pub struct HtmlLinkExtractor {
    links: Selector,
    base: Selector,
}

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        // Selector::parse only fails on malformed CSS, and these are
        // constants known to be valid
        Self {
            links: Selector::parse("a[href], area[href]").unwrap(),
            base: Selector::parse("base[href]").unwrap(),
        }
    }
}

impl Default for HtmlLinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, body: &str, base_url: &Url) -> Vec<Url> {
        let document = Html::parse_document(body);

        // <base href="..."> changes what relative links are relative to
        let base = document
            .select(&self.base)
            .next()
            .and_then(|element| element.value().attr("href"))
            .and_then(|href| base_url.join(href.trim()).ok())
            .unwrap_or_else(|| base_url.clone());

        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for element in document.select(&self.links) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            if let Some(url) = resolve_link(&base, href) {
                if is_followable(&url) && seen.insert(url.to_string()) {
                    links.push(url);
                }
            }
        }

        links
    }
}

// Resolves a (possibly relative) href to an absolute URL without fragment
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    // Skip anchors and special protocols
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    url.set_fragment(None);
    Some(url)
}

fn is_followable(url: &Url) -> bool {
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    let last_segment = url.path().rsplit('/').next().unwrap_or("");
    match last_segment.rsplit_once('.') {
        Some((_, ext)) => !IGNORED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => true,
    }
}
