// src/extract/mod.rs
// =============================================================================
// Link extraction: "given a fetched page, which absolute URLs does it link to?"
//
// The crawl loop depends on the LinkExtractor trait only; HtmlLinkExtractor
// is the scraper-based implementation used by the binary.
// =============================================================================

mod html;

use url::Url;

pub use html::HtmlLinkExtractor;

pub trait LinkExtractor {
    // Returns the absolute, de-duplicated links found in `body`, in document
    // order. Relative links are resolved against `base_url`.
    fn extract_links(&self, body: &str, base_url: &Url) -> Vec<Url>;
}
