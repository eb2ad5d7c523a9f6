// src/crawl/request.rs
// =============================================================================
// Crawl requests and the page records they turn into.
// =============================================================================

use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

use crate::fetch::Response;

// One URL waiting to be (or being) fetched
//
// The fields are private: whether a request is a deliberately mangled one is
// decided when it's created and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    url: Url,
    mangled: bool,
    depth: usize,
}

impl CrawlRequest {
    pub fn seed(url: Url) -> Self {
        Self { url, mangled: false, depth: 0 }
    }

    /// A genuine link discovered on a page
    pub fn follow(url: Url, depth: usize) -> Self {
        Self { url, mangled: false, depth }
    }

    /// A synthetic near-miss of a discovered link, expected to 404
    pub fn mangled(url: Url, depth: usize) -> Self {
        Self { url, mangled: true, depth }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn is_mangled(&self) -> bool {
        self.mangled
    }

    /// Link hops from the seed this request descends from
    pub fn depth(&self) -> usize {
        self.depth
    }
}

// The crawler's output unit: one per fetched page with a text body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub html: String,
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    #[serde(rename = "mangled_url")]
    pub mangled: bool,
}

impl PageRecord {
    // Builds a record from a response, or None when the body isn't text
    pub fn from_response(response: &Response, mangled: bool) -> Option<Self> {
        let html = response.text()?;

        Some(Self {
            url: response.url.to_string(),
            html: html.to_string(),
            status: response.status,
            headers: response.headers.clone(),
            mangled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Body;

    fn response(body: Body) -> Response {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "text/html".to_string());
        Response {
            url: Url::parse("http://example.com/x").unwrap(),
            status: 404,
            headers,
            body,
        }
    }

    #[test]
    fn test_record_from_text_response() {
        let record = PageRecord::from_response(&response(Body::Text("<p>gone</p>".into())), true).unwrap();

        assert_eq!(record.url, "http://example.com/x");
        assert_eq!(record.html, "<p>gone</p>");
        assert_eq!(record.status, 404);
        assert!(record.mangled);
    }

    #[test]
    fn test_no_record_without_text() {
        assert!(PageRecord::from_response(&response(Body::Binary(vec![1, 2])), false).is_none());
        assert!(PageRecord::from_response(&response(Body::Empty), false).is_none());
    }

    #[test]
    fn test_record_json_shape() {
        let record = PageRecord::from_response(&response(Body::Text("hi".into())), false).unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["url"], "http://example.com/x");
        assert_eq!(json["html"], "hi");
        assert_eq!(json["status"], 404);
        assert_eq!(json["headers"]["content-type"], "text/html");
        assert_eq!(json["mangled_url"], false);
    }

    #[test]
    fn test_request_constructors() {
        let url = Url::parse("http://example.com/about").unwrap();

        assert!(!CrawlRequest::seed(url.clone()).is_mangled());
        assert_eq!(CrawlRequest::seed(url.clone()).depth(), 0);
        assert!(!CrawlRequest::follow(url.clone(), 2).is_mangled());
        assert!(CrawlRequest::mangled(url, 2).is_mangled());
    }
}
