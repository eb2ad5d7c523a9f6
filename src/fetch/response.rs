// src/fetch/response.rs
// =============================================================================
// The response model handed from the transport to the crawl loop.
//
// The body is classified exactly once, when the fetch completes:
// - Text: something the crawler can store and scan for links
// - Binary: images, PDFs, archives... never emitted
// - Empty: no body and no content type telling us it was text
// =============================================================================

use std::collections::BTreeMap;
use url::Url;

/// A response body, resolved at fetch-completion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Binary(Vec<u8>),
    Empty,
}

impl Body {
    // Classifies raw bytes using the Content-Type header (if any)
    //
    // Declared types win. Without a declaration we sniff: valid UTF-8 is
    // treated as text, anything else as binary.
    pub fn decode(content_type: Option<&str>, bytes: Vec<u8>) -> Body {
        match content_type.map(media_type) {
            Some(mime) if is_textual(&mime) => Body::Text(lossy_utf8(bytes)),
            Some(_) if bytes.is_empty() => Body::Empty,
            Some(_) => Body::Binary(bytes),
            None if bytes.is_empty() => Body::Empty,
            None => match String::from_utf8(bytes) {
                Ok(text) => Body::Text(text),
                Err(e) => Body::Binary(e.into_bytes()),
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            Body::Binary(_) | Body::Empty => None,
        }
    }
}

/// A completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct Response {
    /// Final URL (after redirects)
    pub url: Url,
    /// HTTP status code
    pub status: u16,
    /// Header name -> value; repeated headers are joined with ", "
    pub headers: BTreeMap<String, String>,
    pub body: Body,
}

impl Response {
    pub fn text(&self) -> Option<&str> {
        self.body.as_text()
    }
}

// "text/html; charset=utf-8" -> "text/html"
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

fn is_textual(mime: &str) -> bool {
    mime.starts_with("text/")
        || mime.ends_with("+xml")
        || matches!(
            mime,
            "application/xml"
                | "application/json"
                | "application/javascript"
                | "application/xhtml+xml"
        )
}

fn lossy_utf8(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_is_text() {
        let body = Body::decode(Some("text/html; charset=UTF-8"), b"<p>hi</p>".to_vec());
        assert_eq!(body, Body::Text("<p>hi</p>".to_string()));
    }

    #[test]
    fn test_declared_text_may_be_empty() {
        let body = Body::decode(Some("text/html"), Vec::new());
        assert_eq!(body.as_text(), Some(""));
    }

    #[test]
    fn test_image_is_binary() {
        let body = Body::decode(Some("image/png"), vec![0x89, b'P', b'N', b'G']);
        assert!(matches!(body, Body::Binary(_)));
        assert_eq!(body.as_text(), None);
    }

    #[test]
    fn test_xml_variants_are_text() {
        assert!(Body::decode(Some("application/rss+xml"), b"<rss/>".to_vec()).as_text().is_some());
        assert!(Body::decode(Some("application/xhtml+xml"), b"<html/>".to_vec()).as_text().is_some());
    }

    #[test]
    fn test_undeclared_body_is_sniffed() {
        assert_eq!(Body::decode(None, b"plain".to_vec()), Body::Text("plain".to_string()));
        assert!(matches!(Body::decode(None, vec![0xff, 0xfe, 0x00]), Body::Binary(_)));
        assert_eq!(Body::decode(None, Vec::new()), Body::Empty);
    }

    #[test]
    fn test_invalid_utf8_in_declared_text_is_replaced() {
        let body = Body::decode(Some("text/plain"), vec![b'a', 0xff, b'b']);
        assert_eq!(body.as_text(), Some("a\u{fffd}b"));
    }
}
