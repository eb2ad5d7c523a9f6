// src/fetch/http.rs
// =============================================================================
// The real transport: fetches pages over HTTP with reqwest.
//
// Key functionality:
// - GET requests with a total timeout and a bounded redirect policy
// - Accepts 2xx, 3xx (unfollowed) and 404; every other status becomes
//   FetchError::Http so the crawl loop can log it
// - Sorts reqwest errors into DNS failures, timeouts and everything else
//
// Rust concepts:
// - async-trait: async fn inside a trait implementation
// - Error source chains: walking error.source() to find the root cause
// =============================================================================

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::time::Duration;
use url::Url;

use super::{Body, FetchError, Fetcher, Response};

const USER_AGENT: &str = concat!("fault-crawler/", env!("CARGO_PKG_VERSION"));

// Fetcher backed by a shared reqwest client
//
// Client is cheap to clone (it's an Arc internally), so one HttpFetcher
// serves every in-flight request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, max_redirects: usize) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(max_redirects))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Response, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status();
        let final_url = response.url().clone();
        let headers = flatten_headers(response.headers());
        let content_type = headers.get("content-type").cloned();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let page = Response {
            url: final_url,
            status: status.as_u16(),
            headers,
            body: Body::decode(content_type.as_deref(), bytes.to_vec()),
        };

        if is_accepted(status) {
            Ok(page)
        } else {
            Err(FetchError::Http {
                response: Box::new(page),
            })
        }
    }
}

// 404 is a normal outcome for this crawler: it manufactures them
fn is_accepted(status: StatusCode) -> bool {
    status.is_success() || status.is_redirection() || status == StatusCode::NOT_FOUND
}

fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat: BTreeMap<String, String> = BTreeMap::new();

    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        flat.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }

    flat
}

// Categorizes reqwest errors
//
// reqwest doesn't expose "this was DNS" directly, so we look through the
// whole source chain. hyper reports resolver failures as "dns error: ...".
fn categorize_error(url: &Url, error: reqwest::Error) -> FetchError {
    let url = url.to_string();

    if error_chain(&error).any(is_dns_failure) {
        FetchError::Dns { url }
    } else if error.is_timeout() || error_chain(&error).any(is_io_timeout) {
        FetchError::Timeout { url }
    } else {
        let description: Vec<String> = error_chain(&error).map(|e| e.to_string()).collect();
        FetchError::Other(description.join(": "))
    }
}

fn error_chain<'a>(
    error: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(error), |&e| e.source())
}

fn is_dns_failure(error: &(dyn StdError + 'static)) -> bool {
    let message = error.to_string().to_lowercase();
    message.contains("dns error")
        || message.contains("failed to lookup address")
        || message.contains("name or service not known")
        || message.contains("no such host")
}

fn is_io_timeout(error: &(dyn StdError + 'static)) -> bool {
    error
        .downcast_ref::<std::io::Error>()
        .map_or(false, |io| io.kind() == std::io::ErrorKind::TimedOut)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is an error source chain?
//    - Errors can wrap other errors: reqwest::Error -> hyper::Error -> io::Error
//    - error.source() returns the wrapped error (or None)
//    - std::iter::successors walks the chain for us
//
// 2. What does downcast_ref do?
//    - Tries to view a `dyn Error` as a concrete type
//    - Returns Some(&io::Error) only if that's what it really is
//
// 3. Why Box<Response> inside FetchError::Http?
//    - Response holds a body and headers, so it's large
//    - Boxing keeps FetchError (and every Result carrying it) small
// -----------------------------------------------------------------------------
