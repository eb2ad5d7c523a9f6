// src/fetch/error.rs
// =============================================================================
// Fetch failures and how the crawler classifies them.
//
// FetchError is what the transport returns when a request did not produce a
// usable response. FailureKind is the coarse bucket the crawl loop logs:
//
//   Dns      -> DnsLookupFailed    (logged with the request URL)
//   Timeout  -> ConnectionTimedOut (logged with the request URL)
//   Http     -> HttpProtocolError  (logged with the response URL)
//   Other    -> Other              (logged with the raw description)
// =============================================================================

use std::fmt;
use thiserror::Error;

use super::Response;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("DNS lookup failed for {url}")]
    Dns { url: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The server answered, but with a status the crawler does not accept
    #[error("HTTP {} on {}", .response.status, .response.url)]
    Http { response: Box<Response> },

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureKind {
    DnsLookupFailed,
    ConnectionTimedOut,
    HttpProtocolError,
    Other,
}

impl FailureKind {
    pub const ALL: [FailureKind; 4] = [
        FailureKind::DnsLookupFailed,
        FailureKind::ConnectionTimedOut,
        FailureKind::HttpProtocolError,
        FailureKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::DnsLookupFailed => "DnsLookupFailed",
            FailureKind::ConnectionTimedOut => "ConnectionTimedOut",
            FailureKind::HttpProtocolError => "HttpProtocolError",
            FailureKind::Other => "Other",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Dns { .. } => FailureKind::DnsLookupFailed,
            FetchError::Timeout { .. } => FailureKind::ConnectionTimedOut,
            FetchError::Http { .. } => FailureKind::HttpProtocolError,
            FetchError::Other(_) => FailureKind::Other,
        }
    }

    // What to print after "<kind> on ..."
    //
    // `request_url` is used when the failure itself doesn't carry a better
    // target.
    pub fn target(&self, request_url: &str) -> String {
        match self {
            FetchError::Dns { .. } | FetchError::Timeout { .. } => request_url.to_string(),
            FetchError::Http { response } => response.url.to_string(),
            FetchError::Other(description) => description.clone(),
        }
    }
}
