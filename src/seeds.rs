// src/seeds.rs
// =============================================================================
// Loads the seed list: bare hostnames, one per line.
//
//   example.com
//   # comments and blank lines are ignored
//   docs.rs
//
// Each host becomes a plain-HTTP start URL ("http://example.com/").
// =============================================================================

use std::path::Path;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("could not read seed list {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed host '{host}': {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },

    #[error("seed list {0} contains no hosts")]
    Empty(String),
}

pub fn load_seeds(path: &Path) -> Result<Vec<String>, SeedError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let hosts = parse_seeds(&contents);
    if hosts.is_empty() {
        return Err(SeedError::Empty(path.display().to_string()));
    }

    Ok(hosts)
}

fn parse_seeds(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

// Turns bare hosts into start URLs, keeping their order
pub fn seed_urls(hosts: &[String]) -> Result<Vec<Url>, SeedError> {
    hosts
        .iter()
        .map(|host| {
            Url::parse(&format!("http://{}", host)).map_err(|source| SeedError::InvalidHost {
                host: host.clone(),
                source,
            })
        })
        .collect()
}
