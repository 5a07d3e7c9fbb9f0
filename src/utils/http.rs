// src/utils/http.rs

//! HTTP transport.
//!
//! The harvester only ever needs "GET this URL with these query parameters
//! and hand me the body". `Transport` captures exactly that so the pipeline
//! can run against canned responses in tests.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Blocking GET capability.
pub trait Transport: Send + Sync {
    /// Fetch `url` with `params` appended as the query string.
    ///
    /// Non-success statuses are reported as [`AppError::Fetch`].
    fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Vec<u8>>;
}

/// Create a configured blocking HTTP client carrying the session cookie.
pub fn create_client(config: &HttpConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = cookie_header(&config.cookie) {
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::config(format!("invalid cookie header: {e}")))?;
        headers.insert(COOKIE, value);
    }

    Ok(Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .default_headers(headers)
        .build()?)
}

/// Normalize raw `name=value; name2=value2` material into a `Cookie` header.
///
/// Pairs without `=` or with an empty name are dropped.
pub fn cookie_header(raw: &str) -> Option<String> {
    let pairs: Vec<String> = raw
        .split(';')
        .filter_map(|item| {
            let (name, value) = item.trim().split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(format!("{}={}", name, value.trim()))
        })
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

/// `reqwest` backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
        })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .map_err(|e| AppError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(url, format!("HTTP status {status}")));
        }

        let bytes = response.bytes().map_err(|e| AppError::fetch(url, e))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_normalizes_pairs() {
        assert_eq!(
            cookie_header(" bid=abc ; dbcl2=\"1:x\"; ck=y=z"),
            Some("bid=abc; dbcl2=\"1:x\"; ck=y=z".to_string())
        );
    }

    #[test]
    fn test_cookie_header_drops_malformed() {
        assert_eq!(cookie_header("garbage; =v; a=1"), Some("a=1".to_string()));
        assert_eq!(cookie_header(""), None);
        assert_eq!(cookie_header("cookie"), None);
    }

    #[test]
    fn test_create_client_with_cookie() {
        let config = HttpConfig {
            cookie: "bid=abc".to_string(),
            ..HttpConfig::default()
        };
        assert!(create_client(&config).is_ok());
    }
}
