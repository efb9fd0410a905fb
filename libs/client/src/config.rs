//! Client configuration

use std::time::Duration;

use reqwest::Url;

use crate::error::{ClientError, ClientResult};

/// Where the API lives and how to authenticate against it
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Origin of the API service, e.g. `http://localhost:3001`
    pub base_url: String,
    /// Prefix the API routes are mounted under
    pub api_prefix: String,
    /// Raw `Cookie` header value sent with every request, e.g. `appSession=<token>`
    pub session_cookie: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_prefix: "/api/v1".to_string(),
            session_cookie: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_prefix(mut self, api_prefix: impl Into<String>) -> Self {
        self.api_prefix = api_prefix.into();
        self
    }

    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL of an API route
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix.trim_end_matches('/'),
            path
        )
    }

    /// Absolute URL of an API route followed by one percent-encoded path segment
    pub fn endpoint_with_segment(&self, path: &str, segment: &str) -> ClientResult<Url> {
        let mut url = Url::parse(&self.endpoint(path))
            .map_err(|e| ClientError::Config(format!("Invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Config(format!("API URL cannot carry a path: {}", self.base_url))
            })?
            .push(segment);
        Ok(url)
    }
}
