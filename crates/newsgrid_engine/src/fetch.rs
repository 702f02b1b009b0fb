use std::fmt;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use url::Url;

use crate::decode::decode_search_body;
use crate::{FailureKind, FetchError, SearchResponse};

pub const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/everything";

#[derive(Clone)]
pub struct FetchSettings {
    /// Full search URL; `q` and `apiKey` are appended as query parameters.
    pub endpoint: String,
    pub api_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl FetchSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 8 * 1024 * 1024,
        }
    }
}

// The key must never reach the log file.
impl fmt::Debug for FetchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("redirect_limit", &self.redirect_limit)
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}

/// Build `endpoint?q=<query>&apiKey=<key>` with both values url-encoded.
pub fn build_search_url(endpoint: &str, query: &str, api_key: &str) -> Result<Url, FetchError> {
    let mut url = Url::parse(endpoint)
        .map_err(|err| FetchError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(FetchError::new(
            FailureKind::InvalidEndpoint,
            format!("not a hierarchical url: {endpoint}"),
        ));
    }
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("apiKey", api_key);
    Ok(url)
}

#[async_trait::async_trait]
pub trait NewsClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestNewsClient {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestNewsClient {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        // Fail on a bad endpoint at construction rather than on the first keystroke.
        build_search_url(&settings.endpoint, "", "")?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl NewsClient for ReqwestNewsClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, FetchError> {
        let url = build_search_url(&self.settings.endpoint, query, &self.settings.api_key)?;
        engine_debug!(
            "GET {}{} query_len={}",
            url.host_str().unwrap_or_default(),
            url.path(),
            query.len()
        );

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let parsed = decode_search_body(&bytes)?;
        engine_info!(
            "Search finished status={} bytes={} articles={}",
            status.as_u16(),
            bytes.len(),
            parsed.articles.len()
        );
        Ok(parsed)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    // reqwest includes the request url in its messages; strip it so the key stays out of logs.
    let err = err.without_url();
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_query_and_key() {
        let url = build_search_url(DEFAULT_ENDPOINT, "rust & c++", "k/y").unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(url.path(), "/v2/everything");
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "rust & c++".to_string()),
                ("apiKey".to_string(), "k/y".to_string()),
            ]
        );
        assert!(!url.as_str().contains("rust & c++"));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = build_search_url("not a url", "q", "k").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidEndpoint);

        let err = build_search_url("mailto:news@example.com", "q", "k").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidEndpoint);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let settings = FetchSettings::new("super-secret");
        let rendered = format!("{settings:?}");

        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
