//! Request gateway for the Giphy REST API
//!
//! Every tool funnels its upstream call through [`RequestGateway::fetch`]:
//! rate-limit wait, credential injection, HTTP GET, status check, JSON parse.
//! There are no retries and no caching; the body is returned unvalidated.

use crate::config::{ApiKeySource, GiphyConfig};
use crate::error::{GatewayError, GatewayResult};
use crate::rate_limiter::RateLimiter;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn, Instrument};
use url::Url;

/// Query key carrying the credential
pub const API_KEY_PARAM: &str = "api_key";

/// The five upstream endpoints, relative to `/v1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GifsSearch,
    GifsTrending,
    GifsRandom,
    StickersSearch,
    GifsTranslate,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::GifsSearch => "/gifs/search",
            Endpoint::GifsTrending => "/gifs/trending",
            Endpoint::GifsRandom => "/gifs/random",
            Endpoint::StickersSearch => "/stickers/search",
            Endpoint::GifsTranslate => "/gifs/translate",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Ordered query parameters for one upstream call
pub type Query = Vec<(&'static str, String)>;

/// Shared HTTP front for all tools
pub struct RequestGateway {
    client: reqwest::Client,
    base_url: Url,
    api_key: ApiKeySource,
    limiter: Arc<RateLimiter>,
}

impl RequestGateway {
    /// Build a gateway with its own rate limiter
    pub fn new(config: &GiphyConfig) -> GatewayResult<Self> {
        let limiter = Arc::new(RateLimiter::new(config.min_interval));
        Self::with_limiter(config, limiter)
    }

    /// Build a gateway around an existing limiter
    pub fn with_limiter(config: &GiphyConfig, limiter: Arc<RateLimiter>) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GatewayError::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            limiter,
        })
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Build the full request URL (pure function)
    ///
    /// Caller parameters keep their order; the credential goes last.
    pub fn build_url(
        base_url: &Url,
        endpoint: Endpoint,
        query: &[(&'static str, String)],
        api_key: &str,
    ) -> Url {
        let mut url = base_url.clone();
        let prefix = base_url.path().trim_end_matches('/');
        url.set_path(&format!("{prefix}/v1{}", endpoint.path()));
        url.set_query(None);

        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            pairs.append_pair(API_KEY_PARAM, api_key);
        }

        url
    }

    /// Fetch one upstream endpoint and return the parsed JSON body
    pub async fn fetch(&self, endpoint: Endpoint, query: Query) -> GatewayResult<Value> {
        let span = crate::upstream_span!(endpoint = %endpoint);
        async move {
            self.limiter.wait().await;

            let api_key = self.api_key.resolve()?;
            let url = Self::build_url(&self.base_url, endpoint, &query, &api_key);

            debug!(params = query.len(), "Sending upstream request");

            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| GatewayError::transport(e.without_url().to_string()))?;

            let status = response.status();
            if !status.is_success() {
                warn!(status = status.as_u16(), "Upstream returned error status");
                return Err(GatewayError::upstream(status.as_u16()));
            }

            let body: Value = response
                .json()
                .await
                .map_err(|e| GatewayError::decode(e.without_url().to_string()))?;

            debug!(status = status.as_u16(), "Upstream request completed");
            Ok(body)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.giphy.com").unwrap()
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::GifsSearch.path(), "/gifs/search");
        assert_eq!(Endpoint::GifsTrending.path(), "/gifs/trending");
        assert_eq!(Endpoint::GifsRandom.path(), "/gifs/random");
        assert_eq!(Endpoint::StickersSearch.path(), "/stickers/search");
        assert_eq!(Endpoint::GifsTranslate.path(), "/gifs/translate");
    }

    #[test]
    fn test_build_url_appends_api_key_last() {
        let query = vec![
            ("q", "cat".to_string()),
            ("limit", "2".to_string()),
            ("rating", "g".to_string()),
        ];
        let url = RequestGateway::build_url(&base(), Endpoint::GifsSearch, &query, "k");

        assert_eq!(
            url.as_str(),
            "https://api.giphy.com/v1/gifs/search?q=cat&limit=2&rating=g&api_key=k"
        );
    }

    #[test]
    fn test_build_url_encodes_values() {
        let query = vec![("s", "good morning & hi".to_string())];
        let url = RequestGateway::build_url(&base(), Endpoint::GifsTranslate, &query, "k");

        assert_eq!(
            url.as_str(),
            "https://api.giphy.com/v1/gifs/translate?s=good+morning+%26+hi&api_key=k"
        );
        let pairs: Vec<_> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("s".to_string(), "good morning & hi".to_string()));
    }

    #[test]
    fn test_build_url_with_empty_query() {
        let url = RequestGateway::build_url(&base(), Endpoint::GifsRandom, &[], "k");
        assert_eq!(url.as_str(), "https://api.giphy.com/v1/gifs/random?api_key=k");
    }

    #[test]
    fn test_build_url_keeps_base_path_prefix() {
        let base = Url::parse("http://127.0.0.1:9000/proxy/").unwrap();
        let url = RequestGateway::build_url(&base, Endpoint::StickersSearch, &[], "k");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/proxy/v1/stickers/search?api_key=k"
        );
    }

    #[tokio::test]
    async fn test_gateway_shares_injected_limiter() {
        let limiter = Arc::new(RateLimiter::default());
        let gateway =
            RequestGateway::with_limiter(&GiphyConfig::default(), limiter.clone()).unwrap();
        assert!(Arc::ptr_eq(gateway.limiter(), &limiter));
    }
}
