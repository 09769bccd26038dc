use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, COOKIE, HeaderMap, HeaderValue, REFERER, RETRY_AFTER,
};

use super::error::FetchError;
use super::user_agent::random_user_agent;
use crate::config::RequestConfig;

/// Cookies the site checks before serving profile pages instead of the age gate
const AGE_GATE_COOKIE: &str = "agreeterms=1; age_verified=1; sbr=sec:xview.tv; has_signing_key=1";

const REFERER_URL: &str = "https://secure.xview.tv/";

const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Upper bound for establishing a connection, never above the total timeout
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A successful (2xx) response, fully read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBody {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchedBody {
    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Anything that can GET a URL from the site
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedBody, FetchError>;
}

/// reqwest-backed fetcher built from a [`RequestConfig`]
///
/// - **Proxy**: every request goes through `proxy_address` when set,
///   otherwise connections are direct (environment proxies are ignored)
/// - **Timeout**: `timeout_seconds` bounds the whole request including the body
/// - **Headers**: random Chrome Windows User-Agent plus the age-gate cookie
/// - **No retries**: each call is exactly one request
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &RequestConfig) -> Result<Self, FetchError> {
        let timeout = config.timeout();

        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
            .pool_idle_timeout(Duration::from_secs(90))
            .default_headers(default_headers())
            .user_agent(random_user_agent());

        builder = match config.proxy() {
            Some(proxy) => {
                let proxy = reqwest::Proxy::all(proxy).map_err(|e| {
                    FetchError::network(proxy, format!("invalid proxy: {}", e))
                })?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let client = builder
            .build()
            .map_err(|e| FetchError::network(REFERER_URL, format!("failed to build client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchedBody, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status().as_u16();
        if let Some(err) = FetchError::from_status(url, status, retry_after(response.headers())) {
            tracing::debug!(status, "Site returned an error status");
            return Err(err);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        tracing::debug!(status, bytes = body.len(), "Fetched");

        Ok(FetchedBody {
            status,
            body: body.to_vec(),
        })
    }
}

/// One-shot GET with a fetcher built for `config`.
pub async fn fetch(url: &str, config: &RequestConfig) -> Result<FetchedBody, FetchError> {
    HttpFetcher::new(config)?.fetch(url).await
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers.insert(REFERER, HeaderValue::from_static(REFERER_URL));
    headers.insert(COOKIE, HeaderValue::from_static(AGE_GATE_COOKIE));
    headers
}

/// `Retry-After` in its delay-seconds form; HTTP dates are ignored.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
