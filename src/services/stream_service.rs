//! Lookups against the source site.

use std::sync::Arc;

use reqwest::Url;

use crate::config::{RequestConfig, Settings, SiteConfig};
use crate::error::{AppError, AppResult};
use crate::external::xview::{self, StreamIdentifier, StreamInfo};
use crate::external::{Fetch, FetchError, HttpFetcher, RetryPolicy};
use crate::thumbnail::{self, ProcessedThumbnail};

/// Fetches, parses and post-processes profile data.
///
/// Cloning is cheap; the fetcher is shared behind an `Arc`.
#[derive(Clone)]
pub struct StreamService {
    fetcher: Arc<dyn Fetch>,
    site: SiteConfig,
    request: RequestConfig,
    retry: RetryPolicy,
}

impl StreamService {
    pub fn new(fetcher: Arc<dyn Fetch>, settings: &Settings) -> Self {
        Self {
            fetcher,
            site: settings.site.clone(),
            request: settings.request.clone(),
            retry: RetryPolicy::from(&settings.retry),
        }
    }

    /// Service backed by a real HTTP client built from `settings.request`.
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let fetcher = HttpFetcher::new(&settings.request)?;
        Ok(Self::new(Arc::new(fetcher), settings))
    }

    pub fn request_config(&self) -> &RequestConfig {
        &self.request
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let body = self.retry.run(|| self.fetcher.fetch(url)).await?;
        Ok(body.text().into_owned())
    }

    /// Fetch and parse the profile page of `identifier`.
    #[tracing::instrument(skip(self, identifier), fields(identifier = %identifier))]
    pub async fn lookup(&self, identifier: &StreamIdentifier) -> AppResult<StreamInfo> {
        let url = self.site.profile_url(identifier.as_str());
        let body = self.fetch_page(&url).await?;
        let info = xview::parse_profile(identifier, &body)?;

        tracing::info!(
            status = %info.live_status,
            links = info.playback_links.len(),
            has_thumbnail = info.thumbnail_url.is_some(),
            "Profile looked up"
        );
        Ok(info)
    }

    /// Download and blur the thumbnail of `info`, if it has one.
    pub async fn thumbnail(&self, info: &StreamInfo) -> AppResult<Option<ProcessedThumbnail>> {
        let Some(url) = info.thumbnail_url.as_deref() else {
            return Ok(None);
        };

        let processed = thumbnail::process(self.fetcher.as_ref(), url, &self.request).await?;
        Ok(Some(processed))
    }

    /// Candidate listing URLs for `query`, in the order they are tried
    pub fn search_urls(&self, query: &str) -> Vec<Url> {
        let Ok(base) = Url::parse(&self.site.base_url) else {
            return Vec::new();
        };

        let mut keywords = base.clone();
        keywords
            .query_pairs_mut()
            .append_pair("keywords", query)
            .append_pair("page", "1");

        let mut urls = vec![keywords];

        for section in ["search", "tag"] {
            let mut url = base.clone();
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().extend([section, query, ""]);
            }
            url.query_pairs_mut().append_pair("page", "1");
            urls.push(url);
        }

        let mut api = base;
        if let Ok(mut segments) = api.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "public", "cams", ""]);
        }
        api.query_pairs_mut()
            .append_pair("keywords", query)
            .append_pair("page", "1");
        urls.push(api);

        urls
    }

    /// Search rooms by keyword.
    ///
    /// Listing URLs are tried in turn until one yields identifiers. Failing
    /// candidates are skipped, so the result may be empty. Only when every
    /// candidate failed to fetch and one of them was rate limited is the rate
    /// limit returned as an error.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> AppResult<Vec<StreamIdentifier>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("keyword", "must not be empty"));
        }

        let mut any_fetched = false;
        let mut rate_limited = None;

        for url in self.search_urls(query) {
            let body = match self.fetch_page(url.as_str()).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Search candidate failed");
                    if matches!(e, FetchError::RateLimited { .. }) {
                        rate_limited = Some(e);
                    }
                    continue;
                }
            };
            any_fetched = true;

            match xview::parse_search(&body) {
                Ok(ids) if !ids.is_empty() => {
                    tracing::info!(url = %url, results = ids.len(), "Search results found");
                    return Ok(ids);
                }
                Ok(_) => tracing::debug!(url = %url, "No results on candidate"),
                Err(e) => tracing::debug!(url = %url, error = %e, "Unusable search page"),
            }
        }

        match rate_limited {
            Some(e) if !any_fetched => Err(e.into()),
            _ => Ok(Vec::new()),
        }
    }
}
