//! Service layer for lookups against the source site.
//!
//! Services own the fetcher and configuration and are shared by the command
//! handlers.

mod stream_service;

pub use stream_service::StreamService;

use crate::config::Settings;
use crate::error::AppResult;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since the underlying HTTP client is shared.
#[derive(Clone)]
pub struct Services {
    pub streams: StreamService,
}

impl Services {
    pub fn new(settings: &Settings) -> AppResult<Self> {
        Ok(Self {
            streams: StreamService::from_settings(settings)?,
        })
    }
}
