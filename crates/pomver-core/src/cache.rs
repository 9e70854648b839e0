//! HTTP fetching with an in-memory TTL cache.

use crate::error::{CoreError, Result};
use bytes::Bytes;
use dashmap::DashMap;
use std::time::{Duration, Instant};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct CacheEntry {
    data: Bytes,
    fetched_at: Instant,
}

/// Shared HTTP client with a URL-keyed response cache.
///
/// Successful bodies are kept for the configured TTL so repeated lookups
/// of the same metadata document hit the network once. Error responses
/// are never cached.
pub struct HttpCache {
    client: reqwest::Client,
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl HttpCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns the body for `url`, served from cache when fresh.
    pub async fn get_cached(&self, url: &str) -> Result<Bytes> {
        if let Some(entry) = self.entries.get(url)
            && entry.fetched_at.elapsed() < self.ttl
        {
            tracing::debug!("cache hit for {url}");
            return Ok(entry.data.clone());
        }

        tracing::debug!("fetching {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CoreError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let data = response.bytes().await.map_err(|source| CoreError::Http {
            url: url.to_string(),
            source,
        })?;

        self.entries.insert(
            url.to_string(),
            CacheEntry {
                data: data.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(data)
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HttpCache {
    fn default() -> Self {
        Self::new()
    }
}
