use std::collections::HashMap;
use std::time::Duration;
use std::time::Instant;

use jsonwebtoken::jwk::JwkSet;
use reqwest::Client;
use tokio::sync::RwLock;

use crate::error::fetch_jwks_error;
use crate::error::Result;

#[derive(Clone)]
struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

/// Key sets fetched from JWKS endpoints, kept for a fixed TTL per URL
pub(crate) struct JwksCache {
    entries: RwLock<HashMap<String, CachedKeys>>,
    ttl: Duration,
    min_refresh_interval: Duration,
    client: Client,
}

impl JwksCache {
    pub(crate) fn new(ttl: Duration, min_refresh_interval: Duration, client: Client) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            min_refresh_interval,
            client,
        }
    }

    /// Key set served at `url`, fetched when absent or stale.
    ///
    /// A fresh set lacking `kid` is fetched again, but no sooner than
    /// `min_refresh_interval` after the previous fetch. Until then the cached
    /// set is returned as is and the key lookup fails.
    pub(crate) async fn get_jwks(&self, url: &str, kid: &str) -> Result<JwkSet> {
        match self.cached(url).await {
            Some(entry) if entry.keys.find(kid).is_some() => return Ok(entry.keys),
            Some(entry) if entry.fetched_at.elapsed() < self.min_refresh_interval => {
                tracing::debug!("Key '{kid}' not in JWKS from {url}, too early to refresh");
                return Ok(entry.keys);
            }
            Some(_) => tracing::debug!("Key '{kid}' not in cached JWKS from {url}, refreshing"),
            None => {}
        }

        let keys = self.fetch(url).await?;

        self.entries.write().await.insert(
            url.to_string(),
            CachedKeys {
                keys: keys.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(keys)
    }

    async fn cached(&self, url: &str) -> Option<CachedKeys> {
        let entries = self.entries.read().await;

        entries
            .get(url)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .cloned()
    }

    async fn fetch(&self, url: &str) -> Result<JwkSet> {
        tracing::debug!("Fetching JWKS from {url}");

        self.client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(fetch_jwks_error)?
            .json::<JwkSet>()
            .await
            .map_err(fetch_jwks_error)
    }
}
