//! Cached access-token provider
//!
//! Tokens are checked lazily on every request; there is no background
//! refresh. The cache slot is guarded by an async mutex that stays held for
//! the whole check-and-fetch, so callers that arrive while a refresh is in
//! flight wait for it and then reuse its token instead of starting their own.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use log::debug;
use tokio::sync::Mutex;

use super::models::AccessToken;
use crate::error::Result;

/// Something that can mint a fresh access token.
///
/// Implementations must report failures as `ApiError::Auth`.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token(&self) -> Result<AccessToken>;
}

/// Process-wide holder of the current access token
pub struct TokenProvider {
    source: Arc<dyn TokenSource>,
    slot: Mutex<Option<AccessToken>>,
    fetches: AtomicUsize,
}

impl TokenProvider {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source,
            slot: Mutex::new(None),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Return a currently valid token, fetching one if the cache is empty
    /// or expired.
    pub async fn access_token(&self) -> Result<AccessToken> {
        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.as_ref() {
            if token.is_valid() {
                debug!("Token cache hit (expires {})", token.expires_at());
                return Ok(token.clone());
            }
            debug!("Cached token expired at {}", token.expires_at());
        }

        // An expired token must never be handed out again, even if the
        // fetch below fails.
        *slot = None;

        self.fetches.fetch_add(1, Ordering::SeqCst);
        debug!("Requesting new access token");
        let token = self.source.fetch_token().await?;
        debug!(
            "Cached new token {} valid for {}s",
            token.masked(),
            token.ttl_secs()
        );

        *slot = Some(token.clone());
        Ok(token)
    }

    /// Drop the cached token so the next call fetches a new one
    #[allow(dead_code)]
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }

    /// Number of token fetches attempted so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}
