//! Mock token source for testing
//!
//! Mints numbered tokens without touching the network and counts how often
//! it was asked.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use super::models::AccessToken;
use super::token::TokenSource;
use crate::error::{ApiError, Result};

pub struct MockTokenSource {
    ttl_secs: u64,
    delay: Option<Duration>,
    calls: AtomicUsize,
    fail_next: AtomicBool,
}

impl MockTokenSource {
    /// Tokens minted by this source live for `ttl_secs`.
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl_secs,
            delay: None,
            calls: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Simulate a slow auth endpoint.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make the next fetch fail with an auth error. Consumed on first use.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenSource for MockTokenSource {
    async fn fetch_token(&self) -> Result<AccessToken> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ApiError::Auth {
                status: Some(401),
                message: "invalid_client".to_string(),
            }
            .into());
        }

        Ok(AccessToken::new(
            format!("mock-token-{n}"),
            Utc::now(),
            self.ttl_secs,
        ))
    }
}
