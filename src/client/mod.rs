//! Marketing Cloud API client

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod marketing_cloud;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod oauth;
pub mod parallel;
pub mod rate_limit;
pub mod rest;
pub mod short_id;
pub mod token;

pub use marketing_cloud::MarketingCloudClient;
pub use models::{ContactRequest, PushMessage, PushRequest};
pub use parallel::run_bounded;

/// Operations exposed to callers. Each one authenticates on demand.
#[async_trait]
pub trait MarketingCloudApi: Send + Sync {
    /// Acquire (or reuse) an access token and return it
    async fn test_connection(&self) -> Result<String>;

    /// Create a contact, generating any field left empty
    async fn create_contact(&self, request: ContactRequest) -> Result<bool>;

    /// Number of contacts in the account.
    ///
    /// Currently returns a fixed placeholder; see
    /// [`marketing_cloud::CONTACT_COUNT_PLACEHOLDER`].
    async fn contact_count(&self) -> Result<u64>;

    /// Create a push message and return the vendor's record of it
    async fn create_push(&self, request: PushRequest) -> Result<PushMessage>;

    /// Send a previously created push message to its devices
    async fn send_push(&self, message_id: &str) -> Result<Value>;
}
