//! Authentication models

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// OAuth bearer token with the moment it was issued and its lifetime.
///
/// A token is valid only while `now < issued_at + ttl`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    issued_at: DateTime<Utc>,
    ttl_secs: u64,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, issued_at: DateTime<Utc>, ttl_secs: u64) -> Self {
        Self {
            token: token.into(),
            issued_at,
            ttl_secs,
        }
    }

    /// The raw bearer string
    pub fn secret(&self) -> &str {
        &self.token
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        i64::try_from(self.ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| self.issued_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Short prefix safe to print in logs
    pub fn masked(&self) -> String {
        mask(&self.token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &self.masked())
            .field("issued_at", &self.issued_at)
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

/// Client-credentials pair, fixed for the life of the process
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Body of a client-credentials token request (JSON flavour of the v2 endpoint)
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<&'a str>,
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    /// Lifetime in seconds
    pub expires_in: u64,

    #[serde(default)]
    pub token_type: Option<String>,
}

/// Keep the first few characters of a secret, hide the rest
pub fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
