//! OAuth2 client-credentials token source for Marketing Cloud

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::Client as HttpClient;

use super::models::{AccessToken, Credentials, TokenRequest, TokenResponse};
use super::token::TokenSource;
use crate::error::{ApiError, Result};

const GRANT_TYPE: &str = "client_credentials";

/// Exchanges client credentials for an access token at the auth endpoint
pub struct OAuthTokenSource {
    http: HttpClient,
    auth_url: String,
    credentials: Credentials,
    account_id: Option<String>,
}

impl OAuthTokenSource {
    pub fn new(
        http: HttpClient,
        auth_url: impl Into<String>,
        credentials: Credentials,
        account_id: Option<String>,
    ) -> Self {
        Self {
            http,
            auth_url: auth_url.into(),
            credentials,
            account_id,
        }
    }
}

#[async_trait]
impl TokenSource for OAuthTokenSource {
    async fn fetch_token(&self) -> Result<AccessToken> {
        let body = TokenRequest {
            grant_type: GRANT_TYPE,
            client_id: self.credentials.client_id(),
            client_secret: self.credentials.client_secret(),
            account_id: self.account_id.as_deref(),
        };

        debug!(
            "POST {} (client_id={})",
            self.auth_url,
            self.credentials.client_id()
        );

        // Stamp before sending so the cached lifetime never overshoots the
        // server's.
        let issued_at = Utc::now();
        let response = self
            .http
            .post(&self.auth_url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::auth)?;

        let status = response.status();
        let response_text = response.text().await.map_err(ApiError::auth)?;

        if !status.is_success() {
            return Err(ApiError::Auth {
                status: Some(status.as_u16()),
                message: response_text,
            }
            .into());
        }

        let parsed: TokenResponse = serde_json::from_str(&response_text).map_err(|e| {
            ApiError::Auth {
                status: Some(status.as_u16()),
                message: format!("Failed to parse token response: {}", e),
            }
        })?;

        if let Some(ref token_type) = parsed.token_type
            && !token_type.eq_ignore_ascii_case("bearer")
        {
            return Err(ApiError::Auth {
                status: Some(status.as_u16()),
                message: format!("Unsupported token type: {}", token_type),
            }
            .into());
        }

        Ok(AccessToken::new(
            parsed.access_token,
            issued_at,
            parsed.expires_in,
        ))
    }
}
