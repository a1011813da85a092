//! Authenticated JSON POST against Marketing Cloud REST endpoints

use log::debug;
use reqwest::Client as HttpClient;
use serde::Serialize;
use serde_json::Value;

use super::models::AccessToken;
use crate::error::{ApiError, Result};

/// POST `body` as JSON to `url` with a bearer token.
///
/// One attempt only. Any non-2xx status or transport failure becomes
/// `ApiError::Http`. The status alone decides success: an empty body comes
/// back as `Value::Null` and a non-JSON body as `Value::String`.
pub async fn post_json<B>(
    http: &HttpClient,
    url: &str,
    body: &B,
    token: &AccessToken,
) -> Result<Value>
where
    B: Serialize + ?Sized,
{
    debug!("POST {}", url);

    let response = http
        .post(url)
        .bearer_auth(token.secret())
        .json(body)
        .send()
        .await
        .map_err(ApiError::from)?;

    let status = response.status();
    let response_text = response.text().await.map_err(ApiError::from)?;
    debug!("POST {} -> {}", url, status);

    if !status.is_success() {
        return Err(ApiError::Http {
            status: Some(status.as_u16()),
            body: response_text,
        }
        .into());
    }

    if response_text.trim().is_empty() {
        return Ok(Value::Null);
    }

    match serde_json::from_str(&response_text) {
        Ok(value) => Ok(value),
        Err(e) => {
            debug!("POST {} returned a non-JSON body ({}), keeping it as text", url, e);
            Ok(Value::String(response_text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::Utc;
    use mockito::Matcher;
    use serde_json::json;

    fn token() -> AccessToken {
        AccessToken::new("tok-abc", Utc::now(), 60)
    }

    #[tokio::test]
    async fn test_sends_bearer_and_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/things")
            .match_header("authorization", "Bearer tok-abc")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "a": 1 })))
            .with_status(201)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let url = format!("{}/things", server.url());
        let value = post_json(&HttpClient::new(), &url, &json!({ "a": 1 }), &token())
            .await
            .unwrap();

        assert_eq!(value["ok"], true);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/things")
            .with_status(202)
            .create_async()
            .await;

        let url = format!("{}/things", server.url());
        let value = post_json(&HttpClient::new(), &url, &json!({}), &token())
            .await
            .unwrap();
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn test_non_2xx_is_http_error_with_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/things")
            .with_status(400)
            .with_body(r#"{"message":"bad"}"#)
            .expect(1)
            .create_async()
            .await;

        let url = format!("{}/things", server.url());
        let err = post_json(&HttpClient::new(), &url, &json!({}), &token())
            .await
            .unwrap_err();

        match err {
            Error::Api(ApiError::Http { status, body }) => {
                assert_eq!(status, Some(400));
                assert!(body.contains("bad"));
            }
            other => panic!("Expected http error, got {other:?}"),
        }
        // single attempt, no retry
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_transport_failure_is_http_error() {
        let err = post_json(
            &HttpClient::new(),
            "http://127.0.0.1:1/things",
            &json!({}),
            &token(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Api(ApiError::Http { status: None, .. })
        ));
    }

    #[tokio::test]
    async fn test_plain_text_success_body_is_kept_as_string() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/things")
            .with_status(201)
            .with_body("Created")
            .create_async()
            .await;

        let url = format!("{}/things", server.url());
        let value = post_json(&HttpClient::new(), &url, &json!({}), &token())
            .await
            .unwrap();
        assert_eq!(value, Value::String("Created".to_string()));
    }
}
