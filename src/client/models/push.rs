//! MobilePush message models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::short_id;

/// Message type sent when the caller does not pick one (outbound)
pub const DEFAULT_MESSAGE_TYPE: u32 = 1;

/// Content type sent when the caller does not pick one (alert)
pub const DEFAULT_CONTENT_TYPE: u32 = 1;

/// Target application of a push message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Caller-supplied fields for a new push message
#[derive(Debug, Clone)]
pub struct PushRequest {
    pub title: String,
    pub subtitle: String,
    pub alert: String,
    pub message_type: Option<u32>,
    pub content_type: Option<u32>,
    pub name: Option<String>,
    pub application: Option<Vec<PushApplication>>,
}

impl PushRequest {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        alert: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            alert: alert.into(),
            message_type: None,
            content_type: None,
            name: None,
            application: None,
        }
    }

    /// Build the vendor body, falling back to `default_app` when no target
    /// application was given. Zero counts as "not given" for the numeric
    /// fields.
    pub fn into_body(self, default_app: &PushApplication) -> PushBody {
        PushBody {
            message_type: self
                .message_type
                .filter(|t| *t != 0)
                .unwrap_or(DEFAULT_MESSAGE_TYPE),
            content_type: self
                .content_type
                .filter(|t| *t != 0)
                .unwrap_or(DEFAULT_CONTENT_TYPE),
            name: self
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| format!("mobile capture app-{}", short_id::generate())),
            application: self
                .application
                .filter(|apps| !apps.is_empty())
                .unwrap_or_else(|| vec![default_app.clone()]),
            title: self.title,
            subtitle: self.subtitle,
            alert: self.alert,
        }
    }
}

/// Request body for the push-create endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushBody {
    pub message_type: u32,
    pub content_type: u32,
    pub name: String,
    pub application: Vec<PushApplication>,
    pub title: String,
    pub subtitle: String,
    pub alert: String,
}

/// Push message as returned by the vendor. Only `id` is interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushMessage {
    pub id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> PushApplication {
        PushApplication {
            id: Some("app-1".to_string()),
            name: Some("Demo".to_string()),
        }
    }

    #[test]
    fn test_defaults_applied() {
        let body = PushRequest::new("Hi", "Sub", "Alert").into_body(&app());

        assert_eq!(body.message_type, DEFAULT_MESSAGE_TYPE);
        assert_eq!(body.content_type, DEFAULT_CONTENT_TYPE);
        assert!(body.name.starts_with("mobile capture app-"));
        assert_eq!(body.application, vec![app()]);
        assert_eq!(body.title, "Hi");
    }

    #[test]
    fn test_zero_numeric_fields_use_defaults() {
        let mut req = PushRequest::new("t", "s", "a");
        req.message_type = Some(0);
        req.content_type = Some(0);
        let body = req.into_body(&app());
        assert_eq!(body.message_type, 1);
        assert_eq!(body.content_type, 1);
    }

    #[test]
    fn test_explicit_values_kept() {
        let mut req = PushRequest::new("t", "s", "a");
        req.message_type = Some(3);
        req.content_type = Some(2);
        req.name = Some("promo".to_string());
        req.application = Some(vec![PushApplication {
            id: Some("other".to_string()),
            name: None,
        }]);
        let body = req.into_body(&app());

        assert_eq!(body.message_type, 3);
        assert_eq!(body.content_type, 2);
        assert_eq!(body.name, "promo");
        assert_eq!(body.application[0].id.as_deref(), Some("other"));
    }

    #[test]
    fn test_body_serializes_camel_case() {
        let body = PushRequest::new("t", "s", "a").into_body(&PushApplication {
            id: None,
            name: None,
        });
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["messageType"], 1);
        assert_eq!(json["contentType"], 1);
        assert_eq!(json["application"][0], serde_json::json!({}));
        assert_eq!(json["alert"], "a");
    }

    #[test]
    fn test_push_message_keeps_extra_fields() {
        let msg: PushMessage =
            serde_json::from_str(r#"{"id":"MTA6NzE6MA","name":"promo","status":1}"#).unwrap();
        assert_eq!(msg.id, "MTA6NzE6MA");
        assert_eq!(msg.extra["status"], 1);
    }
}
