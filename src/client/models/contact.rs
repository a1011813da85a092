//! Contact models

use serde::Serialize;

use crate::client::short_id;

/// Attribute set that carries the email address on a new contact
pub const EMAIL_ATTRIBUTE_SET: &str = "Email Addresses";

/// Fields a caller may supply when creating a contact. Anything left out
/// is generated.
#[derive(Debug, Clone, Default)]
pub struct ContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// A contact with every field filled in, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub contact_key: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ContactRequest {
    /// Fill defaults and mint a fresh contact key.
    pub fn resolve(self) -> NewContact {
        NewContact {
            contact_key: format!("key-{}", short_id::generate()),
            first_name: non_empty(self.first_name)
                .unwrap_or_else(|| format!("firstName-{}", short_id::generate())),
            last_name: non_empty(self.last_name)
                .unwrap_or_else(|| format!("lastName-{}", short_id::generate())),
            email: non_empty(self.email)
                .unwrap_or_else(|| format!("email-{}@example.com", short_id::generate())),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBody<'a> {
    pub contact_key: &'a str,
    pub attribute_sets: Vec<AttributeSet<'a>>,
}

#[derive(Debug, Serialize)]
pub struct AttributeSet<'a> {
    pub name: &'a str,
    pub items: Vec<AttributeItem<'a>>,
}

#[derive(Debug, Serialize)]
pub struct AttributeItem<'a> {
    pub values: Vec<AttributeValue<'a>>,
}

#[derive(Debug, Serialize)]
pub struct AttributeValue<'a> {
    pub name: &'a str,
    pub value: serde_json::Value,
}

impl NewContact {
    /// Request body for the contacts endpoint
    pub fn body(&self) -> ContactBody<'_> {
        ContactBody {
            contact_key: &self.contact_key,
            attribute_sets: vec![AttributeSet {
                name: EMAIL_ATTRIBUTE_SET,
                items: vec![AttributeItem {
                    values: vec![
                        AttributeValue {
                            name: "Email Address",
                            value: self.email.clone().into(),
                        },
                        AttributeValue {
                            name: "HTML Enabled",
                            value: true.into(),
                        },
                    ],
                }],
            }],
        }
    }
}
