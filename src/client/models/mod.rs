//! Marketing Cloud request and response models

pub mod auth;
pub mod contact;
pub mod push;

pub use auth::{AccessToken, Credentials, TokenRequest, TokenResponse};
pub use contact::ContactRequest;
pub use push::{PushApplication, PushMessage, PushRequest};
