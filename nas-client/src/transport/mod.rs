// SPDX-License-Identifier: GPL-3.0-only

//! Request/response boundary between the endpoint client and the network
//!
//! The client only ever sees [`RawResponse`]; status interpretation lives in
//! [`crate::client`], so any [`Transport`] (HTTP or a scripted fake) behaves
//! the same from the caller's side.

mod http;
mod session;

pub use http::HttpTransport;
pub use session::Session;

use crate::error::Result;

/// Response as received, before any status or body interpretation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    /// `Set-Cookie` pairs, in the order sent
    pub cookies: Vec<(String, String)>,
}

impl RawResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            cookies: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One blocking request per call; no retries
pub trait Transport {
    /// Form-encoded POST carrying the session cookies
    fn post_form(&self, url: &str, form: &[(&str, &str)], session: &Session) -> Result<RawResponse>;

    /// JSON POST without cookies, used for the authentication handshake
    fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<RawResponse>;

    /// GET with query parameters carrying the session cookies
    fn get(&self, url: &str, params: &[(&str, &str)], session: &Session) -> Result<RawResponse>;
}
