// SPDX-License-Identifier: GPL-3.0-only

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::COOKIE;

use super::{RawResponse, Session, Transport};
use crate::config::ClientConfig;
use crate::error::Result;

/// [`Transport`] over a blocking reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;
        Ok(Self { client })
    }

    fn with_session(request: RequestBuilder, session: &Session) -> RequestBuilder {
        match session.cookie_header() {
            Some(header) => request.header(COOKIE, header),
            None => request,
        }
    }

    fn read(response: Response) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let cookies = response
            .cookies()
            .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
            .collect();
        let body = response.text()?;

        Ok(RawResponse {
            status,
            body,
            cookies,
        })
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, form: &[(&str, &str)], session: &Session) -> Result<RawResponse> {
        let request = Self::with_session(self.client.post(url).form(form), session);
        Self::read(request.send()?)
    }

    fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<RawResponse> {
        Self::read(self.client.post(url).json(body).send()?)
    }

    fn get(&self, url: &str, params: &[(&str, &str)], session: &Session) -> Result<RawResponse> {
        let request = Self::with_session(self.client.get(url).query(params), session);
        Self::read(request.send()?)
    }
}
