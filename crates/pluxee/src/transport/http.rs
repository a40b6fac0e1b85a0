//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use tracing::{debug, instrument, trace};

use crate::config::ClientConfig;
use crate::error::TransportError;

use super::{Method, Request, Response, Transport};

/// HTTP transport over reqwest.
///
/// Redirects are not followed: the provider answers an expired session with
/// a redirect to its login page, and that has to reach the caller.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport with the timeout and user agent from `config`.
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(Policy::none())
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            timeout: config.timeout,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.timeout))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.timeout))?
            .to_vec();

        debug!(status, "HTTP response");
        trace!(bytes = body.len(), "response body read");

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
