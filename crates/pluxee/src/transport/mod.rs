//! HTTP transport.
//!
//! A [`Transport`] executes one request under a bounded timeout and reports
//! failures to obtain a response as [`TransportError`]. It never looks at
//! status codes or bodies and never retries.

mod endpoints;
mod http;

use std::fmt;

use async_trait::async_trait;

use crate::error::TransportError;

pub(crate) use endpoints::*;
pub use http::HttpTransport;

/// Request method. The provider relationship is read-only; `Post` is used
/// for the login form only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request to the provider.
#[derive(Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// URL-encoded form body.
    pub form: Option<Vec<(String, String)>>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            form: None,
        }
    }

    pub fn post_form(url: impl Into<String>, form: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            form: Some(form),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

// Header values and form values may carry secrets; only names are shown.
impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<&str> = self.headers.iter().map(|(k, _)| k.as_str()).collect();
        let form: Option<Vec<&str>> = self
            .form
            .as_ref()
            .map(|form| form.iter().map(|(k, _)| k.as_str()).collect());
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("form", &form)
            .finish()
    }
}

/// A response from the provider, fully read.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    /// Header names are lowercase.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// All values of a header, case-insensitively.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Executes requests against the provider.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a single request under the transport's timeout.
    async fn execute(&self, request: Request) -> Result<Response, TransportError>;
}
