//! Provider request/response shapes.
//!
//! This is the only place that knows how the provider's login and balance
//! endpoints look on the wire.

use std::time::Duration;

use serde::Deserialize;

use crate::auth::{Credentials, SessionCredential, SessionToken};
use crate::error::{AuthError, ClientError};

use super::{Request, Response};

/// Body of a successful token login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(default, alias = "accessToken", alias = "access_token")]
    token: Option<String>,
    #[serde(default, alias = "expires_in")]
    expires_in: Option<u64>,
}

/// Session material extracted from a login response.
#[derive(Debug)]
pub(crate) struct SessionGrant {
    pub credential: SessionCredential,
    /// Lifetime stated by the provider, if any.
    pub expires_in: Option<Duration>,
}

/// Outcome of a balance request that reached the provider.
#[derive(Debug)]
pub(crate) enum BalanceReply {
    /// 2xx; body still to be parsed.
    Body(Vec<u8>),
    /// The provider no longer accepts the session.
    SessionRejected,
}

pub(crate) fn login_request(url: &str, credentials: &Credentials) -> Request {
    Request::post_form(
        url,
        vec![
            ("username".to_string(), credentials.username().to_string()),
            ("password".to_string(), credentials.password().to_string()),
        ],
    )
    .header("accept", "application/json")
}

pub(crate) fn balance_request(url: &str, credential: &SessionCredential) -> Request {
    let (name, value) = credential.header();
    Request::get(url)
        .header("accept", "application/json")
        .header(name, value)
}

/// Interpret a login response.
///
/// A bearer token in the JSON body wins over a session cookie.
pub(crate) fn read_login_response(
    response: &Response,
    session_cookie: &str,
) -> Result<SessionGrant, AuthError> {
    match response.status {
        400 | 401 | 403 => return Err(AuthError::InvalidCredentials),
        status if !response.is_success() => {
            return Err(AuthError::Unexpected {
                reason: format!("login endpoint returned HTTP {status}"),
            });
        }
        _ => {}
    }

    let body = serde_json::from_slice::<LoginResponse>(&response.body).ok();
    let expires_in = body
        .as_ref()
        .and_then(|b| b.expires_in)
        .map(Duration::from_secs);

    if let Some(token) = body.and_then(|b| b.token).filter(|t| !t.is_empty()) {
        return Ok(SessionGrant {
            credential: SessionCredential::Bearer(SessionToken::new(token)),
            expires_in,
        });
    }

    if let Some(value) = find_cookie(response, session_cookie) {
        return Ok(SessionGrant {
            credential: SessionCredential::Cookie {
                name: session_cookie.to_string(),
                value: SessionToken::new(value),
            },
            expires_in,
        });
    }

    Err(AuthError::Unexpected {
        reason: "login succeeded without session material".to_string(),
    })
}

/// Interpret a balance response.
pub(crate) fn read_balance_response(response: Response) -> Result<BalanceReply, ClientError> {
    match response.status {
        200..=299 => Ok(BalanceReply::Body(response.body)),
        300..=399 | 401 | 403 => Ok(BalanceReply::SessionRejected),
        status @ 500..=599 => Err(ClientError::ProviderStatus { status }),
        status => Err(ClientError::UnexpectedStatus { status }),
    }
}

fn find_cookie<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.header_values("set-cookie").find_map(|header| {
        let pair = header.split(';').next()?.trim();
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name && !value.trim().is_empty()).then(|| value.trim())
    })
}
