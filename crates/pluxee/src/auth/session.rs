//! Session data.

use chrono::{DateTime, Utc};

use super::tokens::SessionToken;

/// How the session is presented to the provider on each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCredential {
    /// `Authorization: Bearer <token>`.
    Bearer(SessionToken),
    /// `Cookie: <name>=<token>`.
    Cookie { name: String, value: SessionToken },
}

impl SessionCredential {
    /// Header name and value carrying this credential.
    pub(crate) fn header(&self) -> (&'static str, String) {
        match self {
            SessionCredential::Bearer(token) => {
                ("authorization", format!("Bearer {}", token.as_str()))
            }
            SessionCredential::Cookie { name, value } => {
                ("cookie", format!("{}={}", name, value.as_str()))
            }
        }
    }
}

/// An authenticated session with the provider.
///
/// A session is valid while its expiry is unknown or still in the future.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    credential: SessionCredential,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub(crate) fn new(
        credential: SessionCredential,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            credential,
            created_at,
            expires_at,
        }
    }

    pub fn credential(&self) -> &SessionCredential {
        &self.credential
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// `None` when the provider did not state an expiry.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expiry| now < expiry)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

/// Observable state of a client's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// No login has succeeded yet, or the session was dropped.
    NoSession,
    /// A session is installed and not past its expiry.
    Active,
    /// The session ran out or the provider rejected it.
    Expired,
}
