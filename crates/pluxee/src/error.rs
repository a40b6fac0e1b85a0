//! Error types for the pluxee client.
//!
//! Internal layers each have their own error type ([`TransportError`],
//! [`AuthError`], [`ParseError`]). They are folded into [`ClientError`] at
//! the facade boundary, and callers match on [`ClientError::kind`].

use thiserror::Error;

/// Transport-level errors.
///
/// These never describe the content of a response, only the failure to
/// obtain one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// DNS resolution or connection establishment failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Malformed response framing (bad headers, truncated body, bad encoding).
    #[error("protocol error: {message}")]
    Protocol { message: String },
}

impl TransportError {
    /// Classify a reqwest error.
    ///
    /// `timeout` is the budget that was configured for the request; reqwest
    /// does not report it back.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: std::time::Duration) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Protocol {
                message: err.to_string(),
            }
        }
    }
}

/// Authentication errors from the login protocol.
///
/// Messages only ever mention the username, never the password.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The provider rejected the username/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The provider could not be reached.
    #[error("provider unreachable: {0}")]
    Unreachable(#[source] TransportError),

    /// The provider answered, but not with anything recognizable as a
    /// session or a rejection.
    #[error("unexpected login outcome: {reason}")]
    Unexpected { reason: String },
}

/// Errors decoding a balance response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A monetary field was present but not a decimal number.
    #[error("malformed field '{field}': {value}")]
    MalformedField { field: &'static str, value: String },

    /// The body was not a JSON object.
    #[error("malformed body: {message}")]
    MalformedBody { message: String },
}

/// The coarse error taxonomy exposed to collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientErrorKind {
    /// Credentials were rejected, or the provider refused a fresh session.
    AuthFailed,
    /// The provider could not be reached or is failing server-side.
    Unavailable,
    /// The provider answered with something that could not be decoded.
    InvalidResponse,
    /// A caller-supplied cancellation signal fired first.
    Cancelled,
}

/// Errors returned by [`crate::PluxeeClient`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// Establishing a session failed.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The balance request could not be executed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The provider answered the balance request with a server error.
    #[error("provider returned HTTP {status}")]
    ProviderStatus { status: u16 },

    /// The provider answered the balance request with an unexpected status.
    #[error("unexpected HTTP {status} from balance endpoint")]
    UnexpectedStatus { status: u16 },

    /// The balance body could not be decoded.
    #[error("invalid response: {0}")]
    Parse(#[from] ParseError),

    /// The operation was cancelled by the caller.
    #[error("operation cancelled")]
    Cancelled,
}

impl ClientError {
    /// Returns the stable kind of this error.
    pub fn kind(&self) -> ClientErrorKind {
        match self {
            ClientError::Auth(AuthError::Unreachable(_)) => ClientErrorKind::Unavailable,
            ClientError::Auth(_) => ClientErrorKind::AuthFailed,
            ClientError::Transport(_) | ClientError::ProviderStatus { .. } => {
                ClientErrorKind::Unavailable
            }
            ClientError::Parse(_) | ClientError::UnexpectedStatus { .. } => {
                ClientErrorKind::InvalidResponse
            }
            ClientError::Cancelled => ClientErrorKind::Cancelled,
        }
    }
}

/// Input validation errors (configuration values).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    /// Invalid provider URL.
    #[error("invalid provider URL '{value}': {reason}")]
    ProviderUrl { value: String, reason: String },
}
