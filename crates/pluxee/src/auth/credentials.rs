//! Login credentials type.

use std::fmt;

/// Username/password pair for the provider's login form.
///
/// Credentials are fixed for the lifetime of a client. The password is never
/// exposed in Debug output; only the username may appear in diagnostics.
///
/// # Example
///
/// ```
/// use pluxee::Credentials;
///
/// let creds = Credentials::new("alice", "correct-pw");
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// Only used to build the login form. Never log this value.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
