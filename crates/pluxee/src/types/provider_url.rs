//! Provider base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::InvalidInputError;

/// A validated base URL for the benefits provider.
///
/// The URL must be absolute and use HTTPS; plain HTTP is accepted only for
/// loopback hosts so tests can point at a local mock.
///
/// # Example
///
/// ```
/// use pluxee::ProviderUrl;
///
/// let provider = ProviderUrl::new("https://consumidores.pluxee.pt/").unwrap();
/// assert_eq!(provider.endpoint("/api/balance"),
///            "https://consumidores.pluxee.pt/api/balance");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProviderUrl(Url);

impl ProviderUrl {
    /// Parse and validate a provider URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute, has no host, or uses
    /// plain HTTP for a non-loopback host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, InvalidInputError> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ProviderUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;
        Ok(Self(url))
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), InvalidInputError> {
        let invalid = |reason: &str| InvalidInputError::ProviderUrl {
            value: original.to_string(),
            reason: reason.to_string(),
        };

        if url.cannot_be_a_base() {
            return Err(invalid("must be an absolute URL"));
        }

        let Some(host) = url.host_str() else {
            return Err(invalid("must have a host"));
        };

        let is_loopback = matches!(host, "localhost" | "127.0.0.1" | "[::1]" | "::1");
        match url.scheme() {
            "https" => Ok(()),
            "http" if is_loopback => Ok(()),
            _ => Err(invalid("must use HTTPS (HTTP allowed only for localhost)")),
        }
    }
}

impl fmt::Display for ProviderUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProviderUrl {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ProviderUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ProviderUrl::new(&s).map_err(serde::de::Error::custom)
    }
}
