//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::ProviderUrl;

/// Public consumer portal of the provider.
pub const DEFAULT_PROVIDER_URL: &str = "https://consumidores.pluxee.pt";

/// Per-request timeout, matching the setup flow's validation budget.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Provider-specific request paths and session material names.
///
/// The provider's wire shape is not under our control, so everything that
/// would need to change if it moves lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Path of the login form handler.
    pub login_path: String,
    /// Path of the balance query.
    pub balance_path: String,
    /// Name of the session cookie, for cookie-based logins.
    pub session_cookie: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login_path: "/api/login".to_string(),
            balance_path: "/api/balance".to_string(),
            session_cookie: "pluxee_session".to_string(),
        }
    }
}

/// Configuration for a [`crate::PluxeeClient`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the provider.
    pub provider: ProviderUrl,

    /// Request paths.
    #[serde(default)]
    pub endpoints: Endpoints,

    /// Timeout applied to every single request.
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// Session lifetime assumed when the provider does not state one.
    /// `None` leaves the expiry unknown; rejection is then detected reactively.
    #[serde(default, with = "option_duration_secs")]
    pub session_ttl: Option<Duration>,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration for the given provider with default settings.
    pub fn new(provider: ProviderUrl) -> Self {
        Self {
            provider,
            endpoints: Endpoints::default(),
            timeout: DEFAULT_TIMEOUT,
            session_ttl: None,
            user_agent: default_user_agent(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = Some(ttl);
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub(crate) fn login_url(&self) -> String {
        self.provider.endpoint(&self.endpoints.login_path)
    }

    pub(crate) fn balance_url(&self) -> String {
        self.provider.endpoint(&self.endpoints.balance_path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let provider = DEFAULT_PROVIDER_URL
            .parse()
            .expect("default provider URL is valid");
        Self::new(provider)
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_user_agent() -> String {
    concat!("pluxee-rs/", env!("CARGO_PKG_VERSION")).to_string()
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

mod option_duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match d {
            Some(d) => s.serialize_some(&d.as_secs_f64()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(d)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom))
            .transpose()
    }
}
