//! The client facade used by collaborators.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, instrument, warn};

use crate::auth::{Credentials, Session, SessionManager, SessionStatus};
use crate::balance::{BalanceSnapshot, parse_balance};
use crate::config::ClientConfig;
use crate::error::{AuthError, ClientError};
use crate::transport::{self, BalanceReply, HttpTransport, Transport};

/// Authenticated client for one provider account.
///
/// Exposes the two operations collaborators depend on:
/// [`validate_credentials`](Self::validate_credentials) for setup and
/// [`get_balance`](Self::get_balance) for polling. The client can be shared
/// behind an `Arc`; session renewal is serialized internally.
///
/// # Example
///
/// ```no_run
/// use pluxee::{Credentials, PluxeeClient};
///
/// # async fn example() -> Result<(), pluxee::ClientError> {
/// let client = PluxeeClient::new(Credentials::new("alice", "correct-pw"));
/// let balance = client.get_balance().await?;
/// println!("lunch: {:.2}", balance.lunch_pass());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PluxeeClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
    sessions: SessionManager,
    last_fetched_at: Mutex<Option<DateTime<Utc>>>,
}

impl PluxeeClient<HttpTransport> {
    /// Client for the public provider with default settings.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_config(credentials, ClientConfig::default())
    }

    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Self {
        let transport = HttpTransport::new(&config);
        Self::with_transport(credentials, config, transport)
    }
}

impl<T: Transport> PluxeeClient<T> {
    /// Client over a custom transport.
    pub fn with_transport(credentials: Credentials, config: ClientConfig, transport: T) -> Self {
        let sessions = SessionManager::new(credentials, &config);
        Self {
            config,
            transport,
            sessions,
            last_fetched_at: Mutex::new(None),
        }
    }

    pub fn username(&self) -> &str {
        self.sessions.username()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn session_status(&self) -> SessionStatus {
        self.sessions.status().await
    }

    /// Forget the local session. Nothing is sent to the provider.
    pub async fn logout(&self) {
        self.sessions.clear().await;
    }

    /// Check the credentials with exactly one login attempt.
    ///
    /// Returns `Ok(true)` once a session is established (and keeps it for the
    /// next [`get_balance`](Self::get_balance)), `Ok(false)` if the provider
    /// rejected the credentials, and `Err` when the provider could not be
    /// reached or answered unexpectedly.
    #[instrument(skip(self), fields(username = %self.username()))]
    pub async fn validate_credentials(&self) -> Result<bool, AuthError> {
        match self.sessions.relogin(&self.transport).await {
            Ok(_) => {
                info!("Credentials accepted");
                Ok(true)
            }
            Err(AuthError::InvalidCredentials) => {
                info!("Credentials rejected");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// [`validate_credentials`](Self::validate_credentials) collapsed to a
    /// single pass/fail signal, as the setup flow consumes it. Failures to
    /// reach the provider read as `false`.
    pub async fn credentials_valid(&self) -> bool {
        self.validate_credentials().await.unwrap_or_else(|e| {
            warn!(error = %e, "Credential validation failed");
            false
        })
    }

    /// [`validate_credentials`](Self::validate_credentials), abandoned when
    /// `cancel` completes first.
    pub async fn validate_credentials_with_cancel<C>(&self, cancel: C) -> Result<bool, ClientError>
    where
        C: Future<Output = ()>,
    {
        let validate = async { self.validate_credentials().await.map_err(ClientError::from) };
        cancellable(validate, cancel).await
    }

    /// Fetch a fresh balance snapshot.
    ///
    /// Logs in if needed. If the provider rejects the session, it is
    /// discarded and the request is retried once after a single re-login;
    /// there are no other retries.
    #[instrument(skip(self), fields(username = %self.username()))]
    pub async fn get_balance(&self) -> Result<BalanceSnapshot, ClientError> {
        let session = self.sessions.ensure_session(&self.transport).await?;

        let body = match self.fetch_balance(&session).await? {
            BalanceReply::Body(body) => body,
            BalanceReply::SessionRejected => {
                self.sessions.invalidate(&session).await;
                let session = self.sessions.ensure_session(&self.transport).await?;

                match self.fetch_balance(&session).await? {
                    BalanceReply::Body(body) => body,
                    BalanceReply::SessionRejected => {
                        self.sessions.invalidate(&session).await;
                        return Err(AuthError::Unexpected {
                            reason: "provider rejected a freshly issued session".to_string(),
                        }
                        .into());
                    }
                }
            }
        };

        let snapshot = parse_balance(&body, self.next_fetched_at())
            .inspect_err(|e| warn!(error = %e, "Could not decode balance"))?;
        debug!(fetched_at = %snapshot.fetched_at(), "Balance fetched");
        Ok(snapshot)
    }

    /// [`get_balance`](Self::get_balance), abandoned when `cancel` completes
    /// first. Pass `tokio::time::sleep_until(deadline)` for a deadline.
    pub async fn get_balance_with_cancel<C>(&self, cancel: C) -> Result<BalanceSnapshot, ClientError>
    where
        C: Future<Output = ()>,
    {
        cancellable(self.get_balance(), cancel).await
    }

    async fn fetch_balance(&self, session: &Session) -> Result<BalanceReply, ClientError> {
        let request = transport::balance_request(&self.config.balance_url(), session.credential());
        let response = self.transport.execute(request).await?;
        transport::read_balance_response(response)
    }

    /// Wall-clock time, bumped if needed so it strictly increases per client.
    fn next_fetched_at(&self) -> DateTime<Utc> {
        let mut last = self
            .last_fetched_at
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut now = Utc::now();
        if let Some(previous) = *last
            && now <= previous
        {
            now = previous + TimeDelta::microseconds(1);
        }
        *last = Some(now);
        now
    }
}

async fn cancellable<F, C, R>(operation: F, cancel: C) -> Result<R, ClientError>
where
    F: Future<Output = Result<R, ClientError>>,
    C: Future<Output = ()>,
{
    tokio::select! {
        biased;
        () = cancel => {
            debug!("Operation cancelled");
            Err(ClientError::Cancelled)
        }
        result = operation => result,
    }
}
