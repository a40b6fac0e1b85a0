//! Login protocol and session lifecycle.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::AuthError;
use crate::transport::{self, Transport};

use super::credentials::Credentials;
use super::session::{Session, SessionStatus};

/// Stored state. `LoggingIn` is not stored: it is the time spent holding the
/// lock inside [`SessionManager::ensure_session`].
#[derive(Debug)]
enum SessionState {
    NoSession,
    Active(Session),
    Expired,
}

/// Owns the credentials and the current session of one client.
///
/// The state is replaced wholesale under a mutex, and the lock is held across
/// a login, so callers sharing a client never log in twice for the same
/// expiry. A login whose future is dropped installs nothing.
#[derive(Debug)]
pub struct SessionManager {
    credentials: Credentials,
    login_url: String,
    session_cookie: String,
    session_ttl: Option<Duration>,
    state: Mutex<SessionState>,
}

impl SessionManager {
    pub fn new(credentials: Credentials, config: &ClientConfig) -> Self {
        Self {
            credentials,
            login_url: config.login_url(),
            session_cookie: config.endpoints.session_cookie.clone(),
            session_ttl: config.session_ttl,
            state: Mutex::new(SessionState::NoSession),
        }
    }

    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// Return the active session, logging in first if there is none or it
    /// has expired.
    #[instrument(skip(self, transport), fields(username = %self.username()))]
    pub async fn ensure_session<T>(&self, transport: &T) -> Result<Session, AuthError>
    where
        T: Transport + ?Sized,
    {
        let mut state = self.state.lock().await;

        if let SessionState::Active(session) = &*state {
            if session.is_valid() {
                return Ok(session.clone());
            }
            debug!("Session past its expiry");
            *state = SessionState::Expired;
        }

        let session = self.login(transport).await?;
        *state = SessionState::Active(session.clone());
        Ok(session)
    }

    /// Perform exactly one login, replacing the current session on success.
    /// On failure the current state is left as it was.
    #[instrument(skip(self, transport), fields(username = %self.username()))]
    pub async fn relogin<T>(&self, transport: &T) -> Result<Session, AuthError>
    where
        T: Transport + ?Sized,
    {
        let mut state = self.state.lock().await;
        let session = self.login(transport).await?;
        *state = SessionState::Active(session.clone());
        Ok(session)
    }

    /// Mark `rejected` as expired, unless another caller already replaced it.
    pub async fn invalidate(&self, rejected: &Session) {
        let mut state = self.state.lock().await;
        if matches!(&*state, SessionState::Active(current) if current == rejected) {
            warn!(username = %self.username(), "Provider rejected session");
            *state = SessionState::Expired;
        }
    }

    /// Drop the local session.
    pub async fn clear(&self) {
        *self.state.lock().await = SessionState::NoSession;
    }

    pub async fn status(&self) -> SessionStatus {
        match &*self.state.lock().await {
            SessionState::NoSession => SessionStatus::NoSession,
            SessionState::Active(session) if session.is_valid() => SessionStatus::Active,
            SessionState::Active(_) | SessionState::Expired => SessionStatus::Expired,
        }
    }

    async fn login<T>(&self, transport: &T) -> Result<Session, AuthError>
    where
        T: Transport + ?Sized,
    {
        info!("Logging in");

        let request = transport::login_request(&self.login_url, &self.credentials);
        let response = transport
            .execute(request)
            .await
            .map_err(AuthError::Unreachable)?;

        let grant = transport::read_login_response(&response, &self.session_cookie)
            .inspect_err(|e| warn!(error = %e, "Login failed"))?;

        // An expiry past the representable range reads as unknown.
        let created_at = Utc::now();
        let expires_at = grant
            .expires_in
            .or(self.session_ttl)
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
            .and_then(|ttl| created_at.checked_add_signed(ttl));

        debug!(?expires_at, "Session established");
        Ok(Session::new(grant.credential, created_at, expires_at))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::TransportError;
    use crate::transport::{Request, Response};

    /// Issues `token-N` for the N-th login.
    struct CountingProvider {
        logins: AtomicUsize,
        accept: bool,
        expires_in: Option<u64>,
    }

    impl CountingProvider {
        fn accepting(expires_in: Option<u64>) -> Self {
            Self {
                logins: AtomicUsize::new(0),
                accept: true,
                expires_in,
            }
        }

        fn rejecting() -> Self {
            Self {
                logins: AtomicUsize::new(0),
                accept: false,
                expires_in: None,
            }
        }
    }

    #[async_trait]
    impl Transport for CountingProvider {
        async fn execute(&self, _request: Request) -> Result<Response, TransportError> {
            let n = self.logins.fetch_add(1, Ordering::SeqCst) + 1;
            if !self.accept {
                return Ok(Response::new(401));
            }
            let body = match self.expires_in {
                Some(secs) => format!(r#"{{"token":"token-{n}","expiresIn":{secs}}}"#),
                None => format!(r#"{{"token":"token-{n}"}}"#),
            };
            let mut response = Response::new(200);
            response.body = body.into_bytes();
            Ok(response)
        }
    }

    struct DownProvider;

    #[async_trait]
    impl Transport for DownProvider {
        async fn execute(&self, _request: Request) -> Result<Response, TransportError> {
            Err(TransportError::Connection {
                message: "connection refused".into(),
            })
        }
    }

    fn manager() -> SessionManager {
        SessionManager::new(
            Credentials::new("alice", "correct-pw"),
            &ClientConfig::default(),
        )
    }

    #[tokio::test]
    async fn reuses_active_session() {
        let provider = CountingProvider::accepting(None);
        let sessions = manager();

        let first = sessions.ensure_session(&provider).await.unwrap();
        let second = sessions.ensure_session(&provider).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.logins.load(Ordering::SeqCst), 1);
        assert_eq!(sessions.status().await, SessionStatus::Active);
    }

    #[tokio::test]
    async fn renews_expired_session() {
        let provider = CountingProvider::accepting(Some(0));
        let sessions = manager();

        sessions.ensure_session(&provider).await.unwrap();
        assert_eq!(sessions.status().await, SessionStatus::Expired);

        sessions.ensure_session(&provider).await.unwrap();
        assert_eq!(provider.logins.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_only_expires_matching_session() {
        let provider = CountingProvider::accepting(None);
        let sessions = manager();

        let stale = sessions.ensure_session(&provider).await.unwrap();
        sessions.invalidate(&stale).await;
        assert_eq!(sessions.status().await, SessionStatus::Expired);

        let fresh = sessions.ensure_session(&provider).await.unwrap();
        sessions.invalidate(&stale).await;
        assert_eq!(sessions.status().await, SessionStatus::Active);
        assert_ne!(stale, fresh);
    }

    #[tokio::test]
    async fn rejected_credentials_leave_no_session() {
        let sessions = manager();
        let err = sessions
            .ensure_session(&CountingProvider::rejecting())
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(sessions.status().await, SessionStatus::NoSession);
    }

    #[tokio::test]
    async fn transport_failure_is_unreachable() {
        let err = manager().ensure_session(&DownProvider).await.unwrap_err();
        assert!(matches!(err, AuthError::Unreachable(_)));
        assert!(!err.to_string().contains("correct-pw"));
    }

    #[tokio::test]
    async fn failed_relogin_keeps_current_session() {
        let sessions = manager();
        sessions
            .ensure_session(&CountingProvider::accepting(None))
            .await
            .unwrap();

        assert!(sessions.relogin(&DownProvider).await.is_err());
        assert_eq!(sessions.status().await, SessionStatus::Active);
    }

    #[tokio::test]
    async fn configured_ttl_applies_without_provider_expiry() {
        let config = ClientConfig::default().with_session_ttl(Duration::from_secs(1800));
        let sessions = SessionManager::new(Credentials::new("alice", "pw"), &config);

        let session = sessions
            .ensure_session(&CountingProvider::accepting(None))
            .await
            .unwrap();
        let ttl = session.expires_at().unwrap() - session.created_at();
        assert_eq!(ttl.num_seconds(), 1800);
    }

    #[tokio::test]
    async fn unrepresentable_expiry_is_unknown() {
        let sessions = manager();
        let session = sessions
            .ensure_session(&CountingProvider::accepting(Some(1_000_000_000_000_000)))
            .await
            .unwrap();
        assert_eq!(session.expires_at(), None);
        assert_eq!(sessions.status().await, SessionStatus::Active);
    }

    #[tokio::test]
    async fn huge_configured_ttl_is_unknown() {
        let config = ClientConfig::default().with_session_ttl(Duration::from_secs(u64::MAX / 4));
        let sessions = SessionManager::new(Credentials::new("alice", "pw"), &config);

        let session = sessions
            .ensure_session(&CountingProvider::accepting(None))
            .await
            .unwrap();
        assert_eq!(session.expires_at(), None);
    }
}
