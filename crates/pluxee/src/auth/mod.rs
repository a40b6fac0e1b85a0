//! Credentials and session management.
//!
//! [`SessionManager`] owns the login protocol and the single [`Session`] of
//! a client instance; everything else only borrows the session it hands out.

mod credentials;
mod manager;
mod session;
mod tokens;

pub use credentials::Credentials;
pub use manager::SessionManager;
pub use session::{Session, SessionCredential, SessionStatus};
pub use tokens::SessionToken;
