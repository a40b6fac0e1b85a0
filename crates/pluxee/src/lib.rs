//! pluxee - Benefit card balances from the Pluxee consumer portal
//!
//! The client logs in with a username and password, keeps the resulting
//! session, and reads the balances of the lunch, eco, gift and conso cards.
//! All operations flow through a [`PluxeeClient`].
//!
//! # Example
//!
//! ```no_run
//! use pluxee::{BenefitCategory, ClientErrorKind, Credentials, PluxeeClient};
//!
//! # async fn example() {
//! let client = PluxeeClient::new(Credentials::new("alice", "correct-pw"));
//!
//! match client.get_balance().await {
//!     Ok(snapshot) => {
//!         for category in BenefitCategory::ALL {
//!             println!("{}: {:.2}", category.label(), snapshot.amount(category));
//!         }
//!     }
//!     Err(e) if e.kind() == ClientErrorKind::AuthFailed => eprintln!("check your password"),
//!     Err(e) => eprintln!("balance unavailable: {e}"),
//! }
//! # }
//! ```

pub mod auth;
pub mod balance;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, Session, SessionStatus};
pub use balance::{BalanceSnapshot, BenefitCategory};
pub use client::PluxeeClient;
pub use config::{ClientConfig, Endpoints};
pub use error::{AuthError, ClientError, ClientErrorKind, ParseError, TransportError};
pub use transport::{HttpTransport, Transport};
pub use types::ProviderUrl;

/// Result type alias using the crate's client error.
pub type Result<T> = std::result::Result<T, ClientError>;
