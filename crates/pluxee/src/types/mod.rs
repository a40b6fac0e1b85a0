//! Validated value types.

mod provider_url;

pub use provider_url::ProviderUrl;
