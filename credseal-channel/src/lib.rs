//! Application-layer secure channel for credential payloads.
//!
//! Sits between the caller's forms and its HTTP client:
//! - Serializes request payloads (login, password reset, registration) to JSON
//! - Seals them into hybrid envelopes for the server's public key
//! - Opens envelopes the server encrypted for this client
//! - Collapses every crypto failure into one opaque error at the boundary
//! - Scrubs credentials out of log output
//!
//! Transport, retries and status handling belong to the HTTP client.

pub mod channel;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod redact;

pub use channel::SecureChannel;
pub use config::ChannelConfig;
pub use credentials::{LoginRequest, PasswordResetRequest, RegistrationRequest};
pub use credseal_crypto::HybridMessage;
pub use error::{ChannelError, ChannelResult};
