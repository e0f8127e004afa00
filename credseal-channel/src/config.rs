//! Secure channel configuration.
//!
//! Key material is always injected: read from a JSON file written by the
//! deployment, or from environment variables. Nothing is compiled in.

use crate::error::{ChannelError, ChannelResult};
use credseal_crypto::{PrivateKey, PublicKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Environment variable holding the server public key PEM.
pub const ENV_SERVER_PUBLIC_KEY: &str = "CREDSEAL_SERVER_PUBLIC_KEY";
/// Environment variable holding the client private key PEM.
pub const ENV_CLIENT_PRIVATE_KEY: &str = "CREDSEAL_CLIENT_PRIVATE_KEY";
/// Environment variable overriding [`ChannelConfig::max_plaintext_len`].
pub const ENV_MAX_PLAINTEXT_LEN: &str = "CREDSEAL_MAX_PLAINTEXT_LEN";

const DEFAULT_MAX_PLAINTEXT_LEN: usize = 64 * 1024;

/// Configuration for a [`SecureChannel`](crate::SecureChannel).
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfig {
    /// PEM public key of the server; outgoing payloads are sealed for it.
    pub server_public_key_pem: String,

    /// PEM private key of this client, for opening server responses.
    /// Seal-only deployments leave this unset.
    #[serde(default)]
    pub client_private_key_pem: Option<String>,

    /// Largest plaintext the channel will seal, in bytes.
    #[serde(default = "default_max_plaintext_len")]
    pub max_plaintext_len: usize,
}

fn default_max_plaintext_len() -> usize {
    DEFAULT_MAX_PLAINTEXT_LEN
}

impl ChannelConfig {
    /// Creates a seal-only config for the given server key.
    pub fn new(server_public_key_pem: impl Into<String>) -> Self {
        Self {
            server_public_key_pem: server_public_key_pem.into(),
            client_private_key_pem: None,
            max_plaintext_len: DEFAULT_MAX_PLAINTEXT_LEN,
        }
    }

    /// Adds the client private key so responses can be opened.
    pub fn with_client_private_key(mut self, pem: impl Into<String>) -> Self {
        self.client_private_key_pem = Some(pem.into());
        self
    }

    /// Loads a config from a JSON file and validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> ChannelResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from the process environment and validates it.
    pub fn from_env() -> ChannelResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads a config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ChannelResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_public_key_pem = lookup(ENV_SERVER_PUBLIC_KEY)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ChannelError::Config(format!("{ENV_SERVER_PUBLIC_KEY} is not set")))?;

        let client_private_key_pem =
            lookup(ENV_CLIENT_PRIVATE_KEY).filter(|v| !v.trim().is_empty());

        let max_plaintext_len = match lookup(ENV_MAX_PLAINTEXT_LEN) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ChannelError::Config(format!("{ENV_MAX_PLAINTEXT_LEN} is not a number: {raw}"))
            })?,
            None => DEFAULT_MAX_PLAINTEXT_LEN,
        };

        let config = Self {
            server_public_key_pem,
            client_private_key_pem,
            max_plaintext_len,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the key material parses and the limits are usable.
    pub fn validate(&self) -> ChannelResult<()> {
        self.parse_keys().map(|_| ())
    }

    /// Parses the configured PEMs.
    pub(crate) fn parse_keys(&self) -> ChannelResult<(PublicKey, Option<PrivateKey>)> {
        if self.max_plaintext_len == 0 {
            return Err(ChannelError::Config(
                "max_plaintext_len must be greater than zero".to_string(),
            ));
        }

        let server = PublicKey::from_pem(&self.server_public_key_pem)
            .map_err(|e| ChannelError::Config(format!("server public key: {e}")))?;

        let client = self
            .client_private_key_pem
            .as_deref()
            .map(PrivateKey::from_pem)
            .transpose()
            .map_err(|e| ChannelError::Config(format!("client private key: {e}")))?;

        Ok((server, client))
    }
}

impl fmt::Debug for ChannelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelConfig")
            .field("server_public_key_pem", &self.server_public_key_pem)
            .field(
                "client_private_key_pem",
                &self.client_private_key_pem.as_ref().map(|_| "[REDACTED]"),
            )
            .field("max_plaintext_len", &self.max_plaintext_len)
            .finish()
    }
}
