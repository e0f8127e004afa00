//! Seal and open payloads at the application boundary.

use crate::config::ChannelConfig;
use crate::error::{ChannelError, ChannelResult};
use credseal_crypto::{decrypt_message, encrypt_envelope, HybridMessage, PrivateKey, PublicKey};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Seals requests for the server and opens responses addressed to this client.
///
/// Keys are parsed once at construction. The channel holds no mutable state,
/// so a single instance can be shared across threads.
#[derive(Debug)]
pub struct SecureChannel {
    server_key: PublicKey,
    client_key: Option<PrivateKey>,
    max_plaintext_len: usize,
}

impl SecureChannel {
    /// Builds a channel from validated configuration.
    pub fn new(config: &ChannelConfig) -> ChannelResult<Self> {
        let (server_key, client_key) = config.parse_keys()?;
        debug!(
            server_key_bits = server_key.modulus_len() * 8,
            can_open = client_key.is_some(),
            "secure channel ready"
        );
        Ok(Self {
            server_key,
            client_key,
            max_plaintext_len: config.max_plaintext_len,
        })
    }

    /// Whether this channel was given a private key and can open responses.
    pub fn can_open(&self) -> bool {
        self.client_key.is_some()
    }

    pub fn server_key(&self) -> &PublicKey {
        &self.server_key
    }

    /// Seals raw bytes for the server.
    pub fn seal_bytes(&self, plaintext: &[u8]) -> ChannelResult<HybridMessage> {
        if plaintext.len() > self.max_plaintext_len {
            return Err(ChannelError::PayloadTooLarge {
                len: plaintext.len(),
                max: self.max_plaintext_len,
            });
        }

        let message = encrypt_envelope(plaintext, &self.server_key).map_err(|e| {
            warn!(stage = e.stage(), error = %e, "envelope encryption failed");
            ChannelError::EncryptionFailed
        })?;
        debug!(plaintext_len = plaintext.len(), "sealed payload");
        Ok(message)
    }

    /// Serializes `payload` to JSON and seals it for the server.
    ///
    /// The intermediate JSON buffer is wiped before returning.
    pub fn seal_json<T: Serialize + ?Sized>(&self, payload: &T) -> ChannelResult<HybridMessage> {
        let plaintext = Zeroizing::new(serde_json::to_vec(payload)?);
        self.seal_bytes(&plaintext)
    }

    /// Opens a message addressed to this client.
    ///
    /// # Errors
    ///
    /// [`ChannelError::DecryptionFailed`] for every crypto failure, whatever
    /// the stage. [`ChannelError::Config`] if no private key was configured.
    pub fn open_bytes(&self, message: &HybridMessage) -> ChannelResult<Vec<u8>> {
        let key = self.client_key.as_ref().ok_or_else(|| {
            ChannelError::Config("no client private key configured".to_string())
        })?;

        decrypt_message(message, key).map_err(|e| {
            warn!(stage = e.stage(), error = %e, "envelope decryption failed");
            ChannelError::DecryptionFailed
        })
    }

    /// Opens a message and deserializes its JSON body.
    ///
    /// A body that decrypts but does not parse is also reported as
    /// [`ChannelError::DecryptionFailed`]; serde's message can quote plaintext.
    pub fn open_json<T: DeserializeOwned>(&self, message: &HybridMessage) -> ChannelResult<T> {
        let plaintext = Zeroizing::new(self.open_bytes(message)?);
        serde_json::from_slice(&plaintext).map_err(|e| {
            warn!(
                line = e.line(),
                column = e.column(),
                "decrypted payload did not match the expected shape"
            );
            ChannelError::DecryptionFailed
        })
    }
}
