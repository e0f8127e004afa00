//! Error types for the envelope engine.

use thiserror::Error;

/// Result type for envelope operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while sealing or opening an envelope.
///
/// Variants keep the precise cause for logs and tests. Anything that crosses a
/// trust boundary should collapse these into a single opaque failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid ciphertext length: {len} is not a positive multiple of 16")]
    InvalidCiphertextLength { len: usize },

    #[error("invalid padding")]
    PaddingInvalid,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("key too large to wrap: {actual} bytes exceeds OAEP limit of {max}")]
    KeyTooLarge { max: usize, actual: usize },

    /// Deliberately carries no detail about which OAEP check failed.
    #[error("key unwrap failed")]
    UnwrapFailed,

    #[error("envelope too short: {len} bytes, need at least 16")]
    EnvelopeTooShort { len: usize },

    #[error("invalid base64 encoding")]
    InvalidEncoding,

    #[error("encryption failed: {0}")]
    Encryption(String),
}

impl CryptoError {
    /// Short name of the stage that produced this error, for structured logs.
    pub fn stage(&self) -> &'static str {
        match self {
            CryptoError::InvalidKeyLength { .. } => "key",
            CryptoError::InvalidCiphertextLength { .. } | CryptoError::PaddingInvalid => {
                "symmetric"
            }
            CryptoError::InvalidPublicKey(_) | CryptoError::InvalidPrivateKey(_) => "key_material",
            CryptoError::KeyTooLarge { .. }
            | CryptoError::UnwrapFailed
            | CryptoError::Encryption(_) => "key_wrap",
            CryptoError::EnvelopeTooShort { .. } => "framing",
            CryptoError::InvalidEncoding => "encoding",
        }
    }

    /// Whether this error can come out of opening an envelope whose contents
    /// are wrong (tampered, truncated, or sealed for another key), as opposed
    /// to bad local configuration or a failure while sealing.
    pub fn is_decryption_failure(&self) -> bool {
        matches!(
            self,
            CryptoError::InvalidKeyLength { .. }
                | CryptoError::InvalidCiphertextLength { .. }
                | CryptoError::PaddingInvalid
                | CryptoError::UnwrapFailed
                | CryptoError::EnvelopeTooShort { .. }
                | CryptoError::InvalidEncoding
        )
    }
}
