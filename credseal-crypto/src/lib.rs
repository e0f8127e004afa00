//! Hybrid envelope encryption for sensitive client/server payloads.
//!
//! Provides application-layer encryption using:
//! - AES-256-CBC with PKCS#7 padding for the payload
//! - RSA-OAEP (SHA-256, MGF1-SHA-256) to wrap the per-message key
//! - Standard padded base64 for everything that crosses the wire
//!
//! # Architecture
//!
//! Every message gets its own key:
//!
//! 1. **Symmetric Key**: 32 random bytes drawn for a single message. It
//!    encrypts the payload under a fresh 16-byte IV and is dropped (zeroized)
//!    as soon as the call returns.
//!
//! 2. **Wrapped Key**: The symmetric key encrypted under the recipient's RSA
//!    public key. Only the private-key holder can recover it.
//!
//! The envelope (`IV ‖ ciphertext`) and the wrapped key travel together as a
//! [`HybridMessage`]; neither is useful without the other.
//!
//! All operations are stateless and safe to call from any thread. The only
//! shared resource is the operating system's CSPRNG.

pub mod codec;
mod error;
pub mod hybrid;
mod key;
pub mod key_wrap;
mod keypair;
pub mod symmetric;

pub use error::{CryptoError, CryptoResult};
pub use hybrid::{
    decrypt_envelope, decrypt_message, encrypt_envelope, encrypt_envelope_with_rng, HybridMessage,
};
pub use key::{SymmetricKey, BLOCK_SIZE, IV_SIZE, KEY_SIZE};
pub use keypair::{PrivateKey, PublicKey};
