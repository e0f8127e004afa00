//! Hybrid envelope orchestration.
//!
//! Seals a payload under a one-time AES key and wraps that key for the
//! recipient's RSA public key. Opening reverses the steps with the private
//! key. No state survives between calls.

use crate::codec;
use crate::error::{CryptoError, CryptoResult};
use crate::key::SymmetricKey;
use crate::key_wrap;
use crate::keypair::{PrivateKey, PublicKey};
use crate::symmetric;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

/// The pair that actually crosses the wire.
///
/// Serializes as `{"encryptedData": "...", "encryptedKey": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridMessage {
    /// Base64 of `IV ‖ ciphertext`.
    pub encrypted_data: String,
    /// Base64 of the OAEP-wrapped symmetric key.
    pub encrypted_key: String,
}

/// Encrypts `plaintext` for the holder of the private key matching `public_key`.
///
/// Draws a fresh key and a fresh IV from the OS CSPRNG on every call.
pub fn encrypt_envelope(plaintext: &[u8], public_key: &PublicKey) -> CryptoResult<HybridMessage> {
    encrypt_envelope_with_rng(&mut OsRng, plaintext, public_key)
}

/// Same as [`encrypt_envelope`], taking every random draw (key, IV, OAEP seed)
/// from `rng`, in that order.
pub fn encrypt_envelope_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    plaintext: &[u8],
    public_key: &PublicKey,
) -> CryptoResult<HybridMessage> {
    let key = SymmetricKey::generate_with_rng(rng);
    let (iv, ciphertext) = symmetric::encrypt_with_rng(rng, plaintext, key.as_bytes())?;
    let encrypted_data = codec::frame(&iv, &ciphertext);

    let wrapped = key_wrap::wrap_with_rng(rng, key.as_bytes(), public_key)?;

    Ok(HybridMessage {
        encrypted_data,
        encrypted_key: STANDARD.encode(wrapped),
    })
}

/// Opens an envelope with the recipient's private key.
///
/// The returned error names the failing stage. Do not forward it verbatim
/// across a trust boundary.
pub fn decrypt_envelope(
    envelope: &str,
    wrapped_key_b64: &str,
    private_key: &PrivateKey,
) -> CryptoResult<Vec<u8>> {
    let wrapped = STANDARD
        .decode(wrapped_key_b64)
        .map_err(|_| CryptoError::InvalidEncoding)?;
    let key_bytes = key_wrap::unwrap(&wrapped, private_key)?;
    let key = SymmetricKey::from_slice(&key_bytes)?;

    let (iv, ciphertext) = codec::unframe(envelope)?;
    symmetric::decrypt(&iv, &ciphertext, key.as_bytes())
}

/// Opens a [`HybridMessage`] with the recipient's private key.
pub fn decrypt_message(message: &HybridMessage, private_key: &PrivateKey) -> CryptoResult<Vec<u8>> {
    decrypt_envelope(&message.encrypted_data, &message.encrypted_key, private_key)
}
