//! Text framing of `IV ‖ ciphertext`.
//!
//! Layout of the decoded envelope:
//!
//! ```text
//! +----------------+---------------------------+
//! | IV (16 bytes)  | ciphertext (n * 16 bytes) |
//! +----------------+---------------------------+
//! ```
//!
//! encoded as standard base64 with padding. Decoding is strict: no whitespace,
//! no URL-safe alphabet, no missing padding.

use crate::error::{CryptoError, CryptoResult};
use crate::key::IV_SIZE;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Concatenates the IV and ciphertext and base64-encodes the result.
pub fn frame(iv: &[u8; IV_SIZE], ciphertext: &[u8]) -> String {
    let mut framed = Vec::with_capacity(IV_SIZE + ciphertext.len());
    framed.extend_from_slice(iv);
    framed.extend_from_slice(ciphertext);
    STANDARD.encode(framed)
}

/// Splits a framed envelope back into `(iv, ciphertext)`.
///
/// Only the minimum length is enforced here; block alignment of the
/// ciphertext is the symmetric engine's concern.
///
/// # Errors
///
/// - [`CryptoError::InvalidEncoding`] if `text` is not valid base64.
/// - [`CryptoError::EnvelopeTooShort`] if fewer than [`IV_SIZE`] bytes decode.
pub fn unframe(text: &str) -> CryptoResult<([u8; IV_SIZE], Vec<u8>)> {
    let mut decoded = STANDARD
        .decode(text)
        .map_err(|_| CryptoError::InvalidEncoding)?;
    if decoded.len() < IV_SIZE {
        return Err(CryptoError::EnvelopeTooShort { len: decoded.len() });
    }

    let ciphertext = decoded.split_off(IV_SIZE);
    let mut iv = [0u8; IV_SIZE];
    iv.copy_from_slice(&decoded);
    Ok((iv, ciphertext))
}
