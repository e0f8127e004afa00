//! RSA-OAEP wrapping of symmetric keys.
//!
//! Both the OAEP hash and the MGF1 hash are SHA-256. The parameters are not
//! carried in the envelope, so sender and receiver must agree on them out of
//! band; changing either side breaks every peer.

use crate::error::{CryptoError, CryptoResult};
use crate::keypair::{PrivateKey, PublicKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use rsa::Oaep;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Output length of the OAEP hash (SHA-256) in bytes.
pub const OAEP_HASH_LEN: usize = 32;

fn oaep() -> Oaep {
    Oaep::new_with_mgf_hash::<Sha256, Sha256>()
}

/// Largest key (in bytes) OAEP can wrap under `public_key`:
/// `modulus_len - 2 * hash_len - 2`. 190 bytes for RSA-2048.
pub fn max_wrappable_len(public_key: &PublicKey) -> usize {
    public_key
        .modulus_len()
        .saturating_sub(2 * OAEP_HASH_LEN + 2)
}

/// Wraps `key` for the holder of `public_key`.
///
/// # Errors
///
/// Returns [`CryptoError::KeyTooLarge`] if `key` exceeds [`max_wrappable_len`].
pub fn wrap(key: &[u8], public_key: &PublicKey) -> CryptoResult<Vec<u8>> {
    wrap_with_rng(&mut OsRng, key, public_key)
}

/// Same as [`wrap`], drawing the OAEP seed from `rng`.
pub fn wrap_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    key: &[u8],
    public_key: &PublicKey,
) -> CryptoResult<Vec<u8>> {
    let max = max_wrappable_len(public_key);
    if key.len() > max {
        return Err(CryptoError::KeyTooLarge {
            max,
            actual: key.len(),
        });
    }

    public_key
        .as_rsa()
        .encrypt(rng, oaep(), key)
        .map_err(|e| CryptoError::Encryption(format!("key wrap failed: {e}")))
}

/// Recovers a wrapped key with `private_key`.
///
/// Every failure maps to [`CryptoError::UnwrapFailed`] with no further detail,
/// so callers cannot be turned into an OAEP padding oracle. Decryption uses
/// RSA blinding.
pub fn unwrap(wrapped: &[u8], private_key: &PrivateKey) -> CryptoResult<Zeroizing<Vec<u8>>> {
    if wrapped.len() != private_key.modulus_len() {
        return Err(CryptoError::UnwrapFailed);
    }

    private_key
        .as_rsa()
        .decrypt_blinded(&mut OsRng, oaep(), wrapped)
        .map(Zeroizing::new)
        .map_err(|_| CryptoError::UnwrapFailed)
}
