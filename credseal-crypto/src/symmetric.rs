//! AES-256-CBC payload encryption with PKCS#7 padding.
//!
//! CBC is not authenticated: a tampered ciphertext is only caught when it
//! corrupts the final padding block. Callers must never treat a successful
//! decrypt as proof of integrity, and must never reuse an IV under one key.

use crate::error::{CryptoError, CryptoResult};
use crate::key::{BLOCK_SIZE, IV_SIZE, KEY_SIZE};
use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypts `plaintext` under `key` with a fresh random IV.
///
/// Returns `(iv, ciphertext)`. The ciphertext length is the plaintext length
/// rounded up to the next multiple of [`BLOCK_SIZE`]; a block-aligned (or
/// empty) plaintext gains one full padding block.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyLength`] if `key` is not [`KEY_SIZE`] bytes.
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> CryptoResult<([u8; IV_SIZE], Vec<u8>)> {
    encrypt_with_rng(&mut OsRng, plaintext, key)
}

/// Same as [`encrypt`], drawing the IV from `rng`.
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    plaintext: &[u8],
    key: &[u8],
) -> CryptoResult<([u8; IV_SIZE], Vec<u8>)> {
    check_key(key)?;

    let mut iv = [0u8; IV_SIZE];
    rng.fill_bytes(&mut iv);

    let ciphertext = encrypt_with_iv(plaintext, key, &iv)?;
    Ok((iv, ciphertext))
}

/// Encrypts with a caller-chosen IV.
///
/// Only for known-answer tests and interoperability checks. Reusing an IV
/// under the same key leaks plaintext relationships.
pub fn encrypt_with_iv(plaintext: &[u8], key: &[u8], iv: &[u8; IV_SIZE]) -> CryptoResult<Vec<u8>> {
    check_key(key)?;
    let cipher = Aes256CbcEnc::new_from_slices(key, iv).map_err(|_| invalid_key(key))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypts `ciphertext` and strips its PKCS#7 padding.
///
/// # Errors
///
/// - [`CryptoError::InvalidKeyLength`] if `key` is not [`KEY_SIZE`] bytes.
/// - [`CryptoError::InvalidCiphertextLength`] if the ciphertext is empty or
///   not block-aligned.
/// - [`CryptoError::PaddingInvalid`] if the trailing pad is malformed, which
///   is what a wrong key or tampered ciphertext usually produces.
pub fn decrypt(iv: &[u8; IV_SIZE], ciphertext: &[u8], key: &[u8]) -> CryptoResult<Vec<u8>> {
    check_key(key)?;
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidCiphertextLength {
            len: ciphertext.len(),
        });
    }

    let cipher = Aes256CbcDec::new_from_slices(key, iv).map_err(|_| invalid_key(key))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::PaddingInvalid)
}

fn check_key(key: &[u8]) -> CryptoResult<()> {
    if key.len() != KEY_SIZE {
        return Err(invalid_key(key));
    }
    Ok(())
}

fn invalid_key(key: &[u8]) -> CryptoError {
    CryptoError::InvalidKeyLength {
        expected: KEY_SIZE,
        actual: key.len(),
    }
}
