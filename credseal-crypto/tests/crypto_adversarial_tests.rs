//! Adversarial tests for envelope opening.
//!
//! Covers wrong-key opening, ciphertext and wrapped-key tampering, truncation,
//! malformed framing, and mismatched field contents. CBC is unauthenticated,
//! so tamper detection here relies on the padding check and on callers never
//! accepting altered plaintext as the original.

mod support;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use credseal_crypto::{
    decrypt_envelope, decrypt_message, encrypt_envelope, key_wrap, CryptoError, HybridMessage,
    IV_SIZE,
};
use support::*;

fn sealed_login() -> HybridMessage {
    encrypt_envelope(LOGIN_JSON, &recipient_public()).unwrap()
}

fn with_envelope_bytes(message: &HybridMessage, edit: impl FnOnce(&mut Vec<u8>)) -> HybridMessage {
    let mut raw = STANDARD.decode(&message.encrypted_data).unwrap();
    edit(&mut raw);
    HybridMessage {
        encrypted_data: STANDARD.encode(raw),
        encrypted_key: message.encrypted_key.clone(),
    }
}

// ── Wrong Key ──

#[test]
fn wrong_private_key_fails_unwrap() {
    let message = sealed_login();
    let err = decrypt_message(&message, &other_private()).unwrap_err();
    assert_eq!(err, CryptoError::UnwrapFailed);
}

#[test]
fn wrapped_key_from_other_message_gives_no_plaintext() {
    let a = sealed_login();
    let b = encrypt_envelope(b"another payload entirely", &recipient_public()).unwrap();

    let mixed = HybridMessage {
        encrypted_data: a.encrypted_data.clone(),
        encrypted_key: b.encrypted_key.clone(),
    };
    match decrypt_message(&mixed, &recipient_private()) {
        Err(CryptoError::PaddingInvalid) => {}
        Ok(garbage) => assert_ne!(garbage, LOGIN_JSON),
        Err(other) => panic!("expected padding failure, got: {other:?}"),
    }
}

// ── Ciphertext Tampering ──

#[test]
fn every_ciphertext_byte_flip_is_detected_or_corrupts_output() {
    let message = sealed_login();
    let private = recipient_private();
    let total = STANDARD.decode(&message.encrypted_data).unwrap().len();

    for i in IV_SIZE..total {
        let tampered = with_envelope_bytes(&message, |raw| raw[i] ^= 0xFF);
        match decrypt_message(&tampered, &private) {
            Err(_) => {}
            Ok(plaintext) => assert_ne!(plaintext, LOGIN_JSON, "flip at byte {i} went unnoticed"),
        }
    }
}

#[test]
fn flipping_bytes_that_feed_the_pad_reports_padding() {
    // 42 bytes of JSON leave 10 data bytes and 6 bytes of 0x06 padding in the
    // third plaintext block. Those pad bytes are XORed with bytes 10..16 of
    // the second ciphertext block.
    let message = sealed_login();
    let private = recipient_private();

    for offset in 10..16 {
        let index = IV_SIZE + 16 + offset;
        let tampered = with_envelope_bytes(&message, |raw| raw[index] ^= 0xFF);
        assert_eq!(
            decrypt_message(&tampered, &private).unwrap_err(),
            CryptoError::PaddingInvalid,
            "offset {offset}"
        );
    }
}

#[test]
fn iv_tampering_corrupts_first_block() {
    let message = sealed_login();
    let tampered = with_envelope_bytes(&message, |raw| raw[0] ^= 0x01);

    let plaintext = decrypt_message(&tampered, &recipient_private()).unwrap();
    assert_ne!(plaintext, LOGIN_JSON);
    assert_eq!(plaintext[0], LOGIN_JSON[0] ^ 0x01);
}

#[test]
fn appended_partial_block_rejected() {
    let message = sealed_login();
    let tampered = with_envelope_bytes(&message, |raw| raw.push(0xFF));

    assert_eq!(
        decrypt_message(&tampered, &recipient_private()).unwrap_err(),
        CryptoError::InvalidCiphertextLength { len: 49 }
    );
}

// ── Wrapped Key Tampering ──

#[test]
fn every_wrapped_key_byte_flip_fails_uniformly() {
    let message = sealed_login();
    let private = recipient_private();
    let wrapped = STANDARD.decode(&message.encrypted_key).unwrap();

    for i in (0..wrapped.len()).step_by(17) {
        let mut tampered = wrapped.clone();
        tampered[i] ^= 0xFF;
        let err = decrypt_envelope(&message.encrypted_data, &STANDARD.encode(&tampered), &private)
            .unwrap_err();
        assert_eq!(err, CryptoError::UnwrapFailed, "flip at byte {i}");
        assert_eq!(err.to_string(), "key unwrap failed");
    }
}

#[test]
fn truncated_wrapped_key_fails_unwrap() {
    let message = sealed_login();
    let mut wrapped = STANDARD.decode(&message.encrypted_key).unwrap();
    wrapped.truncate(128);

    let err = decrypt_envelope(
        &message.encrypted_data,
        &STANDARD.encode(wrapped),
        &recipient_private(),
    )
    .unwrap_err();
    assert_eq!(err, CryptoError::UnwrapFailed);
}

#[test]
fn wrapped_key_of_wrong_length_rejected() {
    let public = recipient_public();
    let short_key = key_wrap::wrap(&[0x42u8; 16], &public).unwrap();
    let message = sealed_login();

    let err = decrypt_envelope(
        &message.encrypted_data,
        &STANDARD.encode(short_key),
        &recipient_private(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        CryptoError::InvalidKeyLength {
            expected: 32,
            actual: 16
        }
    );
}

// ── Framing ──

#[test]
fn envelope_shorter_than_iv_rejected() {
    let message = sealed_login();
    let err = decrypt_envelope("AAAA", &message.encrypted_key, &recipient_private()).unwrap_err();
    assert_eq!(err, CryptoError::EnvelopeTooShort { len: 3 });
}

#[test]
fn envelope_with_only_an_iv_rejected() {
    let message = sealed_login();
    let iv_only = with_envelope_bytes(&message, |raw| raw.truncate(IV_SIZE));
    assert_eq!(
        decrypt_message(&iv_only, &recipient_private()).unwrap_err(),
        CryptoError::InvalidCiphertextLength { len: 0 }
    );
}

#[test]
fn non_base64_fields_rejected() {
    let message = sealed_login();
    let private = recipient_private();

    assert_eq!(
        decrypt_envelope(&message.encrypted_data, "%%%", &private).unwrap_err(),
        CryptoError::InvalidEncoding
    );
    assert_eq!(
        decrypt_envelope("%%%", &message.encrypted_key, &private).unwrap_err(),
        CryptoError::InvalidEncoding
    );
}

#[test]
fn swapped_fields_fail() {
    let message = sealed_login();
    let swapped = HybridMessage {
        encrypted_data: message.encrypted_key.clone(),
        encrypted_key: message.encrypted_data.clone(),
    };
    assert_eq!(
        decrypt_message(&swapped, &recipient_private()).unwrap_err(),
        CryptoError::UnwrapFailed
    );
}
