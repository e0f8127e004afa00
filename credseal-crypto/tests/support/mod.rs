//! Shared fixtures for envelope integration tests.
//!
//! The RSA keys under `tests/fixtures/` were generated with OpenSSL so no test
//! pays for RSA key generation.

#![allow(dead_code)]

use credseal_crypto::{PrivateKey, PublicKey};
use rand::{CryptoRng, RngCore};

pub const RECIPIENT_PUBLIC_PEM: &str = include_str!("../fixtures/recipient_public.pem");
pub const RECIPIENT_PRIVATE_PEM: &str = include_str!("../fixtures/recipient_private.pem");
pub const RECIPIENT_PUBLIC_PKCS1_PEM: &str = include_str!("../fixtures/recipient_public_pkcs1.pem");
pub const RECIPIENT_PRIVATE_PKCS1_PEM: &str =
    include_str!("../fixtures/recipient_private_pkcs1.pem");
pub const OTHER_PUBLIC_PEM: &str = include_str!("../fixtures/other_public.pem");
pub const OTHER_PRIVATE_PEM: &str = include_str!("../fixtures/other_private.pem");

/// OpenSSL-produced envelope: AES-256-CBC, key `00..1f`, IV `a0..af`,
/// plaintext [`LOGIN_JSON`].
pub const VECTOR_ENVELOPE: &str = include_str!("../fixtures/envelope.b64");
/// OpenSSL-produced OAEP(SHA-256, MGF1-SHA-256) wrap of key `00..1f`
/// under the recipient public key.
pub const VECTOR_WRAPPED_KEY: &str = include_str!("../fixtures/wrapped_key.b64");

pub const LOGIN_JSON: &[u8] = br#"{"email":"a@b.com","password":"secret123"}"#;

pub fn recipient_public() -> PublicKey {
    PublicKey::from_pem(RECIPIENT_PUBLIC_PEM).expect("fixture public key must parse")
}

pub fn recipient_private() -> PrivateKey {
    PrivateKey::from_pem(RECIPIENT_PRIVATE_PEM).expect("fixture private key must parse")
}

pub fn other_private() -> PrivateKey {
    PrivateKey::from_pem(OTHER_PRIVATE_PEM).expect("fixture private key must parse")
}

pub fn vector_key() -> [u8; 32] {
    std::array::from_fn(|i| i as u8)
}

pub fn vector_iv() -> [u8; 16] {
    std::array::from_fn(|i| 0xA0 + i as u8)
}

/// Deterministic "RNG" that emits consecutive byte values. Only for
/// reproducing envelopes in tests.
pub struct SequenceRng {
    next: u8,
}

impl SequenceRng {
    pub fn starting_at(first: u8) -> Self {
        Self { next: first }
    }
}

impl RngCore for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest {
            *byte = self.next;
            self.next = self.next.wrapping_add(1);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for SequenceRng {}
