//! Validated key material for the AEAD layer.
//!
//! A `KeyMaterial` pairs a 32-byte AES-256 key with the 16-byte GCM nonce
//! used for every encryption under that key. Both are supplied as hex by
//! the embedding application and validated once, here. There is no way to
//! mutate or re-initialise a `KeyMaterial`: bad input means building a new
//! one.

use std::fmt;

use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::{JsonSealError, Result};

/// Length of the AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// Length of the GCM nonce in bytes.
pub const NONCE_LEN: usize = 16;

/// An immutable key + nonce pair, wiped from memory on drop.
///
/// Deliberately not `Clone`: share one instance (e.g. behind an `Arc`)
/// rather than copying key bytes around.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    key: [u8; KEY_LEN],
    nonce: [u8; NONCE_LEN],
}

impl KeyMaterial {
    /// Build key material from hex strings.
    ///
    /// `key_hex` must decode to exactly 32 bytes (64 hex characters) and
    /// `nonce_hex` to exactly 16 bytes (32 hex characters). Anything else,
    /// including an empty string, is a `ConfigurationError`.
    pub fn from_hex(key_hex: &str, nonce_hex: &str) -> Result<Self> {
        // Decode in place: a partially filled value is wiped when dropped
        // on the error path, and no loose stack copies are left behind.
        let mut material = Self::zeroed();
        decode_into("key", key_hex, &mut material.key)?;
        decode_into("nonce", nonce_hex, &mut material.nonce)?;
        Ok(material)
    }

    /// Generate a random key and nonce from the OS-seeded CSPRNG.
    pub fn generate() -> Self {
        let mut material = Self::zeroed();
        let mut rng = rand::rng();
        rng.fill_bytes(&mut material.key);
        rng.fill_bytes(&mut material.nonce);
        material
    }

    fn zeroed() -> Self {
        Self {
            key: [0u8; KEY_LEN],
            nonce: [0u8; NONCE_LEN],
        }
    }

    /// The key as lowercase hex.
    pub fn key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.key))
    }

    /// The nonce as lowercase hex.
    pub fn nonce_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.nonce))
    }

    pub(crate) fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    pub(crate) fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key", &"<redacted>")
            .field("nonce", &"<redacted>")
            .finish()
    }
}

/// Decode `input` as hex into `out`, which it must fill exactly.
fn decode_into(label: &str, input: &str, out: &mut [u8]) -> Result<()> {
    if input.is_empty() {
        return Err(JsonSealError::ConfigurationError(format!(
            "{label} is missing"
        )));
    }

    let len = out.len();
    hex::decode_to_slice(input, out).map_err(|e| match e {
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            JsonSealError::ConfigurationError(format!(
                "{label} must be {} hex characters ({len} bytes), got {}",
                len * 2,
                input.len()
            ))
        }
        // Do not echo the offending character; it is part of a secret.
        hex::FromHexError::InvalidHexCharacter { index, .. } => {
            JsonSealError::ConfigurationError(format!(
                "{label} is not valid hexadecimal (bad character at position {index})"
            ))
        }
    })
}
