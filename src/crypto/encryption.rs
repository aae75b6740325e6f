//! AES-256-GCM authenticated encryption with a detached tag.
//!
//! The nonce is the 16-byte value held by [`KeyMaterial`], not the usual
//! 12 bytes, so the cipher is instantiated as `AesGcm<Aes256, U16>`.
//! No associated data is authenticated.
//!
//! Every call builds its own cipher context; nothing mutable is shared
//! between calls, so one `KeyMaterial` can serve many threads at once.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce, Tag};

use super::keys::KeyMaterial;
use crate::errors::{JsonSealError, Result};

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// AES-256-GCM parameterised for a 128-bit nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Encrypt `plaintext`, returning `(ciphertext, tag)`.
///
/// The ciphertext has the same length as the plaintext.
pub fn seal(material: &KeyMaterial, plaintext: &[u8]) -> Result<(Vec<u8>, [u8; TAG_LEN])> {
    let cipher = Aes256Gcm16::new_from_slice(material.key())
        .map_err(|e| JsonSealError::EncryptionFailed(format!("invalid key length: {e}")))?;
    let nonce = Nonce::<U16>::from_slice(material.nonce());

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(nonce, b"", &mut buffer)
        .map_err(|e| JsonSealError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);
    Ok((buffer, tag_bytes))
}

/// Decrypt `ciphertext` and verify it against `tag`.
///
/// Fails when the tag does not authenticate the ciphertext, which covers
/// tampering as well as a wrong key or nonce.
pub fn open(material: &KeyMaterial, ciphertext: &[u8], tag: &[u8]) -> Result<Vec<u8>> {
    if tag.len() != TAG_LEN {
        return Err(JsonSealError::DecryptionFailed(format!(
            "authentication tag must be {TAG_LEN} bytes, got {}",
            tag.len()
        )));
    }

    let cipher = Aes256Gcm16::new_from_slice(material.key())
        .map_err(|e| JsonSealError::DecryptionFailed(format!("invalid key length: {e}")))?;
    let nonce = Nonce::<U16>::from_slice(material.nonce());

    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(nonce, b"", &mut buffer, Tag::<U16>::from_slice(tag))
        .map_err(|_| {
            JsonSealError::DecryptionFailed(
                "authentication failed — wrong key/nonce or tampered data".into(),
            )
        })?;

    Ok(buffer)
}
