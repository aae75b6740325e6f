//! Cryptographic primitives for JsonSeal.
//!
//! This module provides:
//! - Validated, zeroize-on-drop key material (`keys`)
//! - AES-256-GCM sealing and opening with a detached tag (`encryption`)

pub mod encryption;
pub mod keys;

pub use encryption::{open, seal, TAG_LEN};
pub use keys::{KeyMaterial, KEY_LEN, NONCE_LEN};
