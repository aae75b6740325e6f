//! Codec module — leaf-level encryption of JSON values.
//!
//! This module provides:
//! - `ValueCodec` and the `WireString` format for single scalars (`value`)
//! - `TreeCodec`, which walks whole trees and preserves their shape (`tree`)

pub mod tree;
pub mod value;

pub use tree::TreeCodec;
pub use value::{canonical_text, recover_scalar, ValueCodec, WireString};

/// The public entry point: build from hex key material, then call
/// `encrypt_tree` / `decrypt_tree`.
pub type Codec = TreeCodec;
