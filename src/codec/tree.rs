//! Shape-preserving encryption of whole JSON trees.
//!
//! Every scalar leaf is handed to [`ValueCodec`]; arrays and objects are
//! rebuilt with the same length, key set, and key order. Object keys are
//! never encrypted.
//!
//! Traversal is plain depth-first recursion, so stack use grows with tree
//! depth. Documents parsed by `serde_json` are capped at 128 levels, which
//! keeps CLI input well inside the default stack; callers building deeper
//! trees by hand own that limit.
//!
//! Any leaf failure aborts the whole call. There are no partial results.

use serde_json::{Map, Value};
use tracing::debug;

use super::value::ValueCodec;
use crate::errors::Result;

/// Encrypts and decrypts entire [`Value`] trees.
#[derive(Debug)]
pub struct TreeCodec {
    values: ValueCodec,
}

impl TreeCodec {
    pub fn new(values: ValueCodec) -> Self {
        Self { values }
    }

    /// Validate hex key material and build a tree codec.
    pub fn from_hex(key_hex: &str, nonce_hex: &str) -> Result<Self> {
        ValueCodec::from_hex(key_hex, nonce_hex).map(Self::new)
    }

    /// The scalar codec used for each leaf.
    pub fn value_codec(&self) -> &ValueCodec {
        &self.values
    }

    /// Replace every scalar leaf with its wire string.
    pub fn encrypt_tree(&self, tree: &Value) -> Result<Value> {
        let mut leaves = 0usize;
        let encrypted = self.encrypt_node(tree, &mut leaves)?;
        debug!(leaves, "encrypted tree");
        Ok(encrypted)
    }

    /// Replace every wire string with its recovered scalar.
    ///
    /// Strings without the wire shape and all non-string scalars are
    /// returned unchanged.
    pub fn decrypt_tree(&self, tree: &Value) -> Result<Value> {
        let mut strings = 0usize;
        let decrypted = self.decrypt_node(tree, &mut strings)?;
        debug!(strings, "decrypted tree");
        Ok(decrypted)
    }

    fn encrypt_node(&self, node: &Value, leaves: &mut usize) -> Result<Value> {
        match node {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.encrypt_node(item, leaves)?);
                }
                Ok(Value::Array(out))
            }
            Value::Object(entries) => {
                let mut out = Map::with_capacity(entries.len());
                for (key, item) in entries {
                    out.insert(key.clone(), self.encrypt_node(item, leaves)?);
                }
                Ok(Value::Object(out))
            }
            scalar => {
                *leaves += 1;
                self.values.encrypt(scalar).map(Value::String)
            }
        }
    }

    fn decrypt_node(&self, node: &Value, strings: &mut usize) -> Result<Value> {
        match node {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.decrypt_node(item, strings)?);
                }
                Ok(Value::Array(out))
            }
            Value::Object(entries) => {
                let mut out = Map::with_capacity(entries.len());
                for (key, item) in entries {
                    out.insert(key.clone(), self.decrypt_node(item, strings)?);
                }
                Ok(Value::Object(out))
            }
            Value::String(s) => {
                *strings += 1;
                self.values.decrypt_str(s)
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(node.clone()),
        }
    }
}
