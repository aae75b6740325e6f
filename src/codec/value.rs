//! Scalar-level encryption to and from the wire format.
//!
//! An encrypted scalar is an ASCII string:
//!
//! ```text
//! <base64(ciphertext)>.<base64(16-byte GCM tag)>
//! ```
//!
//! There is no version byte, algorithm identifier, or embedded nonce; the
//! nonce comes from the codec's [`KeyMaterial`]. Base64 is the standard
//! alphabet with padding.
//!
//! Decryption recovers the scalar type from the plaintext text on a
//! best-effort basis (see [`recover_scalar`]). That recovery is lossy: a
//! string that reads `"42"` or `"true"` comes back as a number or a bool.

use std::borrow::Cow;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Number, Value};

use crate::crypto::{self, KeyMaterial};
use crate::errors::{JsonSealError, Result};

/// Base64 length of a 16-byte tag (with padding).
const ENCODED_TAG_LEN: usize = 24;

/// A string that has the shape of an encrypted scalar.
///
/// The shape is exactly one `.` splitting two non-empty segments. The one
/// exception is the encryption of the empty string, whose ciphertext
/// segment is empty; it is recognised only when the tag segment has the
/// exact encoded tag length.
///
/// Having the shape does not mean the segments are valid base64 or that
/// the tag verifies; a plaintext like `"Mr. Smith"` has the shape and will
/// fail in [`ValueCodec::decrypt_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireString<'a> {
    ciphertext: &'a str,
    tag: &'a str,
}

impl<'a> WireString<'a> {
    /// Split `input` into its two segments if it has the wire shape.
    pub fn parse(input: &'a str) -> Option<Self> {
        let (ciphertext, tag) = input.split_once('.')?;
        if tag.is_empty() || tag.contains('.') {
            return None;
        }
        if ciphertext.is_empty() && tag.len() != ENCODED_TAG_LEN {
            return None;
        }
        Some(Self { ciphertext, tag })
    }

    /// Returns `true` if `input` would be treated as cipher output.
    pub fn looks_encrypted(input: &str) -> bool {
        WireString::parse(input).is_some()
    }

    /// Encode raw ciphertext and tag into wire form.
    pub fn encode(ciphertext: &[u8], tag: &[u8]) -> String {
        format!("{}.{}", STANDARD.encode(ciphertext), STANDARD.encode(tag))
    }

    pub fn ciphertext(&self) -> &'a str {
        self.ciphertext
    }

    pub fn tag(&self) -> &'a str {
        self.tag
    }

    /// Base64-decode both segments.
    fn decode(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        let ciphertext = STANDARD.decode(self.ciphertext).map_err(|e| {
            JsonSealError::DecryptionFailed(format!("ciphertext segment is not base64: {e}"))
        })?;
        let tag = STANDARD.decode(self.tag).map_err(|e| {
            JsonSealError::DecryptionFailed(format!("tag segment is not base64: {e}"))
        })?;
        Ok((ciphertext, tag))
    }
}

/// Encrypts single scalars to wire strings and back.
#[derive(Debug)]
pub struct ValueCodec {
    material: KeyMaterial,
}

impl ValueCodec {
    /// Create a codec that owns `material`.
    pub fn new(material: KeyMaterial) -> Self {
        Self { material }
    }

    /// Validate hex key material and create a codec from it.
    pub fn from_hex(key_hex: &str, nonce_hex: &str) -> Result<Self> {
        KeyMaterial::from_hex(key_hex, nonce_hex).map(Self::new)
    }

    /// Encrypt one scalar (`null`, bool, number, or string).
    ///
    /// Arrays and objects are not scalars and are rejected with
    /// `EncryptionFailed`.
    pub fn encrypt(&self, value: &Value) -> Result<String> {
        let text = canonical_text(value)?;
        let (ciphertext, tag) = crypto::seal(&self.material, text.as_bytes())?;
        Ok(WireString::encode(&ciphertext, &tag))
    }

    /// Decrypt a value produced by [`encrypt`](Self::encrypt).
    ///
    /// Only strings can be cipher output: every other value is returned
    /// unchanged.
    pub fn decrypt(&self, value: &Value) -> Result<Value> {
        match value {
            Value::String(s) => self.decrypt_str(s),
            other => Ok(other.clone()),
        }
    }

    /// Decrypt a string, or return it unchanged if it lacks the wire shape.
    ///
    /// A string with the wire shape that fails base64 decoding or tag
    /// verification is an error, never a silent pass-through.
    pub fn decrypt_str(&self, input: &str) -> Result<Value> {
        let Some(wire) = WireString::parse(input) else {
            tracing::trace!(len = input.len(), "string lacks wire shape, passing through");
            return Ok(Value::String(input.to_owned()));
        };

        let (ciphertext, tag) = wire.decode()?;
        let plaintext = crypto::open(&self.material, &ciphertext, &tag)?;
        let text = String::from_utf8(plaintext).map_err(|_| {
            JsonSealError::DecryptionFailed("decrypted bytes are not valid UTF-8".into())
        })?;

        Ok(recover_scalar(&text))
    }
}

/// Render a scalar as the text that gets encrypted.
///
/// `null` → `"null"`, booleans → `"true"`/`"false"`, numbers in their
/// standard decimal form, strings unchanged.
pub fn canonical_text(value: &Value) -> Result<Cow<'_, str>> {
    match value {
        Value::Null => Ok(Cow::Borrowed("null")),
        Value::Bool(true) => Ok(Cow::Borrowed("true")),
        Value::Bool(false) => Ok(Cow::Borrowed("false")),
        Value::Number(n) => Ok(Cow::Owned(n.to_string())),
        Value::String(s) => Ok(Cow::Borrowed(s.as_str())),
        Value::Array(_) | Value::Object(_) => Err(JsonSealError::EncryptionFailed(
            "only scalar values can be encrypted, got a container".into(),
        )),
    }
}

/// Best-effort type recovery for decrypted text.
///
/// Priority: literal `null`, then literal `true`/`false`, then a finite
/// number (after trimming; blank text is never a number), else the text
/// itself as a string.
pub fn recover_scalar(text: &str) -> Value {
    match text {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match parse_number(text) {
            Some(n) => Value::Number(n),
            None => Value::String(text.to_owned()),
        },
    }
}

fn parse_number(text: &str) -> Option<Number> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Number::from(i));
    }
    if let Ok(u) = trimmed.parse::<u64>() {
        return Some(Number::from(u));
    }
    // `from_f64` rejects NaN and infinities.
    trimmed.parse::<f64>().ok().and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::TAG_LEN;
    use serde_json::json;

    fn codec() -> ValueCodec {
        ValueCodec::from_hex(&"ab".repeat(32), &"cd".repeat(16)).unwrap()
    }

    // -- canonical text --------------------------------------------------

    #[test]
    fn canonical_text_of_scalars() {
        assert_eq!(canonical_text(&json!(null)).unwrap(), "null");
        assert_eq!(canonical_text(&json!(true)).unwrap(), "true");
        assert_eq!(canonical_text(&json!(false)).unwrap(), "false");
        assert_eq!(canonical_text(&json!(42)).unwrap(), "42");
        assert_eq!(canonical_text(&json!(-7)).unwrap(), "-7");
        assert_eq!(canonical_text(&json!(1.5)).unwrap(), "1.5");
        assert_eq!(canonical_text(&json!("hi")).unwrap(), "hi");
    }

    #[test]
    fn canonical_text_rejects_containers() {
        assert!(canonical_text(&json!([])).is_err());
        assert!(canonical_text(&json!({})).is_err());
    }

    // -- type recovery ---------------------------------------------------

    #[test]
    fn recover_literals() {
        assert_eq!(recover_scalar("null"), json!(null));
        assert_eq!(recover_scalar("true"), json!(true));
        assert_eq!(recover_scalar("false"), json!(false));
    }

    #[test]
    fn recover_literals_are_exact() {
        assert_eq!(recover_scalar("True"), json!("True"));
        assert_eq!(recover_scalar(" null"), json!(" null"));
    }

    #[test]
    fn recover_numbers() {
        assert_eq!(recover_scalar("42"), json!(42));
        assert_eq!(recover_scalar("-3"), json!(-3));
        assert_eq!(recover_scalar("2.25"), json!(2.25));
        assert_eq!(recover_scalar("18446744073709551615"), json!(u64::MAX));
        assert_eq!(recover_scalar(" 7 "), json!(7));
    }

    #[test]
    fn blank_text_is_not_a_number() {
        assert_eq!(recover_scalar(""), json!(""));
        assert_eq!(recover_scalar("   "), json!("   "));
    }

    #[test]
    fn non_finite_text_is_a_string() {
        assert_eq!(recover_scalar("inf"), json!("inf"));
        assert_eq!(recover_scalar("NaN"), json!("NaN"));
    }

    #[test]
    fn ordinary_text_is_a_string() {
        assert_eq!(recover_scalar("hello"), json!("hello"));
        assert_eq!(recover_scalar("12abc"), json!("12abc"));
    }

    // -- wire shape ------------------------------------------------------

    #[test]
    fn wire_shape_requires_exactly_one_dot() {
        assert!(WireString::looks_encrypted("abc=.def="));
        assert!(!WireString::looks_encrypted("no-dot"));
        assert!(!WireString::looks_encrypted("Anytown.With.Dots"));
    }

    #[test]
    fn looks_encrypted_accepts_short_lived_input() {
        fn check(owned: String) -> bool {
            WireString::looks_encrypted(&owned)
        }
        assert!(check(String::from("abc=.def=")));
        assert!(!check(format!("{}.{}", "a", "b.c")));
    }

    #[test]
    fn wire_shape_rejects_empty_segments() {
        assert!(!WireString::looks_encrypted("."));
        assert!(!WireString::looks_encrypted("abc."));
        assert!(!WireString::looks_encrypted(".abc"));
    }

    #[test]
    fn wire_shape_accepts_empty_ciphertext_with_full_tag() {
        let wire = format!(".{}", "A".repeat(22) + "==");
        let parsed = WireString::parse(&wire).unwrap();
        assert_eq!(parsed.ciphertext(), "");
        assert_eq!(parsed.tag().len(), 24);
    }

    // -- encrypt / decrypt -----------------------------------------------

    #[test]
    fn encrypt_produces_wire_string() {
        let wire = codec().encrypt(&json!("hello")).unwrap();
        let parsed = WireString::parse(&wire).expect("wire shape");
        assert_eq!(STANDARD.decode(parsed.ciphertext()).unwrap().len(), 5);
        assert_eq!(STANDARD.decode(parsed.tag()).unwrap().len(), TAG_LEN);
    }

    #[test]
    fn scalar_roundtrips() {
        let c = codec();
        let scalars = [
            json!(null),
            json!(true),
            json!(false),
            json!(0),
            json!(-12),
            json!(3.5),
            json!("x"),
        ];
        for v in scalars {
            let wire = c.encrypt(&v).unwrap();
            assert_eq!(c.decrypt_str(&wire).unwrap(), v);
        }
    }

    #[test]
    fn empty_string_roundtrips() {
        let c = codec();
        let wire = c.encrypt(&json!("")).unwrap();
        assert!(wire.starts_with('.'));
        assert_eq!(c.decrypt_str(&wire).unwrap(), json!(""));
    }

    #[test]
    fn numeric_looking_string_recovers_as_number() {
        let c = codec();
        let wire = c.encrypt(&json!("42")).unwrap();
        assert_eq!(c.decrypt_str(&wire).unwrap(), json!(42));
    }

    #[test]
    fn boolean_looking_string_recovers_as_bool() {
        let c = codec();
        let wire = c.encrypt(&json!("true")).unwrap();
        assert_eq!(c.decrypt_str(&wire).unwrap(), json!(true));
    }

    #[test]
    fn plain_string_passes_through() {
        assert_eq!(codec().decrypt_str("plain").unwrap(), json!("plain"));
    }

    #[test]
    fn non_string_passes_through_decrypt() {
        let c = codec();
        assert_eq!(c.decrypt(&json!(5)).unwrap(), json!(5));
        assert_eq!(c.decrypt(&json!(false)).unwrap(), json!(false));
        assert_eq!(c.decrypt(&json!(null)).unwrap(), json!(null));
    }

    #[test]
    fn dotted_plaintext_with_bad_base64_fails() {
        let err = codec().decrypt_str("Mr. Smith").unwrap_err();
        assert!(matches!(err, JsonSealError::DecryptionFailed(_)));
    }

    #[test]
    fn dotted_base64_plaintext_fails_authentication() {
        let err = codec().decrypt_str("aGVsbG8=.d29ybGQ=").unwrap_err();
        assert!(matches!(err, JsonSealError::DecryptionFailed(_)));
    }

    #[test]
    fn encrypt_rejects_container() {
        let err = codec().encrypt(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, JsonSealError::EncryptionFailed(_)));
    }

    #[test]
    fn fixed_nonce_is_deterministic() {
        let c = codec();
        assert_eq!(
            c.encrypt(&json!("same")).unwrap(),
            c.encrypt(&json!("same")).unwrap()
        );
    }
}
