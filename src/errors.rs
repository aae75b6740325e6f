use thiserror::Error;

/// All errors that can occur in JsonSeal.
///
/// None of the messages carry key, nonce, or plaintext bytes.
#[derive(Debug, Error)]
pub enum JsonSealError {
    // --- Core codec errors ---
    /// Bad or missing key/nonce. Fatal at construction; rebuild the codec.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — {0}")]
    DecryptionFailed(String),

    // --- Settings errors ---
    #[error("Settings file error: {0}")]
    SettingsError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for JsonSeal results.
pub type Result<T> = std::result::Result<T, JsonSealError>;
