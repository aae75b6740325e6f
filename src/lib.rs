pub mod cli;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod logging;

pub use codec::{Codec, TreeCodec, ValueCodec, WireString};
pub use crypto::KeyMaterial;
pub use errors::{JsonSealError, Result};
