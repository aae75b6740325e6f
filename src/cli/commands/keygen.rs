//! `jsonseal keygen` — print a fresh random key and nonce.
//!
//! Output is shell-friendly so it can be sourced or `eval`ed:
//!   JSONSEAL_KEY=<64 hex chars>
//!   JSONSEAL_NONCE=<32 hex chars>

use crate::cli::output;
use crate::crypto::KeyMaterial;
use crate::errors::Result;

/// Execute the `keygen` command.
pub fn execute() -> Result<()> {
    let material = KeyMaterial::generate();

    println!("JSONSEAL_KEY={}", material.key_hex().as_str());
    println!("JSONSEAL_NONCE={}", material.nonce_hex().as_str());

    output::warning(
        "The nonce is reused for every value under this key: equal plaintexts give equal ciphertexts.",
    );

    Ok(())
}
