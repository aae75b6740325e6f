//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::fs;
use std::io::{self, Read};

use clap::Parser;
use serde_json::Value;

use crate::codec::TreeCodec;
use crate::errors::{JsonSealError, Result};

/// JsonSeal CLI: shape-preserving JSON leaf encryption.
#[derive(Parser)]
#[command(
    name = "jsonseal",
    about = "Encrypt every leaf value of a JSON document, keeping its shape",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// AES-256 key as 64 hex characters
    #[arg(long, env = "JSONSEAL_KEY", hide_env_values = true, global = true)]
    pub key: Option<String>,

    /// GCM nonce as 32 hex characters
    #[arg(long, env = "JSONSEAL_NONCE", hide_env_values = true, global = true)]
    pub nonce: Option<String>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt every leaf of a JSON document
    Encrypt {
        /// Input file (reads stdin if omitted or "-")
        input: Option<String>,

        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Write compact JSON regardless of settings
        #[arg(long)]
        compact: bool,
    },

    /// Decrypt every encrypted leaf of a JSON document
    Decrypt {
        /// Input file (reads stdin if omitted or "-")
        input: Option<String>,

        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Write compact JSON regardless of settings
        #[arg(long)]
        compact: bool,
    },

    /// Generate a random key and nonce
    Keygen,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Build a tree codec from `--key`/`--nonce` (or their env vars).
pub fn build_codec(cli: &Cli) -> Result<TreeCodec> {
    let key = cli.key.as_deref().ok_or_else(|| {
        JsonSealError::ConfigurationError(
            "key is missing — pass --key or set JSONSEAL_KEY".into(),
        )
    })?;
    let nonce = cli.nonce.as_deref().ok_or_else(|| {
        JsonSealError::ConfigurationError(
            "nonce is missing — pass --nonce or set JSONSEAL_NONCE".into(),
        )
    })?;
    TreeCodec::from_hex(key, nonce)
}

/// Read and parse a JSON document from a file, or stdin for `None`/`"-"`.
pub fn read_json(input: Option<&str>) -> Result<Value> {
    let (source, contents) = match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            ("stdin", buf)
        }
        Some(path) => (path, fs::read_to_string(path)?),
    };

    serde_json::from_str(&contents).map_err(|e| {
        JsonSealError::SerializationError(format!("invalid JSON in {source}: {e}"))
    })
}

/// Serialize `value` to a file, or stdout for `None`.
pub fn write_json(value: &Value, output: Option<&str>, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| JsonSealError::SerializationError(e.to_string()))?;

    match output {
        Some(path) => fs::write(path, format!("{rendered}\n"))?,
        None => println!("{rendered}"),
    }
    Ok(())
}
