//! `jsonseal encrypt` — encrypt every leaf of a JSON document.

use crate::cli::output;
use crate::cli::{build_codec, read_json, write_json, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `encrypt` command.
pub fn execute(
    cli: &Cli,
    settings: &Settings,
    input: Option<&str>,
    output_path: Option<&str>,
    compact: bool,
) -> Result<()> {
    // Validate key material before touching the input.
    let codec = build_codec(cli)?;

    let tree = read_json(input)?;
    let encrypted = codec.encrypt_tree(&tree)?;
    write_json(&encrypted, output_path, settings.pretty && !compact)?;

    // Only report when stdout is not carrying the document itself.
    if let Some(path) = output_path {
        output::success(&format!(
            "Encrypted {} to {path}",
            input.unwrap_or("stdin")
        ));
    }

    Ok(())
}
