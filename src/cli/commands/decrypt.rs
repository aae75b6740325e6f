//! `jsonseal decrypt` — decrypt every encrypted leaf of a JSON document.

use crate::cli::output;
use crate::cli::{build_codec, read_json, write_json, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `decrypt` command.
///
/// A single leaf that fails authentication aborts the whole document;
/// nothing is written in that case.
pub fn execute(
    cli: &Cli,
    settings: &Settings,
    input: Option<&str>,
    output_path: Option<&str>,
    compact: bool,
) -> Result<()> {
    let codec = build_codec(cli)?;

    let tree = read_json(input)?;
    let decrypted = codec.decrypt_tree(&tree)?;
    write_json(&decrypted, output_path, settings.pretty && !compact)?;

    if let Some(path) = output_path {
        output::success(&format!(
            "Decrypted {} to {path}",
            input.unwrap_or("stdin")
        ));
    }

    Ok(())
}
