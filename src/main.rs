use clap::Parser;
use jsonseal::cli::{commands, output, Cli, Commands};
use jsonseal::config::Settings;
use jsonseal::JsonSealError;

fn main() {
    let cli = Cli::parse();

    // Settings are read from the working directory.
    let settings = match std::env::current_dir()
        .map_err(JsonSealError::from)
        .and_then(|dir| Settings::load(&dir))
    {
        Ok(s) => s,
        Err(e) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    };

    let level = if cli.verbose {
        "debug"
    } else {
        settings.log_level.as_str()
    };
    if let Err(e) = jsonseal::logging::init(level) {
        output::warning(&e.to_string());
    }

    let result = match cli.command {
        Commands::Encrypt {
            ref input,
            ref output,
            compact,
        } => commands::encrypt::execute(
            &cli,
            &settings,
            input.as_deref(),
            output.as_deref(),
            compact,
        ),
        Commands::Decrypt {
            ref input,
            ref output,
            compact,
        } => commands::decrypt::execute(
            &cli,
            &settings,
            input.as_deref(),
            output.as_deref(),
            compact,
        ),
        Commands::Keygen => commands::keygen::execute(),
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
