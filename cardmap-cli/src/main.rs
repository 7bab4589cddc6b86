//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use cardmap_cli::CliError;

fn main() {
    match cardmap_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("cardmap: {err}");
            std::process::exit(1);
        }
    }
}
