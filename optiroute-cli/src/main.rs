//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use optiroute_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "fatal errors are reported on stderr before exiting"
)]
fn main() {
    match optiroute_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("optiroute: {err}");
            std::process::exit(1);
        }
    }
}
