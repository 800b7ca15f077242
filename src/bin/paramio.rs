//! Command-line runner for registered computations. See [`paramio::cli`].

use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout = std::io::stdout().lock();
    ExitCode::from(paramio::cli::run(std::env::args_os(), &mut stdout))
}
