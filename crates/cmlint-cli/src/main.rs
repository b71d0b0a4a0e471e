//! cmlint entry point.
//!
//! ```bash
//! cmlint CMakeLists.txt src/CMakeLists.txt
//! RUST_LOG=cmlint_kernel=debug cmlint -l CMakeLists.txt
//! ```

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cmlint_cli::{Cli, Outcome};

fn main() -> ExitCode {
    // Respects RUST_LOG; quiet unless something is off.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let color = std::io::stdout().is_terminal();

    let mut out = std::io::stdout().lock();
    let mut err = std::io::stderr().lock();
    match cmlint_cli::run(&cli, color, &mut out, &mut err) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            eprintln!("cmlint: {e:#}");
            Outcome::Error.into()
        }
    }
}
