//! The rook command-line entry point.

use std::io::{self, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use rook_cli::{bootstrap, output};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let registry = match bootstrap() {
        Ok(registry) => registry,
        Err(e) => {
            output::error(&e);
            return ExitCode::FAILURE;
        }
    };

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let result = rook::dispatch(
        &registry,
        &argv,
        &mut stdin.lock(),
        &mut stdout,
        &mut stderr,
    );
    let _ = stdout.flush();

    // Console results map to {0, 1, -1}; the shell sees -1 as 255.
    ExitCode::from(result.code() as u8)
}
