//! `quill-bind`: resolve assignment targets in parser scope-event streams.

#![allow(clippy::print_stderr)]

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quill_cli::args::CliArgs;
use quill_cli::driver;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("QUILL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    match driver::run(&args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("quill-bind: {err:#}");
            std::process::exit(2);
        }
    }
}
