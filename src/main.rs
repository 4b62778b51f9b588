//! content-schema CLI entry point
//!
//! Installs logging (stderr, filtered by `RUST_LOG`), delegates to the CLI
//! module and exits non-zero on failure.

use content_schema::cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
