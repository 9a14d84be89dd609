//! CLI entry point for jats-article.

use jats_article::cli;
use jats_article::config::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

fn main() {
    // Respect RUST_LOG, falling back to warnings only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
