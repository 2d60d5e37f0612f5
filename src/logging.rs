//! Tracing subscriber setup for the binary.
//!
//! `PRISMA_JSON_LOG` takes precedence over `RUST_LOG`; both use the usual
//! `EnvFilter` syntax. Defaults to `info`. Output goes to stderr so stdout stays
//! free for `--out`-less runs.
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV: &str = "PRISMA_JSON_LOG";

fn build_filter() -> EnvFilter {
    let directives = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    EnvFilter::builder().parse_lossy(directives)
}

pub fn init_tracing() {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();
    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(build_filter())
        .with(layer)
        .try_init();
}
