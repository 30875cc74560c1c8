// src/logging.rs
// =============================================================================
// Sets up structured logging with tracing.
//
// Logs go to stderr so that stdout only carries the tree, the sitemap or the
// JSON report. RUST_LOG wins over the --verbose flag when it is set, e.g.
//
//   RUST_LOG=sitemapper=debug sitemapper crawl https://example.com
// =============================================================================

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
