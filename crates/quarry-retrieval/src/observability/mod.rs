//! Subscriber setup and span constructors.

pub mod spans;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns false if a global subscriber was already installed.
pub fn init_tracing(json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .try_init()
    };
    installed.is_ok()
}
