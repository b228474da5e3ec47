//! Utilities used in header hashing CLI applications

use std::io;
use std::panic;
use std::process::exit;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install a panic handler which exits on panics, rather than unwinding. Unwinding can leave
/// process-wide hashing state half-initialized for other threads.
pub fn set_exit_on_panic() {
    let default_panic_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        default_panic_hook(panic_info);
        exit(1);
    }));
}

/// Initialize logger that writes to stderr.
///
/// Filter is taken from `RUST_LOG` environment variable, `info` level is used by default.
pub fn init_logger() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}
