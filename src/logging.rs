//! Diagnostic logging.
//!
//! Library code emits `tracing` events; the binary installs a subscriber
//! here.  The filter comes from `PASSVAULT_LOG` when set, otherwise
//! warnings only (debug with `--verbose`).  Output goes to stderr so it
//! never mixes with revealed secrets on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "PASSVAULT_LOG";

/// Install the global subscriber.  Calling it twice is harmless.
pub fn init(verbose: bool) {
    let fallback = if verbose {
        "passvault=debug"
    } else {
        "passvault=warn"
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
