//! Logging setup and the verbose-mode switch.

use tracing_subscriber::EnvFilter;

/// Diagnostic settings handed to each component at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Log every zone match and key event at info level.
    pub verbose: bool,
}

impl Diagnostics {
    pub fn verbose() -> Self {
        Self { verbose: true }
    }

    /// Default filter directive when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> &'static str {
        if self.verbose {
            "hotcorners=debug"
        } else {
            "hotcorners=info"
        }
    }
}

/// Logs at info level in verbose mode and at trace level otherwise.
macro_rules! diag {
    ($diagnostics:expr, $($arg:tt)+) => {
        if $diagnostics.verbose {
            tracing::info!($($arg)+)
        } else {
            tracing::trace!($($arg)+)
        }
    };
}

pub(crate) use diag;

/// Installs the global fmt subscriber.
pub fn init_logging(diagnostics: Diagnostics) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(diagnostics.default_directive())),
        )
        .init();
}
