//! Opt-in tracing setup.
//!
//! The library itself only emits `tracing` events; nothing here is
//! installed automatically. Embedders that want console output call
//! [`init`] (or [`try_init`] when another subscriber may already be
//! registered).

use std::io::IsTerminal;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Whether formatted output carries ANSI color codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatterMode {
    /// Detect TTY capability via `stderr.is_terminal()`.
    #[default]
    Auto,
    /// Always include color codes.
    Colored,
    /// Never include color codes (logs, files).
    Plain,
}

impl FormatterMode {
    pub fn is_colored(&self) -> bool {
        match self {
            FormatterMode::Auto => std::io::stderr().is_terminal(),
            FormatterMode::Colored => true,
            FormatterMode::Plain => false,
        }
    }
}

/// Install a fmt subscriber filtered by `RUST_LOG`, defaulting to
/// `error,vargraph=info`. Panics if a global subscriber is already set;
/// use [`try_init`] in that situation.
pub fn init(mode: FormatterMode) {
    try_init(mode).expect("global tracing subscriber already installed");
}

/// Fallible variant of [`init`].
pub fn try_init(mode: FormatterMode) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("error,vargraph=info"))
        .unwrap_or_default();
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(mode.is_colored());
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
}
