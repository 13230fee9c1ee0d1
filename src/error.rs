//! Unified error types for the BinSense monitor.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! handling at the API boundary uniform.  All variants are `Copy` so they
//! can be handed across the sampler thread without allocation.

use core::fmt;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level monitor error
// ---------------------------------------------------------------------------

/// Every fallible operation in the monitor funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// The host cannot provide a periodic timer (thread spawn failed,
    /// zero period).  Fatal to `start()`.
    SchedulingUnavailable(&'static str),
    /// Manual reset rejected by the engine-enforced floor guard.
    /// No state was changed.
    ResetNotAllowed { percentage: f64, floor: f64 },
    /// The random source could not be initialised.
    Entropy(&'static str),
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
    /// A notification could not be constructed.
    Notification(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchedulingUnavailable(msg) => write!(f, "scheduling unavailable: {msg}"),
            Self::ResetNotAllowed { percentage, floor } => write!(
                f,
                "reset not allowed: fill level {percentage:.1}% is below the {floor:.0}% floor"
            ),
            Self::Entropy(msg) => write!(f, "entropy: {msg}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Notification(msg) => write!(f, "notification: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
