//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (random source, clock, event sinks, config storage)
//! implement these traits.  The [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the domain core never touches the OS
//! directly and every source of nondeterminism can be scripted in tests.

use chrono::{DateTime, Local};

use crate::config::MonitorConfig;

/// Wall-clock instant used for every timestamp in the engine.
pub type Timestamp = DateTime<Local>;

// ───────────────────────────────────────────────────────────────
// Entropy port (driven adapter: random source → domain)
// ───────────────────────────────────────────────────────────────

/// Source of uniform random draws.
///
/// The fill-level and connection-health models are the only consumers.
/// Implementations must return values in `[0, 1)`; the models still
/// sanitise out-of-range draws so a faulty source cannot break the
/// clamp invariant.
pub trait EntropyPort {
    /// Next uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> f64;
}

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: clock → domain)
// ───────────────────────────────────────────────────────────────

/// Wall-clock time queries.
pub trait TimePort {
    /// Current local time.
    fn now(&self) -> Timestamp;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (log output, a
/// subscriber channel, a test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ config storage)
// ───────────────────────────────────────────────────────────────

/// Loads and persists monitor configuration.
///
/// Implementations MUST validate values (see [`MonitorConfig::validate`])
/// after loading and before persisting.  Invalid ranges are rejected with
/// [`ConfigError::ValidationFailed`], never silently clamped.
pub trait ConfigPort {
    /// Load configuration.  Returns [`ConfigError::NotFound`] when no
    /// stored configuration exists; callers fall back to defaults.
    fn load(&self) -> Result<MonitorConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations and config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No stored config found.
    NotFound,
    /// Stored config failed to deserialize.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
