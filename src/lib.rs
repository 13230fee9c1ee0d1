//! BinSense monitor library.
//!
//! A single smart-container fill-level engine: periodic sampling,
//! status classification, threshold notifications and a bounded
//! notification history.  The hexagonal core lives in [`app`]; concrete
//! port implementations live in [`adapters`]; [`monitor::Monitor`] ties
//! the core to a [`sampler::Sampler`] behind a mutex.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod connection;
pub mod error;
pub mod fill;
pub mod monitor;
pub mod notifications;
pub mod sampler;
pub mod telemetry;

pub use error::{Error, Result};
pub use monitor::Monitor;
