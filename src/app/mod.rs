//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the fill-level monitor:
//! the sampling cycle, threshold notification and manual reset.  All
//! interaction with randomness, time and output happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable with
//! scripted inputs.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
