//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (a dashboard,
//! the simulation binary, a test) that the
//! [`MonitorService`](super::service::MonitorService) interprets and acts upon.

/// Commands that external callers can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Mark the container as emptied.  Subject to the floor guard when
    /// it is enforced.
    ManualReset,

    /// Switch the engine-enforced reset floor on or off at runtime.
    SetResetFloorEnforced(bool),
}
