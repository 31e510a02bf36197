pub mod bite;
pub mod comms;
pub mod flight_control;
pub mod maintenance;
pub mod mode_monitor;
pub mod navigation;
pub mod power;
pub mod scenario;
pub mod security;

pub use bite::{BiteStatus, BuiltInTest};
pub use comms::Communication;
pub use flight_control::{ControlCommands, FlightControl};
pub use maintenance::Maintenance;
pub use mode_monitor::{FlightMode, ModeMonitor};
pub use navigation::{Navigation, RouteState};
pub use power::{PowerManagement, PowerStatus};
pub use scenario::{Scenario, ScenarioInjector};
pub use security::{Security, ThreatLevel};

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::SourceError;
use crate::state::VehicleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubsystemId {
    FlightControl,
    Navigation,
    BuiltInTest,
    Communication,
    Power,
    Security,
    ModeMonitor,
    Maintenance,
    Scenario,
}

impl SubsystemId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubsystemId::FlightControl => "Flight Control",
            SubsystemId::Navigation => "Navigation",
            SubsystemId::BuiltInTest => "BITE",
            SubsystemId::Communication => "Communication",
            SubsystemId::Power => "Power Management",
            SubsystemId::Security => "Security",
            SubsystemId::ModeMonitor => "Flight Mode",
            SubsystemId::Maintenance => "Maintenance",
            SubsystemId::Scenario => "Flight Scenario",
        }
    }
}

impl fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a subsystem cannot complete a tick. Caught at the task
/// boundary: the failure is appended to the shared error journal and the
/// task moves on to its next tick. No tick failure terminates a task.
#[derive(Debug, Error)]
pub enum TickError {
    #[error("sensor feed unavailable: {0}")]
    Source(#[from] SourceError),
    #[error("{0}")]
    Failed(String),
}

/// A periodically clocked unit owned by the mission computer.
///
/// Each implementor gets the latest complete state snapshot and performs
/// one bounded unit of work: compute an update, validate it against the
/// bounds policy, and publish to its own output or journal.
pub trait Subsystem: Send {
    fn id(&self) -> SubsystemId;

    fn tick(&mut self, snapshot: &VehicleState) -> Result<(), TickError>;
}
