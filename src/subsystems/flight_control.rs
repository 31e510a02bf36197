use serde::{Deserialize, Serialize};

use super::{Subsystem, SubsystemId, TickError};
use crate::state::VehicleState;
use crate::validator::{self, Sample, Validate};

/// Attitude commands derived from the latest snapshot each tick. Owned
/// exclusively by [`FlightControl`]; no other subsystem mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlCommands {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
}

impl Validate for ControlCommands {
    fn sample(&self) -> Sample {
        Sample::group(vec![
            ("pitch", Sample::scalar(self.pitch)),
            ("roll", Sample::scalar(self.roll)),
            ("yaw", Sample::scalar(self.yaw)),
        ])
    }
}

#[derive(Debug, Default)]
pub struct FlightControl {
    commands: ControlCommands,
}

impl FlightControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> ControlCommands {
        self.commands
    }

    // The three maps below are placeholder linear control laws, kept
    // bit-for-bit stable for downstream consumers. Replace all three
    // together when a real control loop lands.
    fn calculate_pitch(snapshot: &VehicleState) -> f64 {
        snapshot.altitude / 10_000.0
    }

    fn calculate_roll(snapshot: &VehicleState) -> f64 {
        snapshot.speed / 800.0
    }

    fn calculate_yaw(snapshot: &VehicleState) -> f64 {
        snapshot.position.x / 180.0
    }
}

impl Subsystem for FlightControl {
    fn id(&self) -> SubsystemId {
        SubsystemId::FlightControl
    }

    fn tick(&mut self, snapshot: &VehicleState) -> Result<(), TickError> {
        self.commands = ControlCommands {
            pitch: Self::calculate_pitch(snapshot),
            roll: Self::calculate_roll(snapshot),
            yaw: Self::calculate_yaw(snapshot),
        };
        validator::audit("flight control", &self.commands);
        Ok(())
    }
}
