use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Subsystem, SubsystemId, TickError};
use crate::state::VehicleState;

pub const HIGH_ALTITUDE_THRESHOLD: f64 = 9000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightMode {
    Normal,
    HighAltitude,
}

impl std::fmt::Display for FlightMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlightMode::Normal => write!(f, "NORMAL"),
            FlightMode::HighAltitude => write!(f, "HIGH_ALTITUDE"),
        }
    }
}

/// Derived flight-mode state machine over the shared altitude. Transitions
/// fire only on an actual mode change; re-reading the same side of the
/// threshold is silent.
#[derive(Debug)]
pub struct ModeMonitor {
    mode: FlightMode,
    transition_count: u32,
}

impl ModeMonitor {
    pub fn new() -> Self {
        Self {
            mode: FlightMode::Normal,
            transition_count: 0,
        }
    }

    pub fn mode(&self) -> FlightMode {
        self.mode
    }

    /// Number of mode changes observed since startup.
    pub fn transition_count(&self) -> u32 {
        self.transition_count
    }

    fn transition(&mut self, next: FlightMode) {
        self.mode = next;
        self.transition_count += 1;
        info!(mode = %self.mode, "flight mode changed");
    }
}

impl Default for ModeMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Subsystem for ModeMonitor {
    fn id(&self) -> SubsystemId {
        SubsystemId::ModeMonitor
    }

    fn tick(&mut self, snapshot: &VehicleState) -> Result<(), TickError> {
        if snapshot.altitude > HIGH_ALTITUDE_THRESHOLD && self.mode != FlightMode::HighAltitude {
            self.transition(FlightMode::HighAltitude);
        } else if snapshot.altitude <= HIGH_ALTITUDE_THRESHOLD && self.mode != FlightMode::Normal {
            self.transition(FlightMode::Normal);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_altitude(altitude: f64) -> VehicleState {
        VehicleState {
            altitude,
            ..VehicleState::default()
        }
    }

    #[test]
    fn crossing_the_threshold_switches_modes() {
        let mut monitor = ModeMonitor::new();
        monitor.tick(&at_altitude(9500.0)).unwrap();
        assert_eq!(monitor.mode(), FlightMode::HighAltitude);
        monitor.tick(&at_altitude(8000.0)).unwrap();
        assert_eq!(monitor.mode(), FlightMode::Normal);
    }

    #[test]
    fn repeated_readings_on_one_side_log_exactly_one_transition() {
        let mut monitor = ModeMonitor::new();
        for _ in 0..10 {
            monitor.tick(&at_altitude(9500.0)).unwrap();
        }
        assert_eq!(monitor.mode(), FlightMode::HighAltitude);
        assert_eq!(monitor.transition_count(), 1);
    }

    #[test]
    fn threshold_altitude_counts_as_normal() {
        let mut monitor = ModeMonitor::new();
        monitor.tick(&at_altitude(9500.0)).unwrap();
        monitor.tick(&at_altitude(HIGH_ALTITUDE_THRESHOLD)).unwrap();
        assert_eq!(monitor.mode(), FlightMode::Normal);
    }

    #[test]
    fn startup_at_normal_altitude_stays_silent() {
        let mut monitor = ModeMonitor::new();
        for _ in 0..5 {
            monitor.tick(&at_altitude(1000.0)).unwrap();
        }
        assert_eq!(monitor.transition_count(), 0);
    }
}
