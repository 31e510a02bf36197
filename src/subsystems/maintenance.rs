use std::sync::Arc;

use super::{Subsystem, SubsystemId, TickError};
use crate::journal::Journals;
use crate::state::VehicleState;

const FUEL_FLOOR: f64 = 10.0;
const OIL_PRESSURE_FLOOR: f64 = 30.0;
const BATTERY_TEMP_CEILING: f64 = 45.0;
const VOLTAGE_FLOOR: f64 = 24.0;

/// Threshold watcher over the shared snapshot. Alerting is level-
/// triggered: every tick a threshold is still breached produces another
/// maintenance entry. Deduplication is a consumer concern.
#[derive(Debug)]
pub struct Maintenance {
    journals: Arc<Journals>,
}

impl Maintenance {
    pub fn new(journals: Arc<Journals>) -> Self {
        Self { journals }
    }
}

impl Subsystem for Maintenance {
    fn id(&self) -> SubsystemId {
        SubsystemId::Maintenance
    }

    fn tick(&mut self, snapshot: &VehicleState) -> Result<(), TickError> {
        if snapshot.fuel_level < FUEL_FLOOR {
            self.journals
                .maintenance
                .append("Fuel level low, schedule refueling.");
        }
        if snapshot.oil_pressure < OIL_PRESSURE_FLOOR {
            self.journals
                .maintenance
                .append("Oil pressure low, schedule maintenance.");
        }
        if snapshot.battery_temperature > BATTERY_TEMP_CEILING {
            self.journals
                .maintenance
                .append("Battery temperature high, schedule cooling.");
        }
        if snapshot.system_voltage < VOLTAGE_FLOOR {
            self.journals
                .maintenance
                .append("System voltage low, schedule check.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_snapshot() -> VehicleState {
        VehicleState {
            fuel_level: 80.0,
            oil_pressure: 60.0,
            battery_temperature: 30.0,
            system_voltage: 26.0,
            ..VehicleState::default()
        }
    }

    fn maintenance() -> (Maintenance, Arc<Journals>) {
        let journals = Arc::new(Journals::new());
        (Maintenance::new(Arc::clone(&journals)), journals)
    }

    #[test]
    fn healthy_snapshot_produces_no_alerts() {
        let (mut subsystem, journals) = maintenance();
        subsystem.tick(&healthy_snapshot()).unwrap();
        assert!(journals.maintenance.is_empty());
    }

    #[test]
    fn persistent_breach_realerts_every_tick() {
        let (mut subsystem, journals) = maintenance();
        let snapshot = VehicleState {
            oil_pressure: 25.0,
            ..healthy_snapshot()
        };
        for _ in 0..3 {
            subsystem.tick(&snapshot).unwrap();
        }
        let entries = journals.maintenance.entries();
        assert_eq!(entries.len(), 3);
        for entry in entries {
            assert_eq!(entry.message, "Oil pressure low, schedule maintenance.");
        }
    }

    #[test]
    fn each_breached_threshold_alerts_separately() {
        let (mut subsystem, journals) = maintenance();
        let snapshot = VehicleState {
            fuel_level: 5.0,
            oil_pressure: 20.0,
            battery_temperature: 50.0,
            system_voltage: 22.0,
            ..VehicleState::default()
        };
        subsystem.tick(&snapshot).unwrap();
        let messages: Vec<String> = journals
            .maintenance
            .entries()
            .into_iter()
            .map(|entry| entry.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Fuel level low, schedule refueling.",
                "Oil pressure low, schedule maintenance.",
                "Battery temperature high, schedule cooling.",
                "System voltage low, schedule check.",
            ]
        );
    }

    #[test]
    fn thresholds_are_strict_comparisons() {
        let (mut subsystem, journals) = maintenance();
        let snapshot = VehicleState {
            fuel_level: FUEL_FLOOR,
            oil_pressure: OIL_PRESSURE_FLOOR,
            battery_temperature: BATTERY_TEMP_CEILING,
            system_voltage: VOLTAGE_FLOOR,
            ..VehicleState::default()
        };
        subsystem.tick(&snapshot).unwrap();
        assert!(journals.maintenance.is_empty());
    }
}
