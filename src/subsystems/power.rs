use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Subsystem, SubsystemId, TickError};
use crate::state::VehicleState;
use crate::validator::{self, Sample, Validate};

const MIN_POWER_DRAW_W: f64 = 0.1;
const MAX_POWER_DRAW_W: f64 = 5.0;
// Battery percentage drained per watt drawn in one tick.
const DRAW_SCALE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerStatus {
    pub battery_level: f64,
    pub power_draw: f64,
}

impl Validate for PowerStatus {
    fn sample(&self) -> Sample {
        Sample::group(vec![
            ("battery_level", Sample::scalar(self.battery_level)),
            ("power_draw", Sample::scalar(self.power_draw)),
        ])
    }
}

/// Battery model: each tick draws a random load and drains the battery
/// accordingly. The level is monotonically non-increasing and clamps at
/// zero.
#[derive(Debug)]
pub struct PowerManagement {
    status: PowerStatus,
    rng: SmallRng,
}

impl PowerManagement {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            status: PowerStatus {
                battery_level: 100.0,
                power_draw: 0.0,
            },
            rng,
        }
    }

    pub fn status(&self) -> PowerStatus {
        self.status
    }
}

impl Subsystem for PowerManagement {
    fn id(&self) -> SubsystemId {
        SubsystemId::Power
    }

    fn tick(&mut self, _snapshot: &VehicleState) -> Result<(), TickError> {
        self.status.power_draw = self.rng.random_range(MIN_POWER_DRAW_W..=MAX_POWER_DRAW_W);
        self.status.battery_level =
            (self.status.battery_level - self.status.power_draw * DRAW_SCALE).max(0.0);
        validator::audit("power management", &self.status);
        Ok(())
    }
}
