//! Vehicle-state producers.
//!
//! The mission computer consumes complete [`VehicleState`] snapshots from a
//! [`StateSource`]. The [`SensorSuite`] shipped here redraws every field
//! from its plausible range as a stand-in for a real sensor-fusion
//! pipeline; a production deployment swaps in a telemetry feed behind the
//! same contract.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::state::{EngineStatus, Vec3, VehicleState, Weather};

#[derive(Debug, Error)]
pub enum SourceError {
    /// The upstream feed produced nothing this tick.
    #[error("sensor bus dropout")]
    Dropout,
}

/// One tick of state production. Implementations own whatever continuity
/// they need between ticks (fuel remaining, filter state, bus handles).
pub trait StateSource: Send {
    fn produce(&mut self) -> Result<VehicleState, SourceError>;
}

/// Randomized sensor stand-in. Fuel is the one field with memory: it burns
/// down from the suite's previous reading and clamps at zero, so the
/// published fuel level is monotonically non-increasing.
#[derive(Debug)]
pub struct SensorSuite {
    rng: SmallRng,
    fuel_level: f64,
    dropout_rate: f64,
}

impl SensorSuite {
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_os_rng())
    }

    /// Deterministic suite for replayable simulations and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            fuel_level: 100.0,
            dropout_rate: 0.0,
        }
    }

    /// Probability that a tick fails with [`SourceError::Dropout`] instead
    /// of producing. Clamped to `[0, 1]`.
    pub fn with_dropout(mut self, rate: f64) -> Self {
        self.dropout_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn fuel_level(&self) -> f64 {
        self.fuel_level
    }
}

impl Default for SensorSuite {
    fn default() -> Self {
        Self::new()
    }
}

impl StateSource for SensorSuite {
    fn produce(&mut self) -> Result<VehicleState, SourceError> {
        if self.dropout_rate > 0.0 && self.rng.random_bool(self.dropout_rate) {
            return Err(SourceError::Dropout);
        }

        self.fuel_level = (self.fuel_level - self.rng.random_range(0.01..=0.1)).max(0.0);

        Ok(VehicleState {
            altitude: self.rng.random_range(1000.0..=10_000.0),
            speed: self.rng.random_range(200.0..=800.0),
            position: Vec3::new(
                self.rng.random_range(-180.0..=180.0),
                self.rng.random_range(-90.0..=90.0),
                self.rng.random_range(0.0..=10_000.0),
            ),
            temperature: self.rng.random_range(-50.0..=50.0),
            pressure: self.rng.random_range(950.0..=1050.0),
            gyro: Vec3::new(
                self.rng.random_range(-180.0..=180.0),
                self.rng.random_range(-180.0..=180.0),
                self.rng.random_range(-180.0..=180.0),
            ),
            accelerometer: Vec3::new(
                self.rng.random_range(-10.0..=10.0),
                self.rng.random_range(-10.0..=10.0),
                self.rng.random_range(-10.0..=10.0),
            ),
            magnetometer: Vec3::new(
                self.rng.random_range(-100.0..=100.0),
                self.rng.random_range(-100.0..=100.0),
                self.rng.random_range(-100.0..=100.0),
            ),
            weather: Weather {
                wind_speed: self.rng.random_range(0.0..=100.0),
                wind_direction: self.rng.random_range(0.0..=360.0),
                humidity: self.rng.random_range(0.0..=100.0),
            },
            fuel_level: self.fuel_level,
            engine_status: EngineStatus::On,
            oil_pressure: self.rng.random_range(20.0..=100.0),
            hydraulic_pressure: self.rng.random_range(1000.0..=3000.0),
            battery_temperature: self.rng.random_range(20.0..=50.0),
            system_voltage: self.rng.random_range(24.0..=28.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{self, Validate};

    #[test]
    fn produced_state_stays_in_documented_ranges() {
        let mut suite = SensorSuite::seeded(1);
        for _ in 0..200 {
            let state = suite.produce().expect("no dropout configured");
            assert!((1000.0..=10_000.0).contains(&state.altitude));
            assert!((200.0..=800.0).contains(&state.speed));
            assert!((-180.0..=180.0).contains(&state.position.x));
            assert!((-90.0..=90.0).contains(&state.position.y));
            assert!((0.0..=10_000.0).contains(&state.position.z));
            assert!((950.0..=1050.0).contains(&state.pressure));
            assert!((20.0..=100.0).contains(&state.oil_pressure));
            assert!((24.0..=28.0).contains(&state.system_voltage));
            assert!((0.0..=100.0).contains(&state.fuel_level));
        }
    }

    #[test]
    fn fuel_level_is_monotonically_non_increasing() {
        let mut suite = SensorSuite::seeded(2);
        let mut previous = 100.0;
        for _ in 0..500 {
            let state = suite.produce().expect("no dropout configured");
            assert!(state.fuel_level <= previous);
            assert!(state.fuel_level >= 0.0);
            previous = state.fuel_level;
        }
    }

    #[test]
    fn fuel_level_clamps_at_zero() {
        let mut suite = SensorSuite::seeded(3);
        // Burn averages ~0.055 per tick; 5000 ticks drains any tank.
        for _ in 0..5000 {
            let _ = suite.produce();
        }
        assert_eq!(suite.fuel_level(), 0.0);
        let state = suite.produce().expect("no dropout configured");
        assert_eq!(state.fuel_level, 0.0);
    }

    #[test]
    fn full_dropout_always_fails() {
        let mut suite = SensorSuite::seeded(4).with_dropout(1.0);
        for _ in 0..10 {
            assert!(matches!(suite.produce(), Err(SourceError::Dropout)));
        }
    }

    #[test]
    fn produced_state_passes_bounds_check() {
        let mut suite = SensorSuite::seeded(5);
        for _ in 0..100 {
            let state = suite.produce().expect("no dropout configured");
            assert!(validator::in_bounds(&state.sample()));
        }
    }

    #[test]
    fn seeded_suites_replay_identically() {
        let mut a = SensorSuite::seeded(42);
        let mut b = SensorSuite::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.produce().unwrap(), b.produce().unwrap());
        }
    }
}
