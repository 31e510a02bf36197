use serde::{Deserialize, Serialize};

use crate::validator::{Sample, Validate};

/// Three-axis reading used for position and the inertial sensors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn sample(&self) -> Sample {
        Sample::group(vec![
            ("x", Sample::scalar(self.x)),
            ("y", Sample::scalar(self.y)),
            ("z", Sample::scalar(self.z)),
        ])
    }
}

/// Ambient weather block, nested inside [`VehicleState`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Weather {
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineStatus {
    On,
    Off,
}

impl std::fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineStatus::On => write!(f, "ON"),
            EngineStatus::Off => write!(f, "OFF"),
        }
    }
}

/// Complete vehicle-state snapshot shared between the producer and consumer
/// tasks.
///
/// A snapshot is replaced wholesale on every producer tick, never merged
/// field by field, so a consumer holding one always sees an internally
/// consistent record. Invariants: `fuel_level` stays within `[0, 100]` and
/// is non-increasing across ticks of a single source; every physical scalar
/// is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub altitude: f64,
    pub speed: f64,
    pub position: Vec3,
    pub temperature: f64,
    pub pressure: f64,
    pub gyro: Vec3,
    pub accelerometer: Vec3,
    pub magnetometer: Vec3,
    pub weather: Weather,
    pub fuel_level: f64,
    pub engine_status: EngineStatus,
    pub oil_pressure: f64,
    pub hydraulic_pressure: f64,
    pub battery_temperature: f64,
    pub system_voltage: f64,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            altitude: 0.0,
            speed: 0.0,
            position: Vec3::default(),
            temperature: 0.0,
            pressure: 0.0,
            gyro: Vec3::default(),
            accelerometer: Vec3::default(),
            magnetometer: Vec3::default(),
            weather: Weather::default(),
            fuel_level: 100.0,
            engine_status: EngineStatus::On,
            oil_pressure: 0.0,
            hydraulic_pressure: 0.0,
            battery_temperature: 0.0,
            system_voltage: 0.0,
        }
    }
}

impl Validate for VehicleState {
    fn sample(&self) -> Sample {
        Sample::group(vec![
            ("altitude", Sample::scalar(self.altitude)),
            ("speed", Sample::scalar(self.speed)),
            ("position", self.position.sample()),
            ("temperature", Sample::scalar(self.temperature)),
            ("pressure", Sample::scalar(self.pressure)),
            ("gyro", self.gyro.sample()),
            ("accelerometer", self.accelerometer.sample()),
            ("magnetometer", self.magnetometer.sample()),
            (
                "weather",
                Sample::group(vec![
                    ("wind_speed", Sample::scalar(self.weather.wind_speed)),
                    ("wind_direction", Sample::scalar(self.weather.wind_direction)),
                    ("humidity", Sample::scalar(self.weather.humidity)),
                ]),
            ),
            ("fuel_level", Sample::scalar(self.fuel_level)),
            ("engine_status", Sample::Other),
            ("oil_pressure", Sample::scalar(self.oil_pressure)),
            ("hydraulic_pressure", Sample::scalar(self.hydraulic_pressure)),
            ("battery_temperature", Sample::scalar(self.battery_temperature)),
            ("system_voltage", Sample::scalar(self.system_voltage)),
        ])
    }
}
