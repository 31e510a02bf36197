//! # Avionics Mission Computer Simulator
//!
//! A flight-computer simulation library: independently clocked subsystem
//! tasks (flight control, navigation, built-in test, communications,
//! power, security, mode monitoring, maintenance, scenario injection)
//! read and update a shared vehicle-state snapshot, fed by a redundant
//! pair of sensor producers with silent failover.
//!
//! ## Features
//!
//! - **Concurrent subsystem tasks**: one periodic tokio task per unit,
//!   each on its own update rate
//! - **Consistent shared state**: snapshots replaced wholesale, never
//!   merged field by field
//! - **Redundant sensing**: a backup producer takes over the shared slot
//!   when the primary feed fails
//! - **Bounds auditing**: every subsystem validates its own output before
//!   trusting it
//! - **Append-only journals**: errors, maintenance alerts, threats,
//!   messages, scenarios and a flight recorder
//!
//! ## Quick Start
//!
//! ```no_run
//! use skybus::{ComputerConfig, MissionComputer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut computer = MissionComputer::new(ComputerConfig::default());
//!     computer.start();
//!
//!     let state = computer.current_state().await;
//!     println!("altitude: {:.0}", state.altitude);
//!
//!     computer.stop().await;
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`computer`] - supervisor owning tasks, shared state and failover
//! - [`source`] - state producers behind the [`source::StateSource`] seam
//! - [`subsystems`] - the periodically clocked units
//! - [`journal`] - append-only timestamped record stores
//! - [`validator`] - recursive output bounds checking
//! - [`state`] - the shared vehicle-state snapshot

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod computer;
pub mod journal;
pub mod source;
pub mod state;
pub mod subsystems;
pub mod validator;

// Re-export the main public types for convenience
pub use computer::{ComputerConfig, MissionComputer};
pub use state::{EngineStatus, Vec3, VehicleState, Weather};
pub use subsystems::{FlightMode, Subsystem, SubsystemId, ThreatLevel, TickError};
