use serde::Serialize;

use super::{Subsystem, SubsystemId, TickError};
use crate::state::{Vec3, VehicleState};
use crate::validator::{self, Sample, Validate};

pub const DEFAULT_DESTINATION: Vec3 = Vec3::new(50.0, 50.0, 10_000.0);

/// The planned route: always exactly two waypoints, the current position
/// and the fixed destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteState {
    pub destination: Vec3,
    pub current_position: Vec3,
    pub route: Vec<Vec3>,
}

impl Validate for RouteState {
    fn sample(&self) -> Sample {
        Sample::group(vec![
            (
                "current_position",
                Sample::group(vec![
                    ("x", Sample::scalar(self.current_position.x)),
                    ("y", Sample::scalar(self.current_position.y)),
                    ("z", Sample::scalar(self.current_position.z)),
                ]),
            ),
            ("route", Sample::Other),
        ])
    }
}

#[derive(Debug)]
pub struct Navigation {
    state: RouteState,
}

impl Navigation {
    pub fn new(destination: Vec3) -> Self {
        Self {
            state: RouteState {
                destination,
                current_position: Vec3::default(),
                route: Vec::new(),
            },
        }
    }

    pub fn route(&self) -> RouteState {
        self.state.clone()
    }

    fn plan_route(&mut self) {
        self.state.route = vec![self.state.current_position, self.state.destination];
    }

    // Route following is intentionally absent: the simulation only
    // publishes the planned route, it never steers along it.
    fn follow_route(&self) {}
}

impl Subsystem for Navigation {
    fn id(&self) -> SubsystemId {
        SubsystemId::Navigation
    }

    fn tick(&mut self, snapshot: &VehicleState) -> Result<(), TickError> {
        self.state.current_position = snapshot.position;
        self.plan_route();
        self.follow_route();
        validator::audit("navigation", &self.state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_is_current_position_then_destination() {
        let mut navigation = Navigation::new(DEFAULT_DESTINATION);
        let snapshot = VehicleState {
            position: Vec3::new(10.0, 20.0, 3000.0),
            ..VehicleState::default()
        };

        navigation.tick(&snapshot).unwrap();

        let route = navigation.route();
        assert_eq!(route.current_position, Vec3::new(10.0, 20.0, 3000.0));
        assert_eq!(route.route.len(), 2);
        assert_eq!(route.route[0], route.current_position);
        assert_eq!(route.route[1], DEFAULT_DESTINATION);
    }

    #[test]
    fn route_is_replanned_every_tick() {
        let mut navigation = Navigation::new(DEFAULT_DESTINATION);
        for x in 0..5 {
            let snapshot = VehicleState {
                position: Vec3::new(f64::from(x), 0.0, 0.0),
                ..VehicleState::default()
            };
            navigation.tick(&snapshot).unwrap();
            let route = navigation.route();
            assert_eq!(route.route.len(), 2);
            assert_eq!(route.route[0].x, f64::from(x));
        }
    }
}
