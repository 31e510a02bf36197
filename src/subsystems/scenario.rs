use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Subsystem, SubsystemId, TickError};
use crate::journal::Journals;
use crate::state::VehicleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scenario {
    NormalFlight,
    EngineFailure,
    HydraulicFailure,
    ExtremeWeather,
    NavigationError,
    LowFuel,
}

impl Scenario {
    pub const ALL: [Scenario; 6] = [
        Scenario::NormalFlight,
        Scenario::EngineFailure,
        Scenario::HydraulicFailure,
        Scenario::ExtremeWeather,
        Scenario::NavigationError,
        Scenario::LowFuel,
    ];
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Scenario::NormalFlight => "Normal flight",
            Scenario::EngineFailure => "Engine failure",
            Scenario::HydraulicFailure => "Hydraulic system failure",
            Scenario::ExtremeWeather => "Extreme weather",
            Scenario::NavigationError => "Navigation system error",
            Scenario::LowFuel => "Low fuel",
        };
        f.write_str(name)
    }
}

/// Draws a named flight scenario each tick and journals it. Purely
/// observational: the drawn scenario never feeds back into the producers
/// as fault injection.
#[derive(Debug)]
pub struct ScenarioInjector {
    journals: Arc<Journals>,
    rng: SmallRng,
}

impl ScenarioInjector {
    pub fn new(journals: Arc<Journals>, rng: SmallRng) -> Self {
        Self { journals, rng }
    }
}

impl Subsystem for ScenarioInjector {
    fn id(&self) -> SubsystemId {
        SubsystemId::Scenario
    }

    fn tick(&mut self, _snapshot: &VehicleState) -> Result<(), TickError> {
        let scenario = Scenario::ALL[self.rng.random_range(0..Scenario::ALL.len())];
        self.journals.scenarios.append(scenario.to_string());
        debug!(%scenario, "scenario drawn");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn every_tick_journals_one_named_scenario() {
        let journals = Arc::new(Journals::new());
        let mut injector =
            ScenarioInjector::new(Arc::clone(&journals), SmallRng::seed_from_u64(1));
        let snapshot = VehicleState::default();
        let names: Vec<String> = Scenario::ALL.iter().map(Scenario::to_string).collect();

        for _ in 0..50 {
            injector.tick(&snapshot).unwrap();
        }

        let entries = journals.scenarios.entries();
        assert_eq!(entries.len(), 50);
        for entry in entries {
            assert!(names.contains(&entry.message));
        }
    }

    #[test]
    fn all_scenarios_eventually_appear() {
        let journals = Arc::new(Journals::new());
        let mut injector =
            ScenarioInjector::new(Arc::clone(&journals), SmallRng::seed_from_u64(2));
        let snapshot = VehicleState::default();
        for _ in 0..500 {
            injector.tick(&snapshot).unwrap();
        }
        let seen: std::collections::HashSet<String> = journals
            .scenarios
            .entries()
            .into_iter()
            .map(|entry| entry.message)
            .collect();
        assert_eq!(seen.len(), Scenario::ALL.len());
    }
}
