use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Subsystem, SubsystemId, TickError};
use crate::journal::Journals;
use crate::state::VehicleState;
use crate::validator::{self, Sample, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

impl ThreatLevel {
    const ALL: [ThreatLevel; 3] = [ThreatLevel::Low, ThreatLevel::Medium, ThreatLevel::High];
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreatLevel::Low => write!(f, "LOW"),
            ThreatLevel::Medium => write!(f, "MEDIUM"),
            ThreatLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Threat monitoring simulation. Half the ticks detect something and
/// redraw the threat level uniformly; the other half leave the state
/// untouched. Every detection is appended to the shared threat journal.
#[derive(Debug)]
pub struct Security {
    threat_level: ThreatLevel,
    journals: Arc<Journals>,
    rng: SmallRng,
}

impl Security {
    pub fn new(journals: Arc<Journals>, rng: SmallRng) -> Self {
        Self {
            threat_level: ThreatLevel::Low,
            journals,
            rng,
        }
    }

    pub fn threat_level(&self) -> ThreatLevel {
        self.threat_level
    }
}

impl Validate for Security {
    fn sample(&self) -> Sample {
        Sample::group(vec![("threat_level", Sample::Other)])
    }
}

impl Subsystem for Security {
    fn id(&self) -> SubsystemId {
        SubsystemId::Security
    }

    fn tick(&mut self, _snapshot: &VehicleState) -> Result<(), TickError> {
        if self.rng.random_bool(0.5) {
            let index = self.rng.random_range(0..ThreatLevel::ALL.len());
            self.threat_level = ThreatLevel::ALL[index];
            self.journals
                .threats
                .append(format!("Threat detected: level {}", self.threat_level));
            info!(level = %self.threat_level, "threat detected");
        }
        validator::audit("security", self);
        Ok(())
    }
}
