use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Subsystem, SubsystemId, TickError};
use crate::journal::{Journal, Journals};
use crate::state::VehicleState;

/// Last-N retention for the unit's own failure log.
const ERROR_LOG_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiteStatus {
    Ok,
    Error,
}

impl std::fmt::Display for BiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BiteStatus::Ok => write!(f, "OK"),
            BiteStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Built-in test equipment. Each tick redraws the self-test outcome 50/50;
/// an Ok -> Error edge is recorded in the unit's own bounded log and as a
/// fixed message in the shared error journal.
///
/// The status is exposed for monitoring but feeds nothing back into the
/// other subsystems.
#[derive(Debug)]
pub struct BuiltInTest {
    status: BiteStatus,
    error_log: Journal,
    journals: Arc<Journals>,
    rng: SmallRng,
}

impl BuiltInTest {
    pub fn new(journals: Arc<Journals>, rng: SmallRng) -> Self {
        Self {
            status: BiteStatus::Ok,
            error_log: Journal::bounded(ERROR_LOG_CAPACITY),
            journals,
            rng,
        }
    }

    pub fn status(&self) -> BiteStatus {
        self.status
    }

    /// The unit's own bounded failure log (last 10 entries).
    pub fn error_log(&self) -> Vec<crate::journal::JournalEntry> {
        self.error_log.entries()
    }
}

impl Subsystem for BuiltInTest {
    fn id(&self) -> SubsystemId {
        SubsystemId::BuiltInTest
    }

    fn tick(&mut self, _snapshot: &VehicleState) -> Result<(), TickError> {
        let next = if self.rng.random_bool(0.5) {
            BiteStatus::Ok
        } else {
            BiteStatus::Error
        };

        if next == BiteStatus::Error && self.status != BiteStatus::Error {
            self.error_log.append("Error detected during self-test");
            self.journals.errors.append("BITE Test Failed");
            warn!("self-test failed");
        }
        self.status = next;
        Ok(())
    }
}
