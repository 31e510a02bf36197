use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::debug;

use super::{Subsystem, SubsystemId, TickError};
use crate::journal::Journals;
use crate::state::VehicleState;

const OUTBOUND_UPDATE: &str = "Flight data update";

/// In-process communications simulation. Every tick sends the fixed
/// outbound update; independently, half the ticks record an inbound
/// acknowledgment. Sent and received entries are deliberately
/// uncorrelated: this models a fire-and-forget downlink, not a
/// request/response protocol.
#[derive(Debug)]
pub struct Communication {
    journals: Arc<Journals>,
    rng: SmallRng,
}

impl Communication {
    pub fn new(journals: Arc<Journals>, rng: SmallRng) -> Self {
        Self { journals, rng }
    }

    pub fn send(&self, message: &str) {
        self.journals.messages.append(format!("Sent: {message}"));
    }

    /// Polls for an inbound message; the simulation answers with an
    /// acknowledgment half the time.
    pub fn receive(&mut self) -> Option<String> {
        if self.rng.random_bool(0.5) {
            let message = "Received: Acknowledgment".to_string();
            self.journals.messages.append(message.clone());
            Some(message)
        } else {
            None
        }
    }
}

impl Subsystem for Communication {
    fn id(&self) -> SubsystemId {
        SubsystemId::Communication
    }

    fn tick(&mut self, _snapshot: &VehicleState) -> Result<(), TickError> {
        self.send(OUTBOUND_UPDATE);
        if let Some(message) = self.receive() {
            debug!(%message, "inbound message");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn comms_with_seed(seed: u64) -> (Communication, Arc<Journals>) {
        let journals = Arc::new(Journals::new());
        let comms = Communication::new(Arc::clone(&journals), SmallRng::seed_from_u64(seed));
        (comms, journals)
    }

    #[test]
    fn every_tick_sends_exactly_one_update() {
        let (mut comms, journals) = comms_with_seed(1);
        let snapshot = VehicleState::default();
        for _ in 0..100 {
            comms.tick(&snapshot).unwrap();
        }
        let sent = journals
            .messages
            .entries()
            .iter()
            .filter(|entry| entry.message == format!("Sent: {OUTBOUND_UPDATE}"))
            .count();
        assert_eq!(sent, 100);
    }

    #[test]
    fn acknowledgments_arrive_for_roughly_half_the_ticks() {
        let (mut comms, journals) = comms_with_seed(2);
        let snapshot = VehicleState::default();
        for _ in 0..200 {
            comms.tick(&snapshot).unwrap();
        }
        let received = journals
            .messages
            .entries()
            .iter()
            .filter(|entry| entry.message == "Received: Acknowledgment")
            .count();
        assert!(received > 0);
        assert!(received < 200);
    }

    #[test]
    fn receive_returns_the_logged_acknowledgment() {
        let (mut comms, journals) = comms_with_seed(3);
        let mut returned = 0;
        for _ in 0..100 {
            if comms.receive().is_some() {
                returned += 1;
            }
        }
        assert_eq!(journals.messages.len(), returned);
    }
}
