//! Minimal match representation consumed by the reconciliation logic.

use crate::QueueCategory;

/// One fetched match, already stripped down to the data the tracker needs.
#[derive(Debug, Clone)]
pub struct Match {
    pub queue_id: u16,
    pub participants: Vec<MatchParticipant>,
}

impl Match {
    /// Locate a participant by their stable account id.
    pub fn participant(&self, puuid: &str) -> Option<&MatchParticipant> {
        self.participants.iter().find(|p| p.puuid == puuid)
    }

    pub fn queue_category(&self) -> Option<QueueCategory> {
        QueueCategory::from_queue_id(self.queue_id)
    }
}

#[derive(Debug, Clone)]
pub struct MatchParticipant {
    pub puuid: String,
    pub champion_name: String,
    pub win: bool,
}
