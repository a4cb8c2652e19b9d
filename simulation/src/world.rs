//! Dance Floor - main orchestrator
//!
//! Runs every session of an event against a borrowed description and an
//! injected random source. Nothing here touches I/O; the records a session
//! produces are handed back for the caller to persist.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::components::{DanceParticipants, Pairing, SessionRecord};
use crate::systems::{self, PartnerAverages, PartnerBook};

/// Outcome of one simulated event
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub averages: PartnerAverages,
    pub sessions: u32,
    pub valid_pairings: u32,
    /// One entry per shared style per valid pairing, in emission order
    pub records: Vec<SessionRecord>,
}

impl SimulationReport {
    pub fn average_partners(&self) -> f64 {
        self.averages.overall
    }
}

/// Couples that danced in one session and the records they produced
#[derive(Debug, Clone, Default)]
pub struct SessionTally {
    pub couples: u32,
    pub records: Vec<SessionRecord>,
}

pub struct DanceFloor<'a> {
    participants: &'a DanceParticipants,
}

impl<'a> DanceFloor<'a> {
    pub fn new(participants: &'a DanceParticipants) -> Self {
        Self { participants }
    }

    /// Number of sessions this event will run
    pub fn session_count(&self) -> u32 {
        systems::session_count(self.participants.dance_duration_minutes)
    }

    /// Pair up one session and return every couple that was formed
    pub fn run_session<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Pairing> {
        let leaders = self.participants.leader_ids();
        let followers = self.participants.follower_ids();

        systems::pair_positions(&leaders, &followers, rng)
            .into_iter()
            .map(|(leader, follower)| {
                let styles = systems::common_styles(self.participants, leader, &follower);
                Pairing { leader, follower, styles }
            })
            .collect()
    }

    /// Play one session: record every couple that danced in `book` and
    /// return the session's records
    pub fn play_session<R: Rng + ?Sized>(
        &self,
        session_index: u32,
        rng: &mut R,
        book: &mut PartnerBook,
    ) -> SessionTally {
        let mut tally = SessionTally::default();
        for pairing in self.run_session(rng) {
            if !pairing.is_valid() {
                continue;
            }
            tally.couples += 1;
            book.record(pairing.leader, &pairing.follower);
            tally.records.extend(pairing.styles.iter().map(|&style| SessionRecord {
                leader_id: pairing.leader,
                follower_id: pairing.follower.clone(),
                style,
                session_index,
            }));
        }
        debug!("Session {} complete: {} couples danced", session_index, tally.couples);
        tally
    }

    /// Turn the partner book into averages over the declared populations
    pub fn settle(&self, book: &PartnerBook) -> PartnerAverages {
        let averages = book.averages(
            self.participants.total_leaders,
            self.participants.total_followers,
        );

        info!("Average different dance partners per leader: {:.2}", averages.leaders);
        info!("Average different dance partners per follower: {:.2}", averages.followers);
        info!("Overall average different dance partners: {:.2}", averages.overall);

        averages
    }

    /// Run the whole event with fresh partner state, keeping every record
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationReport {
        let sessions = self.session_count();
        let mut book = PartnerBook::new();
        let mut records = Vec::new();
        let mut valid_pairings = 0u32;

        for session_index in 0..sessions {
            let tally = self.play_session(session_index, rng, &mut book);
            valid_pairings += tally.couples;
            records.extend(tally.records);
        }

        SimulationReport {
            averages: self.settle(&book),
            sessions,
            valid_pairings,
            records,
        }
    }
}
