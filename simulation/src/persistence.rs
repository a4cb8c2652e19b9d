//! Persistence seam for session records
//!
//! The simulation never owns a database handle. Callers pass in a
//! `SessionSink` and the records of each session are written through it
//! one by one. A failed write is logged and skipped.

use async_trait::async_trait;
use rand::Rng;
use std::ops::AddAssign;
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

use crate::components::{DanceParticipants, SessionRecord};
use crate::systems::{PartnerAverages, PartnerBook};
use crate::world::DanceFloor;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("database error: {0}")]
    Database(String),
    #[error("record rejected: {0}")]
    Rejected(String),
}

/// Anything that can store a single session record
#[async_trait]
pub trait SessionSink: Send + Sync {
    async fn write(&self, record: &SessionRecord) -> Result<(), SinkError>;
}

/// How many records made it into the sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub written: usize,
    pub failed: usize,
}

impl AddAssign for EmitSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.written += rhs.written;
        self.failed += rhs.failed;
    }
}

/// Write every record in order. Failures are logged and never retried.
pub async fn emit_records<S: SessionSink + ?Sized>(
    sink: &S,
    records: &[SessionRecord],
) -> EmitSummary {
    let mut summary = EmitSummary::default();
    for record in records {
        match sink.write(record).await {
            Ok(()) => summary.written += 1,
            Err(e) => {
                warn!(
                    leader = %record.leader_id,
                    follower = %record.follower_id,
                    style = %record.style,
                    session = record.session_index,
                    "Error inserting dance session: {}",
                    e
                );
                summary.failed += 1;
            }
        }
    }
    summary
}

/// Result of an event whose records went through a sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventOutcome {
    pub averages: PartnerAverages,
    pub sessions: u32,
    pub valid_pairings: u32,
    pub emitted: EmitSummary,
}

impl EventOutcome {
    pub fn average_partners(&self) -> f64 {
        self.averages.overall
    }
}

/// Simulate the event, writing each session's records into `sink` before
/// the next session is played.
///
/// Only one session's records are held at a time. The averages come from
/// the partner book alone, so sink failures cannot change them.
pub async fn calculate_average_partners<R, S>(
    participants: &DanceParticipants,
    rng: &mut R,
    sink: &S,
) -> EventOutcome
where
    R: Rng + ?Sized,
    S: SessionSink + ?Sized,
{
    let floor = DanceFloor::new(participants);
    let sessions = floor.session_count();
    let mut book = PartnerBook::new();
    let mut valid_pairings = 0u32;
    let mut emitted = EmitSummary::default();

    for session_index in 0..sessions {
        let tally = floor.play_session(session_index, rng, &mut book);
        valid_pairings += tally.couples;
        if !tally.records.is_empty() {
            emitted += emit_records(sink, &tally.records).await;
        }
        // Hand the worker back between sessions
        tokio::task::yield_now().await;
    }

    if emitted.failed > 0 {
        warn!(
            "{} of {} session records could not be stored",
            emitted.failed,
            emitted.written + emitted.failed
        );
    }

    EventOutcome {
        averages: floor.settle(&book),
        sessions,
        valid_pairings,
        emitted,
    }
}

// ============================================================================
// In-process sinks
// ============================================================================

/// Discards everything. Used when no store is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

#[async_trait]
impl SessionSink for NullSink {
    async fn write(&self, _record: &SessionRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Keeps records in memory, optionally refusing every write
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<SessionRecord>>,
    reject: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every write fails
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            reject: true,
        }
    }

    pub fn records(&self) -> Vec<SessionRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SessionSink for MemorySink {
    async fn write(&self, record: &SessionRecord) -> Result<(), SinkError> {
        if self.reject {
            return Err(SinkError::Rejected(format!(
                "session {} is read-only",
                record.session_index
            )));
        }
        self.records
            .lock()
            .map_err(|e| SinkError::Database(e.to_string()))?
            .push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{DanceStyle, FollowerId, LeaderId};
    use indexmap::IndexMap;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn waltz_night(minutes: f64) -> DanceParticipants {
        DanceParticipants {
            total_leaders: 2,
            total_followers: 2,
            dance_styles: vec![DanceStyle::Waltz, DanceStyle::Tango],
            leader_knowledge: BTreeMap::from([
                (LeaderId(1), vec![DanceStyle::Waltz, DanceStyle::Tango]),
                (LeaderId(2), vec![DanceStyle::Waltz, DanceStyle::Tango]),
            ]),
            follower_knowledge: IndexMap::from([
                (FollowerId::from("A"), vec![DanceStyle::Waltz, DanceStyle::Tango]),
                (FollowerId::from("B"), vec![DanceStyle::Waltz, DanceStyle::Tango]),
            ]),
            dance_duration_minutes: minutes,
        }
    }

    /// Refuses every other write, starting with the first
    #[derive(Default)]
    struct FlakySink {
        calls: AtomicUsize,
        stored: MemorySink,
    }

    #[async_trait]
    impl SessionSink for FlakySink {
        async fn write(&self, record: &SessionRecord) -> Result<(), SinkError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
                return Err(SinkError::Database("connection reset".to_string()));
            }
            self.stored.write(record).await
        }
    }

    fn record(session_index: u32) -> SessionRecord {
        SessionRecord {
            leader_id: LeaderId(1),
            follower_id: FollowerId::from("A"),
            style: DanceStyle::Waltz,
            session_index,
        }
    }

    #[tokio::test]
    async fn test_records_reach_sink() {
        let sink = MemorySink::new();
        let data = waltz_night(10.0);
        let outcome =
            calculate_average_partners(&data, &mut StdRng::seed_from_u64(4), &sink).await;
        let pure = DanceFloor::new(&data).run(&mut StdRng::seed_from_u64(4));

        assert_eq!(sink.len(), 8);
        assert_eq!(sink.records(), pure.records);
        assert_eq!(outcome.emitted, EmitSummary { written: 8, failed: 0 });
        assert_eq!(outcome.averages, pure.averages);
        assert!(outcome.average_partners() > 0.0);
    }

    #[tokio::test]
    async fn test_failing_sink_does_not_change_averages() {
        let data = waltz_night(20.0);
        let stored = MemorySink::new();
        let failing = MemorySink::failing();

        let ok = calculate_average_partners(&data, &mut StdRng::seed_from_u64(9), &stored).await;
        let failed =
            calculate_average_partners(&data, &mut StdRng::seed_from_u64(9), &failing).await;

        assert_eq!(ok.averages, failed.averages);
        assert!(failing.is_empty());
        assert_eq!(failed.emitted, EmitSummary { written: 0, failed: 16 });
        assert_eq!(failed.sessions, 4);
    }

    #[tokio::test]
    async fn test_writes_continue_after_failure() {
        let sink = FlakySink::default();
        let records: Vec<SessionRecord> = (0..6).map(record).collect();

        let summary = emit_records(&sink, &records).await;

        assert_eq!(summary, EmitSummary { written: 3, failed: 3 });
        assert_eq!(sink.calls.load(Ordering::SeqCst), 6);
        let stored: Vec<u32> = sink.stored.records().iter().map(|r| r.session_index).collect();
        assert_eq!(stored, vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn test_flaky_sink_keeps_later_sessions() {
        let data = waltz_night(15.0);
        let sink = FlakySink::default();
        let outcome =
            calculate_average_partners(&data, &mut StdRng::seed_from_u64(6), &sink).await;

        // 3 sessions x 2 couples x 2 styles
        assert_eq!(outcome.emitted, EmitSummary { written: 6, failed: 6 });
        let sessions: Vec<u32> = sink.stored.records().iter().map(|r| r.session_index).collect();
        assert!(sessions.contains(&2));
    }

    #[tokio::test]
    async fn test_emit_counts_failures() {
        let records = vec![SessionRecord {
            style: DanceStyle::Foxtrot,
            ..record(0)
        }];

        let summary = emit_records(&MemorySink::failing(), &records).await;
        assert_eq!(summary, EmitSummary { written: 0, failed: 1 });

        let summary = emit_records(&NullSink, &records).await;
        assert_eq!(summary, EmitSummary { written: 1, failed: 0 });
    }

    #[tokio::test]
    async fn test_zero_sessions_write_nothing() {
        let sink = MemorySink::new();
        let data = waltz_night(0.0);
        let outcome =
            calculate_average_partners(&data, &mut StdRng::seed_from_u64(1), &sink).await;

        assert_eq!(outcome.average_partners(), 0.0);
        assert_eq!(outcome.sessions, 0);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_sink_as_trait_object() {
        let sink: Box<dyn SessionSink> = Box::new(MemorySink::new());
        let data = waltz_night(5.0);
        let outcome =
            calculate_average_partners(&data, &mut StdRng::seed_from_u64(2), sink.as_ref()).await;
        assert_eq!(outcome.emitted.written, 4);
        assert_eq!(outcome.valid_pairings, 2);
    }
}
