//! Ballroom Simulation Engine
//!
//! Estimates how many distinct partners leaders and followers get over an
//! evening of randomly paired, style-compatible dance sessions.

pub mod components;
pub mod systems;
pub mod world;
pub mod persistence;
pub mod statistics;

pub use components::*;
pub use world::{DanceFloor, SessionTally, SimulationReport};
pub use persistence::{
    calculate_average_partners, emit_records, EmitSummary, EventOutcome, MemorySink, NullSink,
    SessionSink, SinkError,
};
pub use statistics::{DancePreferences, StyleUsage};
pub use systems::PartnerAverages;
