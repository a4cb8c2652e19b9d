//! Simulation systems - each one handles a single step of a session
//!
//! The dance floor runs them in order for every session.

pub mod sessions;
pub mod pairing;
pub mod matching;
pub mod partners;

pub use sessions::{session_count, SESSION_MINUTES};
pub use pairing::{pair_positions, shuffle};
pub use matching::common_styles;
pub use partners::{PartnerAverages, PartnerBook};
