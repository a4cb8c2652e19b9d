//! Session Partitioner
//!
//! Splits the event duration into fixed-length dance sessions.

/// Length of one session in minutes
pub const SESSION_MINUTES: f64 = 5.0;

/// Number of whole sessions that fit in the given duration.
///
/// Negative and non-finite durations give zero sessions.
pub fn session_count(duration_minutes: f64) -> u32 {
    let sessions = (duration_minutes / SESSION_MINUTES).floor();
    if sessions.is_nan() || sessions <= 0.0 {
        return 0;
    }
    // `as` saturates at u32::MAX for absurdly long events
    sessions as u32
}
