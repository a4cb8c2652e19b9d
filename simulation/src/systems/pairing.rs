//! Pairing System
//!
//! Shuffles both rosters and lines couples up positionally.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{FollowerId, LeaderId};

/// Shuffle a roster in place (Fisher-Yates) and hand it back
pub fn shuffle<T, R: Rng + ?Sized>(mut roster: Vec<T>, rng: &mut R) -> Vec<T> {
    roster.shuffle(rng);
    roster
}

/// Draw fresh permutations of both rosters and pair them up.
///
/// Couples are formed position by position until the shorter roster runs
/// out; anyone left over sits the session out.
pub fn pair_positions<R: Rng + ?Sized>(
    leaders: &[LeaderId],
    followers: &[FollowerId],
    rng: &mut R,
) -> Vec<(LeaderId, FollowerId)> {
    let leaders = shuffle(leaders.to_vec(), rng);
    let followers = shuffle(followers.to_vec(), rng);

    leaders.into_iter().zip(followers).collect()
}
