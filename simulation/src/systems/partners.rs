//! Partner Aggregation
//!
//! Tracks who has danced with whom and turns it into averages.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::components::{FollowerId, LeaderId};

/// Distinct partners per participant for one simulation run
#[derive(Debug, Default)]
pub struct PartnerBook {
    leaders: HashMap<LeaderId, HashSet<FollowerId>>,
    followers: HashMap<FollowerId, HashSet<LeaderId>>,
}

impl PartnerBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a couple that danced together. Repeats do not count twice.
    pub fn record(&mut self, leader: LeaderId, follower: &FollowerId) {
        self.leaders
            .entry(leader)
            .or_default()
            .insert(follower.clone());
        self.followers
            .entry(follower.clone())
            .or_default()
            .insert(leader);
    }

    /// Sum of distinct partners over all leaders
    pub fn leader_total(&self) -> usize {
        self.leaders.values().map(HashSet::len).sum()
    }

    /// Sum of distinct partners over all followers
    pub fn follower_total(&self) -> usize {
        self.followers.values().map(HashSet::len).sum()
    }

    /// Average distinct partners per role.
    ///
    /// Divides by the declared population sizes, so an empty population
    /// yields NaN on its side rather than an error.
    pub fn averages(&self, total_leaders: u32, total_followers: u32) -> PartnerAverages {
        let leaders = self.leader_total() as f64 / f64::from(total_leaders);
        let followers = self.follower_total() as f64 / f64::from(total_followers);
        PartnerAverages {
            leaders,
            followers,
            overall: (leaders + followers) / 2.0,
        }
    }
}

/// Average distinct partners per leader, per follower and their mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartnerAverages {
    pub leaders: f64,
    pub followers: f64,
    pub overall: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_pairings_are_distinct_once() {
        let mut book = PartnerBook::new();
        let a = FollowerId::from("A");
        book.record(LeaderId(1), &a);
        book.record(LeaderId(1), &a);
        book.record(LeaderId(1), &"B".into());

        assert_eq!(book.leader_total(), 2);
        assert_eq!(book.follower_total(), 2);
    }

    #[test]
    fn test_averages() {
        let mut book = PartnerBook::new();
        book.record(LeaderId(1), &"A".into());
        book.record(LeaderId(2), &"A".into());

        let avg = book.averages(2, 4);
        assert_eq!(avg.leaders, 1.0);
        assert_eq!(avg.followers, 0.5);
        assert_eq!(avg.overall, 0.75);
    }

    #[test]
    fn test_empty_book_averages_to_zero() {
        let avg = PartnerBook::new().averages(3, 3);
        assert_eq!(avg, PartnerAverages { leaders: 0.0, followers: 0.0, overall: 0.0 });
    }

    #[test]
    fn test_zero_population_is_nan() {
        let avg = PartnerBook::new().averages(0, 3);
        assert!(avg.leaders.is_nan());
        assert_eq!(avg.followers, 0.0);
        assert!(avg.overall.is_nan());
    }
}
