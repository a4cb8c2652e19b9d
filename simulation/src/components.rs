//! Data model for dance events
//!
//! Participants, capabilities and the records a simulation run emits.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Identity Components
// ============================================================================

/// Leaders are numbered `1..=total_leaders`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaderId(pub u32);

/// Followers are keyed by whatever the capability map provides
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FollowerId(pub String);

impl From<&str> for FollowerId {
    fn from(id: &str) -> Self {
        FollowerId(id.to_string())
    }
}

impl fmt::Display for LeaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FollowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Dance Styles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DanceStyle {
    Waltz,
    Tango,
    Foxtrot,
    Quickstep,
    #[serde(rename = "Viennese Waltz")]
    VienneseWaltz,
}

impl DanceStyle {
    pub const ALL: [DanceStyle; 5] = [
        DanceStyle::Waltz,
        DanceStyle::Tango,
        DanceStyle::Foxtrot,
        DanceStyle::Quickstep,
        DanceStyle::VienneseWaltz,
    ];

    /// Label used on the wire and in the store
    pub fn as_str(&self) -> &'static str {
        match self {
            DanceStyle::Waltz => "Waltz",
            DanceStyle::Tango => "Tango",
            DanceStyle::Foxtrot => "Foxtrot",
            DanceStyle::Quickstep => "Quickstep",
            DanceStyle::VienneseWaltz => "Viennese Waltz",
        }
    }
}

impl fmt::Display for DanceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Event Description
// ============================================================================

/// Everything known about an event before the first session starts.
///
/// `total_followers` and the key count of `follower_knowledge` are not
/// reconciled: pairing draws from the keys, averaging divides by the total.
/// `dance_styles` is the event's catalog and is not consulted by matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DanceParticipants {
    pub total_leaders: u32,
    pub total_followers: u32,
    pub dance_styles: Vec<DanceStyle>,
    pub leader_knowledge: BTreeMap<LeaderId, Vec<DanceStyle>>,
    pub follower_knowledge: IndexMap<FollowerId, Vec<DanceStyle>>,
    pub dance_duration_minutes: f64,
}

impl DanceParticipants {
    /// Styles a leader knows (empty if the leader has no entry)
    pub fn leader_styles(&self, leader: LeaderId) -> &[DanceStyle] {
        self.leader_knowledge
            .get(&leader)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Styles a follower knows (empty if the follower has no entry)
    pub fn follower_styles(&self, follower: &FollowerId) -> &[DanceStyle] {
        self.follower_knowledge
            .get(follower)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Leader ids in ascending order
    pub fn leader_ids(&self) -> Vec<LeaderId> {
        (1..=self.total_leaders).map(LeaderId).collect()
    }

    /// Follower ids in the order they were listed
    pub fn follower_ids(&self) -> Vec<FollowerId> {
        self.follower_knowledge.keys().cloned().collect()
    }
}

// ============================================================================
// Session Output
// ============================================================================

/// One leader/follower couple on the floor for a single session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub leader: LeaderId,
    pub follower: FollowerId,
    pub styles: Vec<DanceStyle>,
}

impl Pairing {
    /// A couple only dances if they share at least one style
    pub fn is_valid(&self) -> bool {
        !self.styles.is_empty()
    }
}

/// One row destined for the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub leader_id: LeaderId,
    pub follower_id: FollowerId,
    pub style: DanceStyle,
    pub session_index: u32,
}
