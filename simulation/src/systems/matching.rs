//! Capability Matching
//!
//! Decides which styles a couple can actually dance together.

use crate::components::{DanceParticipants, DanceStyle, FollowerId, LeaderId};

/// Styles both partners know, in the order the leader lists them.
///
/// An empty result means the couple cannot dance this session.
pub fn common_styles(
    participants: &DanceParticipants,
    leader: LeaderId,
    follower: &FollowerId,
) -> Vec<DanceStyle> {
    let follower_styles = participants.follower_styles(follower);
    participants
        .leader_styles(leader)
        .iter()
        .filter(|style| follower_styles.contains(style))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::collections::BTreeMap;

    fn participants() -> DanceParticipants {
        DanceParticipants {
            total_leaders: 2,
            total_followers: 2,
            leader_knowledge: BTreeMap::from([
                (LeaderId(1), vec![DanceStyle::Tango, DanceStyle::Waltz]),
                (LeaderId(2), vec![DanceStyle::Quickstep]),
            ]),
            follower_knowledge: IndexMap::from([
                (FollowerId::from("A"), vec![DanceStyle::Waltz, DanceStyle::Tango, DanceStyle::Foxtrot]),
                (FollowerId::from("B"), vec![DanceStyle::Foxtrot]),
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn test_common_styles_keep_leader_order() {
        let styles = common_styles(&participants(), LeaderId(1), &"A".into());
        assert_eq!(styles, vec![DanceStyle::Tango, DanceStyle::Waltz]);
    }

    #[test]
    fn test_disjoint_styles() {
        assert!(common_styles(&participants(), LeaderId(2), &"B".into()).is_empty());
    }

    #[test]
    fn test_unknown_participants() {
        let data = participants();
        assert!(common_styles(&data, LeaderId(9), &"A".into()).is_empty());
        assert!(common_styles(&data, LeaderId(1), &"Z".into()).is_empty());
    }
}
