use std::collections::HashMap;

use link_board_frontend::post::PostId;
use link_board_frontend::vote::{VoteDelta, VoteDirection};
use log::debug;

/// One session's votes, keyed by post id.
///
/// Owned by the session that made the votes and never written back to the
/// post store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoteLedger {
    deltas: HashMap<PostId, VoteDelta>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, post_id: PostId, direction: VoteDirection) -> VoteDelta {
        let delta = self.deltas.entry(post_id).or_default();
        *delta = delta.toggled(direction);
        *delta
    }

    /// Applies a raw direction as sent by a client. Anything other than
    /// `"up"` or `"down"` leaves the post's delta where it was.
    pub fn apply_vote(&mut self, post_id: PostId, raw_direction: &str) -> VoteDelta {
        match raw_direction.parse::<VoteDirection>() {
            Ok(direction) => self.toggle(post_id, direction),
            Err(()) => {
                debug!("ignoring vote {:?} on post {}", raw_direction, post_id);
                *self.deltas.entry(post_id).or_default()
            }
        }
    }

    pub fn delta(&self, post_id: PostId) -> VoteDelta {
        self.deltas.get(&post_id).copied().unwrap_or_default()
    }
}

pub fn apply_vote(mut ledger: VoteLedger, post_id: PostId, raw_direction: &str) -> VoteLedger {
    ledger.apply_vote(post_id, raw_direction);
    ledger
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_twice_cancels() {
        let mut ledger = VoteLedger::new();
        assert_eq!(ledger.apply_vote(5, "up"), VoteDelta::Up);
        assert_eq!(ledger.apply_vote(5, "up"), VoteDelta::Neutral);
        assert_eq!(ledger.delta(5), VoteDelta::Neutral);
    }

    #[test]
    fn up_then_down_switches() {
        let ledger = apply_vote(VoteLedger::new(), 5, "up");
        let ledger = apply_vote(ledger, 5, "down");
        assert_eq!(ledger.delta(5), VoteDelta::Down);
        assert_eq!(ledger.delta(5).value(), -1);
    }

    #[test]
    fn down_twice_cancels() {
        let mut ledger = VoteLedger::new();
        ledger.toggle(1, VoteDirection::Down);
        ledger.toggle(1, VoteDirection::Down);
        assert_eq!(ledger.delta(1), VoteDelta::Neutral);
    }

    #[test]
    fn unknown_direction_is_noop() {
        let mut ledger = VoteLedger::new();
        ledger.apply_vote(3, "up");
        let before = ledger.delta(3);

        ledger.apply_vote(3, "sideways");
        ledger.apply_vote(4, "");

        assert_eq!(ledger.delta(3), before);
        assert_eq!(ledger.delta(4), VoteDelta::Neutral);
    }

    #[test]
    fn delta_never_leaves_range() {
        let mut ledger = VoteLedger::new();
        for _ in 0..10 {
            ledger.toggle(9, VoteDirection::Up);
            assert!((-1..=1).contains(&ledger.delta(9).value()));
        }
        // even number of toggles from neutral ends neutral
        assert_eq!(ledger.delta(9), VoteDelta::Neutral);
    }

    #[test]
    fn posts_are_independent() {
        let mut ledger = VoteLedger::new();
        ledger.toggle(1, VoteDirection::Up);
        ledger.toggle(2, VoteDirection::Down);
        assert_eq!(ledger.delta(1), VoteDelta::Up);
        assert_eq!(ledger.delta(2), VoteDelta::Down);
        assert_eq!(ledger.delta(3), VoteDelta::Neutral);
    }
}
