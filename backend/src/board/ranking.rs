use link_board_frontend::post::{Post, RankedPost};
use log::debug;

use crate::board::vote_ledger::VoteLedger;

/// Orders posts by stored votes plus this session's votes, highest first.
///
/// Posts with equal effective votes keep the order they came in, which for a
/// freshly fetched sheet is submission order.
pub fn rank_posts(posts: &[Post], ledger: &VoteLedger) -> Vec<RankedPost> {
    let mut ranked: Vec<RankedPost> = posts
        .iter()
        .map(|post| {
            let session_vote = ledger.delta(post.id);
            RankedPost {
                post: post.clone(),
                effective_votes: post.vote_count.saturating_add(session_vote.value()),
                session_vote,
            }
        })
        .collect();

    // sort_by_key is stable
    ranked.sort_by_key(|ranked| std::cmp::Reverse(ranked.effective_votes));
    debug!(
        "ranked -- {:?}",
        ranked
            .iter()
            .map(|r| (r.post.id, r.effective_votes))
            .collect::<Vec<_>>()
    );

    ranked
}
