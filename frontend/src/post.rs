use chrono::{DateTime, Utc};

use crate::vote::VoteDelta;

pub type PostId = u64;

/// One submitted link as kept in the post sheet.
#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub url: String,
    pub vote_count: i64,
    pub created_at: DateTime<Utc>,
}

/// A post as one session sees it: the stored tally plus that session's own vote.
#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedPost {
    pub post: Post,
    pub effective_votes: i64,
    pub session_vote: VoteDelta,
}
