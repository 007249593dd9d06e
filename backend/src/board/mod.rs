//! Post ranking and session vote handling. Everything in here is pure: it
//! works on posts that were already fetched and never touches the store.

pub mod next_post_id;
pub mod ranking;
pub mod submission;
pub mod vote_ledger;

pub use next_post_id::{allocate_next_id, next_post_id};
pub use ranking::rank_posts;
pub use submission::{validate_submission, NewPost, SubmissionError};
pub use vote_ledger::{apply_vote, VoteLedger};
