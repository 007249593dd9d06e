use std::sync::Arc;

use chrono::{DateTime, Utc};
use link_board_frontend::query_result::QueryResult;
use link_board_frontend::request::Request;
use log::{error, info};

use crate::board::{rank_posts, validate_submission, VoteLedger};
use crate::store::PostStore;

/// Answers one session's requests against a shared post store.
///
/// Every request gets the full ranking back, so a client never has to merge
/// partial updates.
#[derive(Clone)]
pub struct LinkBoard {
    store: Arc<dyn PostStore>,
}

impl LinkBoard {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        LinkBoard { store }
    }

    pub fn submit_request(&self, ledger: &mut VoteLedger, request: Request) -> Vec<QueryResult> {
        self.submit_request_at(ledger, request, Utc::now())
    }

    pub fn submit_request_at(
        &self,
        ledger: &mut VoteLedger,
        request: Request,
        now: DateTime<Utc>,
    ) -> Vec<QueryResult> {
        let mut results = Vec::new();

        match request {
            Request::ViewPosts => {}
            Request::SubmitPost { title, url } => match validate_submission(&title, &url) {
                Ok(new_post) => match self.store.allocate_and_append(new_post, now) {
                    Ok(post) => info!("post {} submitted: {}", post.id, post.url),
                    Err(err) => {
                        error!("could not append post: {}", err);
                        results.push(QueryResult::StoreUnavailable(err.to_string()));
                        return results;
                    }
                },
                Err(err) => {
                    info!("rejected submission {:?} {:?}: {}", title, url, err);
                    results.push(QueryResult::SubmitRejected(err.to_string()));
                }
            },
            Request::Vote { post_id, vote } => {
                ledger.apply_vote(post_id, &vote);
            }
        }

        let posts = match self.store.fetch_all_posts() {
            Ok(posts) => posts,
            Err(err) => {
                error!("could not fetch posts: {}", err);
                results.push(QueryResult::StoreUnavailable(err.to_string()));
                return results;
            }
        };

        if posts.is_empty() {
            results.push(QueryResult::NoPosts);
        } else {
            results.push(QueryResult::RankedPosts(rank_posts(&posts, ledger)));
        }

        results
    }
}
