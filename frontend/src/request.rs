use crate::post::PostId;

/// Messages a browser session sends to the server.
#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Request {
    ViewPosts,
    SubmitPost { title: String, url: String },
    // `vote` stays raw so that unknown directions reach the ledger as a no-op
    Vote { post_id: PostId, vote: String },
}
