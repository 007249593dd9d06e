use crate::post::RankedPost;

#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResult {
    RankedPosts(Vec<RankedPost>),
    NoPosts,

    SubmitRejected(String),
    StoreUnavailable(String),
}
