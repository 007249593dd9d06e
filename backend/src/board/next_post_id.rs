use link_board_frontend::post::{Post, PostId};

/// Next id for a new post, given the stored ids in sheet order.
///
/// Walks the ids from 1 upwards and stops at the first id that breaks the
/// contiguous run, so `[1, 2, 3]` gives 4 and `[1, 3]` gives 2. Ids that are
/// out of order or have gaps can make this return an id that is already
/// taken; nothing here detects that.
pub fn next_post_id<I>(ids: I) -> PostId
where
    I: IntoIterator<Item = PostId>,
{
    let mut candidate = 1;

    for id in ids {
        if id != candidate {
            break;
        }
        candidate += 1;
    }

    candidate
}

pub fn allocate_next_id(existing_posts: &[Post]) -> PostId {
    next_post_id(existing_posts.iter().map(|post| post.id))
}
