use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::post::RankedPost;
use crate::present::{domain_of, time_ago};
use crate::query_result::QueryResult;
use crate::vote::{VoteDelta, VoteDirection};

pub const SUBMIT_FORM_ID: &str = "link_board_submit";

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders everything the server sent in one reply as the board's inner HTML.
pub fn render_board(results: &[QueryResult], now: DateTime<Utc>) -> String {
    let mut html = String::new();
    html.push_str("<h1>Link Board</h1>");
    html.push_str(&submit_form());

    for result in results {
        match result {
            QueryResult::SubmitRejected(reason) => {
                let _ = write!(html, "<p class=\"error\">{}</p>", escape_html(reason));
            }
            QueryResult::StoreUnavailable(reason) => {
                let _ = write!(
                    html,
                    "<p class=\"error\">Posts are unavailable: {}</p>",
                    escape_html(reason)
                );
            }
            _ => {}
        }
    }

    html.push_str("<h2>Posts</h2>");

    for result in results {
        match result {
            QueryResult::RankedPosts(posts) => {
                for ranked in posts {
                    html.push_str(&render_post(ranked, now));
                }
            }
            QueryResult::NoPosts => html.push_str("<p>No posts found.</p>"),
            _ => {}
        }
    }

    html
}

fn submit_form() -> String {
    format!(
        "<form id=\"{}\">\
         <input type=\"text\" name=\"title\" placeholder=\"Enter a title\" required>\
         <input type=\"url\" name=\"url\" placeholder=\"Submit a URL\" required>\
         <button type=\"submit\">Submit</button>\
         </form>",
        SUBMIT_FORM_ID
    )
}

fn vote_button(ranked: &RankedPost, direction: VoteDirection) -> String {
    let (arrow, active) = match direction {
        VoteDirection::Up => ("&#x1F53A;", ranked.session_vote == VoteDelta::Up),
        VoteDirection::Down => ("&#x1F53B;", ranked.session_vote == VoteDelta::Down),
    };

    format!(
        "<button class=\"vote{}\" data-post-id=\"{}\" data-vote=\"{}\">{}</button>",
        if active { " active" } else { "" },
        ranked.post.id,
        direction.as_str(),
        arrow
    )
}

fn render_post(ranked: &RankedPost, now: DateTime<Utc>) -> String {
    let post = &ranked.post;

    format!(
        "<div class=\"post\">\
         <div class=\"post-title\">\
         <a href=\"{url}\" target=\"_blank\">{title}</a> \
         <span class=\"domain\">({domain})</span>\
         </div>\
         <div class=\"vote-buttons\">{up}{down}</div>\
         <span class=\"votes\">{votes} votes</span>\
         <div class=\"date\">{date}</div>\
         </div>",
        url = escape_html(&post.url),
        title = escape_html(&post.title),
        domain = escape_html(&domain_of(&post.url)),
        up = vote_button(ranked, VoteDirection::Up),
        down = vote_button(ranked, VoteDirection::Down),
        votes = ranked.effective_votes,
        date = time_ago(post.created_at, now),
    )
}
