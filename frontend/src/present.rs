use chrono::{DateTime, Utc};
use url::Url;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Registrable-looking part of a link's host, e.g. `news.example.com` -> `example.com`.
///
/// Only the last two labels are kept, so `bbc.co.uk` style hosts shorten to `co.uk`.
pub fn domain_of(url: &str) -> String {
    let host = match Url::parse(url) {
        Ok(parsed) => parsed.host_str().unwrap_or_default().to_owned(),
        Err(_) => return String::new(),
    };

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        host
    }
}

pub fn time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - created_at).num_seconds();

    if diff < MINUTE {
        "Just now".into()
    } else if diff < HOUR {
        format!("{} minutes ago", diff / MINUTE)
    } else if diff < DAY {
        format!("{} hours ago", diff / HOUR)
    } else if diff < WEEK {
        format!("{} days ago", diff / DAY)
    } else {
        format!("{} weeks ago", diff / WEEK)
    }
}
