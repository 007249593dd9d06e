//! Tabular post storage.
//!
//! Posts live in a sheet: a list of rows of string cells whose first row is a
//! header. Column order is `id | title | url | votes | date_added`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use link_board_frontend::post::{Post, PostId};
use log::{debug, info, warn};
use thiserror::Error;

use crate::board::{allocate_next_id, NewPost};

pub type Row = Vec<String>;

pub const HEADER: [&str; 5] = ["id", "title", "url", "votes", "date_added"];

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("sheet io: {0}")]
    Io(#[from] io::Error),
    #[error("sheet is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sheet lock poisoned")]
    LockPoisoned,
}

pub trait PostStore: Send + Sync {
    /// All posts in sheet order, header and unreadable rows left out.
    fn fetch_all_posts(&self) -> Result<Vec<Post>, StoreError>;

    fn append_post(&self, post: Post) -> Result<(), StoreError>;

    /// Gives `new_post` the next id and appends it with zero votes.
    ///
    /// This default reads and then appends in two steps, so two writers can
    /// end up with the same id. Stores that can do both under one lock should
    /// override it.
    fn allocate_and_append(
        &self,
        new_post: NewPost,
        created_at: DateTime<Utc>,
    ) -> Result<Post, StoreError> {
        let existing = self.fetch_all_posts()?;
        let post = new_row_post(&existing, new_post, created_at);
        self.append_post(post.clone())?;
        Ok(post)
    }
}

fn new_row_post(existing: &[Post], new_post: NewPost, created_at: DateTime<Utc>) -> Post {
    Post {
        id: allocate_next_id(existing),
        title: new_post.title,
        url: new_post.url,
        vote_count: 0,
        created_at,
    }
}

// `posts.json` -> `posts.json.tmp`; never the sheet path itself
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

pub fn header_row() -> Row {
    HEADER.iter().map(|cell| cell.to_string()).collect()
}

pub fn post_to_row(post: &Post) -> Row {
    vec![
        post.id.to_string(),
        post.title.clone(),
        post.url.clone(),
        post.vote_count.to_string(),
        post.created_at.to_rfc3339_opts(SecondsFormat::Secs, false),
    ]
}

/// Reads one data row. A vote cell that is not a number counts as 0; a row
/// without a usable id or date is rejected.
pub fn post_from_row(row: &[String]) -> Option<Post> {
    let [id, title, url, votes, date_added, ..] = row else {
        return None;
    };

    let id = id.trim().parse::<PostId>().ok().filter(|id| *id > 0)?;
    let created_at = DateTime::parse_from_rfc3339(date_added.trim())
        .ok()?
        .with_timezone(&Utc);

    Some(Post {
        id,
        title: title.clone(),
        url: url.clone(),
        vote_count: votes.trim().parse().unwrap_or(0),
        created_at,
    })
}

fn posts_from_rows(rows: &[Row]) -> Vec<Post> {
    rows.iter()
        .enumerate()
        .skip(1)
        .filter_map(|(index, row)| {
            let post = post_from_row(row);
            if post.is_none() {
                warn!("skipping unreadable sheet row {}: {:?}", index, row);
            }
            post
        })
        .collect()
}

/// A sheet held in memory, optionally mirrored to a JSON file.
///
/// The file holds the rows as an array of string arrays and is rewritten
/// after every append. The rewrite is blocking file io on the calling thread,
/// which is the connection task's runtime worker.
pub struct SheetStore {
    rows: Mutex<Vec<Row>>,
    path: Option<PathBuf>,
}

impl SheetStore {
    pub fn in_memory() -> Self {
        Self::from_rows(vec![header_row()])
    }

    /// Rows are used as given; the first one is treated as the header.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        SheetStore {
            rows: Mutex::new(rows),
            path: None,
        }
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let rows = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("no sheet at {}, starting empty", path.display());
                vec![header_row()]
            }
            Err(err) => return Err(err.into()),
        };

        Ok(SheetStore {
            rows: Mutex::new(rows),
            path: Some(path),
        })
    }

    pub fn rows(&self) -> Result<Vec<Row>, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Row>>, StoreError> {
        self.rows.lock().map_err(|_err| StoreError::LockPoisoned)
    }

    // The file is written before `rows` changes, so a failed write leaves
    // the sheet as it was.
    fn push_row(&self, rows: &mut Vec<Row>, post: &Post) -> Result<(), StoreError> {
        let mut updated = rows.clone();
        if updated.is_empty() {
            updated.push(header_row());
        }
        updated.push(post_to_row(post));

        if let Some(path) = &self.path {
            let tmp = tmp_path(path);
            fs::write(&tmp, serde_json::to_string_pretty(&updated)?)?;
            fs::rename(&tmp, path)?;
        }

        *rows = updated;
        debug!("appended post {} ({} rows)", post.id, rows.len());
        Ok(())
    }
}

impl PostStore for SheetStore {
    fn fetch_all_posts(&self) -> Result<Vec<Post>, StoreError> {
        Ok(posts_from_rows(&self.lock()?))
    }

    fn append_post(&self, post: Post) -> Result<(), StoreError> {
        let mut rows = self.lock()?;
        self.push_row(&mut rows, &post)
    }

    fn allocate_and_append(
        &self,
        new_post: NewPost,
        created_at: DateTime<Utc>,
    ) -> Result<Post, StoreError> {
        let mut rows = self.lock()?;
        let post = new_row_post(&posts_from_rows(&rows), new_post, created_at);
        self.push_row(&mut rows, &post)?;
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn cells(row: &[&str]) -> Row {
        row.iter().map(|cell| cell.to_string()).collect()
    }

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.into(),
            url: format!("https://example.com/{}", title),
        }
    }

    fn when() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn header_is_skipped() {
        let store = SheetStore::from_rows(vec![
            header_row(),
            cells(&["1", "One", "https://one.example", "4", "2024-03-01T09:30:00+00:00"]),
        ]);

        let posts = store.fetch_all_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[0].vote_count, 4);
        assert_eq!(posts[0].created_at, when());
    }

    #[test]
    fn loose_rows() {
        let store = SheetStore::from_rows(vec![
            header_row(),
            cells(&["1", "bad votes", "https://a.example", "lots", "2024-03-01T09:30:00Z"]),
            cells(&["x", "bad id", "https://b.example", "1", "2024-03-01T09:30:00Z"]),
            cells(&["3", "bad date", "https://c.example", "1", "yesterday"]),
            cells(&["4", "short"]),
            cells(&["5", "offset", "https://d.example", "-2", "2024-03-01T11:30:00+02:00"]),
        ]);

        let posts = store.fetch_all_posts().unwrap();
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 5]);
        assert_eq!(posts[0].vote_count, 0);
        assert_eq!(posts[1].vote_count, -2);
        assert_eq!(posts[1].created_at, when());
    }

    #[test]
    fn empty_sheet() {
        assert!(SheetStore::from_rows(vec![]).fetch_all_posts().unwrap().is_empty());
        assert!(SheetStore::in_memory().fetch_all_posts().unwrap().is_empty());
    }

    #[test]
    fn allocates_sequential_ids() {
        let store = SheetStore::in_memory();

        let first = store.allocate_and_append(new_post("a"), when()).unwrap();
        let second = store.allocate_and_append(new_post("b"), when()).unwrap();

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(second.vote_count, 0);
        assert_eq!(store.fetch_all_posts().unwrap(), vec![first, second]);

        let rows = store.rows().unwrap();
        assert_eq!(rows[0], header_row());
        assert_eq!(
            rows[2],
            cells(&["2", "b", "https://example.com/b", "0", "2024-03-01T09:30:00+00:00"])
        );
    }

    #[test]
    fn append_to_headerless_sheet_adds_header() {
        let store = SheetStore::from_rows(vec![]);
        let post = store.allocate_and_append(new_post("a"), when()).unwrap();

        assert_eq!(store.rows().unwrap()[0], header_row());
        assert_eq!(store.fetch_all_posts().unwrap(), vec![post]);
    }

    #[test]
    fn file_sheet_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");

        let store = SheetStore::open(&path).unwrap();
        assert!(store.fetch_all_posts().unwrap().is_empty());
        store.allocate_and_append(new_post("a"), when()).unwrap();
        store.allocate_and_append(new_post("b"), when()).unwrap();
        drop(store);

        let reopened = SheetStore::open(&path).unwrap();
        let posts = reopened.fetch_all_posts().unwrap();
        assert_eq!(posts.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(reopened.allocate_and_append(new_post("c"), when()).unwrap().id, 3);
    }

    #[test]
    fn failed_write_keeps_sheet_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("posts.json");

        let store = SheetStore::open(&path).unwrap();
        let result = store.allocate_and_append(new_post("a"), when());

        assert!(matches!(result, Err(StoreError::Io(_))));
        assert!(store.fetch_all_posts().unwrap().is_empty());
        assert_eq!(store.rows().unwrap(), vec![header_row()]);
    }

    #[test]
    fn tmp_named_sheet_is_replaced_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.tmp");
        assert_eq!(tmp_path(&path), dir.path().join("posts.tmp.tmp"));

        let store = SheetStore::open(&path).unwrap();
        store.allocate_and_append(new_post("a"), when()).unwrap();

        assert!(!tmp_path(&path).exists());
        let reopened = SheetStore::open(&path).unwrap();
        assert_eq!(reopened.fetch_all_posts().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        fs::write(&path, "{ not rows").unwrap();

        assert!(matches!(SheetStore::open(&path), Err(StoreError::Json(_))));
    }
}
