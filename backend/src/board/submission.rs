use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("url scheme must be http or https, got {0}")]
    UnsupportedScheme(String),
    #[error("url has no host")]
    MissingHost,
}

/// A submission that passed validation but has no id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub url: String,
}

pub fn validate_submission(title: &str, url: &str) -> Result<NewPost, SubmissionError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(SubmissionError::EmptyTitle);
    }

    let parsed = Url::parse(url.trim()).map_err(|err| SubmissionError::InvalidUrl(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(SubmissionError::UnsupportedScheme(other.to_owned())),
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(SubmissionError::MissingHost);
    }

    Ok(NewPost {
        title: title.to_owned(),
        url: url.trim().to_owned(),
    })
}
