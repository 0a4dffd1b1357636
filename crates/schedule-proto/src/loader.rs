//! Fetching `schedule.json` and turning failures into the banner the viewer
//! sees. There is no retry: a failed load stays failed until the next reload.

use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::model::ScheduleDocument;

const USER_AGENT: &str = "radio-schedule/0.1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid schedule document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What the viewer is told when something went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    /// The document could not be fetched or decoded.
    LoadFailure,
    /// The document loaded but its producer reported a problem.
    SourceReported(String),
}

impl Banner {
    pub fn message(&self) -> String {
        match self {
            Self::LoadFailure => {
                "Unable to load the schedule. Please try again later.".to_string()
            }
            Self::SourceReported(msg) => msg.clone(),
        }
    }

    pub fn for_document(doc: &ScheduleDocument) -> Option<Self> {
        doc.reported_error()
            .map(|msg| Self::SourceReported(msg.to_string()))
    }
}

impl From<&LoadError> for Banner {
    fn from(_: &LoadError) -> Self {
        Self::LoadFailure
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

pub fn parse_document(bytes: &[u8]) -> Result<ScheduleDocument, LoadError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Load the document from an `http(s)://` URL or a local file path.
pub async fn load_document(location: &str) -> Result<ScheduleDocument, LoadError> {
    let result = if is_url(location) {
        fetch_url(location).await
    } else {
        read_file(location).await
    };
    match &result {
        Ok(doc) => {
            info!(
                "[schedule] loaded {} day(s) from {} (week {}..{})",
                doc.schedule.len(),
                location,
                doc.week_start,
                doc.week_end
            );
            if let Some(msg) = doc.reported_error() {
                warn!("[schedule] producer reported: {}", msg);
            }
        }
        Err(e) => error!("[schedule] load from {} failed: {}", location, e),
    }
    result
}

async fn fetch_url(url: &str) -> Result<ScheduleDocument, LoadError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(LoadError::Status(resp.status()));
    }
    let bytes = resp.bytes().await?;
    parse_document(&bytes)
}

async fn read_file(path: &str) -> Result<ScheduleDocument, LoadError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_document(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.org/schedule.json"));
        assert!(is_url("http://localhost:8000/schedule.json"));
        assert!(!is_url("schedule.json"));
        assert!(!is_url("/srv/docs/schedule.json"));
    }

    #[test]
    fn test_banner_messages() {
        assert_eq!(
            Banner::LoadFailure.message(),
            "Unable to load the schedule. Please try again later."
        );
        let doc = ScheduleDocument {
            error: Some("Could not find schedule file".into()),
            ..Default::default()
        };
        assert_eq!(
            Banner::for_document(&doc),
            Some(Banner::SourceReported("Could not find schedule file".into()))
        );
        assert_eq!(Banner::for_document(&ScheduleDocument::default()), None);
    }

    #[test]
    fn test_parse_errors_map_to_load_failure() {
        let err = parse_document(b"<html>404</html>").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        assert_eq!(Banner::from(&err), Banner::LoadFailure);
    }
}
