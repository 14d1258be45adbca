use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Identifier of a story on the remote side. Ordering inside an index is the remote ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct StoryId(pub u64);

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ranked list of top story ids, fetched wholesale.
pub type StoryIndex = Vec<StoryId>;

/// A materialized story
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewsItem {
    pub id: StoryId,
    #[serde(default)]
    pub title: String,
    /// Missing for text posts (Ask HN and friends)
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "by", default)]
    pub author: String,
    /// Seconds since the Unix epoch
    #[serde(rename = "time", default)]
    pub created_at: i64,
    #[serde(default)]
    pub score: i64,
}

impl NewsItem {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }

    pub fn has_link(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
    }
}
