use thiserror::Error;

use crate::types::StoryId;

#[derive(Error, Debug)]
pub enum HnError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Page load failed on item {id}: {reason}")]
    PartialPage { id: StoryId, reason: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for HnError {
    fn from(err: reqwest::Error) -> Self {
        HnError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HnError>;
