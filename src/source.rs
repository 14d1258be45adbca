use async_trait::async_trait;

use crate::error::Result;
use crate::types::{NewsItem, StoryId, StoryIndex};

/// Remote collection of ranked stories.
#[async_trait]
pub trait StorySource: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Ranked list of current top story ids
    async fn fetch_index(&self) -> Result<StoryIndex>;

    async fn fetch_item(&self, id: StoryId) -> Result<NewsItem>;
}
