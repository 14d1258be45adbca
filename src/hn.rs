use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{HnError, Result};
use crate::source::StorySource;
use crate::types::{NewsItem, StoryId, StoryIndex};

pub const DEFAULT_API_BASE: &str = "https://hacker-news.firebaseio.com/v0";

/// Hacker News Firebase API client
pub struct HackerNews {
    client: Client,
    api_base: String,
}

impl std::fmt::Debug for HackerNews {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HackerNews")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl HackerNews {
    pub fn new(api_base: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("hntop/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HnError::Config(e.to_string()))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url, "GET");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(HnError::Network(format!("HN API {}: {}", status, text)));
        }

        response.json().await.map_err(HnError::from)
    }
}

#[async_trait]
impl StorySource for HackerNews {
    fn name(&self) -> &str {
        "Hacker News"
    }

    async fn fetch_index(&self) -> Result<StoryIndex> {
        self.get_json(&self.api_url("/topstories.json")).await
    }

    async fn fetch_item(&self, id: StoryId) -> Result<NewsItem> {
        // Deleted or unknown ids come back as a literal `null`.
        let item: Option<NewsItem> = self
            .get_json(&self.api_url(&format!("/item/{}.json", id)))
            .await?;
        item.ok_or_else(|| HnError::Network(format!("item {} not found", id)))
    }
}
