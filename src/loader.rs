use futures::future::try_join_all;

use crate::error::{HnError, Result};
use crate::feed::{Command, FeedEvent};
use crate::source::StorySource;
use crate::types::{NewsItem, StoryId};

/// Fetch every id concurrently and return the items in input order.
/// A single failed fetch fails the whole page.
pub async fn materialize_page(source: &dyn StorySource, ids: &[StoryId]) -> Result<Vec<NewsItem>> {
    try_join_all(ids.iter().map(|&id| async move {
        source
            .fetch_item(id)
            .await
            .map_err(|e| HnError::PartialPage {
                id,
                reason: e.to_string(),
            })
    }))
    .await
}

/// Run a controller command against the source and turn the outcome into the event that
/// reports it.
pub async fn execute(source: &dyn StorySource, command: Command) -> FeedEvent {
    match command {
        Command::FetchIndex { generation } => match source.fetch_index().await {
            Ok(index) => FeedEvent::IndexLoaded { generation, index },
            Err(error) => FeedEvent::LoadFailed { generation, error },
        },
        Command::FetchPage {
            generation,
            page,
            ids,
        } => match materialize_page(source, &ids).await {
            Ok(items) => FeedEvent::PageLoaded {
                generation,
                page,
                items,
            },
            Err(error) => FeedEvent::LoadFailed { generation, error },
        },
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::feed::{FeedState, Phase};
    use crate::source::fake::FakeSource;

    #[tokio::test]
    async fn page_keeps_input_order() {
        let mut source = FakeSource::default();
        source.delays.insert(StoryId(3), Duration::from_millis(40));
        source.delays.insert(StoryId(1), Duration::from_millis(20));

        let ids = [StoryId(3), StoryId(1), StoryId(2)];
        let items = materialize_page(&source, &ids).await.unwrap();
        let got: Vec<u64> = items.iter().map(|i| i.id.0).collect();
        assert_eq!(got, vec![3, 1, 2]);
        assert_eq!(source.item_calls(), 3);
    }

    #[tokio::test]
    async fn one_failed_item_fails_the_page() {
        let mut source = FakeSource::default();
        source.failing.insert(StoryId(2));

        let err = materialize_page(&source, &[StoryId(1), StoryId(2), StoryId(3)])
            .await
            .unwrap_err();
        match err {
            HnError::PartialPage { id, .. } => assert_eq!(id, StoryId(2)),
            other => panic!("expected PartialPage, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_page_is_empty() {
        let source = FakeSource::default();
        let items = materialize_page(&source, &[]).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(source.item_calls(), 0);
    }

    #[tokio::test]
    async fn index_failure_reports_load_failed() {
        let source = FakeSource {
            fail_index: true,
            ..Default::default()
        };
        let event = execute(&source, Command::FetchIndex { generation: 4 }).await;
        assert!(matches!(
            event,
            FeedEvent::LoadFailed {
                generation: 4,
                error: HnError::Network(_)
            }
        ));
    }

    /// Drive the controller to quiescence, executing every command it emits.
    async fn drive(feed: &mut FeedState, source: &FakeSource, event: FeedEvent) {
        let mut next = feed.update(event);
        while let Some(command) = next {
            let outcome = execute(source, command).await;
            next = feed.update(outcome);
        }
    }

    #[tokio::test]
    async fn end_to_end_paging_against_source() {
        let source = FakeSource::with_ids(1..=25);
        let mut feed = FeedState::default();

        drive(&mut feed, &source, FeedEvent::Mount).await;
        assert_eq!(feed.items().len(), 10);
        assert_eq!(source.index_calls(), 1);

        drive(&mut feed, &source, FeedEvent::EndReached).await;
        drive(&mut feed, &source, FeedEvent::EndReached).await;
        assert_eq!(feed.items().len(), 25);
        assert_eq!(source.item_calls(), 25);

        // Exhausted: no further network traffic.
        drive(&mut feed, &source, FeedEvent::EndReached).await;
        assert_eq!(source.item_calls(), 25);
        assert_eq!(feed.phase(), Phase::Ready);

        drive(&mut feed, &source, FeedEvent::Refresh).await;
        assert_eq!(source.index_calls(), 2);
        assert_eq!(feed.items().len(), 10);
        assert_eq!(feed.cursor(), 1);
    }

    #[tokio::test]
    async fn failing_item_skips_page_append() {
        let mut source = FakeSource::with_ids(1..=25);
        source.failing.insert(StoryId(15));
        let mut feed = FeedState::default();

        drive(&mut feed, &source, FeedEvent::Mount).await;
        drive(&mut feed, &source, FeedEvent::EndReached).await;

        assert_eq!(feed.items().len(), 10);
        assert_eq!(feed.cursor(), 1);
        assert!(!feed.is_loading_more());
        assert_eq!(feed.phase(), Phase::Ready);
    }
}
