use crate::feed::FeedEvent;

#[derive(Debug)]
pub enum Action {
    Quit,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    OpenInBrowser,

    // Controller events: mount, refresh, end reached and fetch outcomes
    Feed(FeedEvent),

    None,
}

impl From<FeedEvent> for Action {
    fn from(event: FeedEvent) -> Self {
        Action::Feed(event)
    }
}

impl Action {
    pub fn refresh() -> Self {
        Action::Feed(FeedEvent::Refresh)
    }
}
