use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::config::Config;
use crate::event::Event;
use crate::feed::{is_near_end, Command, FeedEvent, FeedState};
use crate::loader;
use crate::source::StorySource;
use crate::types::NewsItem;

/// Rows moved by Ctrl+d / Ctrl+u
const SCROLL_PAGE: usize = 10;

pub struct App {
    pub feed: FeedState,
    pub selected: usize,
    pub should_quit: bool,
    end_threshold: f64,
    source: Arc<dyn StorySource>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        source: Arc<dyn StorySource>,
        config: &Config,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            feed: FeedState::new(config.page_size),
            selected: 0,
            should_quit: false,
            end_threshold: config.end_threshold,
            source,
            action_tx,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn selected_item(&self) -> Option<&NewsItem> {
        self.feed.items().get(self.selected)
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => FeedEvent::Mount.into(),
            Event::Key(key) => self.handle_key(key),
            _ => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('d') => Action::PageDown,
                KeyCode::Char('u') => Action::PageUp,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
            KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Enter | KeyCode::Char('o') => Action::OpenInBrowser,
            KeyCode::Char('r') => Action::refresh(),
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::ScrollDown => self.move_to(self.selected + 1),
            Action::PageUp => {
                self.selected = self.selected.saturating_sub(SCROLL_PAGE);
            }
            Action::PageDown => self.move_to(self.selected + SCROLL_PAGE),
            Action::GoToTop => {
                self.selected = 0;
            }
            Action::GoToBottom => self.move_to(usize::MAX),
            Action::OpenInBrowser => {
                // Text posts have nowhere to go.
                if let Some(url) = self.selected_item().and_then(|item| item.url.as_deref()) {
                    if let Err(e) = open::that(url) {
                        tracing::warn!(url, error = %e, "failed to open browser");
                    }
                }
            }
            Action::Feed(event) => {
                if let Some(command) = self.feed.update(event) {
                    self.spawn_command(command);
                }
                self.clamp_selection();
            }
            Action::None => {}
        }
    }

    /// Move the selection (clamped to the loaded list) and ask for the next page when it
    /// lands near the end.
    fn move_to(&mut self, target: usize) {
        let len = self.feed.items().len();
        if len == 0 {
            return;
        }
        self.selected = target.min(len - 1);
        if is_near_end(self.selected, len, self.end_threshold) {
            self.update(FeedEvent::EndReached.into());
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.feed.items().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn spawn_command(&self, command: Command) {
        let tx = self.action_tx.clone();
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let outcome = loader::execute(source.as_ref(), command).await;
            tx.send(Action::Feed(outcome)).ok();
        });
    }
}
