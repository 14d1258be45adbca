//! Pagination controller for the top-stories list.
//!
//! `FeedState::update` is a pure transition: it applies one event and returns the fetch the
//! caller should perform next, if any. Executing that fetch and feeding the outcome back in as
//! another event is the job of [`crate::loader`].

use crate::error::HnError;
use crate::types::{NewsItem, StoryId, StoryIndex};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Fraction of the loaded list left below the selection when the next page is requested
pub const DEFAULT_END_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    InitialLoading,
    Ready,
    LoadingMore,
    Refreshing,
}

/// A fetch to perform on behalf of the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchIndex {
        generation: u64,
    },
    FetchPage {
        generation: u64,
        page: usize,
        ids: Vec<StoryId>,
    },
}

#[derive(Debug)]
pub enum FeedEvent {
    Mount,
    Refresh,
    EndReached,
    IndexLoaded {
        generation: u64,
        index: StoryIndex,
    },
    PageLoaded {
        generation: u64,
        page: usize,
        items: Vec<NewsItem>,
    },
    LoadFailed {
        generation: u64,
        error: HnError,
    },
}

#[derive(Debug)]
pub struct FeedState {
    phase: Phase,
    index: StoryIndex,
    items: Vec<NewsItem>,
    cursor: usize,
    page_size: usize,
    // Bumped on every mount/refresh; results tagged with an older value are dropped.
    generation: u64,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl FeedState {
    pub fn new(page_size: usize) -> Self {
        Self {
            phase: Phase::Idle,
            index: Vec::new(),
            items: Vec::new(),
            cursor: 0,
            page_size: page_size.max(1),
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    /// Number of pages appended so far
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    /// True for the first load and for refreshes; both show the full-screen spinner.
    pub fn is_initial_loading(&self) -> bool {
        matches!(self.phase, Phase::InitialLoading | Phase::Refreshing)
    }

    pub fn is_loading_more(&self) -> bool {
        self.phase == Phase::LoadingMore
    }

    pub fn has_more(&self) -> bool {
        self.cursor * self.page_size < self.index.len()
    }

    pub fn update(&mut self, event: FeedEvent) -> Option<Command> {
        match event {
            FeedEvent::Mount => {
                if self.phase != Phase::Idle {
                    tracing::debug!(phase = ?self.phase, "mount ignored");
                    return None;
                }
                self.generation += 1;
                self.phase = Phase::InitialLoading;
                Some(Command::FetchIndex {
                    generation: self.generation,
                })
            }

            FeedEvent::Refresh => match self.phase {
                Phase::Idle | Phase::Ready | Phase::LoadingMore => {
                    // A page load still in flight belongs to the old generation and is
                    // discarded when it lands.
                    self.generation += 1;
                    self.phase = Phase::Refreshing;
                    self.items.clear();
                    self.cursor = 0;
                    Some(Command::FetchIndex {
                        generation: self.generation,
                    })
                }
                Phase::InitialLoading | Phase::Refreshing => None,
            },

            FeedEvent::EndReached => {
                if self.phase != Phase::Ready || !self.has_more() {
                    return None;
                }
                self.phase = Phase::LoadingMore;
                Some(self.next_page())
            }

            FeedEvent::IndexLoaded { generation, index } => {
                if self.is_stale(generation) || !self.is_initial_loading() {
                    return None;
                }
                tracing::info!(stories = index.len(), "story index loaded");
                self.index = index;
                self.cursor = 0;
                if self.index.is_empty() {
                    self.phase = Phase::Ready;
                    return None;
                }
                Some(self.next_page())
            }

            FeedEvent::PageLoaded {
                generation,
                page,
                items,
            } => {
                if self.is_stale(generation) {
                    return None;
                }
                if page != self.cursor || !self.is_loading() {
                    tracing::debug!(page, cursor = self.cursor, "unexpected page dropped");
                    return None;
                }
                tracing::debug!(page, count = items.len(), "page appended");
                self.items.extend(items);
                self.cursor += 1;
                self.phase = Phase::Ready;
                None
            }

            FeedEvent::LoadFailed { generation, error } => {
                if self.is_stale(generation) {
                    return None;
                }
                tracing::warn!(error = %error, phase = ?self.phase, "load failed");
                if self.is_loading() {
                    if self.items.is_empty() {
                        // Nothing to page through until the next refresh succeeds.
                        self.index.clear();
                        self.cursor = 0;
                        self.phase = Phase::Idle;
                    } else {
                        self.phase = Phase::Ready;
                    }
                }
                None
            }
        }
    }

    fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            Phase::InitialLoading | Phase::LoadingMore | Phase::Refreshing
        )
    }

    fn is_stale(&self, generation: u64) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "stale result dropped");
            return true;
        }
        false
    }

    fn next_page(&self) -> Command {
        let start = (self.cursor * self.page_size).min(self.index.len());
        let end = (start + self.page_size).min(self.index.len());
        Command::FetchPage {
            generation: self.generation,
            page: self.cursor,
            ids: self.index[start..end].to_vec(),
        }
    }
}

/// Whether a selection at `position` sits within the trailing `threshold` share of a list
/// of `len` rows.
pub fn is_near_end(position: usize, len: usize, threshold: f64) -> bool {
    if len == 0 {
        return false;
    }
    let remaining = len.saturating_sub(position + 1) as f64;
    remaining <= len as f64 * threshold
}
