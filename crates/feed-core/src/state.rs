//! Feed state machine.
//!
//! [`FeedSnapshot`] owns the three state slices of the feed (loaded posts,
//! page cursor, search term) plus the bookkeeping needed to keep page loads
//! idempotent. It is updated only through [`FeedSnapshot::apply`], which
//! consumes the old snapshot and returns the new one together with the
//! side effects the driver has to perform:
//!
//! ```text
//! Started ──────────────► Fetch(page 1)
//! ScrollReported ─near bottom, idle─► Fetch(cursor or cursor + 1)
//! FetchCompleted ─current ticket─► append posts, record page
//! FetchFailed ───current ticket─► LogFailure (page stays unrecorded)
//! TermChanged ──────────► replace term (view is derived)
//! Reset ────────────────► Cancel(in-flight), clear, Fetch(page 1)
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::filter::filter_posts;
use crate::ledger::{FetchTicket, PageLedger};
use crate::post::Post;
use crate::viewport::Viewport;
use crate::{DEFAULT_PAGE_SIZE, DEFAULT_SCROLL_THRESHOLD};

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Fixed parameters of a feed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FeedSettings {
    /// Posts requested per page (`_limit`).
    pub page_size: u32,
    /// Distance from the document bottom that triggers the next page.
    pub threshold: u32,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            threshold: DEFAULT_SCROLL_THRESHOLD,
        }
    }
}

impl FeedSettings {
    /// Build settings, rejecting a zero page size.
    pub fn new(page_size: u32, threshold: u32) -> Result<Self, CoreError> {
        if page_size == 0 {
            return Err(CoreError::Validation(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            page_size,
            threshold,
        })
    }
}

// ---------------------------------------------------------------------------
// Events and commands
// ---------------------------------------------------------------------------

/// Something that happened and may change the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// The view was opened; loads the first page.
    Started,
    /// The window moved (or the document under it changed height).
    ScrollReported(Viewport),
    /// The search box content changed.
    TermChanged(String),
    /// A fetch returned posts.
    FetchCompleted {
        ticket: FetchTicket,
        posts: Vec<Post>,
    },
    /// A fetch failed in transport or decoding.
    FetchFailed { ticket: FetchTicket, reason: String },
    /// Drop everything loaded and start again from page 1.
    Reset,
}

/// A page request the driver has to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub limit: u32,
}

impl FetchRequest {
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.ticket.page
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedCommand {
    /// Start fetching a page and report back with the same ticket.
    Fetch(FetchRequest),
    /// Abort the fetch holding this ticket; its result will be ignored anyway.
    Cancel(FetchTicket),
    /// Report a failed page load on the diagnostic stream.
    LogFailure { page: u32, reason: String },
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Transition {
    pub snapshot: FeedSnapshot,
    pub commands: Vec<FeedCommand>,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Complete state of one feed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct FeedSnapshot {
    settings: FeedSettings,
    posts: Vec<Post>,
    page: u32,
    term: String,
    in_flight: Option<FetchTicket>,
    loaded: PageLedger,
    next_ticket: u64,
    exhausted: bool,
}

impl Default for FeedSnapshot {
    fn default() -> Self {
        Self::new(FeedSettings::default())
    }
}

impl FeedSnapshot {
    /// Empty feed positioned on page 1.
    #[must_use]
    pub fn new(settings: FeedSettings) -> Self {
        Self {
            settings,
            posts: Vec::new(),
            page: 1,
            term: String::new(),
            in_flight: None,
            loaded: PageLedger::default(),
            next_ticket: 1,
            exhausted: false,
        }
    }

    /// Apply one event, producing the next snapshot and its side effects.
    pub fn apply(self, event: FeedEvent) -> Transition {
        let mut next = self;
        let mut commands = Vec::new();

        match event {
            FeedEvent::Started => {
                if next.can_request() && !next.loaded.contains(next.page) {
                    commands.push(next.issue(next.page));
                }
            }
            FeedEvent::ScrollReported(viewport) => {
                if viewport.near_bottom(next.settings.threshold)
                    && next.can_request()
                    && let Some(page) = next.next_page()
                {
                    next.page = page;
                    commands.push(next.issue(page));
                }
            }
            FeedEvent::TermChanged(term) => next.term = term,
            FeedEvent::FetchCompleted { ticket, posts } => next.complete(ticket, posts),
            FeedEvent::FetchFailed { ticket, reason } => {
                if next.settle(ticket) {
                    commands.push(FeedCommand::LogFailure {
                        page: ticket.page,
                        reason,
                    });
                }
            }
            FeedEvent::Reset => {
                if let Some(ticket) = next.in_flight.take() {
                    commands.push(FeedCommand::Cancel(ticket));
                }
                next.posts.clear();
                next.loaded.clear();
                next.page = 1;
                next.exhausted = false;
                commands.push(next.issue(1));
            }
        }

        Transition {
            snapshot: next,
            commands,
        }
    }

    /// Posts matching the current term, in load order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Post> {
        filter_posts(&self.posts, &self.term)
    }

    #[must_use]
    pub const fn settings(&self) -> FeedSettings {
        self.settings
    }

    /// Every loaded post, in load order.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Page cursor: the page most recently requested.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether a fetch is in flight (drives the loading indicator).
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub const fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    #[must_use]
    pub const fn loaded_pages(&self) -> &PageLedger {
        &self.loaded
    }

    /// Whether the endpoint has returned a short page, ending the listing.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    const fn can_request(&self) -> bool {
        self.in_flight.is_none() && !self.exhausted
    }

    /// Cursor page again if it never loaded, otherwise the one after it.
    fn next_page(&self) -> Option<u32> {
        if self.loaded.contains(self.page) {
            self.page.checked_add(1)
        } else {
            Some(self.page)
        }
    }

    fn issue(&mut self, page: u32) -> FeedCommand {
        let ticket = FetchTicket {
            id: self.next_ticket,
            page,
        };
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.in_flight = Some(ticket);
        tracing::debug!(page, ticket = ticket.id, "requesting page");
        FeedCommand::Fetch(FetchRequest {
            ticket,
            limit: self.settings.page_size,
        })
    }

    /// Clear the in-flight slot if `ticket` is the current fetch.
    fn settle(&mut self, ticket: FetchTicket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            tracing::debug!(
                page = ticket.page,
                ticket = ticket.id,
                "ignoring result of stale fetch"
            );
            false
        }
    }

    fn complete(&mut self, ticket: FetchTicket, posts: Vec<Post>) {
        if !self.settle(ticket) {
            return;
        }
        if !self.loaded.record(ticket.page) {
            tracing::debug!(page = ticket.page, "page already loaded; dropping duplicate");
            return;
        }

        let short = u32::try_from(posts.len()).is_ok_and(|count| count < self.settings.page_size);
        if short {
            tracing::debug!(page = ticket.page, count = posts.len(), "short page; listing exhausted");
            self.exhausted = true;
        }
        self.posts.extend(posts);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page_of(page: u32, size: u32) -> Vec<Post> {
        let first = u64::from((page - 1) * size + 1);
        (first..first + u64::from(size))
            .map(|id| Post::new(id, format!("post {id}"), "body"))
            .collect()
    }

    fn bottom() -> Viewport {
        Viewport::new(100, 24, 124)
    }

    fn fetch_of(commands: &[FeedCommand]) -> FetchRequest {
        match commands {
            [FeedCommand::Fetch(request)] => *request,
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    /// Start the feed and complete page 1.
    fn loaded_first_page() -> FeedSnapshot {
        let started = FeedSnapshot::default().apply(FeedEvent::Started);
        let request = fetch_of(&started.commands);
        started
            .snapshot
            .apply(FeedEvent::FetchCompleted {
                ticket: request.ticket,
                posts: page_of(1, 10),
            })
            .snapshot
    }

    #[test]
    fn starts_on_page_one_with_nothing_loaded() {
        let snapshot = FeedSnapshot::default();
        assert_eq!(snapshot.page(), 1);
        assert!(snapshot.posts().is_empty());
        assert!(snapshot.term().is_empty());
        assert!(!snapshot.is_loading());
    }

    #[test]
    fn started_requests_page_one() {
        let transition = FeedSnapshot::default().apply(FeedEvent::Started);
        let request = fetch_of(&transition.commands);
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit, 10);
        assert!(transition.snapshot.is_loading());
    }

    #[test]
    fn started_twice_does_not_duplicate_the_request() {
        let first = FeedSnapshot::default().apply(FeedEvent::Started);
        let second = first.snapshot.apply(FeedEvent::Started);
        assert!(second.commands.is_empty());
    }

    #[test]
    fn completion_appends_and_clears_loading() {
        let snapshot = loaded_first_page();
        assert_eq!(snapshot.posts().len(), 10);
        assert!(!snapshot.is_loading());
        assert!(snapshot.loaded_pages().contains(1));
        assert!(!snapshot.is_exhausted());
    }

    #[test]
    fn scroll_at_bottom_advances_cursor() {
        let transition = loaded_first_page().apply(FeedEvent::ScrollReported(bottom()));
        let request = fetch_of(&transition.commands);
        assert_eq!(request.page(), 2);
        assert_eq!(transition.snapshot.page(), 2);
    }

    #[test]
    fn scroll_below_threshold_keeps_cursor() {
        let snapshot = loaded_first_page();
        let transition = snapshot.apply(FeedEvent::ScrollReported(Viewport::new(0, 24, 124)));
        assert!(transition.commands.is_empty());
        assert_eq!(transition.snapshot.page(), 1);
    }

    #[test]
    fn scroll_while_loading_is_ignored() {
        let started = FeedSnapshot::default().apply(FeedEvent::Started);
        let transition = started.snapshot.apply(FeedEvent::ScrollReported(bottom()));
        assert!(transition.commands.is_empty());
        assert_eq!(transition.snapshot.page(), 1);
    }

    #[test]
    fn rapid_scroll_events_request_one_page() {
        let mut snapshot = loaded_first_page();
        let mut fetches = 0;
        for _ in 0..5 {
            let transition = snapshot.apply(FeedEvent::ScrollReported(bottom()));
            fetches += transition.commands.len();
            snapshot = transition.snapshot;
        }
        assert_eq!(fetches, 1);
        assert_eq!(snapshot.page(), 2);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let started = FeedSnapshot::default().apply(FeedEvent::Started);
        let stale = fetch_of(&started.commands).ticket;
        let reset = started.snapshot.apply(FeedEvent::Reset);
        assert_eq!(reset.commands[0], FeedCommand::Cancel(stale));

        let after = reset.snapshot.apply(FeedEvent::FetchCompleted {
            ticket: stale,
            posts: page_of(1, 10),
        });
        assert!(after.snapshot.posts().is_empty());
        assert!(after.snapshot.is_loading());
    }

    #[test]
    fn failure_logs_and_clears_loading_without_touching_posts() {
        let snapshot = loaded_first_page();
        let scrolled = snapshot.apply(FeedEvent::ScrollReported(bottom()));
        let ticket = fetch_of(&scrolled.commands).ticket;

        let failed = scrolled.snapshot.apply(FeedEvent::FetchFailed {
            ticket,
            reason: "connection refused".to_string(),
        });
        assert_eq!(
            failed.commands,
            vec![FeedCommand::LogFailure {
                page: 2,
                reason: "connection refused".to_string(),
            }]
        );
        assert_eq!(failed.snapshot.posts().len(), 10);
        assert!(!failed.snapshot.is_loading());
        assert!(!failed.snapshot.loaded_pages().contains(2));
    }

    #[test]
    fn failed_page_is_requested_again_on_next_threshold_crossing() {
        let scrolled = loaded_first_page().apply(FeedEvent::ScrollReported(bottom()));
        let ticket = fetch_of(&scrolled.commands).ticket;
        let failed = scrolled.snapshot.apply(FeedEvent::FetchFailed {
            ticket,
            reason: "timeout".to_string(),
        });

        let retried = failed.snapshot.apply(FeedEvent::ScrollReported(bottom()));
        let request = fetch_of(&retried.commands);
        assert_eq!(request.page(), 2);
        assert_ne!(request.ticket, ticket);
    }

    #[test]
    fn stale_failure_is_ignored() {
        let started = FeedSnapshot::default().apply(FeedEvent::Started);
        let ticket = fetch_of(&started.commands).ticket;
        let reset = started.snapshot.apply(FeedEvent::Reset);
        let failed = reset.snapshot.apply(FeedEvent::FetchFailed {
            ticket,
            reason: "aborted".to_string(),
        });
        assert!(failed.commands.is_empty());
        assert!(failed.snapshot.is_loading());
    }

    #[test]
    fn term_change_keeps_posts_and_in_flight_fetch() {
        let scrolled = loaded_first_page().apply(FeedEvent::ScrollReported(bottom()));
        let ticket = fetch_of(&scrolled.commands).ticket;

        let searched = scrolled.snapshot.apply(FeedEvent::TermChanged("post 1".to_string()));
        assert!(searched.commands.is_empty());
        assert_eq!(searched.snapshot.in_flight(), Some(ticket));
        assert_eq!(searched.snapshot.term(), "post 1");

        let completed = searched.snapshot.apply(FeedEvent::FetchCompleted {
            ticket,
            posts: page_of(2, 10),
        });
        let ids: Vec<u64> = completed.snapshot.visible().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19]);
    }

    #[test]
    fn short_page_exhausts_listing() {
        let started = FeedSnapshot::default().apply(FeedEvent::Started);
        let ticket = fetch_of(&started.commands).ticket;
        let completed = started.snapshot.apply(FeedEvent::FetchCompleted {
            ticket,
            posts: page_of(1, 4),
        });
        assert!(completed.snapshot.is_exhausted());

        let scrolled = completed.snapshot.apply(FeedEvent::ScrollReported(bottom()));
        assert!(scrolled.commands.is_empty());
        assert_eq!(scrolled.snapshot.page(), 1);
    }

    #[test]
    fn empty_page_exhausts_listing() {
        let started = FeedSnapshot::default().apply(FeedEvent::Started);
        let ticket = fetch_of(&started.commands).ticket;
        let completed = started.snapshot.apply(FeedEvent::FetchCompleted {
            ticket,
            posts: Vec::new(),
        });
        assert!(completed.snapshot.is_exhausted());
        assert!(completed.snapshot.loaded_pages().contains(1));
    }

    #[test]
    fn reset_clears_feed_keeps_term_and_reloads_page_one() {
        let snapshot = loaded_first_page()
            .apply(FeedEvent::TermChanged("post".to_string()))
            .snapshot;
        let reset = snapshot.apply(FeedEvent::Reset);
        let request = fetch_of(&reset.commands);
        assert_eq!(request.page(), 1);
        assert!(reset.snapshot.posts().is_empty());
        assert!(reset.snapshot.loaded_pages().is_empty());
        assert_eq!(reset.snapshot.term(), "post");
        assert_eq!(reset.snapshot.page(), 1);
    }

    #[test]
    fn tickets_are_unique_per_request() {
        let started = FeedSnapshot::default().apply(FeedEvent::Started);
        let first = fetch_of(&started.commands).ticket;
        let reset = started.snapshot.apply(FeedEvent::Reset);
        let second = match &reset.commands[..] {
            [FeedCommand::Cancel(_), FeedCommand::Fetch(request)] => request.ticket,
            other => panic!("unexpected commands {other:?}"),
        };
        assert_eq!(first.page, second.page);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn settings_reject_zero_page_size() {
        assert!(matches!(
            FeedSettings::new(0, 10),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(FeedSettings::new(5, 0).unwrap().page_size, 5);
    }

    #[test]
    fn custom_page_size_flows_into_requests() {
        let settings = FeedSettings::new(25, 10).unwrap();
        let transition = FeedSnapshot::new(settings).apply(FeedEvent::Started);
        assert_eq!(fetch_of(&transition.commands).limit, 25);
    }
}
