//! Feed session driver.
//!
//! A [`Session`] owns the current [`FeedSnapshot`] and is the only place it is
//! replaced. User input and fetch completions both arrive as [`FeedEvent`]s and
//! are applied one at a time; the commands each transition emits are executed
//! here. Fetches run as spawned tasks that report back on the session's event
//! channel, and the task's [`AbortHandle`] is kept per ticket so a `Cancel`
//! command can stop it.

pub mod input;
pub mod layout;

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use feed_client::PageSource;
use feed_core::{
    FeedCommand, FeedEvent, FeedSettings, FeedSnapshot, FetchRequest, FetchTicket, Post,
    Transition, Viewport,
};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::cli::OutputFormat;
use crate::output;
use crate::progress::Progress;
use input::UserCommand;
use layout::Layout;

const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

#[derive(Clone, Copy, Debug)]
pub struct SessionOptions {
    pub settings: FeedSettings,
    pub layout: Layout,
    /// Rows of the document shown at once. The status line and prompt come on
    /// top of these.
    pub viewport_rows: u32,
    /// Rows moved by a bare `j`/`k`.
    pub step: u32,
    /// Show an indicatif spinner while a page loads.
    pub spinner: bool,
    /// Clear the terminal before each frame.
    pub redraw: bool,
    /// Format of `status` output.
    pub format: OutputFormat,
}

/// One settled page request.
#[derive(Clone, Debug, Serialize)]
pub struct PageLoad {
    pub page: u32,
    pub count: usize,
    pub at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub page: u32,
    pub loaded_pages: Vec<u32>,
    pub posts: usize,
    pub visible: usize,
    pub term: String,
    pub loading: bool,
    pub exhausted: bool,
    pub viewport: Viewport,
    pub history: Vec<PageLoad>,
}

enum Flow {
    Redraw,
    Prompt,
    Quit,
}

pub struct Session<S> {
    source: Arc<S>,
    snapshot: FeedSnapshot,
    viewport: Viewport,
    options: SessionOptions,
    events_tx: mpsc::UnboundedSender<FeedEvent>,
    events_rx: mpsc::UnboundedReceiver<FeedEvent>,
    fetches: HashMap<FetchTicket, AbortHandle>,
    history: Vec<PageLoad>,
    progress: Option<Progress>,
}

impl<S: PageSource> Session<S> {
    #[must_use]
    pub fn new(source: Arc<S>, options: SessionOptions) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut session = Self {
            source,
            snapshot: FeedSnapshot::new(options.settings),
            viewport: Viewport::new(0, options.viewport_rows, 0),
            options,
            events_tx,
            events_rx,
            fetches: HashMap::new(),
            history: Vec::new(),
            progress: None,
        };
        session.refresh_viewport();
        session
    }

    #[must_use]
    pub const fn snapshot(&self) -> &FeedSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn history(&self) -> &[PageLoad] {
        &self.history
    }

    /// Posts matching the current term.
    #[must_use]
    pub fn visible(&self) -> Vec<&Post> {
        self.snapshot.visible()
    }

    /// Rows of the full document as currently filtered.
    #[must_use]
    pub fn document(&self) -> Vec<String> {
        self.options.layout.document(&self.snapshot)
    }

    /// Apply one event and execute whatever it asks for.
    pub fn handle(&mut self, event: FeedEvent) {
        let completed = match &event {
            FeedEvent::FetchCompleted { ticket, posts } => {
                self.fetches.remove(ticket);
                Some((ticket.page, posts.len()))
            }
            FeedEvent::FetchFailed { ticket, .. } => {
                self.fetches.remove(ticket);
                None
            }
            _ => None,
        };
        let loaded_before = self.snapshot.loaded_pages().len();

        let Transition { snapshot, commands } = std::mem::take(&mut self.snapshot).apply(event);
        self.snapshot = snapshot;

        if let Some((page, count)) = completed
            && self.snapshot.loaded_pages().len() > loaded_before
        {
            tracing::info!(page, count, "page loaded");
            self.history.push(PageLoad {
                page,
                count,
                at: Utc::now(),
                error: None,
            });
        }

        for command in commands {
            self.execute(command);
        }

        if !self.snapshot.is_loading()
            && let Some(progress) = self.progress.take()
        {
            progress.finish_clear();
        }
        self.refresh_viewport();
    }

    /// Move the window and report the new position.
    pub fn scroll(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.handle(FeedEvent::ScrollReported(viewport));
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.handle(FeedEvent::TermChanged(term.into()));
    }

    /// Drop everything and start over from page 1 at the top of the feed.
    pub fn reset(&mut self) {
        self.viewport.scroll_top = 0;
        self.handle(FeedEvent::Reset);
    }

    /// Wait until no fetch is in flight, applying events as they arrive.
    pub async fn settle(&mut self) {
        while self.snapshot.is_loading() {
            let Some(event) = self.events_rx.recv().await else {
                break;
            };
            self.handle(event);
        }
    }

    /// Load the first page, then scroll to the bottom until `pages` pages are
    /// loaded or the listing runs out.
    ///
    /// # Errors
    ///
    /// Returns an error naming the page if a page fails to load.
    pub async fn load_pages(&mut self, pages: u32) -> anyhow::Result<()> {
        self.handle(FeedEvent::Started);
        self.settle().await;
        self.check_last_load()?;

        while self.loaded_count() < pages && !self.snapshot.is_exhausted() {
            self.scroll(self.viewport.at_bottom());
            if !self.snapshot.is_loading() {
                break;
            }
            self.settle().await;
            self.check_last_load()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn status(&self) -> StatusReport {
        StatusReport {
            page: self.snapshot.page(),
            loaded_pages: self.snapshot.loaded_pages().iter().collect(),
            posts: self.snapshot.posts().len(),
            visible: self.snapshot.visible().len(),
            term: self.snapshot.term().to_string(),
            loading: self.snapshot.is_loading(),
            exhausted: self.snapshot.is_exhausted(),
            viewport: self.viewport,
            history: self.history.clone(),
        }
    }

    /// Run the interactive loop until `q` or end of input.
    ///
    /// Input lines and fetch completions are interleaved in arrival order.
    pub async fn run_interactive<R, W>(&mut self, input: R, out: &mut W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        self.handle(FeedEvent::Started);
        self.draw(out)?;

        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("failed to read input")? else {
                        break;
                    };
                    let flow = match input::parse(&line, self.options.step) {
                        Ok(command) => self.apply(command, out)?,
                        Err(error) => {
                            writeln!(out, "{error}")?;
                            Flow::Prompt
                        }
                    };
                    match flow {
                        Flow::Redraw => self.draw(out)?,
                        Flow::Prompt => prompt(out)?,
                        Flow::Quit => break,
                    }
                }
                Some(event) = self.events_rx.recv() => {
                    self.handle(event);
                    self.draw(out)?;
                }
            }
        }
        Ok(())
    }

    fn apply<W: Write>(&mut self, command: UserCommand, out: &mut W) -> anyhow::Result<Flow> {
        let height = i64::from(self.viewport.viewport_height);
        match command {
            UserCommand::Down(rows) => self.scroll(self.viewport.scrolled_by(i64::from(rows))),
            UserCommand::Up(rows) => self.scroll(self.viewport.scrolled_by(-i64::from(rows))),
            UserCommand::PageDown => self.scroll(self.viewport.scrolled_by(height)),
            UserCommand::PageUp => self.scroll(self.viewport.scrolled_by(-height)),
            UserCommand::Bottom => self.scroll(self.viewport.at_bottom()),
            UserCommand::Top => self.scroll(Viewport {
                scroll_top: 0,
                ..self.viewport
            }),
            UserCommand::Search(term) => self.set_term(term),
            UserCommand::Reset => self.reset(),
            UserCommand::Status => {
                writeln!(out, "{}", output::render(&self.status(), self.options.format)?)?;
                return Ok(Flow::Prompt);
            }
            UserCommand::Help => {
                writeln!(out, "{}", input::HELP)?;
                return Ok(Flow::Prompt);
            }
            UserCommand::Redraw => {}
            UserCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Redraw)
    }

    fn execute(&mut self, command: FeedCommand) {
        match command {
            FeedCommand::Fetch(request) => self.spawn_fetch(request),
            FeedCommand::Cancel(ticket) => {
                if let Some(task) = self.fetches.remove(&ticket) {
                    task.abort();
                    tracing::debug!(page = ticket.page, ticket = ticket.id, "cancelled fetch");
                }
            }
            FeedCommand::LogFailure { page, reason } => {
                tracing::error!(page, %reason, "failed to load page");
                if let Some(progress) = self.progress.take() {
                    progress.finish_err(&format!("page {page} failed to load"));
                }
                self.history.push(PageLoad {
                    page,
                    count: 0,
                    at: Utc::now(),
                    error: Some(reason),
                });
            }
        }
    }

    fn spawn_fetch(&mut self, request: FetchRequest) {
        let source = Arc::clone(&self.source);
        let events = self.events_tx.clone();
        let ticket = request.ticket;

        let task = tokio::spawn(async move {
            let event = match source.load_page(ticket.page, request.limit).await {
                Ok(posts) => FeedEvent::FetchCompleted { ticket, posts },
                Err(error) => FeedEvent::FetchFailed {
                    ticket,
                    reason: error.to_string(),
                },
            };
            // The receiver only goes away with the session.
            let _ = events.send(event);
        });
        self.fetches.insert(ticket, task.abort_handle());

        if self.options.spinner {
            self.progress = Some(Progress::loading_page(ticket.page));
        }
    }

    fn refresh_viewport(&mut self) {
        let document = self.document();
        self.viewport = self
            .viewport
            .with_document_height(layout::height(&document));
    }

    fn loaded_count(&self) -> u32 {
        u32::try_from(self.snapshot.loaded_pages().len()).unwrap_or(u32::MAX)
    }

    fn check_last_load(&self) -> anyhow::Result<()> {
        match self.history.last() {
            Some(PageLoad {
                page,
                error: Some(error),
                ..
            }) => anyhow::bail!("page {page} failed to load: {error}"),
            _ => Ok(()),
        }
    }

    fn draw<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let document = self.document();
        if self.options.redraw {
            write!(out, "{CLEAR_SCREEN}")?;
        }
        for row in layout::window(&document, self.viewport) {
            writeln!(out, "{row}")?;
        }
        writeln!(out, "{}", self.status_line(&document))?;
        prompt(out)
    }

    fn status_line(&self, document: &[String]) -> String {
        let first = self.viewport.scroll_top.saturating_add(1);
        let last = self
            .viewport
            .scroll_top
            .saturating_add(self.viewport.viewport_height)
            .min(layout::height(document));
        let mut line = format!(
            "-- page {} | {}/{} posts | rows {first}-{last} of {} --",
            self.snapshot.page(),
            self.snapshot.visible().len(),
            self.snapshot.posts().len(),
            document.len(),
        );
        if self.snapshot.is_loading() {
            line.push_str(" loading");
        }
        line
    }
}

impl<S> Drop for Session<S> {
    fn drop(&mut self) {
        for task in self.fetches.values() {
            task.abort();
        }
    }
}

fn prompt<W: Write>(out: &mut W) -> std::io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
