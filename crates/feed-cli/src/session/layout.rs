//! Line layout of the browse screen.
//!
//! The whole feed is laid out as one document of terminal rows; the viewport
//! selects a window of it. Document height is what the scroll threshold is
//! measured against, so everything that takes a row lives here.

use feed_core::{FeedSnapshot, Post, Viewport};

pub const TITLE: &str = "Infinite Scroll Posts";
pub const SUBTITLE: &str = "Seamlessly browse through posts with style!";
pub const SEARCH_PLACEHOLDER: &str = "Search posts by title...";
pub const LOADING: &str = "Loading more posts...";
pub const FOOTER: &str = "Powered by JSONPlaceholder API";

/// Narrowest width the layout wraps to.
const MIN_WIDTH: usize = 20;
const BODY_INDENT: &str = "  ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    width: usize,
    show_body: bool,
}

impl Layout {
    #[must_use]
    pub fn new(width: u32, show_body: bool) -> Self {
        let width = usize::try_from(width).unwrap_or(usize::MAX).max(MIN_WIDTH);
        Self { width, show_body }
    }

    /// Every row of the feed as currently filtered.
    #[must_use]
    pub fn document(&self, snapshot: &FeedSnapshot) -> Vec<String> {
        let mut rows = vec![
            center(TITLE, self.width),
            center(SUBTITLE, self.width),
            String::new(),
            search_line(snapshot.term()),
            String::new(),
        ];

        let visible = snapshot.visible();
        for post in &visible {
            self.push_post(&mut rows, post);
        }

        if visible.is_empty() && !snapshot.posts().is_empty() {
            rows.push(format!("No titles contain \"{}\".", snapshot.term()));
            rows.push(String::new());
        }
        if snapshot.is_loading() {
            rows.push(center(LOADING, self.width));
            rows.push(String::new());
        } else if snapshot.is_exhausted() {
            rows.push(center("End of listing.", self.width));
            rows.push(String::new());
        }

        rows.push(center(FOOTER, self.width));
        rows
    }

    fn push_post(&self, rows: &mut Vec<String>, post: &Post) {
        rows.extend(wrap(&format!("#{} {}", post.id, post.title), self.width));
        if self.show_body {
            let body_width = self.width - BODY_INDENT.len();
            for paragraph in post.body.lines() {
                rows.extend(
                    wrap(paragraph, body_width)
                        .into_iter()
                        .map(|line| format!("{BODY_INDENT}{line}")),
                );
            }
        }
        rows.push(String::new());
    }
}

/// Rows of `document` covered by `viewport`.
#[must_use]
pub fn window(document: &[String], viewport: Viewport) -> &[String] {
    let start = usize::try_from(viewport.scroll_top)
        .unwrap_or(usize::MAX)
        .min(document.len());
    let len = usize::try_from(viewport.viewport_height).unwrap_or(usize::MAX);
    let end = start.saturating_add(len).min(document.len());
    &document[start..end]
}

/// Height of a document in rows, saturating at `u32::MAX`.
#[must_use]
pub fn height(document: &[String]) -> u32 {
    u32::try_from(document.len()).unwrap_or(u32::MAX)
}

fn search_line(term: &str) -> String {
    if term.is_empty() {
        format!("Search: ({SEARCH_PLACEHOLDER})")
    } else {
        format!("Search: {term}")
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = width.saturating_sub(len) / 2;
    format!("{}{text}", " ".repeat(left))
}

/// Greedy word wrap. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
