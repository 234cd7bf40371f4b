//! # feed-core
//!
//! Post model, filter view, and pagination state machine for postfeed.
//!
//! This crate holds everything that does not touch the network or the
//! terminal:
//! - [`Post`], the immutable item returned by the listing endpoint
//! - [`filter_posts`], the case-insensitive title filter
//! - [`Viewport`], the scroll geometry and bottom-threshold check
//! - [`FeedSnapshot`], the explicit feed state updated by discrete
//!   [`FeedEvent`]s, emitting [`FeedCommand`]s for the driver to execute
//! - [`PageLedger`] and [`FetchTicket`], which make page loads idempotent and
//!   let stale completions be rejected

pub mod errors;
pub mod filter;
pub mod ledger;
pub mod post;
pub mod state;
pub mod viewport;

pub use errors::CoreError;
pub use filter::filter_posts;
pub use ledger::{FetchTicket, PageLedger};
pub use post::Post;
pub use state::{FeedCommand, FeedEvent, FeedSettings, FeedSnapshot, FetchRequest, Transition};
pub use viewport::Viewport;

/// Public listing endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// Number of posts requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Distance from the bottom of the document that triggers the next page load.
pub const DEFAULT_SCROLL_THRESHOLD: u32 = 10;
