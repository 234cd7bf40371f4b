//! Page bookkeeping: which pages are loaded and which fetch is current.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identifies one issued fetch.
///
/// Every fetch gets a fresh `id`, so two requests for the same page (for
/// example before and after a reset) never share a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct FetchTicket {
    pub id: u64,
    pub page: u32,
}

/// Set of pages whose posts have been appended to the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PageLedger {
    pages: BTreeSet<u32>,
}

impl PageLedger {
    /// Record `page` as loaded. Returns `false` if it was already recorded.
    pub fn record(&mut self, page: u32) -> bool {
        self.pages.insert(page)
    }

    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Loaded pages in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.iter().copied()
    }

    pub fn clear(&mut self) {
        self.pages.clear();
    }
}
