//! Scroll geometry.
//!
//! All distances share one unit. The terminal front end measures them in
//! rendered rows.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Position of the visible window over the rendered document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Viewport {
    /// Offset of the first visible row from the top of the document.
    pub scroll_top: u32,
    /// Number of rows the window shows.
    pub viewport_height: u32,
    /// Total rows of the rendered document.
    pub document_height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(scroll_top: u32, viewport_height: u32, document_height: u32) -> Self {
        Self {
            scroll_top,
            viewport_height,
            document_height,
        }
    }

    /// Whether the bottom edge of the window is within `threshold` of the end
    /// of the document.
    ///
    /// A document shorter than the window always counts as near the bottom.
    #[must_use]
    pub const fn near_bottom(&self, threshold: u32) -> bool {
        self.viewport_height.saturating_add(self.scroll_top)
            >= self.document_height.saturating_sub(threshold)
    }

    /// Largest `scroll_top` that still fills the window.
    #[must_use]
    pub const fn max_scroll_top(&self) -> u32 {
        self.document_height.saturating_sub(self.viewport_height)
    }

    /// Move the window by `delta` rows, clamped to the document.
    #[must_use]
    pub fn scrolled_by(self, delta: i64) -> Self {
        let target = i64::from(self.scroll_top).saturating_add(delta);
        let clamped = target.clamp(0, i64::from(self.max_scroll_top()));
        Self {
            scroll_top: u32::try_from(clamped).unwrap_or(self.max_scroll_top()),
            ..self
        }
    }

    /// Same window over a document of a different height, with the offset
    /// clamped so it stays inside the new document.
    #[must_use]
    pub fn with_document_height(self, document_height: u32) -> Self {
        let resized = Self {
            document_height,
            ..self
        };
        Self {
            scroll_top: resized.scroll_top.min(resized.max_scroll_top()),
            ..resized
        }
    }

    /// Scroll to the last full window.
    #[must_use]
    pub const fn at_bottom(self) -> Self {
        Self {
            scroll_top: self.max_scroll_top(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    // 24-row window over a 100-row document: bottom edge at scroll_top + 24.
    #[case(0, false)]
    #[case(65, false)]
    #[case(66, true)]
    #[case(76, true)]
    fn threshold_boundary(#[case] scroll_top: u32, #[case] expected: bool) {
        let viewport = Viewport::new(scroll_top, 24, 100);
        assert_eq!(viewport.near_bottom(10), expected);
    }

    #[test]
    fn short_document_is_always_near_bottom() {
        assert!(Viewport::new(0, 24, 5).near_bottom(10));
        assert!(Viewport::new(0, 24, 0).near_bottom(0));
    }

    #[test]
    fn zero_threshold_requires_reaching_the_end() {
        assert!(!Viewport::new(75, 24, 100).near_bottom(0));
        assert!(Viewport::new(76, 24, 100).near_bottom(0));
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        assert!(Viewport::new(u32::MAX, u32::MAX, u32::MAX).near_bottom(u32::MAX));
    }

    #[test]
    fn scrolled_by_clamps_to_document() {
        let viewport = Viewport::new(10, 24, 100);
        assert_eq!(viewport.scrolled_by(-50).scroll_top, 0);
        assert_eq!(viewport.scrolled_by(5).scroll_top, 15);
        assert_eq!(viewport.scrolled_by(1_000).scroll_top, 76);
    }

    #[test]
    fn resizing_keeps_offset_in_range() {
        let viewport = Viewport::new(70, 24, 100).with_document_height(50);
        assert_eq!(viewport.scroll_top, 26);
        let grown = Viewport::new(70, 24, 100).with_document_height(200);
        assert_eq!(grown.scroll_top, 70);
    }

    #[test]
    fn at_bottom_is_near_bottom() {
        let viewport = Viewport::new(0, 24, 300).at_bottom();
        assert_eq!(viewport.scroll_top, 276);
        assert!(viewport.near_bottom(0));
    }
}
