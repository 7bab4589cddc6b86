//! Paging geometry for the card carousel.
//!
//! Each card occupies one page. A page spans a fixed fraction of the viewport
//! width and is centred when snapped, so neighbouring cards peek in from both
//! edges. Lengths are in points.

/// Fraction of the viewport width a page occupies.
pub const DEFAULT_PAGE_FRACTION: f64 = 0.93;

/// Leading and trailing inset of a card inside its page.
pub const DEFAULT_ITEM_INSET: f64 = 5.0;

/// How the carousel settles after a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehaviour {
    /// Snap to the nearest page and centre it.
    #[default]
    GroupPagingCentered,
}

/// Horizontal frame of a card within the carousel's content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemFrame {
    /// Leading edge in content coordinates.
    pub x: f64,
    /// Card width.
    pub width: f64,
}

/// Single-section paging layout.
///
/// # Examples
///
/// ```
/// use cardmap_core::PagingLayout;
///
/// let layout = PagingLayout::default();
/// assert_eq!(layout.snap_index(0.0, 400.0, 3), Some(0));
/// assert_eq!(layout.snap_index(layout.centered_offset(2, 400.0), 400.0, 3), Some(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagingLayout {
    /// Page width as a fraction of the viewport width.
    pub page_fraction: f64,
    /// Inset applied to both horizontal edges of each card.
    pub item_inset: f64,
    /// Snapping behaviour.
    pub scrolling: ScrollBehaviour,
}

impl Default for PagingLayout {
    fn default() -> Self {
        Self {
            page_fraction: DEFAULT_PAGE_FRACTION,
            item_inset: DEFAULT_ITEM_INSET,
            scrolling: ScrollBehaviour::GroupPagingCentered,
        }
    }
}

impl PagingLayout {
    /// Width of one page for a viewport of `viewport_width`.
    #[must_use]
    pub fn page_width(&self, viewport_width: f64) -> f64 {
        (viewport_width * self.page_fraction).max(0.0)
    }

    /// Frame of the card at `index`.
    ///
    /// Content starts with a margin of half the unused viewport width so the
    /// first page can be centred.
    #[must_use]
    pub fn item_frame(&self, index: usize, viewport_width: f64) -> ItemFrame {
        let page = self.page_width(viewport_width);
        let margin = (viewport_width - page) / 2.0;
        ItemFrame {
            x: margin + page * index_to_f64(index) + self.item_inset,
            width: (page - 2.0 * self.item_inset).max(0.0),
        }
    }

    /// Content offset that centres page `index` in the viewport.
    #[must_use]
    pub fn centered_offset(&self, index: usize, viewport_width: f64) -> f64 {
        self.page_width(viewport_width) * index_to_f64(index)
    }

    /// Page the carousel settles on when released at `offset`.
    ///
    /// Returns `None` when there are no pages.
    #[must_use]
    pub fn snap_index(&self, offset: f64, viewport_width: f64, count: usize) -> Option<usize> {
        let last = count.checked_sub(1)?;
        let page = self.page_width(viewport_width);
        if page <= 0.0 || !offset.is_finite() {
            return Some(0);
        }
        let nearest = (offset / page).round();
        if nearest <= 0.0 {
            return Some(0);
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "value is a positive whole number; `as` saturates at usize::MAX"
        )]
        let page_index = nearest as usize;
        Some(page_index.min(last))
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "card counts stay far below 2^52"
)]
const fn index_to_f64(index: usize) -> f64 {
    index as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const VIEWPORT: f64 = 400.0;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1.0e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    fn page_spans_ninety_three_percent() {
        assert_close(PagingLayout::default().page_width(VIEWPORT), 372.0);
    }

    #[rstest]
    fn first_card_is_centred_with_insets() {
        let frame = PagingLayout::default().item_frame(0, VIEWPORT);
        assert_close(frame.x, 14.0 + 5.0);
        assert_close(frame.width, 362.0);
    }

    #[rstest]
    fn later_cards_follow_by_page_width() {
        let layout = PagingLayout::default();
        let first = layout.item_frame(0, VIEWPORT);
        let third = layout.item_frame(2, VIEWPORT);
        assert_close(third.x - first.x, 2.0 * 372.0);
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(185.0, 0)]
    #[case(187.0, 1)]
    #[case(372.0, 1)]
    #[case(10_000.0, 4)]
    #[case(-50.0, 0)]
    fn snaps_to_nearest_page(#[case] offset: f64, #[case] expected: usize) {
        assert_eq!(
            PagingLayout::default().snap_index(offset, VIEWPORT, 5),
            Some(expected)
        );
    }

    #[rstest]
    fn snapping_without_pages_yields_nothing() {
        assert_eq!(PagingLayout::default().snap_index(0.0, VIEWPORT, 0), None);
    }

    #[rstest]
    fn zero_width_viewport_snaps_to_first_page() {
        assert_eq!(PagingLayout::default().snap_index(30.0, 0.0, 3), Some(0));
    }
}
