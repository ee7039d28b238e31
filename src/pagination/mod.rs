use crate::query::Resolution;
use crate::url_state::PageCoordinate;

/// Render model for the pager: which edges are clickable and which pages exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PaginationModel {
    pub current: u32,
    pub total: u32,
}

impl PaginationModel {
    pub(crate) fn new(current: u32, total: u32) -> Self {
        Self { current, total }
    }

    pub(crate) fn prev_enabled(&self) -> bool {
        self.current != 1
    }

    pub(crate) fn next_enabled(&self) -> bool {
        self.current != self.total
    }

    pub(crate) fn pages(&self) -> impl Iterator<Item = u32> {
        1..=self.total
    }

    pub(crate) fn is_active(&self, page: u32) -> bool {
        page == self.current
    }

    /// Target of the "previous" control; `None` means the click is a no-op.
    pub(crate) fn prev_target(&self) -> Option<u32> {
        (self.prev_enabled() && self.current > 1).then(|| self.current - 1)
    }

    /// Target of the "next" control; `None` means the click is a no-op.
    pub(crate) fn next_target(&self) -> Option<u32> {
        (self.next_enabled() && self.current < self.total).then(|| self.current + 1)
    }
}

/// Page to show once the server reports `total_pages` for the current query.
///
/// A page past the end (e.g. after deleting the last note of the last page)
/// moves to the new last page; an empty result set moves to page 1.
pub(crate) fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Coordinate to move to once the list request for `key` has resolved.
///
/// Only a result that was applied for the coordinate still on screen
/// (`current == key`) can move it, and only when its page is past the end.
/// `total_pages` is `None` for a failed request.
pub(crate) fn next_coordinate_after(
    resolution: Resolution,
    key: &PageCoordinate,
    total_pages: Option<u32>,
    current: &PageCoordinate,
) -> Option<PageCoordinate> {
    if resolution != Resolution::Applied || current != key {
        return None;
    }
    let clamped = clamp_page(key.page, total_pages?);
    (clamped != key.page).then(|| key.with_page(clamped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_disables_prev_only() {
        let m = PaginationModel::new(1, 5);
        assert!(!m.prev_enabled());
        assert!(m.next_enabled());
        assert_eq!(m.prev_target(), None);
        assert_eq!(m.next_target(), Some(2));
    }

    #[test]
    fn test_last_page_disables_next_only() {
        let m = PaginationModel::new(5, 5);
        assert!(m.prev_enabled());
        assert!(!m.next_enabled());
        assert_eq!(m.prev_target(), Some(4));
        assert_eq!(m.next_target(), None);
    }

    #[test]
    fn test_middle_page_enables_both() {
        let m = PaginationModel::new(3, 5);
        assert_eq!(m.prev_target(), Some(2));
        assert_eq!(m.next_target(), Some(4));
        assert!(m.is_active(3));
        assert!(!m.is_active(4));
    }

    #[test]
    fn test_pages_enumerate_all() {
        let m = PaginationModel::new(2, 4);
        assert_eq!(m.pages().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(PaginationModel::new(1, 0).pages().count(), 0);
    }

    #[test]
    fn test_page_beyond_total_never_targets_past_end() {
        // Happens briefly while a clamp is pending.
        let m = PaginationModel::new(4, 2);
        assert!(m.next_enabled());
        assert_eq!(m.next_target(), None);
        assert_eq!(m.prev_target(), Some(3));
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(2, 1), 1);
        assert_eq!(clamp_page(2, 2), 2);
        assert_eq!(clamp_page(7, 3), 3);
        assert_eq!(clamp_page(3, 0), 1);
        assert_eq!(clamp_page(1, 0), 1);
        assert_eq!(clamp_page(0, 4), 1);
    }

    #[test]
    fn test_applied_result_past_the_end_moves_to_last_page() {
        let key = PageCoordinate::new(5, "work");
        let next = next_coordinate_after(Resolution::Applied, &key, Some(3), &key);
        assert_eq!(next, Some(PageCoordinate::new(3, "work")));
    }

    #[test]
    fn test_empty_result_moves_to_first_page() {
        let key = PageCoordinate::new(2, "");
        let next = next_coordinate_after(Resolution::Applied, &key, Some(0), &key);
        assert_eq!(next, Some(PageCoordinate::new(1, "")));
    }

    #[test]
    fn test_in_range_result_keeps_coordinate() {
        let key = PageCoordinate::new(2, "");
        assert_eq!(next_coordinate_after(Resolution::Applied, &key, Some(2), &key), None);
        assert_eq!(next_coordinate_after(Resolution::Applied, &key, Some(9), &key), None);
    }

    #[test]
    fn test_cached_or_discarded_result_never_moves() {
        let key = PageCoordinate::new(4, "");
        for r in [Resolution::Cached, Resolution::Discarded] {
            assert_eq!(next_coordinate_after(r, &key, Some(1), &key), None, "{r:?}");
        }
    }

    #[test]
    fn test_user_already_moved_on() {
        let key = PageCoordinate::new(4, "");
        let current = PageCoordinate::new(1, "meeting");
        assert_eq!(next_coordinate_after(Resolution::Applied, &key, Some(1), &current), None);
    }

    #[test]
    fn test_failed_request_never_moves() {
        let key = PageCoordinate::new(4, "");
        assert_eq!(next_coordinate_after(Resolution::Applied, &key, None, &key), None);
    }
}
