use std::ops::Range;

/// Page windowing over a row count.
///
/// The last page is `max(1, total / page_size)` (floor). When `total` is
/// not a multiple of the page size, the trailing partial page cannot be
/// reached through navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// 1-based
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn last_page(&self, total: usize) -> usize {
        (total / self.page_size).max(1)
    }

    /// Changing the page size always goes back to page 1
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    pub fn first(&mut self) -> bool {
        let changed = self.current_page != 1;
        self.current_page = 1;
        changed
    }

    pub fn last(&mut self, total: usize) -> bool {
        let last = self.last_page(total);
        self.go_to(last, total)
    }

    /// Returns false when already on the last page
    pub fn next(&mut self, total: usize) -> bool {
        if self.current_page >= self.last_page(total) {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Returns false when already on page 1
    pub fn previous(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Jump to a page, clamped to `[1, last_page]`
    pub fn go_to(&mut self, page: usize, total: usize) -> bool {
        let target = page.clamp(1, self.last_page(total));
        let changed = target != self.current_page;
        self.current_page = target;
        changed
    }

    /// Row indices of the current page, clamped to `[0, total)`
    pub fn window(&self, total: usize) -> Range<usize> {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(total);
        let end = self
            .current_page
            .saturating_mul(self.page_size)
            .min(total);
        start..end
    }

    /// Closed, 1-based interval of the items on this page; `None` when empty
    pub fn items_shown(&self, total: usize) -> Option<(usize, usize)> {
        if total == 0 {
            return None;
        }
        let first = self.page_size * (self.current_page - 1) + 1;
        let last = total.min(self.page_size * self.current_page);
        Some((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_uses_floor() {
        let p = Paginator::new(2);
        assert_eq!(p.last_page(0), 1);
        assert_eq!(p.last_page(1), 1);
        assert_eq!(p.last_page(4), 2);
        assert_eq!(p.last_page(5), 2);
        assert_eq!(p.last_page(6), 3);
    }

    #[test]
    fn test_next_stops_at_last_page() {
        let mut p = Paginator::new(1);
        assert!(p.next(4));
        assert!(p.next(4));
        assert!(p.next(4));
        assert_eq!(p.current_page(), 4);
        assert!(!p.next(4));
        assert_eq!(p.current_page(), 4);
    }

    #[test]
    fn test_previous_stops_at_first_page() {
        let mut p = Paginator::new(10);
        assert!(!p.previous());
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_first_and_last() {
        let mut p = Paginator::new(1);
        assert!(p.last(4));
        assert_eq!(p.current_page(), 4);
        assert!(p.first());
        assert_eq!(p.current_page(), 1);
        assert!(!p.first());
    }

    #[test]
    fn test_page_size_change_resets() {
        let mut p = Paginator::new(1);
        p.last(10);
        p.set_page_size(5);
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.page_size(), 5);
    }

    #[test]
    fn test_zero_page_size_is_raised_to_one() {
        assert_eq!(Paginator::new(0).page_size(), 1);
        let mut p = Paginator::new(3);
        p.set_page_size(0);
        assert_eq!(p.page_size(), 1);
    }

    #[test]
    fn test_window() {
        let mut p = Paginator::new(2);
        assert_eq!(p.window(5), 0..2);
        p.next(5);
        assert_eq!(p.window(5), 2..4);
        assert_eq!(Paginator::new(20).window(4), 0..4);
        assert_eq!(Paginator::new(20).window(0), 0..0);
    }

    #[test]
    fn test_items_shown() {
        let mut p = Paginator::new(2);
        assert_eq!(p.items_shown(4), Some((1, 2)));
        p.next(4);
        assert_eq!(p.items_shown(4), Some((3, 4)));
        assert_eq!(Paginator::new(20).items_shown(4), Some((1, 4)));
        assert_eq!(Paginator::new(20).items_shown(0), None);
    }

    #[test]
    fn test_go_to_is_clamped() {
        let mut p = Paginator::new(2);
        assert!(p.go_to(99, 6));
        assert_eq!(p.current_page(), 3);
        p.go_to(0, 6);
        assert_eq!(p.current_page(), 1);
    }
}
