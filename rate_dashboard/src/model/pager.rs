//! Table pagination.
//!
//! Pages are 1-based. The visible page list collapses long ranges around the
//! current page into gaps, e.g. `1 … 4 5 6 … 10`.

use std::fmt;

/// Entry of the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A selectable page number.
    Page(usize),
    /// Collapsed run of pages.
    Gap,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::Gap => write!(f, "..."),
        }
    }
}

/// Pagination state for a list of `total_items` rows.
#[derive(Debug, Clone)]
pub struct Pager {
    page_size: usize,
    total_items: usize,
    current: usize,
}

impl Pager {
    /// Pager on page 1. A zero `page_size` is treated as 1.
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            total_items,
            current: 1,
        }
    }

    /// Current page.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// Index of the first row on the current page.
    pub fn offset(&self) -> usize {
        (self.current - 1) * self.page_size
    }

    /// Rows of `rows` on the current page.
    pub fn page<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = self.offset().min(rows.len());
        let end = (start + self.page_size).min(rows.len());
        &rows[start..end]
    }

    /// Jumps to `page`. Out-of-range pages are ignored; returns whether it moved.
    pub fn go_to(&mut self, page: usize) -> bool {
        if (1..=self.total_pages()).contains(&page) {
            self.current = page;
            true
        } else {
            false
        }
    }

    /// Previous page, if any.
    pub fn prev(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }

    /// Next page, if any.
    pub fn next(&mut self) {
        if self.current < self.total_pages() {
            self.current += 1;
        }
    }

    /// Page selector entries for the current page.
    pub fn visible_pages(&self) -> Vec<PageItem> {
        let total = self.total_pages();
        let current = self.current;
        if total <= 7 {
            return (1..=total).map(PageItem::Page).collect();
        }

        let mut pages = vec![PageItem::Page(1)];
        if current > 3 {
            pages.push(PageItem::Gap);
        }
        let start = current.saturating_sub(1).max(2);
        let end = (current + 1).min(total - 1);
        pages.extend((start..=end).map(PageItem::Page));
        if current + 2 < total {
            pages.push(PageItem::Gap);
        }
        pages.push(PageItem::Page(total));
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Gap, Page};

    #[test]
    fn empty_list_has_one_page() {
        let pager = Pager::new(0, 10);
        assert_eq!(pager.total_pages(), 1);
        assert_eq!(pager.page::<u8>(&[]), &[] as &[u8]);
    }

    #[test]
    fn slices_rows_per_page() {
        let rows: Vec<usize> = (0..25).collect();
        let mut pager = Pager::new(rows.len(), 10);
        assert_eq!(pager.total_pages(), 3);

        assert!(pager.go_to(3));
        assert_eq!(pager.offset(), 20);
        assert_eq!(pager.page(&rows), &[20, 21, 22, 23, 24]);
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut pager = Pager::new(25, 10);
        pager.prev();
        assert_eq!(pager.current(), 1);
        pager.next();
        pager.next();
        pager.next();
        assert_eq!(pager.current(), 3);
        assert!(!pager.go_to(0));
        assert!(!pager.go_to(4));
        assert_eq!(pager.current(), 3);
    }

    #[test]
    fn short_page_lists_are_not_collapsed() {
        let pager = Pager::new(70, 10);
        assert_eq!(pager.visible_pages(), (1..=7).map(Page).collect::<Vec<_>>());
    }

    #[test]
    fn long_page_lists_collapse_around_current() {
        let mut pager = Pager::new(100, 10);
        assert_eq!(pager.visible_pages(), vec![Page(1), Page(2), Gap, Page(10)]);

        pager.go_to(5);
        assert_eq!(
            pager.visible_pages(),
            vec![Page(1), Gap, Page(4), Page(5), Page(6), Gap, Page(10)]
        );

        pager.go_to(10);
        assert_eq!(pager.visible_pages(), vec![Page(1), Gap, Page(9), Page(10)]);

        pager.go_to(3);
        assert_eq!(
            pager.visible_pages(),
            vec![Page(1), Page(2), Page(3), Page(4), Gap, Page(10)]
        );
    }

    #[test]
    fn page_items_display() {
        assert_eq!(Page(4).to_string(), "4");
        assert_eq!(Gap.to_string(), "...");
    }
}
