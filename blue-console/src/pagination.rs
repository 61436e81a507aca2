//! Pagination state
//!
//! One pager for the whole console. Internally everything is a 0-based
//! page index; [`Pager::api_page`] is the single translation point to
//! the API's 1-based convention. Neither convention may leak across
//! this boundary in the other direction.

/// Number of page links rendered around the current page
const WINDOW: usize = 5;

/// One rendered element of the page-link strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// A jumpable page, carrying the 1-based display number
    Page(u32),
    /// Gap between the window and a boundary link
    Ellipsis,
}

/// Pagination state for a server-driven list
#[derive(Debug, Clone)]
pub struct Pager {
    page_index: usize,
    page_size: u32,
    total: u64,
}

impl Pager {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    /// 0-based page index (internal convention)
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// 1-based page number for the API layer. The only place the
    /// 1-based convention appears on this side of the wire.
    pub fn api_page(&self) -> u32 {
        self.page_index as u32 + 1
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// `ceil(total / size)`
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size as u64) as usize
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    /// Move to the previous page; returns true when the index changed
    /// (callers refetch exactly when it did).
    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    /// Move to the next page; returns true when the index changed.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    /// Jump to a 0-based index, clamped into range
    pub fn set_page_index(&mut self, index: usize) -> bool {
        let clamped = index.min(self.page_count().saturating_sub(1));
        if clamped != self.page_index {
            self.page_index = clamped;
            true
        } else {
            false
        }
    }

    /// Change the page size. Always resets to the first page so the
    /// follow-up fetch can never request an out-of-range page; returns
    /// true when anything changed (exactly one refetch per change).
    pub fn set_page_size(&mut self, size: u32) -> bool {
        let size = size.max(1);
        if size == self.page_size && self.page_index == 0 {
            return false;
        }
        self.page_size = size;
        self.page_index = 0;
        true
    }

    /// Update the total from a fetched page, clamping the index when
    /// the list shrank under us.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
        let last = self.page_count().saturating_sub(1);
        if self.page_index > last {
            self.page_index = last;
        }
    }

    /// Back to the first page (filter changes land here)
    pub fn reset(&mut self) -> bool {
        self.set_page_index(0)
    }

    /// Page-link strip: a window of up to five links centered on the
    /// current page, with first/last jumps and ellipsis markers when
    /// the window does not reach an edge.
    pub fn links(&self) -> Vec<PageLink> {
        let count = self.page_count();
        if count == 0 {
            return Vec::new();
        }
        if count <= WINDOW {
            return (1..=count as u32).map(PageLink::Page).collect();
        }

        let half = WINDOW / 2;
        let start = self
            .page_index
            .saturating_sub(half)
            .min(count - WINDOW);
        let end = start + WINDOW;

        let mut links = Vec::new();
        if start > 0 {
            links.push(PageLink::Page(1));
            if start > 1 {
                links.push(PageLink::Ellipsis);
            }
        }
        for i in start..end {
            links.push(PageLink::Page(i as u32 + 1));
        }
        if end < count {
            if end < count - 1 {
                links.push(PageLink::Ellipsis);
            }
            links.push(PageLink::Page(count as u32));
        }
        links
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_ceiling() {
        let mut pager = Pager::new(10);
        pager.set_total(25);
        assert_eq!(pager.page_count(), 3);
        pager.set_total(30);
        assert_eq!(pager.page_count(), 3);
        pager.set_total(31);
        assert_eq!(pager.page_count(), 4);
        pager.set_total(0);
        assert_eq!(pager.page_count(), 0);
    }

    #[test]
    fn prev_disabled_on_first_next_disabled_on_last() {
        let mut pager = Pager::new(10);
        pager.set_total(25);
        assert!(!pager.has_prev());
        assert!(pager.has_next());

        assert!(pager.next());
        assert!(pager.next());
        assert!(pager.has_prev());
        assert!(!pager.has_next());
        assert!(!pager.next());
        assert_eq!(pager.page_index(), 2);
    }

    #[test]
    fn users_page_scenario() {
        // page=1, size=10, total=25: three links, prev disabled, next enabled
        let mut pager = Pager::new(10);
        pager.set_total(25);
        assert_eq!(pager.api_page(), 1);
        assert!(!pager.has_prev());
        assert!(pager.has_next());
        assert_eq!(
            pager.links(),
            vec![PageLink::Page(1), PageLink::Page(2), PageLink::Page(3)]
        );
    }

    #[test]
    fn size_change_resets_to_first_page_once() {
        let mut pager = Pager::new(10);
        pager.set_total(100);
        pager.set_page_index(5);

        assert!(pager.set_page_size(25));
        assert_eq!(pager.page_index(), 0);
        assert_eq!(pager.api_page(), 1);
        // Same size again on page 1: nothing changed, no refetch
        assert!(!pager.set_page_size(25));
    }

    #[test]
    fn api_page_is_one_based() {
        let mut pager = Pager::new(10);
        pager.set_total(50);
        assert_eq!(pager.api_page(), 1);
        pager.next();
        assert_eq!(pager.page_index(), 1);
        assert_eq!(pager.api_page(), 2);
    }

    #[test]
    fn window_centers_on_current_page() {
        let mut pager = Pager::new(10);
        pager.set_total(200); // 20 pages
        pager.set_page_index(9); // display page 10

        let links = pager.links();
        assert_eq!(
            links,
            vec![
                PageLink::Page(1),
                PageLink::Ellipsis,
                PageLink::Page(8),
                PageLink::Page(9),
                PageLink::Page(10),
                PageLink::Page(11),
                PageLink::Page(12),
                PageLink::Ellipsis,
                PageLink::Page(20),
            ]
        );
    }

    #[test]
    fn window_pinned_at_edges() {
        let mut pager = Pager::new(10);
        pager.set_total(200);

        // At the start: no leading ellipsis
        let links = pager.links();
        assert_eq!(links[0], PageLink::Page(1));
        assert_eq!(links[4], PageLink::Page(5));
        assert_eq!(links[5], PageLink::Ellipsis);
        assert_eq!(links[6], PageLink::Page(20));

        // At the end: no trailing ellipsis
        pager.set_page_index(19);
        let links = pager.links();
        assert_eq!(links[0], PageLink::Page(1));
        assert_eq!(links[1], PageLink::Ellipsis);
        assert_eq!(*links.last().unwrap(), PageLink::Page(20));
    }

    #[test]
    fn total_shrink_clamps_index() {
        let mut pager = Pager::new(10);
        pager.set_total(100);
        pager.set_page_index(9);
        pager.set_total(15);
        assert_eq!(pager.page_index(), 1);
        assert_eq!(pager.api_page(), 2);
    }
}
