//! Page metadata for list views.

/// Position of the current page within the filtered rows.
///
/// `page` is kept as requested, without clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: i64,
    pub page_size: i64,
    /// Filtered row count
    pub total_items: i64,
    pub total_pages: i64,
}

impl PageInfo {
    #[must_use]
    pub fn new(page: i64, page_size: i64, total_items: i64) -> Self {
        let page_size = page_size.max(1);
        let total_items = total_items.max(0);
        let total_pages = (total_items + page_size - 1) / page_size;

        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }

    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_of_two_pages() {
        let info = PageInfo::new(2, 20, 25);
        assert_eq!(info.total_pages, 2);
        assert!(info.has_previous_page());
        assert!(!info.has_next_page());
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(PageInfo::new(1, 20, 0).total_pages, 0);
        assert_eq!(PageInfo::new(1, 20, 1).total_pages, 1);
        assert_eq!(PageInfo::new(1, 20, 20).total_pages, 1);
        assert_eq!(PageInfo::new(1, 20, 21).total_pages, 2);
        assert_eq!(PageInfo::new(1, 7, 50).total_pages, 8);
    }

    #[test]
    fn test_first_page_navigation() {
        let info = PageInfo::new(1, 10, 35);
        assert!(!info.has_previous_page());
        assert!(info.has_next_page());
    }

    #[test]
    fn test_page_is_not_clamped() {
        let info = PageInfo::new(0, 10, 35);
        assert_eq!(info.page, 0);
        assert!(!info.has_previous_page());
        assert!(info.has_next_page());

        let beyond = PageInfo::new(9, 10, 35);
        assert_eq!(beyond.page, 9);
        assert!(beyond.has_previous_page());
        assert!(!beyond.has_next_page());
    }
}
