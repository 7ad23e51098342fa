//! This module defines the common functionality for paging data.

/// The config for pagination.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// The number of pages needed to show `total` records at `per_page` records
/// per page, i.e. `ceil(total / per_page)`.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page.max(1))
}

#[cfg(test)]
mod pagination_tests {
    use crate::pagination::total_pages;

    #[test]
    fn rounds_up_partial_pages() {
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn exact_multiple_has_no_extra_page() {
        assert_eq!(total_pages(30, 10), 3);
    }

    #[test]
    fn no_records_means_no_pages() {
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn single_record_fills_one_page() {
        assert_eq!(total_pages(1, 10), 1);
    }
}
