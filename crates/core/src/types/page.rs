//! Offset-based pagination types.

use serde::{Deserialize, Serialize};

/// Sort direction for paged listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parse a direction string, case-insensitively. Anything other than
    /// `asc` sorts descending, matching the HTTP default.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        if s.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// A validated page request: zero-based page index and positive page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Largest accepted page size.
    pub const MAX_SIZE: u32 = 100;

    /// Build a page request, clamping the size into `1..=MAX_SIZE`.
    #[must_use]
    pub const fn new(page: u32, size: u32) -> Self {
        let size = if size == 0 {
            1
        } else if size > Self::MAX_SIZE {
            Self::MAX_SIZE
        } else {
            size
        };
        Self { page, size }
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size (always in `1..=MAX_SIZE`).
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Row offset of the first element on this page.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.page as i64 * self.size as i64
    }

    /// Row limit for this page.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.size as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 20)
    }
}

/// A bounded slice of a larger ordered result set, with total-count metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Elements on this page, in result-set order.
    pub content: Vec<T>,
    /// Zero-based page index.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
    /// Total number of elements across all pages.
    pub total_elements: u64,
    /// Total number of pages.
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Assemble a page from its content and the total element count.
    #[must_use]
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements
            .div_ceil(u64::from(request.size()))
            .try_into()
            .unwrap_or(u32::MAX);
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages,
        }
    }

    /// Map page content to another type, keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_clamps_size() {
        assert_eq!(PageRequest::new(0, 0).size(), 1);
        assert_eq!(PageRequest::new(0, 20).size(), 20);
        assert_eq!(PageRequest::new(0, 5000).size(), PageRequest::MAX_SIZE);
    }

    #[test]
    fn offset_is_page_times_size() {
        let request = PageRequest::new(3, 25);
        assert_eq!(request.offset(), 75);
        assert_eq!(request.limit(), 25);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(0, 20), 41);
        assert_eq!(page.total_pages, 3);

        let empty: Page<i32> = Page::new(vec![], PageRequest::new(0, 20), 0);
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.total_elements, 0);
    }

    #[test]
    fn map_preserves_metadata() {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 2), 10);
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.content, vec!["1", "2"]);
        assert_eq!(mapped.page, 1);
        assert_eq!(mapped.total_pages, 5);
    }

    #[test]
    fn sort_direction_parses_leniently() {
        assert_eq!(SortDirection::parse_lenient("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse_lenient("sideways"), SortDirection::Desc);
    }
}
