//! Offset/limit pagination primitives.

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// A normalized, 1-based page request.
///
/// There is no upper bound on either field; callers that need one enforce
/// it before constructing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    /// Creates a page request, clamping non-positive values to 1.
    #[must_use]
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: u64::try_from(page).unwrap_or(0).max(1),
            page_size: u64::try_from(page_size).unwrap_or(0).max(1),
        }
    }

    /// Creates a page request from optional inputs; missing values take the
    /// defaults and present ones are clamped as in [`PageRequest::new`].
    #[must_use]
    pub fn from_parts(page: Option<i64>, page_size: Option<i64>) -> Self {
        let defaults = Self::default();
        Self {
            page: page.map_or(defaults.page, |p| Self::new(p, 1).page),
            page_size: page_size.map_or(defaults.page_size, |s| Self::new(1, s).page_size),
        }
    }

    /// The 1-based page number.
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of matching items that precede this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results together with the unpaginated match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on the requested page, in result order.
    pub items: Vec<T>,
    /// Total number of matches across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Builds a page from already-sliced items and the full match count.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }
}
