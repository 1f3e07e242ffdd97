//! Pagination

use serde::Serialize;

/// Patients page size
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Which page of the filtered rows to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: usize,
    size: usize,
}

impl PageRequest {
    /// Create new request; page and size are clamped to at least 1
    #[inline]
    #[must_use]
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page: page.max(1),
            size: size.max(1),
        }
    }

    /// First page of `size` rows
    #[inline]
    #[must_use]
    pub fn first(size: usize) -> Self {
        Self::new(1, size)
    }

    /// Single page holding every row
    #[inline]
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(1, usize::MAX)
    }

    /// 1-based page number
    #[inline]
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Rows skipped before this page
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Why a page has no rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyState {
    /// The collection itself is empty
    NoRecords,
    /// Records exist but none pass the filter
    NoMatches,
}

/// One rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Rows on this page
    pub items: Vec<T>,
    /// Rows passing the filter, across all pages
    pub total_matches: usize,
    /// 1-based page number
    pub page: usize,
    /// Rows per page
    pub page_size: usize,
    /// Page count, never less than 1
    pub total_pages: usize,
    /// Set when nothing matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<EmptyState>,
}

impl<T> Page<T> {
    /// More pages after this one
    #[inline]
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Pages before this one
    #[inline]
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Pagination controls only appear with more than one page
    #[inline]
    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// 1-based index of the first row shown, 0 when empty
    #[must_use]
    pub fn first_row(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1).saturating_mul(self.page_size) + 1
        }
    }

    /// Transform the rows, keeping the page metadata
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_matches: self.total_matches,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            empty: self.empty,
        }
    }
}

/// `max(1, ceil(count / size))`
#[inline]
#[must_use]
pub fn total_pages(count: usize, size: usize) -> usize {
    count.div_ceil(size.max(1)).max(1)
}

/// Cut one page out of the filtered, sorted rows
///
/// `collection_len` is the unfiltered size and only decides which
/// [`EmptyState`] an empty result reports.
#[must_use]
pub fn paginate<T>(matches: Vec<T>, request: PageRequest, collection_len: usize) -> Page<T> {
    let total_matches = matches.len();
    let empty = (total_matches == 0).then_some(if collection_len == 0 {
        EmptyState::NoRecords
    } else {
        EmptyState::NoMatches
    });
    let items = matches
        .into_iter()
        .skip(request.offset())
        .take(request.size())
        .collect();

    Page {
        items,
        total_matches,
        page: request.page(),
        page_size: request.size(),
        total_pages: total_pages(total_matches, request.size()),
        empty,
    }
}
