//! Shared pagination primitives for list-bearing gateway resources.
//!
//! Two styles are supported:
//!
//! - [`OffsetWindow`] tracks an infinite-scroll cursor expressed as an
//!   `offset`/`limit` pair. The caller asks for the offset to request, performs
//!   the fetch, and records how many items came back.
//! - [`PageIndex`] and [`PagedList`] carry page-indexed metadata exactly as the
//!   backend reports it (`total`, `page`, `limit`, `total_pages`).
//!
//! # Examples
//! ```
//! use pagination::OffsetWindow;
//!
//! let mut window = OffsetWindow::new(15).expect("non-zero limit");
//! assert_eq!(window.request_offset(true), 0);
//! window.record_page(true, 15, None);
//! assert_eq!(window.offset(), 15);
//! assert!(window.has_more());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing pagination primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The page size must be at least one.
    #[error("page size must be greater than zero")]
    ZeroLimit,
    /// Page numbers are one-based.
    #[error("page numbers start at 1")]
    ZeroPage,
}

/// Client-tracked offset cursor for infinite-scroll lists.
///
/// ## Invariants
/// - `limit` is never zero.
/// - `offset` always equals the request offset of the last recorded page plus
///   `limit`, so consecutive non-reset fetches advance by exactly `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetWindow {
    limit: u32,
    offset: u64,
    has_more: bool,
}

impl OffsetWindow {
    /// Create a window positioned at the first page.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroLimit`] when `limit` is zero.
    pub const fn new(limit: u32) -> Result<Self, PaginationError> {
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        Ok(Self {
            limit,
            offset: 0,
            has_more: true,
        })
    }

    /// Page size requested on every fetch.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Offset the next non-reset fetch will request.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Whether another page is expected.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Offset to send for the upcoming fetch.
    ///
    /// A reset always restarts from zero without mutating the window; the
    /// window only moves once [`OffsetWindow::record_page`] confirms the page.
    #[must_use]
    pub const fn request_offset(&self, reset: bool) -> u64 {
        if reset { 0 } else { self.offset }
    }

    /// Record a page that was fetched at [`OffsetWindow::request_offset`].
    ///
    /// When the backend reports an authoritative `total`, `has_more` is
    /// derived from it. Otherwise a full page is taken as a sign that more
    /// items may follow, which over-reports by one fetch when the total is an
    /// exact multiple of `limit`.
    ///
    /// # Examples
    /// ```
    /// use pagination::OffsetWindow;
    ///
    /// let mut window = OffsetWindow::new(10).expect("non-zero limit");
    /// window.record_page(true, 10, Some(10));
    /// assert!(!window.has_more());
    /// ```
    pub fn record_page(&mut self, reset: bool, returned: usize, total: Option<u64>) {
        let requested_at = self.request_offset(reset);
        let returned_count = u64::try_from(returned).unwrap_or(u64::MAX);
        self.offset = requested_at.saturating_add(u64::from(self.limit));
        self.has_more = match total {
            Some(known_total) => requested_at.saturating_add(returned_count) < known_total,
            None => returned_count == u64::from(self.limit),
        };
    }

    /// Return to the initial position.
    pub const fn reset(&mut self) {
        self.offset = 0;
        self.has_more = true;
    }
}

/// Page-indexed metadata reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIndex {
    /// One-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total number of matching items.
    pub total: u64,
    /// Number of pages at the current `limit`.
    pub total_pages: u32,
}

impl PageIndex {
    /// Derive the page count from `total` and `limit`.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroLimit`] or [`PaginationError::ZeroPage`]
    /// for out-of-domain arguments.
    pub fn new(page: u32, limit: u32, total: u64) -> Result<Self, PaginationError> {
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        let pages = total.div_ceil(u64::from(limit));
        Ok(Self {
            page,
            limit,
            total,
            total_pages: u32::try_from(pages).unwrap_or(u32::MAX),
        })
    }

    /// Whether a page after the current one exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A page of items plus the backend-reported index metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedList<T> {
    /// Items on this page; never longer than `limit`.
    pub items: Vec<T>,
    /// Total number of matching items.
    pub total: u64,
    /// One-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Number of pages at the current `limit`.
    pub total_pages: u32,
}

impl<T> PagedList<T> {
    /// Empty first page used before any fetch completes.
    #[must_use]
    pub const fn empty(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            limit,
            total_pages: 0,
        }
    }

    /// Index metadata without the items.
    #[must_use]
    pub const fn index(&self) -> PageIndex {
        PageIndex {
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}
