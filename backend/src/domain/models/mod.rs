//! Backend record shapes, view models, filters and write payloads for each
//! resource.
//!
//! Records mirror the backend's snake-case JSON. View models are what stores
//! hold; where the two differ (notices), conversion happens once on fetch.

pub mod categories;
pub mod dashboard;
pub mod feeds;
pub mod multipart;
pub mod notices;
pub mod summaries;
pub mod users;

pub use categories::{Category, CategoryFilter, CategoryForm, CategoryGroups, CategoryType};
pub use dashboard::DashboardStats;
pub use feeds::{Feed, FeedAuthor, FeedComment, FeedDetail, FeedForm, FeedList, FeedSearch, FeedSort};
pub use multipart::{Attachment, MultipartPayload};
pub use notices::{Notice, NoticeFilter, NoticeForm, NoticeRecord, match_category_by_label};
pub use summaries::{Summary, SummarySearch, SummaryUser};
pub use users::{User, UserPage, UserSearch};

/// Render a boolean as the backend's `"Y"`/`"N"` flag.
pub(crate) const fn yes_no(flag: bool) -> &'static str {
    if flag { "Y" } else { "N" }
}

/// Read a `"Y"`/`"N"` flag; anything other than `"Y"` is false.
pub(crate) fn is_yes(flag: &str) -> bool {
    flag.trim().eq_ignore_ascii_case("Y")
}

/// Calendar date at the start of an ISO timestamp such as
/// `2024-03-09T10:00:00Z` or `2024-03-09 10:00:00`.
pub(crate) fn leading_date(timestamp: &str) -> Option<chrono::NaiveDate> {
    let head = timestamp.trim().get(..10)?;
    chrono::NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
