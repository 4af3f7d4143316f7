//! Community feeds, their comments, the search form and write payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{Attachment, MultipartPayload, yes_no};
use crate::domain::SearchParams;

/// Author summary embedded in feeds and comments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedAuthor {
    pub nickname: String,
    pub profile_image: String,
    pub user_hash: Option<String>,
}

/// Feed as returned by `GET /feeds/list`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Feed {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub is_public: Option<String>,
    pub is_published: String,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: String,
    pub updated_at: String,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub is_liked: bool,
    pub is_bookmarked: bool,
    pub user_hash: Option<String>,
    pub user: Option<FeedAuthor>,
}

impl Feed {
    /// Flip the like flag and move the counter with it.
    pub fn flip_like(&mut self) {
        self.like_count += if self.is_liked { -1 } else { 1 };
        self.is_liked = !self.is_liked;
    }

    /// Flip the bookmark flag.
    pub fn flip_bookmark(&mut self) {
        self.is_bookmarked = !self.is_bookmarked;
    }
}

/// Threaded comment on a feed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedComment {
    pub feed_id: i64,
    pub parent_id: Option<i64>,
    pub comment: String,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
    pub is_owner: bool,
    pub view_hash: String,
    pub parent_hash: Option<String>,
    pub user: FeedAuthor,
    pub children: Vec<FeedComment>,
}

/// `data` of `GET /feeds/detail/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedDetail {
    #[serde(flatten)]
    pub feed: Feed,
    #[serde(default)]
    pub comments: Vec<FeedComment>,
}

impl FeedDetail {
    /// Number of comments including replies.
    #[must_use]
    pub fn comment_count(&self) -> usize {
        fn count(comments: &[FeedComment]) -> usize {
            comments
                .iter()
                .map(|comment| 1 + count(&comment.children))
                .sum()
        }
        count(&self.comments)
    }
}

/// `data` of `GET /feeds/list`: a bare array, or an object carrying an
/// authoritative total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedList {
    Page {
        feeds: Vec<Feed>,
        #[serde(default)]
        total: Option<u64>,
    },
    Items(Vec<Feed>),
}

impl Default for FeedList {
    fn default() -> Self {
        Self::Items(Vec::new())
    }
}

impl FeedList {
    /// Split into the page items and the total, if the backend sent one.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Feed>, Option<u64>) {
        match self {
            Self::Page { feeds, total } => (feeds, total),
            Self::Items(feeds) => (feeds, None),
        }
    }
}

/// Feed ordering accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedSort {
    #[default]
    CreatedAt,
    LikeCountAsc,
    LikeCountDesc,
}

impl FeedSort {
    /// Wire value for `sort_by`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::LikeCountAsc => "like_count_asc",
            Self::LikeCountDesc => "like_count_desc",
        }
    }
}

impl fmt::Display for FeedSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feed search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSearch {
    pub title: Option<String>,
    pub nickname: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort_by: Option<FeedSort>,
}

impl From<&FeedSearch> for SearchParams {
    fn from(search: &FeedSearch) -> Self {
        Self::new()
            .with_opt("title", search.title.as_ref())
            .with_opt("nickname", search.nickname.as_ref())
            .with_opt("start_date", search.start_date.as_ref())
            .with_opt("end_date", search.end_date.as_ref())
            .with_opt("sort_by", search.sort_by.map(FeedSort::as_str))
    }
}

/// Feed editor form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedForm {
    pub title: String,
    pub content: String,
    pub is_public: bool,
    /// Comma separated tags.
    pub tags: Option<String>,
    pub image: Option<Attachment>,
}

impl FeedForm {
    /// Form for `POST /feeds/create`.
    #[must_use]
    pub fn create_payload(&self) -> MultipartPayload {
        MultipartPayload::new()
            .text("title", self.title.as_str())
            .text("content", self.content.as_str())
            .text("is_public", yes_no(self.is_public))
            .text_opt("tags", self.tags.as_deref())
            .attach(self.image.clone())
    }

    /// Form for `PUT /feeds/update`; blank text fields are left out.
    #[must_use]
    pub fn update_payload(&self, feed_id: i64) -> MultipartPayload {
        MultipartPayload::new()
            .text("feed_id", feed_id.to_string())
            .text_opt("title", Some(self.title.as_str()))
            .text_opt("content", Some(self.content.as_str()))
            .text("is_public", yes_no(self.is_public))
            .text_opt("tags", self.tags.as_deref())
            .attach(self.image.clone())
    }
}

/// Body for delete, like and bookmark calls.
#[must_use]
pub fn feed_id_payload(feed_id: i64) -> Value {
    json!({ "feed_id": feed_id })
}

/// Body for `POST /feeds/comments/create`; `parent_hash` makes it a reply.
#[must_use]
pub fn comment_payload(feed_id: i64, comment: &str, parent_hash: Option<&str>) -> Value {
    let mut body = json!({ "feed_id": feed_id, "comment": comment });
    if let (Some(parent), Value::Object(map)) = (parent_hash, &mut body) {
        map.insert("parent_hash".to_owned(), Value::from(parent));
    }
    body
}
