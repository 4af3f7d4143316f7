//! AI answer summaries.

use serde::{Deserialize, Serialize};

use crate::domain::SearchParams;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryUser {
    pub profile_image: String,
    pub nickname: String,
    pub user_hash: String,
}

/// One summary row of `GET /summaries/search`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub model: String,
    pub model_id: i64,
    pub question: String,
    pub answer: String,
    pub created_at: String,
    pub view_hash: String,
    pub user: SummaryUser,
}

/// Summary search form.
///
/// Date keys keep the camel-case names the backend expects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummarySearch {
    pub user_hash: Option<String>,
    pub model: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub nickname: Option<String>,
    pub search_type: Option<String>,
    pub search_value: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u64>,
}

impl From<&SummarySearch> for SearchParams {
    fn from(search: &SummarySearch) -> Self {
        Self::new()
            .with_opt("user_hash", search.user_hash.as_ref())
            .with_opt("model", search.model.as_ref())
            .with_opt("startDate", search.start_date.as_ref())
            .with_opt("endDate", search.end_date.as_ref())
            .with_opt("nickname", search.nickname.as_ref())
            .with_opt("search_type", search.search_type.as_ref())
            .with_opt("search_value", search.search_value.as_ref())
            .with_opt("limit", search.limit)
            .with_opt("offset", search.offset)
    }
}
