//! Member accounts.

use pagination::PagedList;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::SearchParams;

/// Member as returned by `GET /users/list`.
///
/// Fields the admin screens do not read are preserved in `extra` so a user
/// can be re-serialised without loss.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub sns_login_type: String,
    pub sns_id: String,
    pub name: String,
    pub nickname: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub profile_image: String,
    /// `1` when active, `0` otherwise.
    pub is_active: i64,
    pub created_at: String,
    pub last_login_at: Option<String>,
    pub view_hash: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Whether the account is enabled.
    #[must_use]
    pub const fn active(&self) -> bool {
        self.is_active == 1
    }
}

/// `data` of `GET /users/list`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl From<UserPage> for PagedList<User> {
    fn from(page: UserPage) -> Self {
        Self {
            items: page.users,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

/// Member search form. Every field is forwarded only when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSearch {
    pub sns_id: Option<String>,
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl From<&UserSearch> for SearchParams {
    fn from(search: &UserSearch) -> Self {
        Self::new()
            .with_opt("sns_id", search.sns_id.as_ref())
            .with_opt("name", search.name.as_ref())
            .with_opt("nickname", search.nickname.as_ref())
            .with_opt("page", search.page)
            .with_opt("limit", search.limit)
    }
}

/// Body for `PUT /users/update`.
#[must_use]
pub fn status_payload(view_hash: &str, active: bool) -> Value {
    json!({ "view_hash": view_hash, "is_active": i64::from(active) })
}

/// Body for `PUT /users/reset/password`.
#[must_use]
pub fn password_reset_payload(view_hash: &str) -> Value {
    json!({ "view_hash": view_hash })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = json!({
            "id": 7,
            "nickname": "맘",
            "is_active": 1,
            "child_gender": "W",
            "push_agree": 0
        });
        let user: User = serde_json::from_value(raw).expect("decode user");
        assert!(user.active());
        assert_eq!(user.extra.get("child_gender"), Some(&json!("W")));
        let back = serde_json::to_value(&user).expect("encode user");
        assert_eq!(back["push_agree"], 0);
    }

    #[test]
    fn search_skips_unset_and_blank_fields() {
        let search = UserSearch {
            nickname: Some(String::new()),
            name: Some("김".to_owned()),
            page: Some(2),
            ..UserSearch::default()
        };
        let params = SearchParams::from(&search);
        assert_eq!(params.to_query_string(), "name=%EA%B9%80&page=2");
    }

    #[test]
    fn page_converts_to_paged_list() {
        let page: UserPage = serde_json::from_value(json!({
            "users": [{"id": 1}],
            "total": 31,
            "page": 2,
            "limit": 15,
            "total_pages": 3
        }))
        .expect("decode page");
        let list = PagedList::from(page);
        assert_eq!(list.items.len(), 1);
        assert!(list.index().has_next());
    }

    #[test]
    fn status_payload_uses_numeric_flag() {
        assert_eq!(
            status_payload("h", false),
            json!({"view_hash": "h", "is_active": 0})
        );
    }
}
