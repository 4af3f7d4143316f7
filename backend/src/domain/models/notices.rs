//! Notices: backend records, the view model, client-side filtering and write
//! payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{Category, is_yes, leading_date, yes_no};

/// Minimum title length before the title filter narrows results.
pub const TITLE_FILTER_MIN_CHARS: usize = 2;

/// Notice as returned by `GET /notices/list`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeRecord {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category_text: String,
    pub created_at: String,
    pub updated_at: String,
    pub admin_name: String,
    pub is_important: String,
    pub status: String,
    pub ip: String,
    pub view_hash: String,
}

/// Notice as held by the notice store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category_text: String,
    pub created_at: String,
    pub updated_at: String,
    pub author: String,
    pub is_important: bool,
    pub ip: String,
    pub is_active: bool,
    pub view_hash: String,
}

impl From<NoticeRecord> for Notice {
    fn from(record: NoticeRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            content: record.content,
            category_text: record.category_text,
            created_at: record.created_at,
            updated_at: record.updated_at,
            author: record.admin_name,
            is_important: is_yes(&record.is_important),
            ip: record.ip,
            is_active: record.status == "active",
            view_hash: record.view_hash,
        }
    }
}

impl Notice {
    /// Calendar day the notice was created, if the timestamp parses.
    #[must_use]
    pub fn created_on(&self) -> Option<NaiveDate> {
        leading_date(&self.created_at)
    }
}

/// Filters the backend does not support, applied after every fetch.
///
/// # Examples
/// ```
/// use oncare_gateway::domain::models::NoticeFilter;
///
/// let filter = NoticeFilter { title: Some("a".into()), ..NoticeFilter::default() };
/// assert!(!filter.narrows_by_title());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeFilter {
    /// Case-insensitive title fragment; ignored below two characters.
    pub title: Option<String>,
    /// Exact category label.
    pub category: Option<String>,
    /// Inclusive lower bound on the creation day.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the creation day.
    pub end_date: Option<NaiveDate>,
}

impl NoticeFilter {
    /// Whether the title fragment is long enough to apply.
    #[must_use]
    pub fn narrows_by_title(&self) -> bool {
        self.title_needle().is_some()
    }

    fn title_needle(&self) -> Option<String> {
        let title = self.title.as_deref()?.trim();
        (title.chars().count() >= TITLE_FILTER_MIN_CHARS).then(|| title.to_lowercase())
    }

    fn category_label(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }

    /// Whether `notice` passes every active filter.
    #[must_use]
    pub fn matches(&self, notice: &Notice) -> bool {
        if let Some(needle) = self.title_needle() {
            if !notice.title.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let Some(label) = self.category_label() {
            if notice.category_text != label {
                return false;
            }
        }
        if self.start_date.is_none() && self.end_date.is_none() {
            return true;
        }
        let Some(created_on) = notice.created_on() else {
            return false;
        };
        self.start_date.is_none_or(|start| created_on >= start)
            && self.end_date.is_none_or(|end| created_on <= end)
    }

    /// Keep the notices that pass [`NoticeFilter::matches`].
    #[must_use]
    pub fn apply(&self, notices: Vec<Notice>) -> Vec<Notice> {
        notices
            .into_iter()
            .filter(|notice| self.matches(notice))
            .collect()
    }
}

/// Notice editor form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeForm {
    pub category_id: i64,
    pub title: String,
    pub content: String,
    pub is_important: bool,
}

impl NoticeForm {
    /// Body for `POST /notices/create`; new notices start active.
    #[must_use]
    pub fn create_payload(&self) -> Value {
        json!({
            "category_id": self.category_id,
            "title": self.title,
            "content": self.content,
            "status": "active",
            "is_important": yes_no(self.is_important),
        })
    }

    /// Body for `PUT /notices/update/{view_hash}`.
    #[must_use]
    pub fn update_payload(&self) -> Value {
        json!({
            "title": self.title,
            "content": self.content,
            "category_id": self.category_id,
            "is_important": yes_no(self.is_important),
        })
    }
}

/// Body that switches a notice update onto the status toggle endpoint.
#[must_use]
pub fn status_toggle_payload() -> Value {
    json!({ "type": STATUS_TOGGLE })
}

/// Action type that selects the toggle endpoint on notice updates.
pub const STATUS_TOGGLE: &str = "status_toggle";

/// Find the category whose label equals the notice's category text.
///
/// Labels are not unique in the category table. When several categories
/// share a label, the one with the lowest `sort` wins, then the lowest `id`.
#[must_use]
pub fn match_category_by_label<'a>(notice: &Notice, categories: &'a [Category]) -> Option<&'a Category> {
    categories
        .iter()
        .filter(|category| category.value == notice.category_text)
        .min_by_key(|category| (category.sort, category.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn notice(title: &str, category: &str, created_at: &str) -> Notice {
        Notice::from(NoticeRecord {
            id: 1,
            title: title.to_owned(),
            category_text: category.to_owned(),
            created_at: created_at.to_owned(),
            status: "active".to_owned(),
            is_important: "Y".to_owned(),
            ..NoticeRecord::default()
        })
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[fixture]
    fn notices() -> Vec<Notice> {
        vec![
            notice("Holiday Hours", "공지", "2024-03-01T09:00:00Z"),
            notice("Feeding guide", "육아", "2024-03-10T09:00:00Z"),
            notice("holiday menu", "식단", "2024-03-20 09:00:00"),
        ]
    }

    #[test]
    fn record_maps_to_view_model() {
        let record: NoticeRecord = serde_json::from_value(json!({
            "id": 3,
            "title": "t",
            "content": "c",
            "category_text": "공지",
            "created_at": "2024-01-01",
            "updated_at": "2024-01-02",
            "admin_name": "관리자",
            "is_important": "N",
            "status": "inactive",
            "ip": "127.0.0.1",
            "view_hash": "abc"
        }))
        .expect("decode record");
        let notice = Notice::from(record);
        assert_eq!(notice.author, "관리자");
        assert!(!notice.is_important);
        assert!(!notice.is_active);
        let body = serde_json::to_value(&notice).expect("serialise");
        assert_eq!(body["categoryText"], "공지");
        assert_eq!(body["viewHash"], "abc");
    }

    #[rstest]
    fn one_character_title_does_not_narrow(notices: Vec<Notice>) {
        let filter = NoticeFilter {
            title: Some("h".to_owned()),
            ..NoticeFilter::default()
        };
        assert_eq!(filter.apply(notices).len(), 3);
    }

    #[rstest]
    fn title_match_ignores_case(notices: Vec<Notice>) {
        let filter = NoticeFilter {
            title: Some("HOLIDAY".to_owned()),
            ..NoticeFilter::default()
        };
        let titles: Vec<_> = filter.apply(notices).into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["Holiday Hours", "holiday menu"]);
    }

    #[rstest]
    fn category_match_is_exact(notices: Vec<Notice>) {
        let filter = NoticeFilter {
            category: Some("육".to_owned()),
            ..NoticeFilter::default()
        };
        assert!(filter.apply(notices).is_empty());
    }

    #[rstest]
    fn date_range_is_inclusive(notices: Vec<Notice>) {
        let filter = NoticeFilter {
            start_date: Some(date(2024, 3, 10)),
            end_date: Some(date(2024, 3, 20)),
            ..NoticeFilter::default()
        };
        let titles: Vec<_> = filter.apply(notices).into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["Feeding guide", "holiday menu"]);
    }

    #[test]
    fn unparseable_dates_fail_bounded_filters() {
        let filter = NoticeFilter {
            start_date: Some(date(2024, 1, 1)),
            ..NoticeFilter::default()
        };
        assert!(!filter.matches(&notice("x", "공지", "yesterday")));
    }

    #[test]
    fn payloads_use_backend_flags() {
        let form = NoticeForm {
            category_id: 4,
            title: "t".to_owned(),
            content: "c".to_owned(),
            is_important: true,
        };
        assert_eq!(
            form.create_payload(),
            json!({"category_id": 4, "title": "t", "content": "c", "status": "active", "is_important": "Y"})
        );
        assert_eq!(
            form.update_payload(),
            json!({"title": "t", "content": "c", "category_id": 4, "is_important": "Y"})
        );
    }

    #[test]
    fn duplicate_labels_resolve_by_sort_then_id() {
        let category = |id: i64, sort: i64| Category {
            id,
            sort,
            value: "공지".to_owned(),
            ..Category::default()
        };
        let categories = vec![category(9, 2), category(7, 1), category(3, 1)];
        let matched = match_category_by_label(&notice("t", "공지", ""), &categories);
        assert_eq!(matched.map(|c| c.id), Some(3));
    }
}
