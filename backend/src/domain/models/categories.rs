//! Category codes.
//!
//! The backend groups categories by type; stores work with the flattened
//! list and filter it locally.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Known category groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryType {
    /// Child age brackets.
    AgeGroup,
    /// Notice categories.
    NoticesGroup,
    /// Meal categories.
    MealsGroup,
    /// Feed topics.
    TopicGroup,
}

impl CategoryType {
    /// Wire value stored in [`Category::kind`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AgeGroup => "AGE_GROUP",
            Self::NoticesGroup => "NOTICES_GROUP",
            Self::MealsGroup => "MEALS_GROUP",
            Self::TopicGroup => "TOPIC_GROUP",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One category code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub code: String,
    pub value: String,
    pub sort: i64,
    pub is_active: String,
}

/// `data` of `GET /categories_codes/list`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryGroups {
    pub age_group: Vec<Category>,
    pub notices_group: Vec<Category>,
    pub meals_group: Vec<Category>,
    pub topic_group: Vec<Category>,
}

impl CategoryGroups {
    /// Concatenate the groups in age, notices, meals, topic order.
    #[must_use]
    pub fn flatten(self) -> Vec<Category> {
        [
            self.age_group,
            self.notices_group,
            self.meals_group,
            self.topic_group,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Local filters for the category list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Exact type, such as `AGE_GROUP`.
    pub kind: Option<String>,
    /// Case-insensitive label fragment.
    pub value: Option<String>,
    /// Exact `"Y"`/`"N"` flag.
    pub is_active: Option<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

impl CategoryFilter {
    /// Whether `category` passes every active filter.
    #[must_use]
    pub fn matches(&self, category: &Category) -> bool {
        let kind_ok = present(self.kind.as_deref()).is_none_or(|kind| category.kind == kind);
        let value_ok = present(self.value.as_deref())
            .is_none_or(|value| category.value.to_lowercase().contains(&value.to_lowercase()));
        let active_ok =
            present(self.is_active.as_deref()).is_none_or(|flag| category.is_active == flag);
        kind_ok && value_ok && active_ok
    }

    /// Keep the categories that pass [`CategoryFilter::matches`].
    #[must_use]
    pub fn apply(&self, categories: Vec<Category>) -> Vec<Category> {
        categories
            .into_iter()
            .filter(|category| self.matches(category))
            .collect()
    }
}

/// Category editor form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub sort: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<String>,
}

impl CategoryForm {
    /// Body for `POST /categories_codes/create`.
    #[must_use]
    pub fn create_payload(&self) -> Value {
        serde_json::to_value(Self {
            id: None,
            ..self.clone()
        })
        .unwrap_or_else(|_| json!({}))
    }

    /// Body for `PUT /categories_codes/update`: the form plus the target id.
    #[must_use]
    pub fn update_payload(&self, id: i64) -> Value {
        serde_json::to_value(Self {
            id: Some(id),
            ..self.clone()
        })
        .unwrap_or_else(|_| json!({ "id": id }))
    }
}

/// Body for `DELETE /categories_codes/delete`.
#[must_use]
pub fn delete_payload(id: i64) -> Value {
    json!({ "category_id": id })
}
