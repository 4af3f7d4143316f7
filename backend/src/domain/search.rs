//! Search parameters forwarded to list endpoints.
//!
//! A filter that is absent, empty, or whitespace never reaches the backend:
//! the builder methods drop such values instead of storing them, so every
//! consumer of [`SearchParams`] can forward what it holds verbatim.

use std::fmt;

use chrono::NaiveDate;
use url::form_urlencoded;

/// One filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchValue {
    /// Free text such as a title fragment or nickname.
    Text(String),
    /// Numeric filter such as `page` or `limit`.
    Number(i64),
    /// Calendar date rendered as `YYYY-MM-DD`.
    Date(NaiveDate),
}

impl SearchValue {
    /// Whether the value should be omitted from the outgoing query.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) | Self::Date(_) => false,
        }
    }

    /// Text form used in query strings.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Borrow the text form when this is a [`SearchValue::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Number(_) | Self::Date(_) => None,
        }
    }

    /// Interpret the value as a calendar date, parsing text when needed.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Text(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok(),
            Self::Number(_) => None,
        }
    }

    /// Interpret the value as an integer, parsing text when needed.
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Date(_) => None,
        }
    }
}

impl fmt::Display for SearchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for SearchValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SearchValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for SearchValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for SearchValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for SearchValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u64> for SearchValue {
    fn from(value: u64) -> Self {
        Self::Number(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<NaiveDate> for SearchValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// Ordered filter set. Keys are unique; insertion order is preserved so the
/// rendered query string is stable.
///
/// # Examples
/// ```
/// use oncare_gateway::domain::SearchParams;
///
/// let params = SearchParams::new()
///     .with("title", "")
///     .with("nickname", "맘")
///     .with("limit", 15_u32);
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.to_query_string(), "nickname=%EB%A7%98&limit=15");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    entries: Vec<(String, SearchValue)>,
}

impl SearchParams {
    /// Empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`SearchParams::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SearchValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder that ignores `None`.
    #[must_use]
    pub fn with_opt<V: Into<SearchValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Set `key` to `value`. An empty value removes the key instead.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SearchValue>) {
        let key = key.into();
        let value = value.into();
        if key.trim().is_empty() {
            return;
        }
        if value.is_empty() {
            self.remove(&key);
            return;
        }
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Drop `key` if present.
    pub fn remove(&mut self, key: &str) -> Option<SearchValue> {
        let position = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(position).1)
    }

    /// Look up the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SearchValue> {
        self.entries
            .iter()
            .find_map(|(existing, value)| (existing == key).then_some(value))
    }

    /// Text value stored for `key`, if any.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SearchValue::as_text)
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    #[must_use]
    pub fn merged(mut self, other: &Self) -> Self {
        for (key, value) in &other.entries {
            self.insert(key.clone(), value.clone());
        }
        self
    }

    /// Keep only the keys in `allowed`.
    #[must_use]
    pub fn retain_keys(mut self, allowed: &[&str]) -> Self {
        self.entries.retain(|(key, _)| allowed.contains(&key.as_str()));
        self
    }

    /// Parse an `application/x-www-form-urlencoded` query string, dropping
    /// empty values.
    #[must_use]
    pub fn from_query_str(query: &str) -> Self {
        form_urlencoded::parse(query.as_bytes()).fold(Self::new(), |params, (key, value)| {
            params.with(key.into_owned(), value.into_owned())
        })
    }

    /// Iterate rendered `(key, value)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.render()))
    }

    /// Render as a query string without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }

    /// Number of stored filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    fn blank_text_is_never_stored(#[case] value: &str) {
        let params = SearchParams::new().with("title", value);
        assert_eq!(params, SearchParams::new());
    }

    #[test]
    fn inserting_blank_clears_previous_value() {
        let mut params = SearchParams::new().with("title", "공지");
        params.insert("title", "");
        assert!(params.get("title").is_none());
    }

    #[test]
    fn merged_overrides_and_keeps_order() {
        let base = SearchParams::new().with("name", "kim").with("page", 1_u32);
        let merged = base.merged(&SearchParams::new().with("page", 3_u32));
        assert_eq!(merged.to_query_string(), "name=kim&page=3");
    }

    #[test]
    fn from_query_str_drops_empty_pairs() {
        let params = SearchParams::from_query_str("title=&nickname=a%20b&limit=15");
        assert_eq!(params.len(), 2);
        assert_eq!(params.text("nickname"), Some("a b"));
        assert_eq!(params.get("limit").and_then(SearchValue::as_number), Some(15));
    }

    #[test]
    fn dates_render_iso() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");
        let params = SearchParams::new().with("start_date", date);
        assert_eq!(params.to_query_string(), "start_date=2024-03-09");
    }

    #[test]
    fn retain_keys_filters_unknown_names() {
        let params = SearchParams::new()
            .with("limit", 15_u32)
            .with("debug", "1")
            .retain_keys(&["limit", "offset"]);
        assert_eq!(params.to_query_string(), "limit=15");
    }
}
