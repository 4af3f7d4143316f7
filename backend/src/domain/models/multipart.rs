//! `multipart/form-data` payloads built by the feed store.
//!
//! Only the structure lives here. Outbound adapters encode it with reqwest,
//! which picks the boundary and escapes names and file names.

/// A file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Form field name, `file` for feed images.
    pub field: String,
    /// Original file name.
    pub file_name: String,
    /// MIME type of the file.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Ordered text fields plus at most one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    /// Text fields in insertion order.
    pub fields: Vec<(String, String)>,
    /// Optional file part, encoded after the text fields.
    pub file: Option<Attachment>,
}

impl MultipartPayload {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Append a text field when `value` is set and non-empty.
    #[must_use]
    pub fn text_opt(self, name: impl Into<String>, value: Option<&str>) -> Self {
        match value.filter(|text| !text.is_empty()) {
            Some(text) => self.text(name, text),
            None => self,
        }
    }

    /// Attach a file.
    #[must_use]
    pub fn attach(mut self, file: Option<Attachment>) -> Self {
        self.file = file;
        self
    }

    /// Value of the first field named `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find_map(|(key, value)| (key == name).then_some(value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_optional_fields_are_skipped() {
        let payload = MultipartPayload::new()
            .text("title", "hi")
            .text_opt("tags", Some(""))
            .text_opt("content", None);
        assert_eq!(payload.fields, vec![("title".to_owned(), "hi".to_owned())]);
    }

    #[test]
    fn field_finds_the_first_match() {
        let payload = MultipartPayload::new().text("a", "1").text("a", "2");
        assert_eq!(payload.field("a"), Some("1"));
        assert_eq!(payload.field("b"), None);
    }
}
