//! Reqwest encoding of structured multipart forms.

use reqwest::multipart::{Form, Part};

use crate::domain::models::MultipartPayload;

/// Build a reqwest form: text fields in order, then the file part.
///
/// # Errors
///
/// Returns an error when the attachment's content type is not a valid MIME
/// type.
pub(crate) fn multipart_form(payload: MultipartPayload) -> Result<Form, reqwest::Error> {
    let mut form = payload
        .fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));
    if let Some(file) = payload.file {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        form = form.part(file.field, part);
    }
    Ok(form)
}
