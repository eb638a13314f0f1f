//! `multipart/form-data` bodies for endpoints that take file uploads.
//!
//! Form fields are text, so payload values are flattened the way Laravel
//! reads them back: `null` is sent as an empty string (which the backend
//! turns back into `null`), booleans as `1`/`0` and arrays as repeated
//! `field[]` entries.

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::error::ApiResult;
use super::payload::Payload;

/// A file attached to a form request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
  pub field: String,
  pub filename: String,
  pub bytes: Vec<u8>,
  pub content_type: Option<String>,
}

impl Upload {
  pub fn new(field: impl Into<String>, filename: impl Into<String>, bytes: Vec<u8>) -> Self {
    Self {
      field: field.into(),
      filename: filename.into(),
      bytes,
      content_type: None,
    }
  }

  pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
    self.content_type = Some(content_type.into());
    self
  }

  fn into_part(self) -> ApiResult<Part> {
    let part = Part::bytes(self.bytes).file_name(self.filename);
    Ok(match self.content_type {
      Some(mime) => part.mime_str(&mime)?,
      None => part,
    })
  }
}

/// Text entries for one payload field.
fn text_entries(key: &str, value: &Value) -> Vec<(String, String)> {
  match value {
    Value::Null => vec![(key.to_string(), String::new())],
    Value::Bool(b) => vec![(key.to_string(), if *b { "1" } else { "0" }.to_string())],
    Value::Number(n) => vec![(key.to_string(), n.to_string())],
    Value::String(s) => vec![(key.to_string(), s.clone())],
    Value::Array(items) => items
      .iter()
      .flat_map(|item| text_entries(&format!("{}[]", key), item))
      .collect(),
    Value::Object(_) => vec![(key.to_string(), value.to_string())],
  }
}

/// Build a form from a payload plus any files.
pub fn form_from(payload: &Payload, uploads: &[Upload]) -> ApiResult<Form> {
  let mut form = Form::new();
  for (key, value) in payload {
    for (name, text) in text_entries(key, value) {
      form = form.text(name, text);
    }
  }
  for upload in uploads {
    form = form.part(upload.field.clone(), upload.clone().into_part()?);
  }
  Ok(form)
}
