//! Response envelope normalization.
//!
//! The backend wraps payloads in `{message?, data}` but is not consistent
//! about what `data` holds:
//! - `{data: [...]}` - a flat list
//! - `{data: {data: [...], meta: {...}}}` - a paginated list
//! - `{data: {...}}` - a single record
//!
//! Every store goes through [`Envelope::from_body`] instead of probing the
//! shape itself.

use serde_json::Value;

use super::error::{ApiError, ApiResult};

/// What the envelope carried once the shape has been detected.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
  List(Vec<Value>),
  Paginated {
    items: Vec<Value>,
    meta: Option<Value>,
  },
  Single(Value),
  Empty,
}

/// A decoded response body with its payload classified.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
  pub message: Option<String>,
  pub payload: Payload,
}

impl Envelope {
  pub fn from_body(body: Value) -> Self {
    match body {
      // Some endpoints skip the envelope entirely and return a bare array.
      Value::Array(items) => Envelope {
        message: None,
        payload: Payload::List(items),
      },
      Value::Object(mut obj) => {
        let message = obj
          .get("message")
          .and_then(|m| m.as_str())
          .map(String::from);

        let payload = match obj.remove("data") {
          Some(data) => classify(data),
          None if obj.is_empty() || (obj.len() == 1 && message.is_some()) => Payload::Empty,
          None => {
            obj.remove("message");
            Payload::Single(Value::Object(obj))
          }
        };

        Envelope { message, payload }
      }
      Value::Null => Envelope {
        message: None,
        payload: Payload::Empty,
      },
      other => Envelope {
        message: None,
        payload: Payload::Single(other),
      },
    }
  }

  /// Items of a list or paginated payload. A single record yields an empty list.
  pub fn items(&self) -> &[Value] {
    match &self.payload {
      Payload::List(items) | Payload::Paginated { items, .. } => items,
      _ => &[],
    }
  }

  pub fn meta(&self) -> Option<&Value> {
    match &self.payload {
      Payload::Paginated { meta, .. } => meta.as_ref(),
      _ => None,
    }
  }

  /// Consume into the list items, failing if the payload is a single record.
  pub fn into_items(self) -> ApiResult<(Vec<Value>, Option<Value>)> {
    match self.payload {
      Payload::List(items) => Ok((items, None)),
      Payload::Paginated { items, meta } => Ok((items, meta)),
      Payload::Empty => Ok((Vec::new(), None)),
      Payload::Single(_) => Err(ApiError::Unexpected(
        "expected a list but received a single record".to_string(),
      )),
    }
  }

  /// Consume into the raw payload value, whatever its shape.
  pub fn into_value(self) -> Value {
    match self.payload {
      Payload::List(items) => Value::Array(items),
      Payload::Paginated { items, meta } => {
        let mut obj = serde_json::Map::new();
        obj.insert("data".to_string(), Value::Array(items));
        if let Some(meta) = meta {
          obj.insert("meta".to_string(), meta);
        }
        Value::Object(obj)
      }
      Payload::Single(value) => value,
      Payload::Empty => Value::Null,
    }
  }

  /// The single record, if the payload is one.
  pub fn into_single(self) -> Option<Value> {
    match self.payload {
      Payload::Single(value) => Some(value),
      _ => None,
    }
  }
}

fn classify(data: Value) -> Payload {
  match data {
    Value::Array(items) => Payload::List(items),
    Value::Object(mut obj) if obj.contains_key("data") => {
      let inner = obj.remove("data").unwrap_or(Value::Null);
      let meta = obj.remove("meta");
      match inner {
        Value::Array(items) => Payload::Paginated { items, meta },
        // `data.data` present but not a list; keep the outer object intact.
        other => {
          obj.insert("data".to_string(), other);
          if let Some(meta) = meta {
            obj.insert("meta".to_string(), meta);
          }
          Payload::Single(Value::Object(obj))
        }
      }
    }
    Value::Null => Payload::Empty,
    other => Payload::Single(other),
  }
}
