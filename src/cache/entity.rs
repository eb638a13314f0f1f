//! Opaque backend records and their identity.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record identifier. The backend mixes integer and string ids (and sometimes
/// serializes integers as strings), so two ids are equal when their canonical
/// string forms are.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
  Int(i64),
  Str(String),
}

impl EntityId {
  pub fn from_value(value: &Value) -> Option<Self> {
    match value {
      Value::Number(n) => n.as_i64().map(EntityId::Int),
      Value::String(s) if !s.is_empty() => Some(EntityId::Str(s.clone())),
      _ => None,
    }
  }

  fn canonical(&self) -> std::borrow::Cow<'_, str> {
    match self {
      EntityId::Int(i) => std::borrow::Cow::Owned(i.to_string()),
      EntityId::Str(s) => std::borrow::Cow::Borrowed(s.as_str()),
    }
  }

  /// Percent-encoded form for use as one URL path segment, so ids with `/`
  /// or `?` cannot change the request path.
  pub fn path_segment(&self) -> String {
    match self {
      EntityId::Int(i) => i.to_string(),
      // byte_serialize writes spaces as `+`, which is literal in a path.
      EntityId::Str(s) => url::form_urlencoded::byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20"),
    }
  }

  pub fn to_value(&self) -> Value {
    match self {
      EntityId::Int(i) => Value::from(*i),
      EntityId::Str(s) => Value::String(s.clone()),
    }
  }
}

impl PartialEq for EntityId {
  fn eq(&self, other: &Self) -> bool {
    self.canonical() == other.canonical()
  }
}

impl Eq for EntityId {}

impl Hash for EntityId {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.canonical().hash(state);
  }
}

impl fmt::Display for EntityId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.canonical())
  }
}

impl From<i64> for EntityId {
  fn from(id: i64) -> Self {
    EntityId::Int(id)
  }
}

impl From<&str> for EntityId {
  fn from(id: &str) -> Self {
    match id.parse::<i64>() {
      Ok(i) => EntityId::Int(i),
      Err(_) => EntityId::Str(id.to_string()),
    }
  }
}

impl From<String> for EntityId {
  fn from(id: String) -> Self {
    EntityId::from(id.as_str())
  }
}

/// A single backend record: a JSON object whose only known field is `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(Map<String, Value>);

impl Entity {
  pub fn new(fields: Map<String, Value>) -> Self {
    Self(fields)
  }

  /// Wrap a JSON value. Anything but an object is rejected.
  pub fn from_value(value: Value) -> Option<Self> {
    match value {
      Value::Object(map) => Some(Self(map)),
      _ => None,
    }
  }

  pub fn id(&self) -> Option<EntityId> {
    self.0.get("id").and_then(EntityId::from_value)
  }

  pub fn has_id(&self, id: &EntityId) -> bool {
    self.id().as_ref() == Some(id)
  }

  pub fn get(&self, field: &str) -> Option<&Value> {
    self.0.get(field)
  }

  pub fn str_field(&self, field: &str) -> Option<&str> {
    self.0.get(field).and_then(|v| v.as_str())
  }

  pub fn set(&mut self, field: impl Into<String>, value: Value) {
    self.0.insert(field.into(), value);
  }

  /// Overwrite the fields present in `patch`; everything else is kept.
  pub fn merge(&mut self, patch: &Map<String, Value>) {
    for (key, value) in patch {
      self.0.insert(key.clone(), value.clone());
    }
  }

  pub fn fields(&self) -> &Map<String, Value> {
    &self.0
  }

  pub fn into_value(self) -> Value {
    Value::Object(self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_int_and_string_ids_compare_equal() {
    assert_eq!(EntityId::Int(7), EntityId::Str("7".to_string()));
    assert_ne!(EntityId::Int(7), EntityId::Int(8));
    assert_eq!(EntityId::from("42"), EntityId::Int(42));
    assert_eq!(EntityId::from("abc").to_string(), "abc");
  }

  #[test]
  fn test_entity_id() {
    let e = Entity::from_value(json!({"id": 3, "name": "Ops"})).unwrap();
    assert_eq!(e.id(), Some(EntityId::Int(3)));
    assert!(e.has_id(&EntityId::from("3")));
    assert_eq!(e.str_field("name"), Some("Ops"));
  }

  #[test]
  fn test_entity_without_id() {
    let e = Entity::from_value(json!({"name": "x"})).unwrap();
    assert!(e.id().is_none());
    assert!(Entity::from_value(json!([1, 2])).is_none());
  }

  #[test]
  fn test_merge_keeps_untouched_fields() {
    let mut e = Entity::from_value(json!({"id": 1, "website": "a.com", "notes": "n"})).unwrap();
    let patch = json!({"notes": null});
    e.merge(patch.as_object().unwrap());
    assert_eq!(e.into_value(), json!({"id": 1, "website": "a.com", "notes": null}));
  }
}
