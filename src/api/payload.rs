//! Allow-lists that decide which payload fields reach the backend.
//!
//! A key that is absent from the payload is never forwarded, which the
//! backend reads as "leave unchanged". A key that is present with `null` or
//! `""` is forwarded and clears the value, except for [`FieldMode::NonEmpty`].

use serde_json::{Map, Value};

/// JSON object used as a request payload.
pub type Payload = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
  /// Forward when present, as-is.
  Pass,
  /// Forward when present; an empty string becomes `null`.
  EmptyAsNull,
  /// Forward only when present as a non-empty string (passwords, notes).
  NonEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
  pub source: &'static str,
  pub target: &'static str,
  pub mode: FieldMode,
}

/// Ordered allow-list. `FieldMap::any()` forwards the payload untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
  rules: Option<Vec<FieldRule>>,
}

impl FieldMap {
  /// Forward every field.
  pub fn any() -> Self {
    Self { rules: None }
  }

  /// Allow exactly the listed fields, passed through unchanged.
  pub fn only(fields: &[&'static str]) -> Self {
    Self {
      rules: Some(
        fields
          .iter()
          .map(|f| FieldRule {
            source: f,
            target: f,
            mode: FieldMode::Pass,
          })
          .collect(),
      ),
    }
  }

  pub fn field(self, name: &'static str) -> Self {
    self.rule(name, name, FieldMode::Pass)
  }

  pub fn nullable(self, name: &'static str) -> Self {
    self.rule(name, name, FieldMode::EmptyAsNull)
  }

  pub fn non_empty(self, name: &'static str) -> Self {
    self.rule(name, name, FieldMode::NonEmpty)
  }

  /// Forward `source` from the caller's payload under the wire name `target`.
  pub fn renamed(self, source: &'static str, target: &'static str) -> Self {
    self.rule(source, target, FieldMode::Pass)
  }

  fn rule(mut self, source: &'static str, target: &'static str, mode: FieldMode) -> Self {
    self.rules.get_or_insert_with(Vec::new).push(FieldRule {
      source,
      target,
      mode,
    });
    self
  }

  pub fn is_open(&self) -> bool {
    self.rules.is_none()
  }

  pub fn apply(&self, payload: &Payload) -> Payload {
    let Some(rules) = &self.rules else {
      return payload.clone();
    };

    let mut out = Payload::new();
    for rule in rules {
      let Some(value) = payload.get(rule.source) else {
        continue;
      };
      match rule.mode {
        FieldMode::Pass => {
          out.insert(rule.target.to_string(), value.clone());
        }
        FieldMode::EmptyAsNull => {
          let value = match value {
            Value::String(s) if s.is_empty() => Value::Null,
            other => other.clone(),
          };
          out.insert(rule.target.to_string(), value);
        }
        FieldMode::NonEmpty => {
          if let Value::String(s) = value {
            if !s.is_empty() {
              out.insert(rule.target.to_string(), value.clone());
            }
          }
        }
      }
    }
    out
  }
}

/// Convert any JSON object value into a [`Payload`]; other values give an empty payload.
pub fn payload_from(value: Value) -> Payload {
  match value {
    Value::Object(map) => map,
    _ => Payload::new(),
  }
}
