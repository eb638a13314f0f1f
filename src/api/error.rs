//! Error taxonomy for API calls and the shared message normalization.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Field name -> list of messages, as returned in a Laravel-style `errors` object.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors produced by the HTTP client and the stores built on it.
#[derive(Debug, Error)]
pub enum ApiError {
  /// 404. On "last known state" lookups this is an expected empty state.
  #[error("not found: {0}")]
  NotFound(String),

  /// 4xx with a message and optional per-field messages.
  #[error("validation failed: {message}")]
  Validation {
    status: u16,
    message: String,
    fields: FieldErrors,
  },

  /// 401. Credential invalidation is the session's job, not the store's.
  #[error("unauthorized")]
  Unauthorized,

  #[error("forbidden: {0}")]
  Forbidden(String),

  /// 5xx from the backend.
  #[error("server error ({status}): {message}")]
  Server { status: u16, message: String },

  /// Transport failure, including timeouts.
  #[error("network error: {0}")]
  Network(#[from] reqwest::Error),

  #[error("failed to decode response: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("invalid url: {0}")]
  InvalidUrl(#[from] url::ParseError),

  /// The response decoded fine but did not have the expected shape.
  #[error("unexpected response: {0}")]
  Unexpected(String),
}

/// Coarse classification used by UI bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  NotFound,
  Validation,
  Auth,
  Server,
}

impl ApiError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      ApiError::NotFound(_) => ErrorKind::NotFound,
      ApiError::Validation { .. } => ErrorKind::Validation,
      ApiError::Unauthorized | ApiError::Forbidden(_) => ErrorKind::Auth,
      ApiError::Server { .. }
      | ApiError::Network(_)
      | ApiError::Decode(_)
      | ApiError::InvalidUrl(_)
      | ApiError::Unexpected(_) => ErrorKind::Server,
    }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, ApiError::NotFound(_))
  }

  pub fn is_unauthorized(&self) -> bool {
    matches!(self, ApiError::Unauthorized)
  }

  /// Display-ready message stored in a store's `error` slot.
  ///
  /// Validation messages are surfaced verbatim; everything server-side or
  /// transport-related collapses to a generic sentence.
  pub fn display_message(&self) -> String {
    match self {
      ApiError::NotFound(what) => format!("{} was not found", what),
      ApiError::Validation {
        message, fields, ..
      } => {
        if !message.is_empty() {
          message.clone()
        } else if let Some(first) = fields.values().flatten().next() {
          first.clone()
        } else {
          "The given data was invalid".to_string()
        }
      }
      ApiError::Unauthorized => "Your session has expired, please sign in again".to_string(),
      ApiError::Forbidden(message) => {
        if message.is_empty() {
          "You do not have permission to perform this action".to_string()
        } else {
          message.clone()
        }
      }
      ApiError::Network(e) if e.is_timeout() => "The server took too long to respond".to_string(),
      ApiError::Network(_) => "Unable to reach the server".to_string(),
      ApiError::Server { .. } | ApiError::Decode(_) | ApiError::InvalidUrl(_) | ApiError::Unexpected(_) => {
        "Something went wrong, please try again later".to_string()
      }
    }
  }

  /// Per-field validation messages, empty for every other kind.
  pub fn field_errors(&self) -> FieldErrors {
    match self {
      ApiError::Validation { fields, .. } => fields.clone(),
      _ => FieldErrors::new(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_validation_message_is_verbatim() {
    let err = ApiError::Validation {
      status: 422,
      message: "The name field is required.".to_string(),
      fields: FieldErrors::from([("name".to_string(), vec!["required".to_string()])]),
    };
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.display_message(), "The name field is required.");
  }

  #[test]
  fn test_validation_falls_back_to_first_field_message() {
    let err = ApiError::Validation {
      status: 422,
      message: String::new(),
      fields: FieldErrors::from([("email".to_string(), vec!["already taken".to_string()])]),
    };
    assert_eq!(err.display_message(), "already taken");
  }

  #[test]
  fn test_server_error_is_generic() {
    let err = ApiError::Server {
      status: 500,
      message: "SQLSTATE[42S22]: Column not found".to_string(),
    };
    assert_eq!(err.kind(), ErrorKind::Server);
    assert!(!err.display_message().contains("SQLSTATE"));
  }

  #[test]
  fn test_auth_kinds() {
    assert_eq!(ApiError::Unauthorized.kind(), ErrorKind::Auth);
    assert_eq!(ApiError::Forbidden(String::new()).kind(), ErrorKind::Auth);
    assert!(ApiError::Unauthorized.is_unauthorized());
  }
}
