//! Request state exposed to UI bindings.
//!
//! Every store action moves through `idle -> loading -> (success | error) -> idle`.
//! `loading` is derived from an in-flight counter so it reads true exactly
//! while some request is pending and false at rest.

use serde::Serialize;

use crate::api::{ApiError, ErrorKind, FieldErrors};

/// Normalized error kept in a store's `error` slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
  pub kind: ErrorKind,
  pub message: String,
  #[serde(skip_serializing_if = "FieldErrors::is_empty")]
  pub fields: FieldErrors,
}

impl From<&ApiError> for ErrorInfo {
  fn from(err: &ApiError) -> Self {
    Self {
      kind: err.kind(),
      message: err.display_message(),
      fields: err.field_errors(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestState {
  pub loading: bool,
  pub error: Option<ErrorInfo>,
  pub success: Option<String>,
  #[serde(skip)]
  in_flight: usize,
}

impl RequestState {
  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn error(&self) -> Option<&ErrorInfo> {
    self.error.as_ref()
  }

  pub fn success(&self) -> Option<&str> {
    self.success.as_deref()
  }

  /// An action was dispatched: clear the previous outcome.
  pub fn begin(&mut self) {
    self.in_flight += 1;
    self.loading = true;
    self.error = None;
    self.success = None;
  }

  /// The action resolved successfully, optionally with a user-facing message.
  pub fn succeed(&mut self, message: Option<String>) {
    self.finish();
    self.error = None;
    self.success = message;
  }

  pub fn fail(&mut self, err: &ApiError) {
    self.finish();
    self.success = None;
    self.error = Some(ErrorInfo::from(err));
  }

  /// Resolved without recording an outcome (expected empty states, superseded
  /// responses).
  pub fn settle_quiet(&mut self) {
    self.finish();
  }

  fn finish(&mut self) {
    self.in_flight = self.in_flight.saturating_sub(1);
    self.loading = self.in_flight > 0;
  }

  pub fn clear(&mut self) {
    let in_flight = self.in_flight;
    *self = RequestState {
      loading: in_flight > 0,
      in_flight,
      ..RequestState::default()
    };
  }
}

/// Logical operations that can supersede one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
  List,
  Detail,
  Statistics,
}

/// Per-slot request tokens. Dispatching a new request for a slot invalidates
/// the token held by any request still in flight for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generations {
  list: u64,
  detail: u64,
  statistics: u64,
}

impl Generations {
  fn counter(&mut self, slot: Slot) -> &mut u64 {
    match slot {
      Slot::List => &mut self.list,
      Slot::Detail => &mut self.detail,
      Slot::Statistics => &mut self.statistics,
    }
  }

  pub fn next(&mut self, slot: Slot) -> u64 {
    let counter = self.counter(slot);
    *counter += 1;
    *counter
  }

  pub fn is_current(&self, slot: Slot, token: u64) -> bool {
    let current = match slot {
      Slot::List => self.list,
      Slot::Detail => self.detail,
      Slot::Statistics => self.statistics,
    };
    current == token
  }
}
