//! HTTP access to the HR backend: client, envelope handling, errors and
//! request shaping shared by every store.

mod client;
mod envelope;
mod error;
mod form;
mod pagination;
mod payload;

pub use client::{filename_from_disposition, ApiClient, Blob};
pub use envelope::{Envelope, Payload as EnvelopePayload};
pub use error::{ApiError, ApiResult, ErrorKind, FieldErrors};
pub use form::Upload;
pub use pagination::{ListParams, PageMeta, PageStyle, DEFAULT_PER_PAGE};
pub use payload::{payload_from, FieldMap, FieldMode, FieldRule, Payload};
