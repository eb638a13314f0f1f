//! Descriptor that turns the generic store into an entity-specific one.

use serde_json::Value;

use crate::api::{FieldMap, PageStyle};
use crate::cache::EntityId;

/// How an update reaches the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateMethod {
  #[default]
  Put,
  /// `POST /{r}/{id}` with `_method=PUT` in the body.
  PostOverride,
}

/// Encoding of create and update bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyKind {
  #[default]
  Json,
  /// `multipart/form-data`, for forms that carry files. Updates are always
  /// sent as `POST` with `_method=PUT`.
  Multipart,
}

/// What a store does to its collection after a successful write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteDiscipline {
  /// Apply the server's returned representation to the cache.
  #[default]
  Reconcile,
  /// Repeat the last list request.
  Refetch,
}

/// Endpoint templates, field allow-lists and write disciplines for one entity.
#[derive(Debug, Clone)]
pub struct ResourceSpec {
  /// Human-readable name used in logs and messages (e.g. "employee").
  pub name: &'static str,
  /// Collection path; detail paths are `{base}/{id}`.
  pub base: &'static str,
  /// Unpaginated list path. Defaults to `base`.
  pub list_path: Option<&'static str>,
  /// Paginated list path, usually `{base}/all/paginated`.
  pub paginated_path: Option<&'static str>,
  pub statistics_path: Option<&'static str>,
  pub page_style: PageStyle,
  pub create_fields: FieldMap,
  pub update_fields: FieldMap,
  pub update_method: UpdateMethod,
  pub body: BodyKind,
  pub on_create: WriteDiscipline,
  pub on_update: WriteDiscipline,
  pub on_delete: WriteDiscipline,
  /// Statistics shape exposed before the first successful fetch.
  pub default_statistics: Value,
}

impl ResourceSpec {
  pub fn new(name: &'static str, base: &'static str) -> Self {
    Self {
      name,
      base,
      list_path: None,
      paginated_path: None,
      statistics_path: None,
      page_style: PageStyle::PerPage,
      create_fields: FieldMap::any(),
      update_fields: FieldMap::any(),
      update_method: UpdateMethod::Put,
      body: BodyKind::Json,
      on_create: WriteDiscipline::Reconcile,
      on_update: WriteDiscipline::Reconcile,
      on_delete: WriteDiscipline::Reconcile,
      default_statistics: Value::Null,
    }
  }

  pub fn list_path(mut self, path: &'static str) -> Self {
    self.list_path = Some(path);
    self
  }

  pub fn paginated(mut self, path: &'static str) -> Self {
    self.paginated_path = Some(path);
    self
  }

  pub fn statistics(mut self, path: &'static str, default: Value) -> Self {
    self.statistics_path = Some(path);
    self.default_statistics = default;
    self
  }

  pub fn page_style(mut self, style: PageStyle) -> Self {
    self.page_style = style;
    self
  }

  pub fn create_fields(mut self, fields: FieldMap) -> Self {
    self.create_fields = fields;
    self
  }

  pub fn update_fields(mut self, fields: FieldMap) -> Self {
    self.update_fields = fields;
    self
  }

  /// Same allow-list for create and update.
  pub fn fields(self, fields: FieldMap) -> Self {
    self.create_fields(fields.clone()).update_fields(fields)
  }

  pub fn update_method(mut self, method: UpdateMethod) -> Self {
    self.update_method = method;
    self
  }

  pub fn body(mut self, kind: BodyKind) -> Self {
    self.body = kind;
    self
  }

  pub fn on_create(mut self, discipline: WriteDiscipline) -> Self {
    self.on_create = discipline;
    self
  }

  pub fn on_update(mut self, discipline: WriteDiscipline) -> Self {
    self.on_update = discipline;
    self
  }

  pub fn on_delete(mut self, discipline: WriteDiscipline) -> Self {
    self.on_delete = discipline;
    self
  }

  pub fn list_endpoint(&self) -> &'static str {
    self.list_path.unwrap_or(self.base)
  }

  /// Paginated endpoint, falling back to the plain list endpoint.
  pub fn paginated_endpoint(&self) -> &'static str {
    self.paginated_path.unwrap_or_else(|| self.list_endpoint())
  }

  pub fn detail_path(&self, id: &EntityId) -> String {
    format!("{}/{}", self.base, id.path_segment())
  }

  /// Sub-resource of a record, e.g. `payrolls/9/mark-as-paid`.
  pub fn member_path(&self, id: &EntityId, action: &str) -> String {
    format!("{}/{}/{}", self.base, id.path_segment(), action)
  }
}
