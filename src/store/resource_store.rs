//! Generic remote-backed entity store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::resource::{BodyKind, ResourceSpec, UpdateMethod, WriteDiscipline};
use super::state::{Generations, RequestState, Slot};
use crate::api::{ApiClient, ApiResult, Blob, Envelope, ListParams, PageMeta, Payload, Upload};
use crate::cache::{Collection, Entity, EntityId};

/// One fetched page (or one unpaginated list).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
  pub items: Vec<Entity>,
  pub meta: PageMeta,
}

/// Owned copy of a store's state for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSnapshot {
  pub items: Collection,
  pub meta: PageMeta,
  pub current: Option<Entity>,
  pub statistics: Value,
  pub state: RequestState,
  pub statistics_state: RequestState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListMode {
  Plain,
  Paginated,
}

#[derive(Debug, Clone)]
struct LastList {
  mode: ListMode,
  params: ListParams,
}

#[derive(Debug)]
struct Inner {
  items: Collection,
  meta: PageMeta,
  current: Option<Entity>,
  statistics: Value,
  state: RequestState,
  statistics_state: RequestState,
  generations: Generations,
  last_list: Option<LastList>,
}

impl Inner {
  fn new(spec: &ResourceSpec) -> Self {
    Self {
      items: Collection::new(),
      meta: PageMeta::default(),
      current: None,
      statistics: spec.default_statistics.clone(),
      state: RequestState::default(),
      statistics_state: RequestState::default(),
      generations: Generations::default(),
      last_list: None,
    }
  }

  fn clear_current_if(&mut self, id: &EntityId) {
    if self.current.as_ref().is_some_and(|c| c.has_id(id)) {
      self.current = None;
    }
  }

  /// Replace the cached copies of `entity` without adding it anywhere new.
  fn reconcile(&mut self, entity: &Entity) {
    let Some(id) = entity.id() else {
      return;
    };
    if self.items.contains(&id) {
      self.items.upsert(entity.clone());
    }
    if self.current.as_ref().is_some_and(|c| c.has_id(&id)) {
      self.current = Some(entity.clone());
    }
  }
}

/// Remote-backed, paginated CRUD cache for one entity type.
///
/// Built from a [`ResourceSpec`]; clones share the same cache, so a store can
/// be handed to several consumers. Every action updates the request state
/// around its single HTTP call. Reads are tagged with a per-slot token and a
/// response that has been superseded by a newer read is dropped.
#[derive(Clone)]
pub struct ResourceStore {
  client: ApiClient,
  spec: Arc<ResourceSpec>,
  inner: Arc<Mutex<Inner>>,
}

impl ResourceStore {
  pub fn new(client: ApiClient, spec: ResourceSpec) -> Self {
    let inner = Inner::new(&spec);
    Self {
      client,
      spec: Arc::new(spec),
      inner: Arc::new(Mutex::new(inner)),
    }
  }

  pub fn spec(&self) -> &ResourceSpec {
    &self.spec
  }

  pub fn client(&self) -> &ApiClient {
    &self.client
  }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }

  // ==========================================================================
  // Reads
  // ==========================================================================

  /// GET the plain list endpoint and replace the collection.
  pub async fn list(&self, params: &ListParams) -> ApiResult<Page> {
    self.list_with(ListMode::Plain, params).await
  }

  /// GET the paginated endpoint and replace collection and metadata.
  pub async fn list_paginated(&self, params: &ListParams) -> ApiResult<Page> {
    self.list_with(ListMode::Paginated, params).await
  }

  async fn list_with(&self, mode: ListMode, params: &ListParams) -> ApiResult<Page> {
    let path = match mode {
      ListMode::Plain => self.spec.list_endpoint(),
      ListMode::Paginated => self.spec.paginated_endpoint(),
    };
    let query = params.to_query(self.spec.page_style);

    let token = {
      let mut s = self.lock();
      s.state.begin();
      s.last_list = Some(LastList {
        mode,
        params: params.clone(),
      });
      s.generations.next(Slot::List)
    };

    let result = self
      .client
      .get(path, &query)
      .await
      .and_then(|env| decode_page(env, params));

    let mut s = self.lock();
    if !s.generations.is_current(Slot::List, token) {
      debug!(store = self.spec.name, "discarding superseded list response");
      s.state.settle_quiet();
      return result;
    }

    match &result {
      Ok(page) => {
        s.items.replace(page.items.clone());
        s.meta = page.meta;
        s.state.succeed(None);
      }
      // The previous page stays visible on failure.
      Err(e) => s.state.fail(e),
    }
    result
  }

  /// Repeat the last list request, if there was one.
  pub async fn refresh(&self) -> ApiResult<Option<Page>> {
    let last = self.lock().last_list.clone();
    match last {
      Some(last) => self.list_with(last.mode, &last.params).await.map(Some),
      None => Ok(None),
    }
  }

  /// GET one record by id and make it the current record.
  ///
  /// A 404 is an expected state: the current slot is cleared, no error is
  /// recorded and `Ok(None)` is returned.
  pub async fn get(&self, id: &EntityId) -> ApiResult<Option<Entity>> {
    let path = self.spec.detail_path(id);
    self.fetch_current(&path).await
  }

  /// GET a "current state" endpoint (e.g. the last attendance record) into the
  /// current slot. Same 404 semantics as [`ResourceStore::get`].
  pub async fn fetch_current(&self, path: &str) -> ApiResult<Option<Entity>> {
    let token = {
      let mut s = self.lock();
      s.state.begin();
      s.generations.next(Slot::Detail)
    };

    let result = self.client.get(path, &[]).await;

    let mut s = self.lock();
    if !s.generations.is_current(Slot::Detail, token) {
      debug!(store = self.spec.name, path, "discarding superseded detail response");
      s.state.settle_quiet();
      return match result {
        Ok(env) => Ok(env.into_single().and_then(Entity::from_value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
      };
    }

    match result {
      Ok(env) => {
        let entity = env.into_single().and_then(Entity::from_value);
        if let Some(e) = &entity {
          if let Some(id) = e.id() {
            if s.items.contains(&id) {
              s.items.upsert(e.clone());
            }
          }
        }
        s.current = entity.clone();
        s.state.succeed(None);
        Ok(entity)
      }
      Err(e) if e.is_not_found() => {
        debug!(store = self.spec.name, path, "no current record");
        s.current = None;
        s.state.settle_quiet();
        Ok(None)
      }
      Err(e) => {
        s.state.fail(&e);
        Err(e)
      }
    }
  }

  /// GET the statistics endpoint into the statistics snapshot.
  ///
  /// Tracked by its own request state; a failure here never touches the
  /// collection or the main `error` slot.
  pub async fn fetch_statistics(&self) -> ApiResult<Value> {
    let Some(path) = self.spec.statistics_path else {
      return Ok(self.lock().statistics.clone());
    };

    let token = {
      let mut s = self.lock();
      s.statistics_state.begin();
      s.generations.next(Slot::Statistics)
    };

    let result = self.client.get(path, &[]).await;

    let mut s = self.lock();
    if !s.generations.is_current(Slot::Statistics, token) {
      s.statistics_state.settle_quiet();
      return result.map(Envelope::into_value);
    }

    match result {
      Ok(env) => {
        let stats = fill_defaults(&self.spec.default_statistics, env.into_value());
        s.statistics = stats.clone();
        s.statistics_state.succeed(None);
        Ok(stats)
      }
      Err(e) => {
        warn!(store = self.spec.name, error = %e, "statistics fetch failed");
        s.statistics_state.fail(&e);
        Err(e)
      }
    }
  }

  /// GET an auxiliary endpoint and return its payload without caching it.
  pub async fn fetch_value(&self, path: &str, params: &ListParams) -> ApiResult<Value> {
    let query = params.to_query(self.spec.page_style);
    self.lock().state.begin();

    let result = self.client.get(path, &query).await;

    let mut s = self.lock();
    match result {
      Ok(env) => {
        s.state.succeed(None);
        Ok(env.into_value())
      }
      Err(e) => {
        s.state.fail(&e);
        Err(e)
      }
    }
  }

  /// GET a binary payload (exports, payslips).
  pub async fn download(&self, path: &str, success: Option<&str>) -> ApiResult<Blob> {
    self.lock().state.begin();

    let result = self.client.download(path).await;

    let mut s = self.lock();
    match &result {
      Ok(blob) => {
        debug!(store = self.spec.name, path, bytes = blob.bytes.len(), "download complete");
        s.state.succeed(success.map(String::from));
      }
      Err(e) => s.state.fail(e),
    }
    result
  }

  // ==========================================================================
  // Writes
  // ==========================================================================

  /// POST the allow-listed part of `payload` to the collection endpoint.
  pub async fn create(&self, payload: &Payload) -> ApiResult<Option<Entity>> {
    self.create_with_uploads(payload, &[]).await
  }

  /// [`ResourceStore::create`] with files attached. Files are only sent by
  /// stores whose body kind is [`BodyKind::Multipart`].
  pub async fn create_with_uploads(&self, payload: &Payload, uploads: &[Upload]) -> ApiResult<Option<Entity>> {
    let body = self.spec.create_fields.apply(payload);
    self.lock().state.begin();

    let result = match self.spec.body {
      BodyKind::Json => self.client.post(self.spec.base, &body).await,
      BodyKind::Multipart => self.client.post_multipart(self.spec.base, &body, uploads).await,
    };

    let env = match result {
      Ok(env) => env,
      Err(e) => {
        self.lock().state.fail(&e);
        return Err(e);
      }
    };

    let message = env.message.clone();
    let created = env.into_single().and_then(Entity::from_value);
    info!(
      store = self.spec.name,
      id = ?created.as_ref().and_then(Entity::id),
      "record created"
    );

    let needs_refetch = {
      let mut s = self.lock();
      // A list sent before the write would undo it when it lands.
      s.generations.next(Slot::List);
      match (self.spec.on_create, &created) {
        (WriteDiscipline::Reconcile, Some(entity)) if entity.id().is_some() => {
          s.items.prepend(entity.clone());
          s.meta.total += 1;
          false
        }
        _ => true,
      }
    };

    self.finish_write(needs_refetch, message).await;
    Ok(created)
  }

  /// Send the allow-listed part of `payload` as an update of `id`.
  ///
  /// Fields absent from `payload` are not sent. The cached copy is replaced by
  /// the returned record, or patched with the sent fields when the backend
  /// answers without one.
  pub async fn update(&self, id: &EntityId, payload: &Payload) -> ApiResult<Option<Entity>> {
    self.update_with_uploads(id, payload, &[]).await
  }

  /// [`ResourceStore::update`] with files attached.
  pub async fn update_with_uploads(
    &self,
    id: &EntityId,
    payload: &Payload,
    uploads: &[Upload],
  ) -> ApiResult<Option<Entity>> {
    let body = self.spec.update_fields.apply(payload);
    let path = self.spec.detail_path(id);
    self.lock().state.begin();

    let result = match (self.spec.body, self.spec.update_method) {
      (BodyKind::Multipart, _) => {
        let mut form = body.clone();
        form.insert("_method".to_string(), Value::String("PUT".to_string()));
        self.client.post_multipart(&path, &form, uploads).await
      }
      (BodyKind::Json, UpdateMethod::Put) => self.client.put(&path, &body).await,
      (BodyKind::Json, UpdateMethod::PostOverride) => self.client.post_with_method(&path, &body, "PUT").await,
    };

    let env = match result {
      Ok(env) => env,
      Err(e) => {
        self.lock().state.fail(&e);
        return Err(e);
      }
    };

    let message = env.message.clone();
    let returned = env.into_single().and_then(Entity::from_value);
    info!(store = self.spec.name, %id, "record updated");

    let (needs_refetch, updated) = {
      let mut s = self.lock();
      s.generations.next(Slot::List);
      match self.spec.on_update {
        WriteDiscipline::Refetch => (true, returned),
        WriteDiscipline::Reconcile => match returned {
          Some(entity) if entity.has_id(id) => {
            s.reconcile(&entity);
            (false, Some(entity))
          }
          _ => {
            s.items.patch(id, &body);
            if let Some(current) = s.current.as_mut().filter(|c| c.has_id(id)) {
              current.merge(&body);
            }
            let patched = s.items.find(id).cloned().or_else(|| s.current.clone().filter(|c| c.has_id(id)));
            (false, patched)
          }
        },
      }
    };

    self.finish_write(needs_refetch, message).await;
    Ok(updated)
  }

  /// DELETE `id`, then drop it from the collection and the current slot.
  pub async fn delete(&self, id: &EntityId) -> ApiResult<()> {
    let path = self.spec.detail_path(id);
    self.lock().state.begin();

    let result = self.client.delete(&path).await;

    let env = match result {
      Ok(env) => env,
      Err(e) => {
        self.lock().state.fail(&e);
        return Err(e);
      }
    };

    info!(store = self.spec.name, %id, "record deleted");
    {
      let mut s = self.lock();
      s.generations.next(Slot::List);
      if s.items.remove(id).is_some() {
        s.meta.total = s.meta.total.saturating_sub(1);
      }
      s.clear_current_if(id);
    }

    let message = env
      .message
      .or_else(|| Some(format!("{} deleted successfully", capitalize(self.spec.name))));
    self
      .finish_write(self.spec.on_delete == WriteDiscipline::Refetch, message)
      .await;
    Ok(())
  }

  /// POST to an action endpoint (`approve`, `mark-as-paid`, ...).
  ///
  /// A returned record that is already cached replaces the cached copy.
  pub async fn perform(&self, path: &str, payload: &Payload) -> ApiResult<Value> {
    self.lock().state.begin();
    let result = self.client.post(path, payload).await;
    self.finish_action(path, result)
  }

  /// PUT variant of [`ResourceStore::perform`] for endpoints outside the
  /// collection (`payroll-details/{id}`).
  pub async fn perform_put(&self, path: &str, payload: &Payload) -> ApiResult<Value> {
    self.lock().state.begin();
    let result = self.client.put(path, payload).await;
    self.finish_action(path, result)
  }

  fn finish_action(&self, path: &str, result: ApiResult<Envelope>) -> ApiResult<Value> {
    let mut s = self.lock();
    match result {
      Ok(env) => {
        let message = env.message.clone();
        let value = env.into_value();
        if let Some(entity) = Entity::from_value(value.clone()) {
          s.reconcile(&entity);
        }
        info!(store = self.spec.name, path, "action performed");
        s.state.succeed(message);
        Ok(value)
      }
      Err(e) => {
        s.state.fail(&e);
        Err(e)
      }
    }
  }

  /// Settle a successful write, re-fetching first when the discipline asks for it.
  async fn finish_write(&self, needs_refetch: bool, message: Option<String>) {
    if needs_refetch {
      if let Err(e) = self.refresh().await {
        // The refresh recorded its own error; the write itself went through.
        warn!(store = self.spec.name, error = %e, "refresh after write failed");
        self.lock().state.settle_quiet();
        return;
      }
    }
    self.lock().state.succeed(message);
  }

  // ==========================================================================
  // Local state
  // ==========================================================================

  pub fn set_current(&self, entity: Option<Entity>) {
    self.lock().current = entity;
  }

  /// Patch the cached copy of `id` without talking to the backend.
  pub fn patch_local(&self, id: &EntityId, fields: &Payload) -> bool {
    let mut s = self.lock();
    if let Some(current) = s.current.as_mut().filter(|c| c.has_id(id)) {
      current.merge(fields);
    }
    s.items.patch(id, fields)
  }

  /// Forget everything and invalidate in-flight reads.
  pub fn reset(&self) {
    let mut s = self.lock();
    let mut generations = s.generations;
    generations.next(Slot::List);
    generations.next(Slot::Detail);
    generations.next(Slot::Statistics);

    let mut state = s.state.clone();
    state.clear();
    let mut statistics_state = s.statistics_state.clone();
    statistics_state.clear();

    *s = Inner {
      generations,
      state,
      statistics_state,
      ..Inner::new(&self.spec)
    };
  }

  pub fn items(&self) -> Collection {
    self.lock().items.clone()
  }

  pub fn find(&self, id: &EntityId) -> Option<Entity> {
    self.lock().items.find(id).cloned()
  }

  pub fn meta(&self) -> PageMeta {
    self.lock().meta
  }

  pub fn current(&self) -> Option<Entity> {
    self.lock().current.clone()
  }

  pub fn statistics(&self) -> Value {
    self.lock().statistics.clone()
  }

  pub fn state(&self) -> RequestState {
    self.lock().state.clone()
  }

  pub fn statistics_state(&self) -> RequestState {
    self.lock().statistics_state.clone()
  }

  pub fn snapshot(&self) -> StoreSnapshot {
    let s = self.lock();
    StoreSnapshot {
      items: s.items.clone(),
      meta: s.meta,
      current: s.current.clone(),
      statistics: s.statistics.clone(),
      state: s.state.clone(),
      statistics_state: s.statistics_state.clone(),
    }
  }
}

impl std::fmt::Debug for ResourceStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ResourceStore")
      .field("name", &self.spec.name)
      .field("base", &self.spec.base)
      .finish_non_exhaustive()
  }
}

/// Normalize a list response into a page. Flat lists become a single page.
fn decode_page(env: Envelope, params: &ListParams) -> ApiResult<Page> {
  let (items, meta) = env.into_items()?;
  let items: Vec<Entity> = items.into_iter().filter_map(Entity::from_value).collect();

  let meta = match meta {
    Some(meta) => PageMeta::from_wire(&meta, params),
    None => {
      let total = items.len() as u64;
      // Everything arrived at once, so the page is at least as large as the list.
      let per_page = params.per_page.unwrap_or(PageMeta::default().per_page).max(total);
      PageMeta {
        current_page: 1,
        last_page: 1,
        per_page,
        total,
      }
    }
  };

  Ok(Page { items, meta })
}

/// Fill keys missing from `value` with the defaults, recursively for objects.
/// Keys the backend sends as `null` fall back to the default too.
pub fn fill_defaults(defaults: &Value, value: Value) -> Value {
  match (defaults, value) {
    (Value::Object(defaults), Value::Object(mut obj)) => {
      for (key, default) in defaults {
        let merged = match obj.remove(key) {
          Some(Value::Null) | None => default.clone(),
          Some(v) => fill_defaults(default, v),
        };
        obj.insert(key.clone(), merged);
      }
      Value::Object(obj)
    }
    (defaults, Value::Null) => defaults.clone(),
    (_, value) => value,
  }
}

fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}
