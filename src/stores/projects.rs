use serde_json::{json, Value};

use crate::api::{ApiClient, ApiResult, ListParams, Payload};
use crate::cache::{Entity, EntityId};
use crate::store::{Page, ResourceSpec, ResourceStore, UpdateMethod};

#[derive(Debug, Clone)]
pub struct ProjectStore {
  store: ResourceStore,
}

resource_wrapper!(ProjectStore);

impl ProjectStore {
  pub fn new(client: ApiClient) -> Self {
    Self {
      store: ResourceStore::new(client, Self::spec()),
    }
  }

  pub fn spec() -> ResourceSpec {
    ResourceSpec::new("project", "projects")
      .paginated("projects/all/paginated")
      .statistics("projects/statistics", json!({"total": 0, "active": 0}))
      .update_method(UpdateMethod::PostOverride)
  }
}

/// Tasks of one project at a time.
#[derive(Debug, Clone)]
pub struct ProjectTaskStore {
  store: ResourceStore,
}

resource_wrapper!(ProjectTaskStore);

impl ProjectTaskStore {
  pub fn new(client: ApiClient) -> Self {
    Self {
      store: ResourceStore::new(client, Self::spec()),
    }
  }

  pub fn spec() -> ResourceSpec {
    ResourceSpec::new("task", "project-tasks").update_method(UpdateMethod::PostOverride)
  }

  pub async fn for_project(&self, project: &EntityId) -> ApiResult<Page> {
    let params = ListParams::new().filter("project_id", project);
    self.store.list(&params).await
  }

  /// Move a cached task to another status column.
  ///
  /// The whole cached record is resent with the new status. Returns `None`
  /// without a request when the task is not cached.
  pub async fn update_status(&self, id: &EntityId, status: &str) -> ApiResult<Option<Entity>> {
    let Some(task) = self.store.find(id) else {
      return Ok(None);
    };

    let mut body = task.fields().clone();
    body.insert("status".to_string(), Value::String(status.to_string()));
    let updated = self.store.update(id, &body).await?;

    let mut patch = Payload::new();
    patch.insert("status".to_string(), Value::String(status.to_string()));
    self.store.patch_local(id, &patch);

    Ok(updated)
  }
}
