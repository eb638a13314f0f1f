use serde_json::{json, Value};

use crate::api::{ApiClient, ApiResult, ListParams};
use crate::cache::{Entity, EntityId};
use crate::store::{fill_defaults, BodyKind, ResourceSpec, ResourceStore, UpdateMethod};

use super::entities;

#[derive(Debug, Clone)]
pub struct EmployeeStore {
  store: ResourceStore,
}

resource_wrapper!(EmployeeStore);

impl EmployeeStore {
  pub fn new(client: ApiClient) -> Self {
    Self {
      store: ResourceStore::new(client, Self::spec()),
    }
  }

  pub fn spec() -> ResourceSpec {
    ResourceSpec::new("employee", "employees")
      .paginated("employees/all/paginated")
      .statistics(
        "employees/statistics",
        json!({
          "total": 0,
          "added_this_month": 0,
          "active": 0,
          "active_change": 0,
          "on_leave": 0,
          "on_leave_change": 0,
          "average_salary": 0,
          "new_employees": 0,
        }),
      )
      .update_method(UpdateMethod::PostOverride)
      .body(BodyKind::Multipart)
  }

  /// Most recently added employees, without touching the cached list.
  pub async fn latest(&self, limit: u64) -> ApiResult<Vec<Entity>> {
    let params = ListParams::new().filter("limit", limit);
    self.store.fetch_value("employees", &params).await.map(entities)
  }

  pub async fn performance_statistics(&self, id: &EntityId) -> ApiResult<Value> {
    let path = self.store.spec().member_path(id, "performance-statistics");
    let value = self.store.fetch_value(&path, &ListParams::new()).await?;
    Ok(fill_defaults(
      &json!({
        "tasks_completed": 0,
        "attendance_rate": 0,
        "projects_count": 0,
        "performance_score": 0,
      }),
      value,
    ))
  }

  /// Employee record of the logged-in user.
  pub async fn my_profile(&self) -> ApiResult<Option<Entity>> {
    let value = self.store.fetch_value("my-profile", &ListParams::new()).await?;
    Ok(Entity::from_value(value))
  }

  pub async fn my_team(&self) -> ApiResult<Option<Entity>> {
    let value = self.store.fetch_value("my-team", &ListParams::new()).await?;
    Ok(Entity::from_value(value))
  }

  pub async fn my_team_members(&self) -> ApiResult<Vec<Entity>> {
    self
      .store
      .fetch_value("my-team/members", &ListParams::new())
      .await
      .map(entities)
  }

  pub async fn my_team_projects(&self) -> ApiResult<Vec<Entity>> {
    self
      .store
      .fetch_value("my-team/projects", &ListParams::new())
      .await
      .map(entities)
  }
}
