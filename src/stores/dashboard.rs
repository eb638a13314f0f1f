use serde_json::{json, Value};

use crate::api::{ApiClient, ApiResult};
use crate::store::{ResourceSpec, ResourceStore};

#[derive(Debug, Clone)]
pub struct DashboardStore {
  store: ResourceStore,
}

resource_wrapper!(DashboardStore);

impl DashboardStore {
  pub fn new(client: ApiClient) -> Self {
    Self {
      store: ResourceStore::new(client, Self::spec()),
    }
  }

  pub fn spec() -> ResourceSpec {
    ResourceSpec::new("dashboard", "dashboard").statistics(
      "dashboard/statistics",
      json!({
        "employees": {"total": 0, "added_this_month": 0},
        "teams": {"total": 0, "new_teams": 0},
        "attendance": {"rate": 0, "change": 0},
        "tasks": {"completed": 0, "change": 0},
        "projects": {"active": 0, "new_projects": 0},
      }),
    )
  }

  pub async fn fetch(&self) -> ApiResult<Value> {
    self.store.fetch_statistics().await
  }
}
