use serde_json::Value;

use crate::api::{ApiClient, ApiResult, ListParams, Payload};
use crate::cache::{Entity, EntityId};
use crate::store::{Page, ResourceSpec, ResourceStore};

use super::entities;

#[derive(Debug, Clone)]
pub struct LeaveRequestStore {
  store: ResourceStore,
}

resource_wrapper!(LeaveRequestStore);

impl LeaveRequestStore {
  pub fn new(client: ApiClient) -> Self {
    Self {
      store: ResourceStore::new(client, Self::spec()),
    }
  }

  /// The cached list is the caller's own requests; approvers read the
  /// full list through [`LeaveRequestStore::latest`].
  pub fn spec() -> ResourceSpec {
    ResourceSpec::new("leave request", "leave-requests").list_path("my-leave-requests")
  }

  pub async fn mine(&self, params: &ListParams) -> ApiResult<Page> {
    self.store.list(params).await
  }

  pub async fn latest(&self, limit: u64) -> ApiResult<Vec<Entity>> {
    let params = ListParams::new().filter("limit", limit);
    self.store.fetch_value("leave-requests", &params).await.map(entities)
  }

  pub async fn approve(&self, id: &EntityId) -> ApiResult<Value> {
    self.decide("approve", id).await
  }

  pub async fn reject(&self, id: &EntityId) -> ApiResult<Value> {
    self.decide("reject", id).await
  }

  async fn decide(&self, decision: &str, id: &EntityId) -> ApiResult<Value> {
    let path = format!("leave-requests/{}/{}", decision, id.path_segment());
    self.store.perform(&path, &Payload::new()).await
  }
}
