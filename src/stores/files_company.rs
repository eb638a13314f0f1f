use serde_json::json;

use crate::api::{ApiClient, ApiResult, ListParams};
use crate::store::{Page, ResourceSpec, ResourceStore};

/// Archived company documents.
#[derive(Debug, Clone)]
pub struct FilesCompanyStore {
  store: ResourceStore,
}

resource_wrapper!(FilesCompanyStore);

impl FilesCompanyStore {
  pub fn new(client: ApiClient) -> Self {
    Self {
      store: ResourceStore::new(client, Self::spec()),
    }
  }

  pub fn spec() -> ResourceSpec {
    ResourceSpec::new("file", "files-company").statistics(
      "files-company/statistics",
      json!({"total_archives": 0, "last_uploaded": null}),
    )
  }

  pub async fn archives(&self, params: &ListParams) -> ApiResult<Page> {
    self.store.list(params).await
  }
}
