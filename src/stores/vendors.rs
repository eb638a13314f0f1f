//! Vendor master data and the vendor task family.
//!
//! All of these endpoints page with `row_per_page` and always send `search`.

use serde_json::Value;

use crate::api::{ApiClient, ApiResult, PageStyle};
use crate::store::{ResourceSpec, ResourceStore};

#[derive(Debug, Clone)]
pub struct VendorStores {
  pub vendors: ResourceStore,
  pub attachments: ResourceStore,
  pub task_pivots: ResourceStore,
  pub task_lists: ResourceStore,
  pub task_scopes: ResourceStore,
  pub task_payments: ResourceStore,
}

fn row_paged(name: &'static str, base: &'static str, paginated: &'static str) -> ResourceSpec {
  ResourceSpec::new(name, base)
    .paginated(paginated)
    .page_style(PageStyle::RowPerPage)
}

impl VendorStores {
  pub fn new(client: ApiClient) -> Self {
    let store = |spec: ResourceSpec| ResourceStore::new(client.clone(), spec);
    Self {
      vendors: store(
        row_paged("vendor", "vendors", "vendors/all/paginated").statistics("vendors/statistic", Value::Null),
      ),
      // Attachments are only ever listed unpaginated.
      attachments: store(ResourceSpec::new("vendor attachment", "vendors-attachment").page_style(PageStyle::RowPerPage)),
      task_pivots: store(row_paged(
        "vendor task",
        "vendors-task-pivot",
        "vendors-task-pivot/all/paginated",
      )),
      task_lists: store(row_paged(
        "vendor task list",
        "vendors-task-list",
        "vendors-task-list/all/paginated",
      )),
      task_scopes: store(row_paged(
        "vendor task scope",
        "vendors-task-scope",
        "vendors-task-scope/all/paginated",
      )),
      task_payments: store(row_paged(
        "vendor task payment",
        "vendors-task-payment",
        "vendors-task-payment/all/paginated",
      )),
    }
  }

  pub async fn statistics(&self) -> ApiResult<Value> {
    self.vendors.fetch_statistics().await
  }

  pub fn all(&self) -> [&ResourceStore; 6] {
    [
      &self.vendors,
      &self.attachments,
      &self.task_pivots,
      &self.task_lists,
      &self.task_scopes,
      &self.task_payments,
    ]
  }
}
