//! Payroll runs, their detail lines and the employee's own payslips.

use serde_json::{json, Value};
use tracing::warn;

use crate::api::{ApiClient, ApiResult, Blob, ListParams, Payload};
use crate::cache::{Entity, EntityId};
use crate::store::{Page, ResourceSpec, ResourceStore};

pub const EXPORT_FILENAME: &str = "Payroll_Export.xlsx";
const EXPORT_SUCCESS: &str = "Excel file downloaded successfully";
/// Detail lines per page when the caller does not ask for a size.
pub const DETAILS_PER_PAGE: u64 = 50;

#[derive(Debug, Clone)]
pub struct PayrollStore {
  store: ResourceStore,
  payslips: ResourceStore,
}

resource_wrapper!(PayrollStore);

impl PayrollStore {
  pub fn new(client: ApiClient) -> Self {
    Self {
      payslips: ResourceStore::new(client.clone(), ResourceSpec::new("payslip", "my-payslips")),
      store: ResourceStore::new(client, Self::spec()),
    }
  }

  pub fn spec() -> ResourceSpec {
    ResourceSpec::new("payroll", "payrolls")
      .paginated("payrolls/all/paginated")
      .statistics(
        "payrolls/statistics",
        json!({
          "total_payroll": 0,
          "pending_review": 0,
          "finalized": 0,
          "total_amount": 0,
          "average_salary": 0,
          "deductions": 0,
        }),
      )
  }

  /// The caller's payslips, cached separately from the payroll runs.
  pub fn payslips(&self) -> &ResourceStore {
    &self.payslips
  }

  /// One page of detail lines of a payroll run, with its own pagination meta.
  pub async fn details(&self, id: &EntityId, page: u64, per_page: Option<u64>) -> ApiResult<Value> {
    let path = self.store.spec().member_path(id, "details");
    let params = ListParams::new()
      .page(page)
      .per_page(per_page.unwrap_or(DETAILS_PER_PAGE));
    self.store.fetch_value(&path, &params).await
  }

  /// Generate a payroll run for a period; the list is re-fetched afterwards.
  pub async fn generate(&self, payload: &Payload) -> ApiResult<Value> {
    let value = self.store.perform("payrolls/generate", payload).await?;
    if let Err(e) = self.store.refresh().await {
      warn!(error = %e, "refresh after payroll generation failed");
    }
    Ok(value)
  }

  pub async fn update_detail(&self, detail: &EntityId, payload: &Payload) -> ApiResult<Value> {
    let path = format!("payroll-details/{}", detail.path_segment());
    self.store.perform_put(&path, payload).await
  }

  pub async fn mark_as_paid(&self, id: &EntityId, payload: &Payload) -> ApiResult<Value> {
    let path = self.store.spec().member_path(id, "mark-as-paid");
    self.store.perform(&path, payload).await
  }

  pub async fn my_payslips(&self, params: &ListParams) -> ApiResult<Page> {
    self.payslips.list(params).await
  }

  pub async fn my_payslip(&self, id: &EntityId) -> ApiResult<Option<Entity>> {
    self.payslips.get(id).await
  }

  pub async fn download_payslip(&self, id: &EntityId) -> ApiResult<Blob> {
    let path = format!("payslips/{}/download", id.path_segment());
    self.payslips.download(&path, None).await
  }

  pub async fn payroll_statistics(&self, id: &EntityId) -> ApiResult<Value> {
    let path = self.store.spec().member_path(id, "statistics");
    self.store.fetch_value(&path, &ListParams::new()).await
  }

  /// Spreadsheet export of one payroll run. The filename comes from
  /// `Content-Disposition`, falling back to [`EXPORT_FILENAME`].
  pub async fn export_excel(&self, id: &EntityId) -> ApiResult<Blob> {
    let path = self.store.spec().member_path(id, "export-excel");
    let mut blob = self.store.download(&path, Some(EXPORT_SUCCESS)).await?;
    blob.filename = Some(blob.filename_or(EXPORT_FILENAME).to_string());
    Ok(blob)
  }
}
