//! Company finance: operational costs grouped by category, and the
//! fixed-cost sheet whose budget summary is computed client-side.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{json, Value};

use crate::aggregate::BudgetSummary;
use crate::api::{ApiClient, ApiResult, ListParams, PageStyle};
use crate::store::{fill_defaults, ResourceSpec, ResourceStore, UpdateMethod};

fn overview_default() -> Value {
  json!({
    "fixed_cost": {"items": [], "summary": {}},
    "sdm_resource": {"items": [], "summary": {}},
    "infrastructure": {"items": [], "summary": {}},
    "company_balance": "0.00",
  })
}

fn statistics_default() -> Value {
  json!({
    "fixed_cost": {
      "summary": {"total_budget": 0, "total_actual": 0, "variance": 0, "total_items": 0},
      "items": [],
    },
    "sdm_resource": {
      "summary": {
        "total_budget": 0,
        "total_actual": 0,
        "variance": 0,
        "total_status_green": 0,
        "total_status_amber": 0,
        "total_status_red": 0,
      },
      "items": [],
    },
    "infrastructure": {
      "summary": {"total_monthly_fee": 0, "total_annual_fee": 0, "total_infra_active": 0},
      "items": [],
    },
    "company_balance": "0.00",
    "fixed_cost_byMonth": [],
    "sdm_resource_byMonth": [],
    "infrastructure_byMonth": [],
  })
}

#[derive(Debug, Clone)]
pub struct CompanyFinanceStore {
  /// Individual operational cost records (`company-finances/{id}`).
  pub operational: ResourceStore,
  pub fixed_costs: FixedCostStore,
  overview: Arc<Mutex<Value>>,
}

impl CompanyFinanceStore {
  pub fn new(client: ApiClient) -> Self {
    let operational = ResourceSpec::new("operational cost", "company-finances")
      .statistics("company-finances/statistic", statistics_default())
      .update_method(UpdateMethod::PostOverride);
    Self {
      operational: ResourceStore::new(client.clone(), operational),
      fixed_costs: FixedCostStore::new(client),
      overview: Arc::new(Mutex::new(overview_default())),
    }
  }

  /// GET `company-finances`: every category with its items and summary,
  /// plus the company balance. Kept as one snapshot since it is not a list.
  pub async fn fetch_overview(&self, params: &ListParams) -> ApiResult<Value> {
    let value = self.operational.fetch_value("company-finances", params).await?;
    let value = fill_defaults(&overview_default(), value);
    *self.overview.lock().unwrap_or_else(PoisonError::into_inner) = value.clone();
    Ok(value)
  }

  pub fn overview(&self) -> Value {
    self.overview.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }

  pub fn reset_overview(&self) {
    *self.overview.lock().unwrap_or_else(PoisonError::into_inner) = overview_default();
  }

  pub async fn fetch_statistics(&self) -> ApiResult<Value> {
    self.operational.fetch_statistics().await
  }
}

/// Fixed costs, paged by `row_per_page`.
#[derive(Debug, Clone)]
pub struct FixedCostStore {
  store: ResourceStore,
}

resource_wrapper!(FixedCostStore);

impl FixedCostStore {
  pub fn new(client: ApiClient) -> Self {
    Self {
      store: ResourceStore::new(client, Self::spec()),
    }
  }

  pub fn spec() -> ResourceSpec {
    ResourceSpec::new("fixed cost", "fixed-costs")
      .paginated("fixed-costs/all/paginated")
      .page_style(PageStyle::RowPerPage)
  }

  /// Budget against actual over the cached page, derived from the cache on
  /// every call so it follows each list, create, update and delete.
  pub fn summary(&self) -> BudgetSummary {
    let items = self.store.items();
    BudgetSummary::from_items(items.iter())
  }
}
