//! Attendance: the caller's own records, today's check-in state and
//! the admin overview.

use chrono::NaiveDate;
use serde_json::{json, Value};
use tracing::info;

use crate::api::{ApiClient, ApiResult, FieldMap, ListParams, Payload};
use crate::cache::{Entity, EntityId};
use crate::store::{fill_defaults, Page, ResourceSpec, ResourceStore};

use super::entities;

const LAST_ATTENDANCE: &str = "attendances/last-attendance";

#[derive(Debug, Clone)]
pub struct AttendanceStore {
  store: ResourceStore,
}

resource_wrapper!(AttendanceStore);

impl AttendanceStore {
  pub fn new(client: ApiClient) -> Self {
    Self {
      store: ResourceStore::new(client, Self::spec()),
    }
  }

  pub fn spec() -> ResourceSpec {
    ResourceSpec::new("attendance", "attendances")
      .list_path("my-attendances")
      .statistics(
        "my-attendance-statistics",
        json!({
          "attendance_rate": 0,
          "present_days": 0,
          "total_working_days": 0,
          "on_time_percentage": 0,
          "total_hours_worked": 0,
          "leave_balance": 12,
          "tasks_completed": 0,
          "active_projects": 0,
        }),
      )
  }

  fn check_in_fields() -> FieldMap {
    FieldMap::default()
      .field("check_in_lat")
      .field("check_in_long")
      .non_empty("notes")
  }

  fn check_out_fields() -> FieldMap {
    FieldMap::default()
      .field("check_out_lat")
      .field("check_out_long")
      .non_empty("notes")
  }

  pub async fn my_attendances(&self, params: &ListParams) -> ApiResult<Page> {
    self.store.list(params).await
  }

  /// Today's attendance record. No record yet is `Ok(None)`, not an error.
  pub async fn today(&self) -> ApiResult<Option<Entity>> {
    self.store.fetch_current(LAST_ATTENDANCE).await
  }

  pub async fn check_in(&self, payload: &Payload) -> ApiResult<Option<Entity>> {
    self
      .punch("attendances/check-in", &Self::check_in_fields().apply(payload))
      .await
  }

  pub async fn check_out(&self, payload: &Payload) -> ApiResult<Option<Entity>> {
    self
      .punch("attendances/check-out", &Self::check_out_fields().apply(payload))
      .await
  }

  async fn punch(&self, path: &str, body: &Payload) -> ApiResult<Option<Entity>> {
    let value = self.store.perform(path, body).await?;
    let record = Entity::from_value(value);
    info!(path, id = ?record.as_ref().and_then(Entity::id), "attendance recorded");
    self.store.set_current(record.clone());
    Ok(record)
  }

  pub async fn admin_statistics(&self) -> ApiResult<Value> {
    let value = self
      .store
      .fetch_value("attendances/statistics", &ListParams::new())
      .await?;
    Ok(fill_defaults(
      &json!({"total_days": 0, "present_days": 0, "sick_days": 0, "absent_days": 0}),
      value,
    ))
  }

  /// Everybody's attendance on `date`, capped at `limit` records.
  pub async fn today_attendances(&self, date: NaiveDate, limit: u64) -> ApiResult<Vec<Entity>> {
    let params = ListParams::new()
      .filter("date", date.format("%Y-%m-%d"))
      .filter("limit", limit);
    self.store.fetch_value("attendances", &params).await.map(entities)
  }

  /// Monthly statistics for one employee; `month` is `YYYY-MM`, current month when `None`.
  pub async fn employee_statistics(&self, employee: &EntityId, month: Option<&str>) -> ApiResult<Value> {
    let path = format!("attendances/employee/{}/statistics", employee.path_segment());
    let mut params = ListParams::new();
    if let Some(month) = month {
      params = params.filter("month", month);
    }
    self.store.fetch_value(&path, &params).await
  }
}
