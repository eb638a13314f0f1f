use serde::Serialize;
use serde_json::{json, Value};

use crate::api::{ApiClient, ApiResult, ListParams, Payload};
use crate::cache::{Entity, EntityId};
use crate::store::{fill_defaults, ResourceSpec, ResourceStore, UpdateMethod};

use super::entities;

#[derive(Debug, Clone)]
pub struct TeamStore {
  store: ResourceStore,
}

resource_wrapper!(TeamStore);

/// Form state after picking (or clearing) a team lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadSelection {
  pub selected_lead: Option<Entity>,
  /// User id of the lead's account, not the employee id.
  pub team_lead_id: Value,
}

impl TeamStore {
  pub fn new(client: ApiClient) -> Self {
    Self {
      store: ResourceStore::new(client, Self::spec()),
    }
  }

  pub fn spec() -> ResourceSpec {
    ResourceSpec::new("team", "teams")
      .paginated("teams/all/paginated")
      .statistics(
        "teams/statistics",
        json!({
          "total": 0,
          "added_this_month": 0,
          "active": 0,
          "active_change": 0,
          "members": 0,
          "members_change": 0,
          "average_size": 0,
          "new_teams": 0,
        }),
      )
      .update_method(UpdateMethod::PostOverride)
  }

  pub async fn latest(&self, limit: u64) -> ApiResult<Vec<Entity>> {
    let params = ListParams::new().filter("limit", limit);
    self.store.fetch_value("teams", &params).await.map(entities)
  }

  pub async fn team_statistics(&self, id: &EntityId) -> ApiResult<Value> {
    let path = self.store.spec().member_path(id, "statistics");
    let value = self.store.fetch_value(&path, &ListParams::new()).await?;
    Ok(fill_defaults(
      &json!({
        "active_members": 0,
        "projects_assigned": 0,
        "projects_in_progress": 0,
        "team_performance": 0,
        "completion_rate": 0,
      }),
      value,
    ))
  }

  pub async fn chart_data(&self, id: &EntityId) -> ApiResult<Value> {
    let path = self.store.spec().member_path(id, "chart-data");
    let value = self.store.fetch_value(&path, &ListParams::new()).await?;
    Ok(fill_defaults(
      &json!({"months": [], "member_growth": [], "task_growth": []}),
      value,
    ))
  }

  pub async fn add_member(&self, team: &EntityId, employee: &EntityId) -> ApiResult<Value> {
    let path = self.store.spec().member_path(team, "add-member");
    self.store.perform(&path, &member_payload(employee)).await
  }

  pub async fn remove_member(&self, team: &EntityId, employee: &EntityId) -> ApiResult<Value> {
    let path = self.store.spec().member_path(team, "remove-member");
    self.store.perform(&path, &member_payload(employee)).await
  }

  pub fn select_lead(employee: Option<&Entity>) -> LeadSelection {
    match employee {
      Some(employee) => LeadSelection {
        selected_lead: Some(employee.clone()),
        team_lead_id: employee
          .get("user")
          .and_then(|u| u.get("id"))
          .cloned()
          .unwrap_or(Value::Null),
      },
      None => Self::remove_lead(),
    }
  }

  pub fn remove_lead() -> LeadSelection {
    LeadSelection {
      selected_lead: None,
      team_lead_id: Value::Null,
    }
  }
}

fn member_payload(employee: &EntityId) -> Payload {
  let mut body = Payload::new();
  body.insert("employee_id".to_string(), employee.to_value());
  body
}
