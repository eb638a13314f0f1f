//! End-to-end store behaviour against a mock backend.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_string_contains, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hrdesk::aggregate::BudgetSummary;
use hrdesk::api::{payload_from, ApiClient, ErrorKind, ListParams, PageMeta, Upload};
use hrdesk::cache::EntityId;
use hrdesk::config::ApiConfig;
use hrdesk::stores::Stores;

fn stores_for(server: &MockServer) -> Stores {
  let client = ApiClient::new(&ApiConfig {
    base_url: format!("{}/api", server.uri()),
    ..ApiConfig::default()
  })
  .unwrap();
  client.set_token("test-token");
  Stores::new(client)
}

fn ok(body: Value) -> ResponseTemplate {
  ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn test_paginated_list_fills_missing_per_page() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/employees/all/paginated"))
    .and(query_param("search", "alice"))
    .and(query_param("page", "1"))
    .and(query_param("per_page", "10"))
    .respond_with(ok(json!({
      "data": {
        "data": [{"id": 7, "name": "Alice"}],
        "meta": {"current_page": 1, "last_page": 3, "total": 25}
      }
    })))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let params = ListParams::new().search("alice").page(1).per_page(10);
  stores.employees.list_paginated(&params).await.unwrap();

  let items: Vec<Value> = stores.employees.items().iter().map(|e| e.clone().into_value()).collect();
  assert_eq!(items, vec![json!({"id": 7, "name": "Alice"})]);
  assert_eq!(
    stores.employees.meta(),
    PageMeta {
      current_page: 1,
      last_page: 3,
      per_page: 10,
      total: 25
    }
  );
  let state = stores.employees.state();
  assert!(!state.is_loading());
  assert!(state.error().is_none());
}

#[tokio::test]
async fn test_failed_list_keeps_previous_page() {
  let server = MockServer::start().await;
  Mock::given(path("/api/projects"))
    .respond_with(ok(json!({"data": [{"id": 1}, {"id": 2}]})))
    .up_to_n_times(1)
    .mount(&server)
    .await;
  Mock::given(path("/api/projects"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  stores.projects.list(&ListParams::new()).await.unwrap();
  let err = stores.projects.list(&ListParams::new()).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Server);

  assert_eq!(stores.projects.items().len(), 2);
  let state = stores.projects.state();
  assert_eq!(state.error().map(|e| e.kind), Some(ErrorKind::Server));
  assert!(!state.is_loading());
}

#[tokio::test]
async fn test_created_record_is_prepended_with_server_id() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/teams"))
    .respond_with(ok(json!({"data": [{"id": 1, "name": "Ops"}]})))
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/api/teams"))
    .and(body_json(json!({"name": "Platform", "description": "Infra"})))
    .respond_with(ok(json!({
      "message": "Team created",
      "data": {"id": 42, "name": "Platform", "description": "Infra"}
    })))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  stores.teams.list(&ListParams::new()).await.unwrap();
  let created = stores
    .teams
    .create(&payload_from(json!({"name": "Platform", "description": "Infra"})))
    .await
    .unwrap()
    .unwrap();

  assert_eq!(created.id(), Some(EntityId::Int(42)));
  let items = stores.teams.items();
  assert_eq!(items.ids(), vec![EntityId::Int(42), EntityId::Int(1)]);
  assert_eq!(items.find(&EntityId::Int(42)).and_then(|e| e.str_field("name")), Some("Platform"));
  assert_eq!(stores.teams.meta().total, 2);
  assert_eq!(stores.teams.state().success(), Some("Team created"));
}

#[tokio::test]
async fn test_employee_create_is_sent_as_form_with_files() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/api/employees"))
    .and(header_regex("content-type", "^multipart/form-data; boundary="))
    .and(body_string_contains("name=\"name\""))
    .and(body_string_contains("name=\"photo\"; filename=\"bob.png\""))
    .respond_with(ok(json!({
      "message": "Employee created",
      "data": {"id": 42, "name": "Bob"}
    })))
    .expect(1)
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let photo = Upload::new("photo", "bob.png", b"fake png".to_vec()).content_type("image/png");
  let created = stores
    .employees
    .create_with_uploads(&payload_from(json!({"name": "Bob"})), &[photo])
    .await
    .unwrap()
    .unwrap();

  assert_eq!(created.id(), Some(EntityId::Int(42)));
  assert_eq!(stores.employees.items().ids(), vec![EntityId::Int(42)]);
  assert_eq!(stores.employees.state().success(), Some("Employee created"));
}

#[tokio::test]
async fn test_employee_update_posts_form_with_method_override() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/employees"))
    .respond_with(ok(json!({"data": [{"id": 3, "name": "Cy", "phone": "555"}]})))
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/api/employees/3"))
    .and(header_regex("content-type", "^multipart/form-data; boundary="))
    .and(body_string_contains("name=\"_method\""))
    .and(body_string_contains("PUT"))
    .and(body_string_contains("name=\"phone\""))
    .respond_with(ok(json!({"message": "Saved"})))
    .expect(1)
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  stores.employees.list(&ListParams::new()).await.unwrap();
  stores
    .employees
    .update(&EntityId::Int(3), &payload_from(json!({"phone": null})))
    .await
    .unwrap();

  let cached = stores.employees.find(&EntityId::Int(3)).unwrap();
  assert_eq!(cached.get("phone"), Some(&Value::Null));
  assert_eq!(cached.str_field("name"), Some("Cy"));
}

#[tokio::test]
async fn test_create_without_returned_record_refetches() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/project-tasks"))
    .respond_with(ok(json!({"data": [{"id": 5, "title": "Draft"}]})))
    .up_to_n_times(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/api/project-tasks"))
    .respond_with(ok(json!({"data": [{"id": 6, "title": "Build"}, {"id": 5, "title": "Draft"}]})))
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/api/project-tasks"))
    .respond_with(ok(json!({"message": "Task created"})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  stores.tasks.for_project(&EntityId::Int(3)).await.unwrap();
  stores
    .tasks
    .create(&payload_from(json!({"title": "Build", "project_id": 3})))
    .await
    .unwrap();

  assert_eq!(stores.tasks.items().ids(), vec![EntityId::Int(6), EntityId::Int(5)]);
  assert_eq!(stores.tasks.state().success(), Some("Task created"));
  assert!(!stores.tasks.state().is_loading());
}

#[tokio::test]
async fn test_create_drops_unknown_fields_and_nulls_empty_optionals() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/api/credential-accounts"))
    .and(body_json(json!({
      "label_password": "Mail",
      "username_email": "ops@example.com",
      "password": "hunter2",
      "website": null,
      "notes": null
    })))
    .respond_with(ok(json!({"data": {"id": 9, "label_password": "Mail"}})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  stores
    .credentials
    .create(&payload_from(json!({
      "label_password": "Mail",
      "username_email": "ops@example.com",
      "password": "hunter2",
      "website": "",
      "notes": "",
      "is_admin": true
    })))
    .await
    .unwrap();

  assert!(stores.credentials.items().contains(&EntityId::Int(9)));
  assert_eq!(stores.credentials.statistics()["total_accounts"], json!(1));
}

#[tokio::test]
async fn test_update_omission_leaves_field_and_rereads() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/credential-accounts"))
    .respond_with(ok(json!([{"id": 5, "label_password": "old", "website": "a.io"}])))
    .mount(&server)
    .await;
  // No password and no website in the body: both stay as stored.
  Mock::given(method("PUT"))
    .and(path("/api/credential-accounts/5"))
    .and(body_json(json!({"label_password": "new"})))
    .respond_with(ok(json!({"message": "Updated"})))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/api/credential-accounts/5"))
    .respond_with(ok(json!({"data": {"id": 5, "label_password": "new", "website": "a.io"}})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  stores.credentials.list(&ListParams::new()).await.unwrap();
  let updated = stores
    .credentials
    .update(
      &EntityId::Int(5),
      &payload_from(json!({"label_password": "new", "password": ""})),
    )
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.str_field("website"), Some("a.io"));
  let cached = stores.credentials.find(&EntityId::Int(5)).unwrap();
  assert_eq!(cached.str_field("label_password"), Some("new"));
  assert_eq!(stores.credentials.current(), Some(cached));
}

#[tokio::test]
async fn test_update_explicit_null_clears_field() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/teams"))
    .respond_with(ok(json!({"data": [{"id": 3, "name": "Ops", "description": "On call"}]})))
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/api/teams/3"))
    .and(body_json(json!({"description": null, "_method": "PUT"})))
    .respond_with(ok(json!({"message": "Saved"})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  stores.teams.list(&ListParams::new()).await.unwrap();
  stores
    .teams
    .update(&EntityId::Int(3), &payload_from(json!({"description": null})))
    .await
    .unwrap();

  let cached = stores.teams.find(&EntityId::Int(3)).unwrap();
  assert_eq!(cached.get("description"), Some(&Value::Null));
  assert_eq!(cached.str_field("name"), Some("Ops"));
}

#[tokio::test]
async fn test_delete_removes_record_and_current() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/vendors/all/paginated"))
    .and(query_param("row_per_page", "10"))
    .and(query_param("search", ""))
    .respond_with(ok(json!({
      "data": {"data": [{"id": 3}, {"id": 4}], "meta": {"current_page": 1, "last_page": 1, "per_page": 10, "total": 2}}
    })))
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/api/vendors/3"))
    .respond_with(ok(json!({"data": {"id": 3, "name": "Acme"}})))
    .mount(&server)
    .await;
  Mock::given(method("DELETE"))
    .and(path("/api/vendors/3"))
    .respond_with(ResponseTemplate::new(204))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let vendors = &stores.vendors.vendors;
  vendors.list_paginated(&ListParams::new()).await.unwrap();
  vendors.get(&EntityId::Int(3)).await.unwrap();
  assert!(vendors.current().is_some());

  vendors.delete(&EntityId::from("3")).await.unwrap();

  assert!(!vendors.items().contains(&EntityId::Int(3)));
  assert!(vendors.current().is_none());
  assert_eq!(vendors.meta().total, 1);
  assert_eq!(vendors.state().success(), Some("Vendor deleted successfully"));
}

#[tokio::test]
async fn test_missing_today_attendance_is_not_an_error() {
  let server = MockServer::start().await;
  Mock::given(path("/api/attendances/last-attendance"))
    .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "No attendance found"})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  stores.attendance.set_current(hrdesk::cache::Entity::from_value(json!({"id": 1})));

  assert_eq!(stores.attendance.today().await.unwrap(), None);
  let state = stores.attendance.state();
  assert!(state.error().is_none());
  assert!(!state.is_loading());
  assert!(stores.attendance.current().is_none());
}

#[tokio::test]
async fn test_check_in_becomes_today() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/api/attendances/check-in"))
    .and(body_json(json!({"check_in_lat": -6.2, "check_in_long": 106.8})))
    .respond_with(ok(json!({
      "message": "Checked in",
      "data": {"id": 11, "check_in": "2025-01-18T08:00:00Z", "check_out": null}
    })))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let record = stores
    .attendance
    .check_in(&payload_from(json!({"check_in_lat": -6.2, "check_in_long": 106.8, "notes": ""})))
    .await
    .unwrap();

  assert_eq!(record.and_then(|r| r.id()), Some(EntityId::Int(11)));
  assert_eq!(stores.attendance.current().and_then(|r| r.id()), Some(EntityId::Int(11)));
  assert_eq!(stores.attendance.state().success(), Some("Checked in"));
}

#[tokio::test]
async fn test_statistics_failure_is_isolated() {
  let server = MockServer::start().await;
  Mock::given(path("/api/employees"))
    .respond_with(ok(json!({"data": [{"id": 1}]})))
    .mount(&server)
    .await;
  Mock::given(path("/api/employees/statistics"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let params = ListParams::new();
  let (list, stats) = tokio::join!(stores.employees.list(&params), stores.employees.fetch_statistics());
  assert!(list.is_ok());
  assert!(stats.is_err());

  assert_eq!(stores.employees.items().len(), 1);
  assert!(stores.employees.state().error().is_none());
  assert!(stores.employees.statistics_state().error().is_some());
  assert_eq!(stores.employees.statistics()["total"], json!(0));
}

#[tokio::test]
async fn test_statistics_defaults_fill_gaps() {
  let server = MockServer::start().await;
  Mock::given(path("/api/my-attendance-statistics"))
    .respond_with(ok(json!({"data": {"present_days": 18, "leave_balance": null}})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let stats = stores.attendance.fetch_statistics().await.unwrap();
  assert_eq!(stats["present_days"], json!(18));
  assert_eq!(stats["leave_balance"], json!(12));
  assert_eq!(stats["attendance_rate"], json!(0));
}

#[tokio::test]
async fn test_newer_list_supersedes_older() {
  let server = MockServer::start().await;
  Mock::given(path("/api/teams"))
    .and(query_param("search", "slow"))
    .respond_with(ok(json!({"data": [{"id": 1, "name": "slow"}]})).set_delay(Duration::from_millis(300)))
    .mount(&server)
    .await;
  Mock::given(path("/api/teams"))
    .and(query_param("search", "fast"))
    .respond_with(ok(json!({"data": [{"id": 2, "name": "fast"}]})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let slow = ListParams::new().search("slow");
  let fast = ListParams::new().search("fast");
  let (older, newer) = tokio::join!(stores.teams.list(&slow), stores.teams.list(&fast));

  // Both calls resolve, only the newer one lands in the cache.
  assert_eq!(older.unwrap().items.len(), 1);
  assert_eq!(newer.unwrap().items.len(), 1);
  assert_eq!(stores.teams.items().ids(), vec![EntityId::Int(2)]);
  assert!(!stores.teams.state().is_loading());
}

#[tokio::test]
async fn test_delete_during_list_keeps_record_out() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/teams"))
    .respond_with(ok(json!({"data": [{"id": 3}, {"id": 4}]})).set_delay(Duration::from_millis(300)))
    .mount(&server)
    .await;
  Mock::given(method("DELETE"))
    .and(path("/api/teams/3"))
    .respond_with(ok(json!({"message": "Team deleted"})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let params = ListParams::new();
  let (listed, deleted) = tokio::join!(stores.teams.list(&params), async {
    tokio::time::sleep(Duration::from_millis(50)).await;
    stores.teams.delete(&EntityId::Int(3)).await
  });
  listed.unwrap();
  deleted.unwrap();

  assert!(stores.teams.find(&EntityId::Int(3)).is_none());
  assert!(!stores.teams.state().is_loading());
}

#[tokio::test]
async fn test_create_during_list_keeps_new_record() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/teams"))
    .respond_with(ok(json!({"data": [{"id": 4}]})).set_delay(Duration::from_millis(300)))
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/api/teams"))
    .respond_with(ok(json!({"data": {"id": 9, "name": "Ops"}})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let params = ListParams::new();
  let (listed, created) = tokio::join!(stores.teams.list(&params), async {
    tokio::time::sleep(Duration::from_millis(50)).await;
    stores.teams.create(&payload_from(json!({"name": "Ops"}))).await
  });
  listed.unwrap();
  created.unwrap();

  assert!(stores.teams.find(&EntityId::Int(9)).is_some());
}

#[tokio::test]
async fn test_superseded_missing_record_is_not_an_error() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/teams/1"))
    .respond_with(ResponseTemplate::new(404).set_delay(Duration::from_millis(300)))
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/api/teams/2"))
    .respond_with(ok(json!({"data": {"id": 2, "name": "Ops"}})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let (missing, present) = (EntityId::Int(1), EntityId::Int(2));
  let (older, newer) = tokio::join!(stores.teams.get(&missing), stores.teams.get(&present));

  assert!(older.unwrap().is_none());
  assert!(newer.unwrap().is_some());
  assert_eq!(stores.teams.current().and_then(|t| t.id()), Some(EntityId::Int(2)));
  assert!(stores.teams.state().error().is_none());
}

#[tokio::test]
async fn test_fixed_cost_summary_follows_cache() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/fixed-costs/all/paginated"))
    .respond_with(ok(json!({
      "data": {
        "data": [{"id": 1, "budget": 100, "actual": 80}, {"id": 2, "budget": "50.00", "actual": 60}],
        "meta": {"current_page": 1, "last_page": 1, "total": 2}
      }
    })))
    .mount(&server)
    .await;
  Mock::given(method("DELETE"))
    .and(path("/api/fixed-costs/2"))
    .respond_with(ok(json!({"message": "Deleted"})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let fixed = &stores.finance.fixed_costs;
  fixed.list_paginated(&ListParams::new()).await.unwrap();
  assert_eq!(
    fixed.summary(),
    BudgetSummary {
      total_budget: 150.0,
      total_actual: 140.0,
      variance: 10.0,
      total_items: 2
    }
  );

  fixed.delete(&EntityId::Int(2)).await.unwrap();
  assert_eq!(fixed.summary().variance, 20.0);
  assert_eq!(fixed.summary().total_items, 1);
}

#[tokio::test]
async fn test_payroll_export_default_filename() {
  let server = MockServer::start().await;
  Mock::given(path("/api/payrolls/9/export-excel"))
    .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let blob = stores.payroll.export_excel(&EntityId::Int(9)).await.unwrap();
  assert_eq!(blob.filename.as_deref(), Some("Payroll_Export.xlsx"));
  assert_eq!(blob.bytes, vec![1, 2, 3]);
  assert_eq!(stores.payroll.state().success(), Some("Excel file downloaded successfully"));
}

#[tokio::test]
async fn test_leave_request_approval_reconciles_cached_copy() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/my-leave-requests"))
    .respond_with(ok(json!({"data": [{"id": 4, "status": "pending"}]})))
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/api/leave-requests/approve/4"))
    .respond_with(ok(json!({"message": "Approved", "data": {"id": 4, "status": "approved"}})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  stores.leave_requests.mine(&ListParams::new()).await.unwrap();
  stores.leave_requests.approve(&EntityId::Int(4)).await.unwrap();

  let cached = stores.leave_requests.find(&EntityId::Int(4)).unwrap();
  assert_eq!(cached.str_field("status"), Some("approved"));
  assert_eq!(stores.leave_requests.state().success(), Some("Approved"));
}

#[tokio::test]
async fn test_validation_errors_are_surfaced_verbatim() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/api/teams"))
    .respond_with(ResponseTemplate::new(422).set_body_json(json!({
      "message": "The name field is required.",
      "errors": {"name": ["The name field is required."]}
    })))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let err = stores.teams.create(&payload_from(json!({}))).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);

  let state = stores.teams.state();
  let error = state.error().unwrap();
  assert_eq!(error.message, "The name field is required.");
  assert_eq!(error.fields["name"], vec!["The name field is required.".to_string()]);
  assert!(stores.teams.items().is_empty());
}

#[tokio::test]
async fn test_company_profile_is_first_record() {
  let server = MockServer::start().await;
  Mock::given(path("/api/company-about"))
    .respond_with(ok(json!({"data": [{"id": 1, "name": "Acme"}, {"id": 2}]})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let company = stores.company_about.fetch().await.unwrap().unwrap();
  assert_eq!(company.str_field("name"), Some("Acme"));
  assert_eq!(stores.company_about.current(), Some(company));
}

#[tokio::test]
async fn test_failed_company_profile_load_clears_stale_copy() {
  let server = MockServer::start().await;
  Mock::given(path("/api/company-about"))
    .respond_with(ok(json!({"data": [{"id": 1, "name": "Acme"}]})))
    .up_to_n_times(1)
    .mount(&server)
    .await;
  Mock::given(path("/api/company-about"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  stores.company_about.fetch().await.unwrap();
  assert!(stores.company_about.current().is_some());

  assert!(stores.company_about.fetch().await.is_err());
  assert!(stores.company_about.current().is_none());
  assert!(stores.company_about.state().error().is_some());
}

#[tokio::test]
async fn test_string_ids_stay_in_one_path_segment() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/vendors/INV%2F2024%2F07"))
    .respond_with(ok(json!({"data": {"id": "INV/2024/07", "name": "Paper Co"}})))
    .expect(1)
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  let vendor = stores.vendors.vendors.get(&EntityId::from("INV/2024/07")).await.unwrap().unwrap();
  assert_eq!(vendor.str_field("name"), Some("Paper Co"));
  assert!(stores.vendors.vendors.get(&EntityId::from("..")).await.is_err());
}

#[tokio::test]
async fn test_reset_all_forgets_everything() {
  let server = MockServer::start().await;
  Mock::given(path("/api/employees"))
    .respond_with(ok(json!({"data": [{"id": 1}]})))
    .mount(&server)
    .await;

  let stores = stores_for(&server);
  stores.employees.list(&ListParams::new()).await.unwrap();
  stores.reset_all();
  assert!(stores.employees.items().is_empty());
  assert_eq!(stores.employees.meta(), PageMeta::default());
}
