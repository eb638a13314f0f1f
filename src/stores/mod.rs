//! Entity stores for the HR backend.
//!
//! Each store is a [`ResourceStore`] configured by a [`crate::store::ResourceSpec`]
//! plus the handful of endpoints that are specific to that entity. Stores deref
//! to their resource store, so the generic list/get/create/update/delete
//! operations are available on all of them.

use serde_json::Value;

use crate::api::ApiClient;
use crate::cache::Entity;
use crate::store::ResourceStore;

macro_rules! resource_wrapper {
  ($name:ident) => {
    impl std::ops::Deref for $name {
      type Target = crate::store::ResourceStore;

      fn deref(&self) -> &Self::Target {
        &self.store
      }
    }
  };
}

pub mod attendance;
pub mod company_about;
pub mod company_finance;
pub mod credentials;
pub mod dashboard;
pub mod employees;
pub mod files_company;
pub mod leave_requests;
pub mod options;
pub mod payroll;
pub mod projects;
pub mod teams;
pub mod vendors;

pub use attendance::AttendanceStore;
pub use company_about::CompanyAboutStore;
pub use company_finance::{CompanyFinanceStore, FixedCostStore};
pub use credentials::CredentialStore;
pub use dashboard::DashboardStore;
pub use employees::EmployeeStore;
pub use files_company::FilesCompanyStore;
pub use leave_requests::LeaveRequestStore;
pub use options::{OptionKind, OptionStore};
pub use payroll::PayrollStore;
pub use projects::{ProjectStore, ProjectTaskStore};
pub use teams::{LeadSelection, TeamStore};
pub use vendors::VendorStores;

/// Records shown on "latest" widgets when no limit is given.
pub const LATEST_LIMIT: u64 = 5;

/// Decode a list value (bare array or `{data: [...]}`) into records.
pub(crate) fn entities(value: Value) -> Vec<Entity> {
  let items = match value {
    Value::Array(items) => items,
    Value::Object(mut obj) => match obj.remove("data") {
      Some(Value::Array(items)) => items,
      _ => Vec::new(),
    },
    _ => Vec::new(),
  };
  items.into_iter().filter_map(Entity::from_value).collect()
}

/// Every entity store, built once per session and shared by clone.
#[derive(Debug, Clone)]
pub struct Stores {
  pub employees: EmployeeStore,
  pub teams: TeamStore,
  pub projects: ProjectStore,
  pub tasks: ProjectTaskStore,
  pub attendance: AttendanceStore,
  pub payroll: PayrollStore,
  pub vendors: VendorStores,
  pub finance: CompanyFinanceStore,
  pub files: FilesCompanyStore,
  pub leave_requests: LeaveRequestStore,
  pub credentials: CredentialStore,
  pub options: OptionStore,
  pub dashboard: DashboardStore,
  pub company_about: CompanyAboutStore,
}

impl Stores {
  pub fn new(client: ApiClient) -> Self {
    Self {
      employees: EmployeeStore::new(client.clone()),
      teams: TeamStore::new(client.clone()),
      projects: ProjectStore::new(client.clone()),
      tasks: ProjectTaskStore::new(client.clone()),
      attendance: AttendanceStore::new(client.clone()),
      payroll: PayrollStore::new(client.clone()),
      vendors: VendorStores::new(client.clone()),
      finance: CompanyFinanceStore::new(client.clone()),
      files: FilesCompanyStore::new(client.clone()),
      leave_requests: LeaveRequestStore::new(client.clone()),
      credentials: CredentialStore::new(client.clone()),
      options: OptionStore::new(client.clone()),
      dashboard: DashboardStore::new(client.clone()),
      company_about: CompanyAboutStore::new(client),
    }
  }

  /// Drop every cached record, e.g. after logout.
  pub fn reset_all(&self) {
    for store in self.all() {
      store.reset();
    }
    self.finance.reset_overview();
  }

  /// Every underlying resource store, for bulk operations.
  pub fn all(&self) -> Vec<&ResourceStore> {
    let mut all: Vec<&ResourceStore> = vec![
      &*self.employees,
      &*self.teams,
      &*self.projects,
      &*self.tasks,
      &*self.attendance,
      &*self.payroll,
      self.payroll.payslips(),
      &self.finance.operational,
      &*self.finance.fixed_costs,
      &*self.files,
      &*self.leave_requests,
      &*self.credentials,
      &*self.dashboard,
      &*self.company_about,
    ];
    all.extend(self.vendors.all());
    all.extend(self.options.all());
    all
  }
}
