//! Lookup lists used to fill form dropdowns.

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiResult, ListParams};
use crate::cache::Collection;
use crate::store::{Page, ResourceSpec, ResourceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
  Departments,
  EmploymentTypes,
  JobStatuses,
  LeaveTypes,
  WorkLocations,
  SkillLevels,
}

impl OptionKind {
  pub const ALL: [OptionKind; 6] = [
    OptionKind::Departments,
    OptionKind::EmploymentTypes,
    OptionKind::JobStatuses,
    OptionKind::LeaveTypes,
    OptionKind::WorkLocations,
    OptionKind::SkillLevels,
  ];

  pub fn path(self) -> &'static str {
    match self {
      OptionKind::Departments => "options/departments",
      OptionKind::EmploymentTypes => "options/employment-types",
      OptionKind::JobStatuses => "options/job-statuses",
      OptionKind::LeaveTypes => "options/leave-types",
      OptionKind::WorkLocations => "options/work-locations",
      OptionKind::SkillLevels => "options/skill-levels",
    }
  }

  fn name(self) -> &'static str {
    match self {
      OptionKind::Departments => "department",
      OptionKind::EmploymentTypes => "employment type",
      OptionKind::JobStatuses => "job status",
      OptionKind::LeaveTypes => "leave type",
      OptionKind::WorkLocations => "work location",
      OptionKind::SkillLevels => "skill level",
    }
  }
}

/// One cached list per option kind.
#[derive(Debug, Clone)]
pub struct OptionStore {
  stores: [ResourceStore; 6],
}

impl OptionStore {
  pub fn new(client: ApiClient) -> Self {
    Self {
      stores: OptionKind::ALL.map(|kind| ResourceStore::new(client.clone(), ResourceSpec::new(kind.name(), kind.path()))),
    }
  }

  pub fn store(&self, kind: OptionKind) -> &ResourceStore {
    &self.stores[kind as usize]
  }

  pub async fn fetch(&self, kind: OptionKind) -> ApiResult<Page> {
    self.store(kind).list(&ListParams::new()).await
  }

  /// Fetch every lookup list concurrently. Each result is reported separately.
  pub async fn fetch_all(&self) -> Vec<(OptionKind, ApiResult<Page>)> {
    let fetches = OptionKind::ALL
      .into_iter()
      .map(|kind| async move { (kind, self.fetch(kind).await) });
    join_all(fetches).await
  }

  pub fn get(&self, kind: OptionKind) -> Collection {
    self.store(kind).items()
  }

  pub fn all(&self) -> Vec<&ResourceStore> {
    self.stores.iter().collect()
  }
}
