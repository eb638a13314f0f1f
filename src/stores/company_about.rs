use crate::api::{ApiClient, ApiResult, ListParams};
use crate::cache::Entity;
use crate::store::{ResourceSpec, ResourceStore};

/// The company profile. The backend serves it as a list of one.
#[derive(Debug, Clone)]
pub struct CompanyAboutStore {
  store: ResourceStore,
}

resource_wrapper!(CompanyAboutStore);

impl CompanyAboutStore {
  pub fn new(client: ApiClient) -> Self {
    Self {
      store: ResourceStore::new(client, ResourceSpec::new("company profile", "company-about")),
    }
  }

  /// Load the profile into the current slot; `None` when none exists yet.
  /// A failed load leaves the slot empty rather than showing a stale profile.
  pub async fn fetch(&self) -> ApiResult<Option<Entity>> {
    match self.store.list(&ListParams::new()).await {
      Ok(page) => {
        let company = page.items.into_iter().next();
        self.store.set_current(company.clone());
        Ok(company)
      }
      Err(e) => {
        self.store.set_current(None);
        Err(e)
      }
    }
  }
}
