//! Stored credential accounts (shared logins for internal systems).

use serde_json::{json, Value};

use crate::api::{ApiClient, ApiResult, FieldMap, Payload};
use crate::cache::{Entity, EntityId};
use crate::store::{ResourceSpec, ResourceStore};

#[derive(Debug, Clone)]
pub struct CredentialStore {
  store: ResourceStore,
}

resource_wrapper!(CredentialStore);

impl CredentialStore {
  pub fn new(client: ApiClient) -> Self {
    Self {
      store: ResourceStore::new(client, Self::spec()),
    }
  }

  pub fn spec() -> ResourceSpec {
    ResourceSpec::new("credential account", "credential-accounts")
      .create_fields(
        FieldMap::only(&["label_password", "username_email", "password"])
          .nullable("website")
          .nullable("notes"),
      )
      .update_fields(
        FieldMap::only(&["label_password", "username_email"])
          .nullable("website")
          .nullable("notes")
          .non_empty("password"),
      )
  }

  /// Account counters. `total_accounts` follows the last list response,
  /// whichever shape it came in.
  pub fn statistics(&self) -> Value {
    json!({
      "total_accounts": self.store.meta().total,
      "total_systems": 0,
      "total_users": 0,
      "last_updated": null,
    })
  }

  /// Update, then re-read the record so the list shows what the server stored.
  /// An empty or missing password leaves the stored one unchanged.
  pub async fn update(&self, id: &EntityId, payload: &Payload) -> ApiResult<Option<Entity>> {
    self.store.update(id, payload).await?;
    self.store.get(id).await
  }

  pub fn clear(&self) {
    self.store.reset();
  }
}
