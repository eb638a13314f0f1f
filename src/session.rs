//! Authentication: token acquisition, the logged-in user and permission checks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{payload_from, ApiClient, ApiError, ApiResult, Payload};
use crate::cache::Entity;
use crate::store::RequestState;

const PROFILE_UPDATED: &str = "Profile updated successfully";

#[derive(Debug, Default)]
struct Inner {
  user: Option<Entity>,
  state: RequestState,
}

/// The auth collaborator shared by every store.
///
/// The token lives in the [`ApiClient`], so logging in through a session
/// authenticates every store built on the same client.
#[derive(Debug, Clone)]
pub struct Session {
  client: ApiClient,
  inner: Arc<Mutex<Inner>>,
}

impl Session {
  pub fn new(client: ApiClient) -> Self {
    Self {
      client,
      inner: Arc::new(Mutex::new(Inner::default())),
    }
  }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Exchange credentials for a token and install it on the client.
  pub async fn login(&self, email: &str, password: &str) -> ApiResult<()> {
    self.lock().state.begin();
    let body = payload_from(json!({"email": email, "password": password}));

    let result = self.client.post("login", &body).await.and_then(|env| {
      let message = env.message.clone();
      let token = env
        .into_value()
        .get("token")
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| ApiError::Unexpected("login response carried no token".to_string()))?;
      Ok((token, message))
    });

    let mut s = self.lock();
    match result {
      Ok((token, message)) => {
        self.client.set_token(token);
        info!(email, "logged in");
        s.state.succeed(message);
        Ok(())
      }
      Err(e) => {
        s.state.fail(&e);
        Err(e)
      }
    }
  }

  /// Load the logged-in user from `/me`.
  ///
  /// A 401 means the token is no longer valid: it is dropped and
  /// [`ApiError::Unauthorized`] is returned without recording an error.
  pub async fn check_auth(&self) -> ApiResult<Entity> {
    self.lock().state.begin();

    let result = self.client.get("me", &[]).await;

    let mut s = self.lock();
    match result {
      Ok(env) => match env.into_single().and_then(Entity::from_value) {
        Some(user) => {
          s.user = Some(user.clone());
          s.state.succeed(None);
          Ok(user)
        }
        None => {
          let e = ApiError::Unexpected("/me returned no user".to_string());
          s.state.fail(&e);
          Err(e)
        }
      },
      Err(e) if e.is_unauthorized() => {
        debug!("token rejected, clearing it");
        self.client.clear_token();
        s.user = None;
        s.state.settle_quiet();
        Err(ApiError::Unauthorized)
      }
      Err(e) => {
        s.state.fail(&e);
        Err(e)
      }
    }
  }

  /// Tell the backend to revoke the token without waiting for it, then
  /// forget the token and the user locally.
  ///
  /// The handle of the revocation request is returned for callers that are
  /// about to exit; dropping it does not cancel the request.
  pub async fn logout(&self) -> Option<JoinHandle<()>> {
    let request = self
      .client
      .has_token()
      .then(|| self.client.spawn_detached("logout", Payload::new()));
    self.client.clear_token();
    let mut s = self.lock();
    s.user = None;
    s.state.clear();
    info!("logged out");
    request
  }

  /// Update the caller's own profile and reload it.
  pub async fn update_profile(&self, payload: &Payload) -> ApiResult<Option<Entity>> {
    self.lock().state.begin();

    let result = self.client.post_with_method("me", payload, "PUT").await;

    let message = match result {
      Ok(env) => env.message.unwrap_or_else(|| PROFILE_UPDATED.to_string()),
      Err(e) => {
        self.lock().state.fail(&e);
        return Err(e);
      }
    };

    match self.check_auth().await {
      Ok(user) => {
        self.lock().state.succeed(Some(message));
        Ok(Some(user))
      }
      Err(e) => {
        self.lock().state.settle_quiet();
        Err(e)
      }
    }
  }

  pub fn user(&self) -> Option<Entity> {
    self.lock().user.clone()
  }

  pub fn is_authenticated(&self) -> bool {
    self.lock().user.is_some()
  }

  pub fn state(&self) -> RequestState {
    self.lock().state.clone()
  }

  /// Whether the user holds `permission`. No user means no permissions.
  pub fn can(&self, permission: &str) -> bool {
    self.permissions().iter().any(|p| p == permission)
  }

  pub fn can_one_of(&self, permissions: &[&str]) -> bool {
    let held = self.permissions();
    permissions.iter().any(|p| held.iter().any(|h| h == p))
  }

  fn permissions(&self) -> Vec<String> {
    let s = self.lock();
    let Some(Value::Array(perms)) = s.user.as_ref().and_then(|u| u.get("permissions")) else {
      return Vec::new();
    };
    perms
      .iter()
      .filter_map(|p| match p {
        Value::String(name) => Some(name.clone()),
        // Some endpoints send permission objects instead of names.
        Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(String::from),
        _ => None,
      })
      .collect()
  }
}
