use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::header::{HeaderMap, ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::envelope::Envelope;
use super::form::{form_from, Upload};
use super::error::{ApiError, ApiResult, FieldErrors};
use super::payload::Payload;
use crate::config::ApiConfig;

/// Binary response body handed to the caller untouched (Excel exports, PDF payslips).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
  pub bytes: Vec<u8>,
  pub content_type: Option<String>,
  pub filename: Option<String>,
}

impl Blob {
  /// Filename from `Content-Disposition`, or `fallback`.
  pub fn filename_or<'a>(&'a self, fallback: &'a str) -> &'a str {
    self.filename.as_deref().unwrap_or(fallback)
  }
}

/// HTTP client for the HR backend.
///
/// Cloning is cheap: clones share the connection pool and the token slot, so
/// a login through one clone authenticates all of them.
#[derive(Clone)]
pub struct ApiClient {
  http: reqwest::Client,
  base_url: Url,
  token: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for ApiClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ApiClient")
      .field("base_url", &self.base_url.as_str())
      .field("has_token", &self.has_token())
      .finish()
  }
}

impl ApiClient {
  pub fn new(config: &ApiConfig) -> ApiResult<Self> {
    let mut base_url = Url::parse(&config.base_url)?;
    // Url::join drops the last segment unless the base ends with a slash.
    if !base_url.path().ends_with('/') {
      let path = format!("{}/", base_url.path());
      base_url.set_path(&path);
    }

    let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));
    if let Some(agent) = &config.user_agent {
      builder = builder.user_agent(agent.clone());
    }
    let http = builder.build()?;

    Ok(Self {
      http,
      base_url,
      token: Arc::new(RwLock::new(None)),
    })
  }

  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  pub fn set_token(&self, token: impl Into<String>) {
    if let Ok(mut slot) = self.token.write() {
      *slot = Some(token.into());
    }
  }

  pub fn clear_token(&self) {
    if let Ok(mut slot) = self.token.write() {
      *slot = None;
    }
  }

  pub fn has_token(&self) -> bool {
    self.token().is_some()
  }

  fn token(&self) -> Option<String> {
    self.token.read().ok().and_then(|t| t.clone())
  }

  /// Resolve `path` under the base URL. Dot segments (also percent-encoded
  /// ones, which `Url::join` resolves too) are refused.
  fn url(&self, path: &str) -> ApiResult<Url> {
    let has_dot_segment = path.split('/').any(|segment| {
      let segment = segment.to_ascii_lowercase().replace("%2e", ".");
      segment == "." || segment == ".."
    });
    if has_dot_segment {
      return Err(ApiError::Unexpected(format!("dot segment in request path: {}", path)));
    }
    Ok(self.base_url.join(path.trim_start_matches('/'))?)
  }

  pub async fn get(&self, path: &str, query: &[(String, String)]) -> ApiResult<Envelope> {
    let builder = self.http.get(self.url(path)?).query(query);
    self.send_json(Method::GET, path, builder).await
  }

  pub async fn post(&self, path: &str, body: &Payload) -> ApiResult<Envelope> {
    let builder = self.http.post(self.url(path)?).json(body);
    self.send_json(Method::POST, path, builder).await
  }

  pub async fn put(&self, path: &str, body: &Payload) -> ApiResult<Envelope> {
    let builder = self.http.put(self.url(path)?).json(body);
    self.send_json(Method::PUT, path, builder).await
  }

  /// POST with a `_method` override, for backends that only route form
  /// method spoofing (`POST /teams/3` + `_method=PUT`).
  pub async fn post_with_method(&self, path: &str, body: &Payload, method: &str) -> ApiResult<Envelope> {
    let mut body = body.clone();
    body.insert("_method".to_string(), Value::String(method.to_string()));
    self.post(path, &body).await
  }

  /// POST a `multipart/form-data` body. Laravel only parses forms on POST,
  /// so updates go through here with `_method=PUT` in `body`.
  pub async fn post_multipart(&self, path: &str, body: &Payload, uploads: &[Upload]) -> ApiResult<Envelope> {
    let form = form_from(body, uploads)?;
    let builder = self.http.post(self.url(path)?).multipart(form);
    self.send_json(Method::POST, path, builder).await
  }

  pub async fn delete(&self, path: &str) -> ApiResult<Envelope> {
    let builder = self.http.delete(self.url(path)?);
    self.send_json(Method::DELETE, path, builder).await
  }

  /// GET a binary payload. The body is not parsed.
  pub async fn download(&self, path: &str) -> ApiResult<Blob> {
    let builder = self.http.get(self.url(path)?);
    let response = self.send(Method::GET, path, builder).await?;

    let headers = response.headers().clone();
    let bytes = response.bytes().await?;

    Ok(Blob {
      bytes: bytes.to_vec(),
      content_type: header_str(&headers, CONTENT_TYPE),
      filename: header_str(&headers, CONTENT_DISPOSITION)
        .as_deref()
        .and_then(filename_from_disposition),
    })
  }

  /// POST whose outcome nobody waits for. Failures are logged and dropped.
  ///
  /// The request keeps the token that is set now, so the caller may clear it
  /// right after spawning.
  pub fn spawn_detached(&self, path: &str, body: Payload) -> tokio::task::JoinHandle<()> {
    let client = Self {
      http: self.http.clone(),
      base_url: self.base_url.clone(),
      token: Arc::new(RwLock::new(self.token())),
    };
    let path = path.to_string();
    tokio::spawn(async move {
      if let Err(e) = client.post(&path, &body).await {
        debug!(path = %path, error = %e, "detached request failed");
      }
    })
  }

  async fn send_json(&self, method: Method, path: &str, builder: RequestBuilder) -> ApiResult<Envelope> {
    let response = self.send(method, path, builder).await?;
    let bytes = response.bytes().await?;

    let body = if bytes.iter().all(|b| b.is_ascii_whitespace()) {
      Value::Null
    } else {
      serde_json::from_slice(&bytes)?
    };

    Ok(Envelope::from_body(body))
  }

  async fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> ApiResult<Response> {
    let mut builder = builder.header(ACCEPT, "application/json");
    if let Some(token) = self.token() {
      builder = builder.bearer_auth(token);
    }

    debug!(%method, path, "dispatching request");
    let response = builder.send().await.map_err(|e| {
      warn!(%method, path, error = %e, "request failed before a response arrived");
      ApiError::Network(e)
    })?;

    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }

    let bytes = response.bytes().await.unwrap_or_default();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    let err = error_from_status(status, &body, path);
    if !err.is_not_found() {
      warn!(%method, path, status = status.as_u16(), "request rejected");
    }
    Err(err)
  }
}

fn error_from_status(status: StatusCode, body: &Value, path: &str) -> ApiError {
  let message = body
    .get("message")
    .and_then(|m| m.as_str())
    .unwrap_or_default()
    .to_string();

  match status {
    StatusCode::NOT_FOUND => ApiError::NotFound(path.trim_start_matches('/').to_string()),
    StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
    StatusCode::FORBIDDEN => ApiError::Forbidden(message),
    s if s.is_client_error() => ApiError::Validation {
      status: s.as_u16(),
      message,
      fields: field_errors(body.get("errors")),
    },
    s => ApiError::Server {
      status: s.as_u16(),
      message,
    },
  }
}

/// `errors` is usually `{field: [messages]}` but single strings show up too.
fn field_errors(errors: Option<&Value>) -> FieldErrors {
  let Some(Value::Object(obj)) = errors else {
    return FieldErrors::new();
  };

  obj
    .iter()
    .map(|(field, messages)| {
      let messages = match messages {
        Value::Array(items) => items
          .iter()
          .filter_map(|m| m.as_str().map(String::from))
          .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
      };
      (field.clone(), messages)
    })
    .collect()
}

fn header_str(headers: &HeaderMap, name: reqwest::header::HeaderName) -> Option<String> {
  headers
    .get(name)
    .and_then(|v| v.to_str().ok())
    .map(String::from)
}

/// Extract `filename` from a `Content-Disposition` header value.
pub fn filename_from_disposition(value: &str) -> Option<String> {
  value.split(';').map(str::trim).find_map(|part| {
    let rest = part.strip_prefix("filename=")?;
    let name = rest.trim_matches('"');
    if name.is_empty() {
      None
    } else {
      Some(name.to_string())
    }
  })
}
