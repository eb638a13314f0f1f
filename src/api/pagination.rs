//! List parameters and pagination metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_PER_PAGE: u64 = 10;

/// How an endpoint family names its page-size parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageStyle {
  /// `?page=&per_page=&search=` (employees, teams, projects, payroll)
  #[default]
  PerPage,
  /// `?row_per_page=&search=` (vendors, fixed costs). Search is always sent.
  RowPerPage,
}

/// Internal list parameter set, mapped per endpoint by [`ListParams::to_query`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
  pub search: Option<String>,
  pub page: Option<u64>,
  pub per_page: Option<u64>,
  /// Extra filters forwarded verbatim (`status`, `date`, `limit`, ...).
  #[serde(default)]
  pub filters: Vec<(String, String)>,
}

impl ListParams {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn search(mut self, search: impl Into<String>) -> Self {
    self.search = Some(search.into());
    self
  }

  pub fn page(mut self, page: u64) -> Self {
    self.page = Some(page);
    self
  }

  pub fn per_page(mut self, per_page: u64) -> Self {
    self.per_page = Some(per_page);
    self
  }

  pub fn filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
    self.filters.push((key.into(), value.to_string()));
    self
  }

  pub fn to_query(&self, style: PageStyle) -> Vec<(String, String)> {
    let mut query = Vec::new();

    match style {
      PageStyle::PerPage => {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
          query.push(("search".to_string(), search.to_string()));
        }
        if let Some(page) = self.page {
          query.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
          query.push(("per_page".to_string(), per_page.to_string()));
        }
      }
      PageStyle::RowPerPage => {
        if let Some(page) = self.page {
          query.push(("page".to_string(), page.to_string()));
        }
        query.push((
          "row_per_page".to_string(),
          self.per_page.unwrap_or(DEFAULT_PER_PAGE).to_string(),
        ));
        query.push((
          "search".to_string(),
          self.search.clone().unwrap_or_default(),
        ));
      }
    }

    query.extend(self.filters.iter().cloned());
    query
  }
}

/// Pagination metadata, replaced wholesale on every paginated fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
  pub current_page: u64,
  pub last_page: u64,
  pub per_page: u64,
  pub total: u64,
}

impl Default for PageMeta {
  fn default() -> Self {
    Self {
      current_page: 1,
      last_page: 1,
      per_page: DEFAULT_PER_PAGE,
      total: 0,
    }
  }
}

impl PageMeta {
  /// Build from a wire `meta` object. Fields the backend leaves out are taken
  /// from the request (`per_page`, `page`) or the defaults.
  pub fn from_wire(meta: &Value, requested: &ListParams) -> Self {
    let field = |name: &str| meta.get(name).and_then(as_u64);
    let defaults = PageMeta::default();

    let per_page = field("per_page")
      .or(requested.per_page)
      .unwrap_or(defaults.per_page);
    let total = field("total").unwrap_or(defaults.total);

    Self {
      current_page: field("current_page")
        .or(requested.page)
        .unwrap_or(defaults.current_page),
      last_page: field("last_page").unwrap_or_else(|| {
        if per_page == 0 {
          1
        } else {
          total.div_ceil(per_page).max(1)
        }
      }),
      per_page,
      total,
    }
  }

  pub fn has_next(&self) -> bool {
    self.current_page < self.last_page
  }
}

/// Laravel sometimes serializes integers as strings.
fn as_u64(value: &Value) -> Option<u64> {
  match value {
    Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
}
