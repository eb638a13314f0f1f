//! Summary figures computed from records already held in memory.
//!
//! Missing or non-numeric fields count as zero. Numeric strings (`"1500.00"`,
//! the way decimal columns come back from the backend) are parsed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::Entity;

/// Coerce a JSON value to a number, zero when that is not possible.
pub fn number(value: Option<&Value>) -> f64 {
  let n = match value {
    Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
    Some(Value::String(s)) => s.trim().replace(',', "").parse().unwrap_or(0.0),
    _ => 0.0,
  };
  if n.is_finite() {
    n
  } else {
    0.0
  }
}

pub fn sum_field<'a>(items: impl IntoIterator<Item = &'a Entity>, field: &str) -> f64 {
  items.into_iter().map(|e| number(e.get(field))).sum()
}

pub fn count_where<'a>(items: impl IntoIterator<Item = &'a Entity>, predicate: impl Fn(&Entity) -> bool) -> usize {
  items.into_iter().filter(|e| predicate(e)).count()
}

/// Count records per distinct value of `field`. Records without it are skipped.
pub fn count_by<'a>(items: impl IntoIterator<Item = &'a Entity>, field: &str) -> BTreeMap<String, usize> {
  let mut counts = BTreeMap::new();
  for item in items {
    let key = match item.get(field) {
      Some(Value::String(s)) => s.clone(),
      Some(Value::Null) | None => continue,
      Some(other) => other.to_string(),
    };
    *counts.entry(key).or_insert(0) += 1;
  }
  counts
}

/// Budget versus actual over a set of cost items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
  pub total_budget: f64,
  pub total_actual: f64,
  /// `total_budget - total_actual`; positive means under budget.
  pub variance: f64,
  pub total_items: usize,
}

impl BudgetSummary {
  pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Entity> + Clone) -> Self {
    Self::from_fields(items, "budget", "actual")
  }

  pub fn from_fields<'a>(items: impl IntoIterator<Item = &'a Entity> + Clone, budget: &str, actual: &str) -> Self {
    let total_budget = sum_field(items.clone(), budget);
    let total_actual = sum_field(items.clone(), actual);
    Self {
      total_budget,
      total_actual,
      variance: total_budget - total_actual,
      total_items: items.into_iter().count(),
    }
  }
}

/// Traffic-light status counts used by resource tracking sheets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
  pub total_status_green: usize,
  pub total_status_amber: usize,
  pub total_status_red: usize,
}

impl StatusCounts {
  pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Entity>, field: &str) -> Self {
    let counts = count_by(items, field);
    let get = |k: &str| {
      counts
        .iter()
        .filter(|(key, _)| key.eq_ignore_ascii_case(k))
        .map(|(_, n)| *n)
        .sum()
    };
    Self {
      total_status_green: get("green"),
      total_status_amber: get("amber"),
      total_status_red: get("red"),
    }
  }
}
