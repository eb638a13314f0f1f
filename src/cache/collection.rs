//! In-memory collection cache owned by a single store.

use serde::Serialize;
use serde_json::{Map, Value};

use super::entity::{Entity, EntityId};

/// Ordered records as the server returned them. Holds exactly one page (or
/// one unpaginated list); it never accumulates across fetches.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Collection {
  items: Vec<Entity>,
}

impl Collection {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replace the whole collection with a freshly fetched page.
  pub fn replace(&mut self, items: Vec<Entity>) {
    self.items = items;
  }

  /// Add a record at the front (most recent). An existing copy is dropped first.
  pub fn prepend(&mut self, entity: Entity) {
    if let Some(id) = entity.id() {
      self.items.retain(|e| !e.has_id(&id));
    }
    self.items.insert(0, entity);
  }

  /// Replace the record with the same id in place, or prepend it.
  ///
  /// Returns true if an existing record was replaced.
  pub fn upsert(&mut self, entity: Entity) -> bool {
    let replaced = match entity.id() {
      Some(id) => match self.position(&id) {
        Some(idx) => {
          self.items[idx] = entity.clone();
          true
        }
        None => false,
      },
      None => false,
    };

    if !replaced {
      self.items.insert(0, entity);
    }
    replaced
  }

  /// Overwrite fields of the record with `id`. Returns false when absent.
  pub fn patch(&mut self, id: &EntityId, fields: &Map<String, Value>) -> bool {
    match self.items.iter_mut().find(|e| e.has_id(id)) {
      Some(entity) => {
        entity.merge(fields);
        true
      }
      None => false,
    }
  }

  pub fn remove(&mut self, id: &EntityId) -> Option<Entity> {
    let idx = self.position(id)?;
    Some(self.items.remove(idx))
  }

  pub fn find(&self, id: &EntityId) -> Option<&Entity> {
    self.items.iter().find(|e| e.has_id(id))
  }

  pub fn contains(&self, id: &EntityId) -> bool {
    self.position(id).is_some()
  }

  fn position(&self, id: &EntityId) -> Option<usize> {
    self.items.iter().position(|e| e.has_id(id))
  }

  pub fn ids(&self) -> Vec<EntityId> {
    self.items.iter().filter_map(|e| e.id()).collect()
  }

  pub fn clear(&mut self) {
    self.items.clear();
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
    self.items.iter()
  }

  pub fn as_slice(&self) -> &[Entity] {
    &self.items
  }
}

impl FromIterator<Entity> for Collection {
  fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
    Self {
      items: iter.into_iter().collect(),
    }
  }
}
