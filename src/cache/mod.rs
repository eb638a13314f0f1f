//! In-memory record cache.
//!
//! Each store owns one [`Collection`] holding the page it fetched last, plus
//! whatever single records it tracks. Nothing here touches the network.

mod collection;
mod entity;

pub use collection::Collection;
pub use entity::{Entity, EntityId};
